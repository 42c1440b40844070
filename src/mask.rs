//! Data masks and the penalty rules used to choose between them.

use crate::error::EncodeError;
use crate::matrix::MatrixBuilder;
use crate::qrcode::EccLevel;
use serde::Serialize;
use tracing::trace;

const PENALTY_N1: u32 = 3;
const PENALTY_N2: u32 = 3;
const PENALTY_N3: u32 = 40;
const PENALTY_N4: u32 = 10;

/// A mask pattern (0–7).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Serialize)]
#[serde(transparent)]
pub struct Mask(u8);

impl Mask {
    /// Creates a mask object from the given number.
    ///
    /// # Panics
    ///
    /// Panics if the number is outside the range [0, 7].
    pub const fn new(mask: u8) -> Self {
        assert!(mask <= 7, "Mask value out of range");
        Self(mask)
    }

    /// Returns the value, which is in the range [0, 7].
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Iterates over all eight masks in ascending order.
    pub fn all() -> impl Iterator<Item = Mask> {
        (0u8..8).map(Mask)
    }

    /// Whether the data module at column `x`, row `y` is inverted by this mask.
    pub fn inverts(self, x: usize, y: usize) -> bool {
        match self.0 {
            0 => (x + y) % 2 == 0,
            1 => y % 2 == 0,
            2 => x % 3 == 0,
            3 => (x + y) % 3 == 0,
            4 => (x / 3 + y / 2) % 2 == 0,
            5 => (x * y) % 2 + (x * y) % 3 == 0,
            6 => ((x * y) % 2 + (x * y) % 3) % 2 == 0,
            7 => ((x + y) % 2 + (x * y) % 3) % 2 == 0,
            _ => unreachable!(),
        }
    }
}

impl TryFrom<i32> for Mask {
    type Error = EncodeError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match u8::try_from(value) {
            Ok(mask) if mask <= 7 => Ok(Mask(mask)),
            _ => Err(EncodeError::MaskOutOfRange(value)),
        }
    }
}

impl TryFrom<u8> for Mask {
    type Error = EncodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Mask::try_from(i32::from(value))
    }
}

/// Penalty of one row or column: long runs and finder-like 1:1:3:1:1 patterns.
fn line_penalty(line: impl Iterator<Item = bool>) -> u32 {
    // Alternating run lengths, light first; a line starting dark gets an empty light run
    let mut runs: Vec<u32> = Vec::new();
    let mut color = false;
    let mut len: u32 = 0;
    for dark in line {
        if dark == color {
            len += 1;
        } else {
            runs.push(len);
            color = dark;
            len = 1;
        }
    }
    runs.push(len);

    let mut result: u32 = runs
        .iter()
        .filter(|&&n| n >= 5)
        .map(|&n| PENALTY_N1 + (n - 5))
        .sum();

    // Dark runs sit at odd indices
    for i in (5..runs.len()).step_by(2) {
        let core = runs[i] == 1
            && runs[i - 1] == 1
            && runs[i - 2] == 3
            && runs[i - 3] == 1
            && runs[i - 4] == 1;
        let light_before = runs[i - 5] >= 4;
        let light_after = runs.get(i + 1).is_some_and(|&n| n >= 4);
        if core && (light_before || light_after) {
            result += PENALTY_N3;
        }
    }
    result
}

/// Total penalty of a finished `size` x `size` grid in row-major order.
pub fn penalty_score(modules: &[bool], size: usize) -> u32 {
    assert_eq!(modules.len(), size * size);
    let at = |x: usize, y: usize| modules[y * size + x];
    let mut result = 0;

    for y in 0..size {
        result += line_penalty((0..size).map(|x| at(x, y)));
    }
    for x in 0..size {
        result += line_penalty((0..size).map(|y| at(x, y)));
    }

    for y in 0..size - 1 {
        for x in 0..size - 1 {
            let color = at(x, y);
            if color == at(x + 1, y) && color == at(x, y + 1) && color == at(x + 1, y + 1) {
                result += PENALTY_N2;
            }
        }
    }

    let dark = modules.iter().filter(|&&d| d).count();
    let total = size * size;
    // |100 * dark / total - 50|, scaled by total
    let deviation = (100 * dark).abs_diff(50 * total);
    if deviation > total {
        result += PENALTY_N4 * ((deviation - total) / (5 * total)) as u32;
    }
    result
}

/// Tries every mask on the builder's data and keeps the one with the lowest penalty.
///
/// Masks are tried in ascending order and a later one only wins with a strictly lower
/// score. The builder is left masked with the winner.
pub fn select_mask(builder: &mut MatrixBuilder, ecc_level: EccLevel) -> Mask {
    let mut scores = [0u32; 8];
    for mask in Mask::all() {
        builder.apply_mask(ecc_level, mask);
        let score = penalty_score(&builder.to_modules(), builder.size());
        trace!(mask = mask.value(), score, "mask penalty");
        scores[usize::from(mask.value())] = score;
    }
    let best = lowest_score(&scores);
    builder.apply_mask(ecc_level, best);
    best
}

/// First mask with the minimum score; ties go to the lower index.
fn lowest_score(scores: &[u32; 8]) -> Mask {
    let mut best = Mask::new(0);
    for mask in Mask::all().skip(1) {
        if scores[usize::from(mask.value())] < scores[usize::from(best.value())] {
            best = mask;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(pattern: &str) -> Vec<bool> {
        pattern.chars().map(|c| c == '#').collect()
    }

    #[test]
    fn test_mask_range() {
        assert_eq!(Mask::try_from(7u8), Ok(Mask::new(7)));
        assert_eq!(Mask::try_from(8u8), Err(EncodeError::MaskOutOfRange(8)));
        assert_eq!(Mask::try_from(-1i32), Err(EncodeError::MaskOutOfRange(-1)));
        assert_eq!(Mask::try_from(256i32), Err(EncodeError::MaskOutOfRange(256)));
        assert_eq!(Mask::all().count(), 8);
    }

    #[test]
    fn test_mask_functions() {
        assert!(Mask::new(0).inverts(0, 0));
        assert!(!Mask::new(0).inverts(1, 0));
        assert!(Mask::new(1).inverts(5, 2));
        assert!(!Mask::new(2).inverts(1, 0));
        // mask 4 groups three columns by two rows
        assert!(Mask::new(4).inverts(2, 1));
        assert!(!Mask::new(4).inverts(3, 1));
        assert!(!Mask::new(4).inverts(2, 2));
    }

    #[test]
    fn test_runs() {
        assert_eq!(line_penalty(line("....").into_iter()), 0);
        assert_eq!(line_penalty(line(".....").into_iter()), 3);
        assert_eq!(line_penalty(line("#######..").into_iter()), 5);
        assert_eq!(line_penalty(line(&".".repeat(21)).into_iter()), 19);
    }

    #[test]
    fn test_finder_like() {
        assert_eq!(line_penalty(line("....#.###.#").into_iter()), 40);
        assert_eq!(line_penalty(line("#.###.#....").into_iter()), 40);
        // no light margin on either side
        assert_eq!(line_penalty(line("#.###.#").into_iter()), 0);
        assert_eq!(line_penalty(line("...#.###.#...").into_iter()), 0);
        // both sides: one pattern
        assert_eq!(line_penalty(line("....#.###.#....").into_iter()), 40);
    }

    #[test]
    fn test_lowest_score_ties() {
        assert_eq!(lowest_score(&[9, 9, 9, 9, 9, 9, 9, 9]), Mask::new(0));
        assert_eq!(lowest_score(&[9, 4, 7, 4, 9, 9, 4, 9]), Mask::new(1));
        assert_eq!(lowest_score(&[9, 8, 7, 6, 5, 4, 3, 3]), Mask::new(6));
    }

    #[test]
    fn test_select_mask_picks_minimum() {
        use crate::bits::encode_data_codewords;
        use crate::capacity::derive_version_info;
        use crate::ecc::add_ecc_and_interleave;
        use crate::segment::{Mode, Segment};
        use crate::version::Version;

        let samples = [
            ("HELLO WORLD", 1),
            ("https://example.com/qr?id=42", 3),
            ("314159265358979", 7),
        ];
        for (text, ver) in samples {
            let mode = Mode::classify(text);
            let info = derive_version_info(Version::new(ver), mode, EccLevel::Low);
            let segment = Segment::from_text(text, mode).unwrap();
            let codewords = add_ecc_and_interleave(&encode_data_codewords(&segment, &info), &info);

            let mut builder = MatrixBuilder::new(info.version);
            builder.draw_function_patterns(info.alignment);
            builder.draw_version_bits();
            builder.draw_format_bits(EccLevel::Low, Mask::new(0));
            builder.draw_codewords(&codewords, Mask::new(0));

            let scores: Vec<u32> = Mask::all()
                .map(|mask| {
                    builder.apply_mask(EccLevel::Low, mask);
                    penalty_score(&builder.to_modules(), builder.size())
                })
                .collect();
            let min = scores.iter().copied().min().unwrap();
            let first = scores.iter().position(|&s| s == min).unwrap() as u8;

            let chosen = select_mask(&mut builder, EccLevel::Low);
            assert_eq!(chosen, Mask::new(first), "{text}");
            assert_eq!(penalty_score(&builder.to_modules(), builder.size()), min);
        }
    }

    #[test]
    fn test_density() {
        let size = 21;
        let all_dark = vec![true; size * size];
        // runs: 21 rows + 21 columns of 21 -> 42 * 19, blocks 20 * 20 * 3, density 9 * 10
        assert_eq!(penalty_score(&all_dark, size), 42 * 19 + 400 * 3 + 90);

        let checker: Vec<bool> = (0..size * size).map(|i| (i / size + i % size) % 2 == 0).collect();
        assert_eq!(penalty_score(&checker, size), 0);
    }
}
