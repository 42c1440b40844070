//! Per-version symbol capacities and the derived [`VersionInfo`].

use crate::galois::GaloisField;
use crate::qrcode::EccLevel;
use crate::segment::Mode;
use crate::version::Version;

struct VersionEntry {
    /// ECC codewords per block, indexed by [`EccLevel::ordinal`].
    ecc_per_block: [u8; 4],
    /// Number of error correction blocks, indexed by [`EccLevel::ordinal`].
    blocks: [u8; 4],
    /// Alignment pattern center coordinates (rows and columns alike).
    alignment: &'static [u8],
}

#[rustfmt::skip]
static VERSIONS: [VersionEntry; 40] = [
    VersionEntry { ecc_per_block: [7, 10, 13, 17], blocks: [1, 1, 1, 1], alignment: &[] }, // 1
    VersionEntry { ecc_per_block: [10, 16, 22, 28], blocks: [1, 1, 1, 1], alignment: &[6, 18] }, // 2
    VersionEntry { ecc_per_block: [15, 26, 18, 22], blocks: [1, 1, 2, 2], alignment: &[6, 22] }, // 3
    VersionEntry { ecc_per_block: [20, 18, 26, 16], blocks: [1, 2, 2, 4], alignment: &[6, 26] }, // 4
    VersionEntry { ecc_per_block: [26, 24, 18, 22], blocks: [1, 2, 4, 4], alignment: &[6, 30] }, // 5
    VersionEntry { ecc_per_block: [18, 16, 24, 28], blocks: [2, 4, 4, 4], alignment: &[6, 34] }, // 6
    VersionEntry { ecc_per_block: [20, 18, 18, 26], blocks: [2, 4, 6, 5], alignment: &[6, 22, 38] }, // 7
    VersionEntry { ecc_per_block: [24, 22, 22, 26], blocks: [2, 4, 6, 6], alignment: &[6, 24, 42] }, // 8
    VersionEntry { ecc_per_block: [30, 22, 20, 24], blocks: [2, 5, 8, 8], alignment: &[6, 26, 46] }, // 9
    VersionEntry { ecc_per_block: [18, 26, 24, 28], blocks: [4, 5, 8, 8], alignment: &[6, 28, 50] }, // 10
    VersionEntry { ecc_per_block: [20, 30, 28, 24], blocks: [4, 5, 8, 11], alignment: &[6, 30, 54] }, // 11
    VersionEntry { ecc_per_block: [24, 22, 26, 28], blocks: [4, 8, 10, 11], alignment: &[6, 32, 58] }, // 12
    VersionEntry { ecc_per_block: [26, 22, 24, 22], blocks: [4, 9, 12, 16], alignment: &[6, 34, 62] }, // 13
    VersionEntry { ecc_per_block: [30, 24, 20, 24], blocks: [4, 9, 16, 16], alignment: &[6, 26, 46, 66] }, // 14
    VersionEntry { ecc_per_block: [22, 24, 30, 24], blocks: [6, 10, 12, 18], alignment: &[6, 26, 48, 70] }, // 15
    VersionEntry { ecc_per_block: [24, 28, 24, 30], blocks: [6, 10, 17, 16], alignment: &[6, 26, 50, 74] }, // 16
    VersionEntry { ecc_per_block: [28, 28, 28, 28], blocks: [6, 11, 16, 19], alignment: &[6, 30, 54, 78] }, // 17
    VersionEntry { ecc_per_block: [30, 26, 28, 28], blocks: [6, 13, 18, 21], alignment: &[6, 30, 56, 82] }, // 18
    VersionEntry { ecc_per_block: [28, 26, 26, 26], blocks: [7, 14, 21, 25], alignment: &[6, 30, 58, 86] }, // 19
    VersionEntry { ecc_per_block: [28, 26, 30, 28], blocks: [8, 16, 20, 25], alignment: &[6, 34, 62, 90] }, // 20
    VersionEntry { ecc_per_block: [28, 26, 28, 30], blocks: [8, 17, 23, 25], alignment: &[6, 28, 50, 72, 94] }, // 21
    VersionEntry { ecc_per_block: [28, 28, 30, 24], blocks: [9, 17, 23, 34], alignment: &[6, 26, 50, 74, 98] }, // 22
    VersionEntry { ecc_per_block: [30, 28, 30, 30], blocks: [9, 18, 25, 30], alignment: &[6, 30, 54, 78, 102] }, // 23
    VersionEntry { ecc_per_block: [30, 28, 30, 30], blocks: [10, 20, 27, 32], alignment: &[6, 28, 54, 80, 106] }, // 24
    VersionEntry { ecc_per_block: [26, 28, 30, 30], blocks: [12, 21, 29, 35], alignment: &[6, 32, 58, 84, 110] }, // 25
    VersionEntry { ecc_per_block: [28, 28, 28, 30], blocks: [12, 23, 34, 37], alignment: &[6, 30, 58, 86, 114] }, // 26
    VersionEntry { ecc_per_block: [30, 28, 30, 30], blocks: [12, 25, 34, 40], alignment: &[6, 34, 62, 90, 118] }, // 27
    VersionEntry { ecc_per_block: [30, 28, 30, 30], blocks: [13, 26, 35, 42], alignment: &[6, 26, 50, 74, 98, 122] }, // 28
    VersionEntry { ecc_per_block: [30, 28, 30, 30], blocks: [14, 28, 38, 45], alignment: &[6, 30, 54, 78, 102, 126] }, // 29
    VersionEntry { ecc_per_block: [30, 28, 30, 30], blocks: [15, 29, 40, 48], alignment: &[6, 26, 52, 78, 104, 130] }, // 30
    VersionEntry { ecc_per_block: [30, 28, 30, 30], blocks: [16, 31, 43, 51], alignment: &[6, 30, 56, 82, 108, 134] }, // 31
    VersionEntry { ecc_per_block: [30, 28, 30, 30], blocks: [17, 33, 45, 54], alignment: &[6, 34, 60, 86, 112, 138] }, // 32
    VersionEntry { ecc_per_block: [30, 28, 30, 30], blocks: [18, 35, 48, 57], alignment: &[6, 30, 58, 86, 114, 142] }, // 33
    VersionEntry { ecc_per_block: [30, 28, 30, 30], blocks: [19, 37, 51, 60], alignment: &[6, 34, 62, 90, 118, 146] }, // 34
    VersionEntry { ecc_per_block: [30, 28, 30, 30], blocks: [19, 38, 53, 63], alignment: &[6, 30, 54, 78, 102, 126, 150] }, // 35
    VersionEntry { ecc_per_block: [30, 28, 30, 30], blocks: [20, 40, 56, 66], alignment: &[6, 24, 50, 76, 102, 128, 154] }, // 36
    VersionEntry { ecc_per_block: [30, 28, 30, 30], blocks: [21, 43, 59, 70], alignment: &[6, 28, 54, 80, 106, 132, 158] }, // 37
    VersionEntry { ecc_per_block: [30, 28, 30, 30], blocks: [22, 45, 62, 74], alignment: &[6, 32, 58, 84, 110, 136, 162] }, // 38
    VersionEntry { ecc_per_block: [30, 28, 30, 30], blocks: [24, 47, 65, 77], alignment: &[6, 26, 54, 82, 110, 138, 166] }, // 39
    VersionEntry { ecc_per_block: [30, 28, 30, 30], blocks: [25, 49, 68, 81], alignment: &[6, 30, 58, 86, 114, 142, 170] }, // 40
];

fn entry(version: Version) -> &'static VersionEntry {
    &VERSIONS[usize::from(version.value()) - 1]
}

/// Alignment pattern center coordinates; empty for version 1.
pub fn alignment_pattern_positions(version: Version) -> &'static [u8] {
    entry(version).alignment
}

pub fn num_blocks(version: Version, ecc_level: EccLevel) -> usize {
    usize::from(entry(version).blocks[ecc_level.ordinal()])
}

pub fn ecc_codewords_per_block(version: Version, ecc_level: EccLevel) -> usize {
    usize::from(entry(version).ecc_per_block[ecc_level.ordinal()])
}

/// Number of modules left for codewords once every function pattern, the format words
/// and (from version 7) the version words are placed. May not be a multiple of 8.
pub fn num_raw_data_modules(version: Version) -> usize {
    let ver = usize::from(version.value());
    let mut result = (16 * ver + 128) * ver + 64;
    let numalign = alignment_pattern_positions(version).len();
    if numalign > 0 {
        // numalign^2 patterns of 25 modules, minus the three under finders
        // and the overlap with the timing lines
        result -= (25 * numalign - 10) * numalign - 55;
    }
    if ver > 6 {
        result -= 36;
    }
    result
}

/// Bits available for mode header, count field, data and padding.
pub fn usable_data_bits(version: Version, ecc_level: EccLevel) -> usize {
    (num_raw_data_modules(version) & !7)
        - 8 * ecc_codewords_per_block(version, ecc_level) * num_blocks(version, ecc_level)
}

/// Everything the later pipeline stages need about a resolved
/// (version, mode, ECC level) triple.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VersionInfo {
    pub version: Version,
    pub mode: Mode,
    pub ecc_level: EccLevel,
    pub num_blocks: usize,
    pub ecc_per_block: usize,
    /// Log-domain generator polynomial of degree `ecc_per_block`.
    pub generator: &'static [u8],
    pub char_count_bits: u8,
    pub alignment: &'static [u8],
    pub data_bits: usize,
}

impl VersionInfo {
    pub fn data_codewords(&self) -> usize {
        self.data_bits / 8
    }

    pub fn raw_codewords(&self) -> usize {
        num_raw_data_modules(self.version) / 8
    }
}

/// Derives the [`VersionInfo`] for a triple. Pure; call again whenever any input changes.
pub fn derive_version_info(version: Version, mode: Mode, ecc_level: EccLevel) -> VersionInfo {
    let ecc_per_block = ecc_codewords_per_block(version, ecc_level);
    let generator = GaloisField::get()
        .generator_polynomial(ecc_per_block)
        .expect("capacity table uses a generator degree the field does not build");
    VersionInfo {
        version,
        mode,
        ecc_level,
        num_blocks: num_blocks(version, ecc_level),
        ecc_per_block,
        generator,
        char_count_bits: mode.num_char_count_bits(version),
        alignment: alignment_pattern_positions(version),
        data_bits: usable_data_bits(version, ecc_level),
    }
}
