//! Construction of the module grid: function patterns, metadata words and codeword
//! placement.
//!
//! Coordinates are `(x, y)` with `x` the column and `y` the row, both counted from the
//! top-left corner.

use crate::info::{format_word, version_word};
use crate::mask::Mask;
use crate::qrcode::EccLevel;
use crate::version::Version;

/// State of one cell while the grid is being built.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Module {
    Empty,
    Light,
    Dark,
}

impl Module {
    fn from_dark(dark: bool) -> Self {
        if dark {
            Module::Dark
        } else {
            Module::Light
        }
    }
}

/// A grid under construction.
///
/// The unmasked bit of every data module is kept, so the mask can be swapped without
/// placing the codewords again.
pub struct MatrixBuilder {
    version: Version,
    size: usize,
    modules: Vec<Module>,
    data: Vec<Option<bool>>,
}

impl MatrixBuilder {
    /// An all-empty grid for the given version.
    pub fn new(version: Version) -> Self {
        let size = version.size();
        Self {
            version,
            size,
            modules: vec![Module::Empty; size * size],
            data: vec![None; size * size],
        }
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, x: usize, y: usize) -> Module {
        self.modules[y * self.size + x]
    }

    fn set(&mut self, x: usize, y: usize, dark: bool) {
        self.modules[y * self.size + x] = Module::from_dark(dark);
    }

    fn set_unbounded(&mut self, x: i32, y: i32, dark: bool) {
        let range = 0..self.size as i32;
        if range.contains(&x) && range.contains(&y) {
            self.set(x as usize, y as usize, dark);
        }
    }

    /// Draws finders with separators, timing lines, alignment patterns and the dark module.
    pub fn draw_function_patterns(&mut self, alignment: &[u8]) {
        let size = self.size;

        for i in 8..size - 8 {
            self.set(6, i, i % 2 == 0);
            self.set(i, 6, i % 2 == 0);
        }

        // 7x7 finder plus a one-module light separator ring
        let last = size as i32 - 4;
        for (cx, cy) in [(3, 3), (last, 3), (3, last)] {
            for dy in -4i32..=4 {
                for dx in -4i32..=4 {
                    let dist = dx.abs().max(dy.abs());
                    self.set_unbounded(cx + dx, cy + dy, dist != 2 && dist != 4);
                }
            }
        }

        let n = alignment.len();
        for (i, &cx) in alignment.iter().enumerate() {
            for (j, &cy) in alignment.iter().enumerate() {
                if (i == 0 && j == 0) || (i == 0 && j == n - 1) || (i == n - 1 && j == 0) {
                    continue;
                }
                for dy in -2i32..=2 {
                    for dx in -2i32..=2 {
                        let dist = dx.abs().max(dy.abs());
                        let x = (i32::from(cx) + dx) as usize;
                        let y = (i32::from(cy) + dy) as usize;
                        self.set(x, y, dist != 1);
                    }
                }
            }
        }

        self.set(8, size - 8, true);
    }

    /// Writes both copies of the format word for an ECC level and mask.
    pub fn draw_format_bits(&mut self, ecc_level: EccLevel, mask: Mask) {
        let bits = format_word(ecc_level, mask);
        let size = self.size;

        // Around the top-left finder
        for i in 0..6 {
            self.set(8, i, get_bit(bits, i));
        }
        self.set(8, 7, get_bit(bits, 6));
        self.set(8, 8, get_bit(bits, 7));
        self.set(7, 8, get_bit(bits, 8));
        for i in 9..15 {
            self.set(14 - i, 8, get_bit(bits, i));
        }

        // Split between the other two finders
        for i in 0..8 {
            self.set(size - 1 - i, 8, get_bit(bits, i));
        }
        for i in 8..15 {
            self.set(8, size - 15 + i, get_bit(bits, i));
        }
    }

    /// Writes both 6x3 copies of the version word; no-op below version 7.
    pub fn draw_version_bits(&mut self) {
        let Some(bits) = version_word(self.version) else {
            return;
        };
        let size = self.size;
        for i in 0..18 {
            let bit = get_bit(bits, i);
            let a = size - 11 + i % 3;
            let b = i / 3;
            self.set(a, b, bit);
            self.set(b, a, bit);
        }
    }

    /// Fills every empty module with codeword bits in zig-zag order, masked with `mask`.
    ///
    /// Column pairs are swept from the right edge leftwards, skipping the vertical timing
    /// column, alternately upwards and downwards. Modules left over once the codewords run
    /// out are set light and stay unmasked.
    pub fn draw_codewords(&mut self, codewords: &[u8], mask: Mask) {
        let size = self.size as i32;
        let total = codewords.len() * 8;
        let mut i: usize = 0;
        let mut upward = true;
        let mut right: i32 = size - 1;
        while right >= 1 {
            if right == 6 {
                right = 5;
            }
            for vert in 0..size {
                let y = (if upward { size - 1 - vert } else { vert }) as usize;
                for x in [right as usize, right as usize - 1] {
                    let idx = y * self.size + x;
                    if self.modules[idx] != Module::Empty {
                        continue;
                    }
                    if i < total {
                        let bit = (codewords[i >> 3] >> (7 - (i & 7))) & 1 != 0;
                        self.data[idx] = Some(bit);
                        self.set(x, y, bit ^ mask.inverts(x, y));
                        i += 1;
                    } else {
                        self.set(x, y, false);
                    }
                }
            }
            upward = !upward;
            right -= 2;
        }
        debug_assert_eq!(i, total, "grid too small for the codewords");
    }

    /// Re-masks the data modules with `mask` and rewrites the format word to match.
    pub fn apply_mask(&mut self, ecc_level: EccLevel, mask: Mask) {
        self.draw_format_bits(ecc_level, mask);
        for y in 0..self.size {
            for x in 0..self.size {
                if let Some(bit) = self.data[y * self.size + x] {
                    self.set(x, y, bit ^ mask.inverts(x, y));
                }
            }
        }
    }

    /// Whether every module has been resolved to light or dark.
    pub fn is_complete(&self) -> bool {
        !self.modules.contains(&Module::Empty)
    }

    /// Row-major snapshot with `true` for dark; empty modules read light.
    pub fn to_modules(&self) -> Vec<bool> {
        self.modules.iter().map(|&m| m == Module::Dark).collect()
    }

    /// Finishes the grid.
    ///
    /// # Panics
    ///
    /// Panics if any module is still empty.
    pub fn into_modules(self) -> Vec<bool> {
        assert!(self.is_complete(), "unresolved modules left in the grid");
        self.to_modules()
    }
}

fn get_bit(x: u32, i: usize) -> bool {
    ((x >> i) & 1) != 0
}
