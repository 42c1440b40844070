//! Mode classification and conversion of text into mode-specific data units.

use crate::bits::BitBuffer;
use crate::error::EncodeError;
use crate::options::Setting;
use crate::version::Version;
use serde::{Deserialize, Serialize};

static ALPHANUMERIC_CHARSET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

/// Data encoding mode of a QR code.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Decimal digits, three per 10 bits.
    Numeric,
    /// Digits, uppercase letters, space and `$%*+-./:`, two per 11 bits.
    Alphanumeric,
    /// UTF-8 octets, eight bits each.
    Byte,
}

impl Mode {
    /// Returns the cheapest mode able to represent every character of `text`.
    pub fn classify(text: &str) -> Mode {
        if is_numeric(text) {
            Mode::Numeric
        } else if is_alphanumeric(text) {
            Mode::Alphanumeric
        } else {
            Mode::Byte
        }
    }

    /// Resolves a requested mode against the text.
    ///
    /// A forced numeric or alphanumeric mode is rejected when the text falls outside its
    /// alphabet. Byte mode accepts anything.
    pub fn resolve(requested: Setting<Mode>, text: &str) -> Result<Mode, EncodeError> {
        match requested {
            Setting::Auto => Ok(Mode::classify(text)),
            Setting::Fixed(Mode::Numeric) if !is_numeric(text) => {
                Err(EncodeError::ModeMismatch(Mode::Numeric))
            }
            Setting::Fixed(Mode::Alphanumeric) if !is_alphanumeric(text) => {
                Err(EncodeError::ModeMismatch(Mode::Alphanumeric))
            }
            Setting::Fixed(mode) => Ok(mode),
        }
    }

    /// The 4-bit mode indicator.
    pub fn mode_bits(self) -> u32 {
        match self {
            Mode::Numeric => 0x1,
            Mode::Alphanumeric => 0x2,
            Mode::Byte => 0x4,
        }
    }

    /// Width of the character count field for the given version.
    pub fn num_char_count_bits(self, version: Version) -> u8 {
        let ver = version.value();
        let tier = if ver < 10 {
            0
        } else if ver < 27 {
            1
        } else {
            2
        };
        (match self {
            Mode::Numeric => [10, 12, 14],
            Mode::Alphanumeric => [9, 11, 13],
            Mode::Byte => [8, 16, 16],
        })[tier]
    }

    pub fn name(self) -> &'static str {
        match self {
            Mode::Numeric => "numeric",
            Mode::Alphanumeric => "alphanumeric",
            Mode::Byte => "byte",
        }
    }
}

impl core::fmt::Display for Mode {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

pub fn is_numeric(text: &str) -> bool {
    text.chars().all(|c| c.is_ascii_digit())
}

pub fn is_alphanumeric(text: &str) -> bool {
    text.chars().all(|c| ALPHANUMERIC_CHARSET.contains(c))
}

/// Text converted into the data units of one mode.
///
/// Units are digit values (0–9) in numeric mode, alphabet indices (0–44) in alphanumeric
/// mode and UTF-8 octets in byte mode. The unit count is what the character count field
/// records.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Segment {
    mode: Mode,
    units: Vec<u8>,
}

impl Segment {
    /// Segments `text` into the data units of `mode`.
    ///
    /// # Errors
    ///
    /// - [`EncodeError::ModeMismatch`] if a character lies outside the alphabet of `mode`.
    /// - [`EncodeError::NoData`] if no units were produced.
    pub fn from_text(text: &str, mode: Mode) -> Result<Self, EncodeError> {
        let units: Option<Vec<u8>> = match mode {
            Mode::Numeric => text
                .chars()
                .map(|c| c.to_digit(10).map(|d| d as u8))
                .collect(),
            Mode::Alphanumeric => text
                .chars()
                .map(|c| ALPHANUMERIC_CHARSET.find(c).map(|i| i as u8))
                .collect(),
            // A `str` is valid UTF-8 already, so every code point is in range
            Mode::Byte => Some(text.as_bytes().to_vec()),
        };
        let units = units.ok_or(EncodeError::ModeMismatch(mode))?;
        if units.is_empty() {
            return Err(EncodeError::NoData);
        }
        Ok(Self { mode, units })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn units(&self) -> &[u8] {
        &self.units
    }

    pub fn num_units(&self) -> usize {
        self.units.len()
    }

    /// Length of the data body alone, without header or count field.
    pub fn body_bits(&self) -> usize {
        let n = self.units.len();
        match self.mode {
            Mode::Numeric => n / 3 * 10 + [0, 4, 7][n % 3],
            Mode::Alphanumeric => n / 2 * 11 + (n % 2) * 6,
            Mode::Byte => n * 8,
        }
    }

    /// Total bits for mode indicator, character count and body at the given version.
    ///
    /// Returns `None` if the unit count overflows the character count field.
    pub fn bit_length(&self, version: Version) -> Option<usize> {
        let ccbits = self.mode.num_char_count_bits(version);
        if self.units.len() >= 1usize << ccbits {
            return None;
        }
        Some(4 + usize::from(ccbits) + self.body_bits())
    }

    /// Writes the data body into `bb`.
    pub fn append_body(&self, bb: &mut BitBuffer) {
        match self.mode {
            Mode::Numeric => {
                for group in self.units.chunks(3) {
                    let value = group.iter().fold(0u32, |acc, &d| acc * 10 + u32::from(d));
                    let width = match group.len() {
                        3 => 10,
                        2 => 7,
                        _ => 4,
                    };
                    bb.append_bits(value, width);
                }
            }
            Mode::Alphanumeric => {
                for pair in self.units.chunks(2) {
                    match *pair {
                        [first, second] => {
                            bb.append_bits(u32::from(first) * 45 + u32::from(second), 11)
                        }
                        [last] => bb.append_bits(u32::from(last), 6),
                        _ => unreachable!(),
                    }
                }
            }
            Mode::Byte => {
                for &octet in &self.units {
                    bb.append_bits(u32::from(octet), 8);
                }
            }
        }
    }
}
