//! Symbol versions and the search for the smallest one that holds the data.

use crate::capacity::{derive_version_info, usable_data_bits, VersionInfo};
use crate::error::EncodeError;
use crate::options::Setting;
use crate::qrcode::EccLevel;
use crate::segment::Segment;
use serde::Serialize;

/// A QR code version (1–40).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Serialize)]
#[serde(transparent)]
pub struct Version(u8);

impl Version {
    /// The minimum version number supported in the QR Code Model 2 standard.
    pub const MIN: Version = Version(1);

    /// The maximum version number supported in the QR Code Model 2 standard.
    pub const MAX: Version = Version(40);

    /// Creates a version object from the given number.
    ///
    /// # Panics
    ///
    /// Panics if the number is outside the range [1, 40].
    pub const fn new(ver: u8) -> Self {
        assert!(
            Version::MIN.value() <= ver && ver <= Version::MAX.value(),
            "Version number out of range"
        );
        Self(ver)
    }

    /// Returns the value, which is in the range [1, 40].
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Side length of the symbol in modules, `4 * version + 17`.
    pub const fn size(self) -> usize {
        self.0 as usize * 4 + 17
    }

    /// Iterates over every version, smallest first.
    pub fn all() -> impl Iterator<Item = Version> {
        (Version::MIN.0..=Version::MAX.0).map(Version)
    }
}

impl TryFrom<i32> for Version {
    type Error = EncodeError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .filter(|v| (Version::MIN.0..=Version::MAX.0).contains(v))
            .map(Version)
            .ok_or(EncodeError::VersionOutOfRange(value))
    }
}

impl TryFrom<u8> for Version {
    type Error = EncodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Version::try_from(i32::from(value))
    }
}

fn fits(segment: &Segment, version: Version, ecc_level: EccLevel) -> bool {
    segment
        .bit_length(version)
        .is_some_and(|bits| bits <= usable_data_bits(version, ecc_level))
}

/// Picks the version and ECC level for a segment.
///
/// With an automatic version, versions are scanned upwards at the strongest candidate level
/// and the smallest one that fits wins. If even version 40 is too small there, an automatic
/// ECC level falls back to the weaker levels ([`EccLevel::PRIORITY`]) at version 40 only.
///
/// With a forced version the strongest candidate level that fits wins.
///
/// # Errors
///
/// - [`EncodeError::VersionOutOfRange`] for a forced version outside 1..=40.
/// - [`EncodeError::VersionTooSmall`] if a forced version cannot hold the data.
/// - [`EncodeError::DataTooLong`] if nothing fits up to version 40.
pub fn select_version(
    segment: &Segment,
    ecc_level: Setting<EccLevel>,
    version: Setting<i32>,
) -> Result<VersionInfo, EncodeError> {
    let levels: &[EccLevel] = match ecc_level {
        Setting::Auto => &EccLevel::PRIORITY,
        Setting::Fixed(ref ecl) => core::slice::from_ref(ecl),
    };

    let found = match version {
        Setting::Auto => {
            let (strongest, weaker) = (levels[0], &levels[1..]);
            Version::all()
                .find(|&ver| fits(segment, ver, strongest))
                .map(|ver| (ver, strongest))
                .or_else(|| {
                    weaker
                        .iter()
                        .copied()
                        .find(|&ecl| fits(segment, Version::MAX, ecl))
                        .map(|ecl| (Version::MAX, ecl))
                })
        }
        Setting::Fixed(value) => {
            let ver = Version::try_from(value)?;
            let ecl = levels.iter().copied().find(|&ecl| fits(segment, ver, ecl));
            match ecl {
                Some(ecl) => Some((ver, ecl)),
                None => return Err(EncodeError::VersionTooSmall(ver)),
            }
        }
    };

    match found {
        Some((ver, ecl)) => Ok(derive_version_info(ver, segment.mode(), ecl)),
        None => Err(EncodeError::DataTooLong {
            bits: segment
                .bit_length(Version::MAX)
                .unwrap_or(usize::MAX),
        }),
    }
}
