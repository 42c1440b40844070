//! Encoding options.
//!
//! Options derive serde traits with `#[serde(default)]`, so a partial JSON or TOML table
//! is enough to configure an encoder; missing keys stay automatic.

use crate::qrcode::EccLevel;
use crate::segment::Mode;
use serde::{Deserialize, Serialize};

/// Default module size in pixels, used by renderers.
pub const DEFAULT_MODULE_SIZE: i32 = 4;

/// Default quiet zone width in modules.
pub const DEFAULT_MARGIN: i32 = 4;

/// A user choice that is either left to the encoder or pinned to a value.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Setting<T> {
    #[default]
    Auto,
    Fixed(T),
}

impl<T: Copy> Setting<T> {
    pub fn fixed(self) -> Option<T> {
        match self {
            Setting::Auto => None,
            Setting::Fixed(v) => Some(v),
        }
    }

    pub fn is_auto(self) -> bool {
        matches!(self, Setting::Auto)
    }
}

impl<T> From<Option<T>> for Setting<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Setting::Auto, Setting::Fixed)
    }
}

/// Parameters of one encode request.
///
/// `version` and `mask` hold raw numbers, so any integer read from a config file reaches
/// the encoder, which range-checks it and reports [`EncodeError::VersionOutOfRange`](crate::EncodeError::VersionOutOfRange) or
/// [`EncodeError::MaskOutOfRange`](crate::EncodeError::MaskOutOfRange). `module_size` and
/// `margin` are only consumed by renderers but are validated up front as well.
///
/// # Example
///
/// ```rust
/// use qrgen::{EccLevel, EncodeOptions, Mode};
///
/// let options = EncodeOptions::default()
///     .with_mode(Mode::Alphanumeric)
///     .with_ecc_level(EccLevel::Quartile)
///     .with_module_size(8);
/// assert!(options.version.is_auto());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeOptions {
    pub mode: Setting<Mode>,
    #[serde(rename = "eccl")]
    pub ecc_level: Setting<EccLevel>,
    pub version: Setting<i32>,
    pub mask: Setting<i32>,
    #[serde(rename = "modsize")]
    pub module_size: i32,
    pub margin: i32,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            mode: Setting::Auto,
            ecc_level: Setting::Auto,
            version: Setting::Auto,
            mask: Setting::Auto,
            module_size: DEFAULT_MODULE_SIZE,
            margin: DEFAULT_MARGIN,
        }
    }
}

impl EncodeOptions {
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = Setting::Fixed(mode);
        self
    }

    pub fn with_ecc_level(mut self, ecc_level: EccLevel) -> Self {
        self.ecc_level = Setting::Fixed(ecc_level);
        self
    }

    pub fn with_version(mut self, version: i32) -> Self {
        self.version = Setting::Fixed(version);
        self
    }

    pub fn with_mask(mut self, mask: i32) -> Self {
        self.mask = Setting::Fixed(mask);
        self
    }

    pub fn with_module_size(mut self, module_size: i32) -> Self {
        self.module_size = module_size;
        self
    }

    pub fn with_margin(mut self, margin: i32) -> Self {
        self.margin = margin;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = EncodeOptions::default();
        assert!(options.mode.is_auto());
        assert!(options.ecc_level.is_auto());
        assert!(options.mask.is_auto());
        assert_eq!(options.module_size, 4);
        assert_eq!(options.margin, 4);
    }

    #[test]
    fn test_setting_from_option() {
        assert_eq!(Setting::from(Some(3u8)), Setting::Fixed(3));
        assert_eq!(Setting::<u8>::from(None), Setting::Auto);
        assert_eq!(Setting::Fixed(5u8).fixed(), Some(5));
    }

    #[test]
    fn test_partial_config() {
        let options: EncodeOptions =
            serde_json::from_str(r#"{ "version": { "fixed": 7 }, "margin": 2 }"#).unwrap();
        assert_eq!(options.version, Setting::Fixed(7));
        assert_eq!(options.margin, 2);
        assert!(options.mask.is_auto());
        assert_eq!(options.module_size, DEFAULT_MODULE_SIZE);
    }

    #[test]
    fn test_out_of_range_config_values_deserialize() {
        let options: EncodeOptions =
            serde_json::from_str(r#"{ "version": { "fixed": 300 }, "mask": { "fixed": -1 } }"#)
                .unwrap();
        assert_eq!(options.version, Setting::Fixed(300));
        assert_eq!(options.mask, Setting::Fixed(-1));
    }

    #[test]
    fn test_config_round_trip() {
        let options = EncodeOptions::default()
            .with_mode(Mode::Byte)
            .with_ecc_level(EccLevel::High)
            .with_mask(3);
        let json = serde_json::to_string(&options).unwrap();
        assert!(json.contains(r#""eccl":{"fixed":"H"}"#));
        let back: EncodeOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, options);
    }
}
