//! Validation failures reported by [`encode`](crate::encode).

use crate::segment::Mode;
use crate::version::Version;
use serde::Serialize;

/// The option (or input) that a failed validation step was checking.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Parameter {
    Text,
    Mode,
    #[serde(rename = "eccl")]
    EccLevel,
    Version,
    Mask,
    #[serde(rename = "modsize")]
    ModuleSize,
    Margin,
}

impl Parameter {
    /// Short name of the parameter as used in option maps.
    pub fn name(self) -> &'static str {
        match self {
            Parameter::Text => "text",
            Parameter::Mode => "mode",
            Parameter::EccLevel => "eccl",
            Parameter::Version => "version",
            Parameter::Mask => "mask",
            Parameter::ModuleSize => "modsize",
            Parameter::Margin => "margin",
        }
    }
}

impl core::fmt::Display for Parameter {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Reasons an encode request is rejected.
///
/// Every variant maps to one `(parameter, code)` pair through [`EncodeError::parameter`]
/// and [`EncodeError::code`]. Only the first failing check of a request is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// The text to encode is empty.
    #[error("text is empty")]
    EmptyText,

    /// Segmenting the text produced no data units.
    #[error("text produced no encodable data")]
    NoData,

    /// A forced mode cannot represent every character of the text.
    #[error("text contains characters outside the {0} alphabet")]
    ModeMismatch(Mode),

    /// An error correction level code outside 0..=3.
    #[error("error correction level code {0} is out of range")]
    EccLevelOutOfRange(u8),

    /// Automatic version selection found nothing that fits, even at version 40.
    #[error("data needs {bits} bits, which exceeds the capacity of version 40")]
    DataTooLong { bits: usize },

    /// A forced version outside 1..=40.
    #[error("version {0} is out of range")]
    VersionOutOfRange(i32),

    /// A forced version is too small for the data at every permitted ECC level.
    #[error("data does not fit in version {}", .0.value())]
    VersionTooSmall(Version),

    /// A forced mask outside 0..=7.
    #[error("mask {0} is out of range")]
    MaskOutOfRange(i32),

    /// A module size below one pixel.
    #[error("module size {0} must be at least 1")]
    ModuleSizeOutOfRange(i32),

    /// A negative margin.
    #[error("margin {0} must not be negative")]
    MarginOutOfRange(i32),
}

impl EncodeError {
    /// The parameter whose validation failed.
    pub fn parameter(&self) -> Parameter {
        use EncodeError::*;
        match self {
            EmptyText | NoData => Parameter::Text,
            ModeMismatch(_) => Parameter::Mode,
            EccLevelOutOfRange(_) => Parameter::EccLevel,
            DataTooLong { .. } | VersionOutOfRange(_) | VersionTooSmall(_) => Parameter::Version,
            MaskOutOfRange(_) => Parameter::Mask,
            ModuleSizeOutOfRange(_) => Parameter::ModuleSize,
            MarginOutOfRange(_) => Parameter::Margin,
        }
    }

    /// Subcode distinguishing failures of the same parameter.
    pub fn code(&self) -> u8 {
        use EncodeError::*;
        match self {
            EmptyText => 2,
            NoData => 3,
            DataTooLong { .. } => 1,
            VersionOutOfRange(_) => 2,
            VersionTooSmall(_) => 3,
            ModeMismatch(_)
            | EccLevelOutOfRange(_)
            | MaskOutOfRange(_)
            | ModuleSizeOutOfRange(_)
            | MarginOutOfRange(_) => 1,
        }
    }
}
