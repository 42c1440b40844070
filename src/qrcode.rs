//! The encode pipeline and its result.
//!
//! [`encode`] validates a request step by step (text, mode, segmentation, version and ECC
//! level, mask, presentation parameters), stopping at the first failure, and then builds
//! the symbol: data codewords, Reed-Solomon blocks, function patterns, codeword placement
//! and mask selection.

use crate::bits::encode_data_codewords;
use crate::ecc::add_ecc_and_interleave;
use crate::error::EncodeError;
use crate::mask::{select_mask, Mask};
use crate::matrix::MatrixBuilder;
use crate::options::EncodeOptions;
use crate::segment::{Mode, Segment};
use crate::version::{select_version, Version};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Error correction level for a QR code.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Serialize, Deserialize)]
pub enum EccLevel {
    /// Tolerates ~7% erroneous codewords.
    #[serde(rename = "L")]
    Low,
    /// Tolerates ~15% erroneous codewords.
    #[serde(rename = "M")]
    Medium,
    /// Tolerates ~25% erroneous codewords.
    #[serde(rename = "Q")]
    Quartile,
    /// Tolerates ~30% erroneous codewords.
    #[serde(rename = "H")]
    High,
}

impl EccLevel {
    pub const ALL: [EccLevel; 4] = [EccLevel::Low, EccLevel::Medium, EccLevel::Quartile, EccLevel::High];

    /// Order in which levels are tried when the level is automatic.
    pub const PRIORITY: [EccLevel; 4] =
        [EccLevel::High, EccLevel::Quartile, EccLevel::Medium, EccLevel::Low];

    /// Index into the capacity tables (L, M, Q, H).
    pub(crate) fn ordinal(self) -> usize {
        use EccLevel::*;
        match self {
            Low => 0,
            Medium => 1,
            Quartile => 2,
            High => 3,
        }
    }

    /// The 2-bit code stored in the format word: M=0, L=1, H=2, Q=3.
    pub fn format_bits(self) -> u8 {
        use EccLevel::*;
        match self {
            Low => 1,
            Medium => 0,
            Quartile => 3,
            High => 2,
        }
    }

    pub fn letter(self) -> char {
        use EccLevel::*;
        match self {
            Low => 'L',
            Medium => 'M',
            Quartile => 'Q',
            High => 'H',
        }
    }
}

impl TryFrom<u8> for EccLevel {
    type Error = EncodeError;

    /// Converts a format-word code (M=0, L=1, H=2, Q=3).
    fn try_from(code: u8) -> Result<Self, Self::Error> {
        use EccLevel::*;
        match code {
            0 => Ok(Medium),
            1 => Ok(Low),
            2 => Ok(High),
            3 => Ok(Quartile),
            _ => Err(EncodeError::EccLevelOutOfRange(code)),
        }
    }
}

impl core::fmt::Display for EccLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A finished QR Code symbol together with the parameters it was built with.
///
/// Instances are immutable. Modules are stored row-major, `true` meaning dark.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct QrCode {
    text: String,
    mode: Mode,
    ecc_level: EccLevel,
    version: Version,
    mask: Mask,
    size: usize,
    modules: Vec<bool>,
    module_size: i32,
    margin: i32,
}

impl QrCode {
    /// The text that was encoded.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn error_correction_level(&self) -> EccLevel {
        self.ecc_level
    }

    /// Returns this QR Code's version, in the range [1, 40].
    pub fn version(&self) -> Version {
        self.version
    }

    /// Returns this QR Code's mask, in the range [0, 7].
    pub fn mask(&self) -> Mask {
        self.mask
    }

    /// Returns this QR Code's size, in the range [21, 177].
    pub fn size(&self) -> i32 {
        self.size as i32
    }

    /// Module size in pixels, for renderers.
    pub fn module_size(&self) -> i32 {
        self.module_size
    }

    /// Quiet zone width in modules, for renderers.
    pub fn margin(&self) -> i32 {
        self.margin
    }

    /// Returns the color of the module at the given coordinates.
    ///
    /// Returns `true` for dark modules and `false` for light modules. Coordinates outside the QR
    /// code's bounds return `false`, so renderers can read the quiet zone directly.
    ///
    /// # Arguments
    ///
    /// * `x` - X-coordinate (0 is left).
    /// * `y` - Y-coordinate (0 is top).
    pub fn get_module(&self, x: i32, y: i32) -> bool {
        let range = 0..self.size();
        range.contains(&x) && range.contains(&y) && self.modules[y as usize * self.size + x as usize]
    }

    /// The grid row by row.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.modules.chunks(self.size)
    }

    /// The grid as a flat row-major slice.
    pub fn modules(&self) -> &[bool] {
        &self.modules
    }
}

/// Encodes `text` into a QR Code.
///
/// Every automatic option is resolved: the cheapest mode for the text, the strongest ECC
/// level that fits at all, the smallest version at that level and the mask with the lowest
/// penalty score.
///
/// # Errors
///
/// The first failing validation step, as an [`EncodeError`]. No grid is built in that case.
///
/// # Example
///
/// ```rust
/// use qrgen::{encode, EccLevel, EncodeOptions, Mode};
///
/// let qr = encode("HELLO WORLD", &EncodeOptions::default()).unwrap();
/// assert_eq!(qr.mode(), Mode::Alphanumeric);
/// assert_eq!(qr.error_correction_level(), EccLevel::High);
/// assert_eq!(qr.size(), 25);
/// ```
#[instrument(level = "debug", skip_all, fields(len = text.len()))]
pub fn encode(text: &str, options: &EncodeOptions) -> Result<QrCode, EncodeError> {
    if text.is_empty() {
        return Err(EncodeError::EmptyText);
    }
    let mode = Mode::resolve(options.mode, text)?;
    let segment = Segment::from_text(text, mode)?;
    debug!(%mode, units = segment.num_units(), "segmented text");

    let info = select_version(&segment, options.ecc_level, options.version)?;
    debug!(
        version = info.version.value(),
        ecc_level = %info.ecc_level,
        data_bits = info.data_bits,
        "selected version"
    );

    let mask = options.mask.fixed().map(Mask::try_from).transpose()?;
    if options.module_size < 1 {
        return Err(EncodeError::ModuleSizeOutOfRange(options.module_size));
    }
    if options.margin < 0 {
        return Err(EncodeError::MarginOutOfRange(options.margin));
    }

    let data = encode_data_codewords(&segment, &info);
    let codewords = add_ecc_and_interleave(&data, &info);

    let mut builder = MatrixBuilder::new(info.version);
    builder.draw_function_patterns(info.alignment);
    builder.draw_version_bits();
    let initial = mask.unwrap_or(Mask::new(0));
    builder.draw_format_bits(info.ecc_level, initial);
    builder.draw_codewords(&codewords, initial);

    let mask = match mask {
        Some(mask) => mask,
        None => select_mask(&mut builder, info.ecc_level),
    };
    debug!(mask = mask.value(), "mask applied");

    Ok(QrCode {
        text: text.to_owned(),
        mode,
        ecc_level: info.ecc_level,
        version: info.version,
        mask,
        size: builder.size(),
        modules: builder.into_modules(),
        module_size: options.module_size,
        margin: options.margin,
    })
}
