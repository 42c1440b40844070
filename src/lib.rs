//! # qrgen
//!
//! A Rust library for encoding text into QR Code Model 2 symbols.
//!
//! `qrgen` takes a string and a set of options and produces a finished, masked module
//! matrix. It supports versions 1 to 40, the four error correction levels, and the
//! numeric, alphanumeric and byte modes. Any option left automatic is resolved by the
//! encoder: the cheapest mode, the strongest level and smallest version that fit, and the
//! mask with the lowest penalty.
//!
//! ## Features
//!
//! - Encode text in numeric, alphanumeric or byte mode as a single segment.
//! - Reed-Solomon error correction over GF(256), with block interleaving.
//! - Automatic mask selection using the standard penalty rules.
//! - Structured errors naming the offending parameter and a numeric code.
//! - Serializable options and results (via `serde`).
//! - Render results as in-memory image buffers, SVG or text.
//! - Safe Rust implementation with no unsafe code.
//!
//! ## Installation
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! qrgen = "0.1" # Replace with the latest version
//! ```
//!
//! ## Example
//!
//! Encode with every option automatic:
//!
//! ```rust
//! use qrgen::{encode, EncodeOptions};
//!
//! let qr = encode("HELLO WORLD", &EncodeOptions::default()).unwrap();
//! for row in qr.rows() {
//!     let line: String = row.iter().map(|&dark| if dark { '#' } else { '.' }).collect();
//!     assert_eq!(line.len(), 25);
//! }
//! ```
//!
//! Pin some options and render an image buffer:
//!
//! ```rust
//! use qrgen::{encode, helper::to_image_buffer, EccLevel, EncodeOptions};
//!
//! let options = EncodeOptions::default()
//!     .with_ecc_level(EccLevel::Medium)
//!     .with_version(3)
//!     .with_module_size(6);
//! let qr = encode("https://example.com", &options).unwrap();
//! let img = to_image_buffer(&qr);
//! assert_eq!(img.width(), 6 * (29 + 8));
//! ```
//!
//! ## Modules
//!
//! - [`qrcode`]: The encode pipeline, [`QrCode`] and [`EccLevel`].
//! - [`helper`]: Utilities for rendering QR codes in various formats.
//! - [`options`]: Encoding options and their defaults.
//! - [`error`]: Error type and parameter codes.

#![forbid(unsafe_code)]

pub mod bits;
pub mod capacity;
pub mod ecc;
pub mod error;
pub mod galois;
pub mod helper;
pub mod info;
pub mod mask;
pub mod matrix;
pub mod options;
pub mod qrcode;
pub mod segment;
pub mod version;

pub use capacity::{derive_version_info, usable_data_bits, VersionInfo};
pub use error::{EncodeError, Parameter};
pub use galois::GaloisField;
pub use mask::Mask;
pub use options::{EncodeOptions, Setting};
pub use qrcode::{encode, EccLevel, QrCode};
pub use segment::{Mode, Segment};
pub use version::Version;
