//! Rendering of finished QR codes.
//!
//! Renderers only read the module grid together with [`QrCode::module_size`] and
//! [`QrCode::margin`]; every output is `module_size * (size + 2 * margin)` pixels per
//! side, quiet zone included. Writing the result anywhere is left to the caller.

use crate::qrcode::QrCode;

use image::{GrayImage, Luma};

fn side_in_modules(qr: &QrCode) -> i32 {
    qr.size() + 2 * qr.margin()
}

/// Renders the QR code as an 8-bit grayscale image, black modules on white.
///
/// # Example
///
/// ```
/// use qrgen::{encode, helper::to_image_buffer, EncodeOptions};
///
/// let qr = encode("Hello, world!", &EncodeOptions::default()).unwrap();
/// let img = to_image_buffer(&qr);
/// assert_eq!(img.width() as i32, 4 * (qr.size() + 8));
/// ```
pub fn to_image_buffer(qr: &QrCode) -> GrayImage {
    let scale = qr.module_size().max(1);
    let margin = qr.margin();
    let pixels = (side_in_modules(qr) * scale) as u32;

    GrayImage::from_fn(pixels, pixels, |x, y| {
        let qr_x = x as i32 / scale - margin;
        let qr_y = y as i32 / scale - margin;
        if qr.get_module(qr_x, qr_y) {
            Luma([0u8]) // Black
        } else {
            Luma([255u8]) // White
        }
    })
}

// Returns a string of SVG code for an image depicting the given QR Code.
// Dark modules are drawn as one path in module units; width and height are in pixels.
// The string always uses Unix newlines (\n), regardless of the platform.
pub fn to_svg_string(qr: &QrCode) -> String {
    let dimension = side_in_modules(qr);
    let pixels = dimension * qr.module_size();
    let margin = qr.margin();
    let mut result = String::new();
    result += "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
    result += "<!DOCTYPE svg PUBLIC \"-//W3C//DTD SVG 1.1//EN\" \"http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd\">\n";
    result += &format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" width=\"{1}\" height=\"{1}\" viewBox=\"0 0 {0} {0}\" stroke=\"none\">\n",
        dimension, pixels
    );
    result += "\t<rect width=\"100%\" height=\"100%\" fill=\"#FFFFFF\"/>\n";
    result += "\t<path d=\"";
    let mut first = true;
    for y in 0..qr.size() {
        for x in 0..qr.size() {
            if qr.get_module(x, y) {
                if !first {
                    result += " ";
                }
                first = false;
                result += &format!("M{},{}h1v1h-1z", x + margin, y + margin);
            }
        }
    }
    result += "\" fill=\"#000000\"/>\n";
    result += "</svg>\n";
    result
}

/// Draws the QR code with block characters, two per module, quiet zone included.
pub fn to_ascii_string(qr: &QrCode) -> String {
    let margin = qr.margin();
    let mut result = String::new();
    for y in -margin..qr.size() + margin {
        for x in -margin..qr.size() + margin {
            let c: char = if qr.get_module(x, y) { '█' } else { ' ' };
            result.push(c);
            result.push(c);
        }
        result.push('\n');
    }
    result
}
