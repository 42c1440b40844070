//! Arithmetic over GF(256) with the QR primitive polynomial x^8 + x^4 + x^3 + x^2 + 1.
//!
//! The field is built once per process and is read-only afterwards, so any number of
//! encoders may share it without locking.

use std::sync::OnceLock;

/// Reducing polynomial 0x11D, without the x^8 term.
const PRIMITIVE: u16 = 0x11d;

/// Degrees of the generator polynomials used by some version/ECC level pair.
pub const GENERATOR_DEGREES: [usize; 13] = [7, 10, 13, 15, 16, 17, 18, 20, 22, 24, 26, 28, 30];

const MAX_DEGREE: usize = 30;

/// Log/antilog tables plus the Reed-Solomon generator polynomials.
pub struct GaloisField {
    exp: [u8; 255],
    log: [u8; 256],
    generators: Vec<Vec<u8>>,
}

static FIELD: OnceLock<GaloisField> = OnceLock::new();

impl GaloisField {
    /// Returns the process-wide field, building it on first use.
    pub fn get() -> &'static GaloisField {
        FIELD.get_or_init(GaloisField::build)
    }

    fn build() -> Self {
        let mut exp = [0u8; 255];
        let mut log = [0u8; 256];
        let mut v: u16 = 1;
        for i in 0..255 {
            exp[i] = v as u8;
            log[usize::from(v)] = i as u8;
            v <<= 1;
            if v & 0x100 != 0 {
                v ^= PRIMITIVE;
            }
        }

        let mut field = Self {
            exp,
            log,
            generators: vec![Vec::new(); MAX_DEGREE + 1],
        };

        // (x - a^0)(x - a^1)...(x - a^(d-1)), highest power first, value domain
        let mut poly: Vec<u8> = vec![1];
        for i in 0..MAX_DEGREE {
            let root = field.exp[i];
            let mut next = vec![0u8; poly.len() + 1];
            for (j, &c) in poly.iter().enumerate() {
                next[j] ^= c;
                next[j + 1] ^= field.multiply(c, root);
            }
            poly = next;

            let degree = i + 1;
            if GENERATOR_DEGREES.contains(&degree) {
                let coefficients: Vec<u8> = poly[1..]
                    .iter()
                    .map(|&c| {
                        debug_assert_ne!(c, 0, "generator coefficient vanished");
                        field.log[usize::from(c)]
                    })
                    .collect();
                field.generators[degree] = coefficients;
            }
        }
        field
    }

    /// Returns a^i.
    pub fn exp(&self, i: usize) -> u8 {
        self.exp[i % 255]
    }

    /// Returns the discrete logarithm of `v`, or `None` for zero.
    pub fn log(&self, v: u8) -> Option<u8> {
        (v != 0).then(|| self.log[usize::from(v)])
    }

    /// Multiplies two field elements.
    pub fn multiply(&self, a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        let sum = usize::from(self.log[usize::from(a)]) + usize::from(self.log[usize::from(b)]);
        self.exp[sum % 255]
    }

    /// Returns the generator polynomial of the given degree as log-domain coefficients,
    /// highest power first and with the implicit leading 1 omitted.
    ///
    /// Only the degrees in [`GENERATOR_DEGREES`] are available.
    pub fn generator_polynomial(&self, degree: usize) -> Option<&[u8]> {
        self.generators
            .get(degree)
            .filter(|g| !g.is_empty())
            .map(Vec::as_slice)
    }
}
