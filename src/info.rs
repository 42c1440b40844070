//! BCH encoding of the format and version information words.

use crate::mask::Mask;
use crate::qrcode::EccLevel;
use crate::version::Version;

const FORMAT_GENERATOR: u32 = 0x537;
const FORMAT_MASK: u32 = 0x5412;
const VERSION_GENERATOR: u32 = 0x1f25;

/// Appends to a `bits_poly`-bit payload the remainder of its division (shifted left by
/// `bits_genpoly`) by `genpoly` over GF(2).
pub fn encode_bch(poly: u32, bits_poly: u32, genpoly: u32, bits_genpoly: u32) -> u32 {
    debug_assert!(bits_poly + bits_genpoly <= 32 && poly >> bits_poly == 0);
    let shifted = poly << bits_genpoly;
    let mut rem = shifted;
    for i in (0..bits_poly).rev() {
        if (rem >> (bits_genpoly + i)) & 1 != 0 {
            rem ^= genpoly << i;
        }
    }
    shifted | rem
}

/// 15-bit format word for an ECC level and mask, already XORed with 0x5412.
pub fn format_word(ecc_level: EccLevel, mask: Mask) -> u32 {
    let payload = (u32::from(ecc_level.format_bits()) << 3) | u32::from(mask.value());
    encode_bch(payload, 5, FORMAT_GENERATOR, 10) ^ FORMAT_MASK
}

/// 18-bit version word, present only from version 7 on.
pub fn version_word(version: Version) -> Option<u32> {
    (version.value() > 6).then(|| encode_bch(u32::from(version.value()), 6, VERSION_GENERATOR, 12))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_word_zero_payload() {
        assert_eq!(encode_bch(0, 5, FORMAT_GENERATOR, 10), 0);
        assert_eq!(format_word(EccLevel::Medium, Mask::new(0)), 0x5412);
    }

    #[test]
    fn test_format_word_known() {
        assert_eq!(format_word(EccLevel::Low, Mask::new(0)), 0b111011111000100);
        assert_eq!(format_word(EccLevel::High, Mask::new(0)), 0b001011010001001);
    }

    #[test]
    fn test_format_words_distinct() {
        let mut words: Vec<u32> = EccLevel::ALL
            .iter()
            .flat_map(|&ecl| (0..8).map(move |m| format_word(ecl, Mask::new(m))))
            .collect();
        assert!(words.iter().all(|&w| w < 1 << 15));
        words.sort_unstable();
        words.dedup();
        assert_eq!(words.len(), 32);
    }

    #[test]
    fn test_version_word() {
        assert_eq!(version_word(Version::new(6)), None);
        assert_eq!(version_word(Version::new(7)), Some(0x07c94));
        assert_eq!(version_word(Version::MAX), Some(0x28c69));
    }

    #[test]
    fn test_bch_codeword_divisible() {
        fn gf2_mod(mut x: u32, g: u32) -> u32 {
            let deg = 31 - g.leading_zeros();
            while x != 0 && 31 - x.leading_zeros() >= deg {
                x ^= g << (31 - x.leading_zeros() - deg);
            }
            x
        }
        for v in 7..=40 {
            let word = encode_bch(v, 6, VERSION_GENERATOR, 12);
            assert_eq!(word >> 12, v);
            assert_eq!(gf2_mod(word, VERSION_GENERATOR), 0);
        }
        for payload in 0..32 {
            assert_eq!(gf2_mod(encode_bch(payload, 5, FORMAT_GENERATOR, 10), FORMAT_GENERATOR), 0);
        }
    }
}
