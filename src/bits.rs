//! MSB-first bit packing of the data codeword stream.

use crate::capacity::VersionInfo;
use crate::segment::Segment;

/// Growable MSB-first bit sequence, byte aligned at the start.
#[derive(Clone, Default, Debug)]
pub struct BitBuffer {
    data: Vec<u8>,
    length: usize,
}

impl BitBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bits: usize) -> Self {
        Self {
            data: Vec::with_capacity(bits.div_ceil(8)),
            length: 0,
        }
    }

    /// Number of bits written so far.
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Appends the low `len` bits of `val`, most significant first.
    pub fn append_bits(&mut self, val: u32, len: u8) {
        assert!(len <= 31 && (val >> len) == 0);
        for i in (0..len).rev() {
            let shift = 7 - (self.length & 7);
            if shift == 7 {
                self.data.push(0);
            }
            let bit = ((val >> i) & 1) as u8;
            if let Some(last) = self.data.last_mut() {
                *last |= bit << shift;
            }
            self.length += 1;
        }
    }

    /// Reads `len` bits starting at bit `offset`.
    pub fn read_bits(&self, offset: usize, len: u8) -> u32 {
        assert!(len <= 32 && offset + usize::from(len) <= self.length);
        (offset..offset + usize::from(len)).fold(0u32, |acc, i| {
            (acc << 1) | u32::from((self.data[i >> 3] >> (7 - (i & 7))) & 1)
        })
    }

    /// The packed bytes; a trailing partial byte is zero-filled.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

/// Packs a segment into exactly `info.data_codewords()` data codewords.
///
/// Writes mode indicator, character count and body, then up to four terminator bits (only
/// as many as capacity allows), zero bits up to the next byte boundary, and alternating
/// `0xEC`/`0x11` pad bytes until the capacity is reached.
///
/// # Panics
///
/// Panics if the segment does not fit; version selection guarantees it does.
pub fn encode_data_codewords(segment: &Segment, info: &VersionInfo) -> Vec<u8> {
    let capacity = info.data_bits;
    let mut bb = BitBuffer::with_capacity(capacity);

    bb.append_bits(segment.mode().mode_bits(), 4);
    bb.append_bits(segment.num_units() as u32, info.char_count_bits);
    segment.append_body(&mut bb);
    assert!(bb.len() <= capacity, "segment exceeds data capacity");

    let terminator = (capacity - bb.len()).min(4);
    bb.append_bits(0, terminator as u8);
    let filler = bb.len().wrapping_neg() & 7;
    bb.append_bits(0, filler as u8);
    debug_assert_eq!(bb.len() % 8, 0);

    for &pad in [0xec, 0x11].iter().cycle() {
        if bb.len() >= capacity {
            break;
        }
        bb.append_bits(pad, 8);
    }
    debug_assert_eq!(bb.len(), capacity);
    bb.into_bytes()
}
