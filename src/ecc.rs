//! Reed-Solomon error correction and block interleaving.

use crate::capacity::VersionInfo;
use crate::galois::GaloisField;

/// Splits `len` codewords into `num_blocks` nearly equal blocks.
///
/// Returns `num_blocks + 1` offsets. The last `len % num_blocks` blocks hold one codeword
/// more than the others.
pub fn block_boundaries(len: usize, num_blocks: usize) -> Vec<usize> {
    assert!(num_blocks > 0, "at least one block");
    let short_len = len / num_blocks;
    let num_short = num_blocks - len % num_blocks;
    let mut offsets = Vec::with_capacity(num_blocks + 1);
    let mut pos = 0;
    for i in 0..num_blocks {
        offsets.push(pos);
        pos += short_len + usize::from(i >= num_short);
    }
    offsets.push(pos);
    offsets
}

/// Computes the ECC codewords of one block by synthetic division by `generator`
/// (log-domain coefficients, leading 1 omitted).
pub fn reed_solomon_remainder(block: &[u8], generator: &[u8]) -> Vec<u8> {
    let gf = GaloisField::get();
    let mut work = block.to_vec();
    work.resize(block.len() + generator.len(), 0);
    for i in 0..block.len() {
        let Some(factor) = gf.log(work[i]) else {
            continue;
        };
        for (j, &g) in generator.iter().enumerate() {
            work[i + 1 + j] ^= gf.exp(usize::from(g) + usize::from(factor));
        }
    }
    work.split_off(block.len())
}

/// Appends ECC codewords to each block of `data` and interleaves the result.
///
/// Data codewords are taken column by column across blocks (short blocks drop out of the
/// last column), followed by the ECC codewords column by column.
pub fn add_ecc_and_interleave(data: &[u8], info: &VersionInfo) -> Vec<u8> {
    assert_eq!(data.len(), info.data_codewords());
    let bounds = block_boundaries(data.len(), info.num_blocks);
    let blocks: Vec<&[u8]> = bounds.windows(2).map(|w| &data[w[0]..w[1]]).collect();
    let eccs: Vec<Vec<u8>> = blocks
        .iter()
        .map(|block| reed_solomon_remainder(block, info.generator))
        .collect();

    let longest = blocks.iter().map(|b| b.len()).max().unwrap_or(0);
    let mut result = Vec::with_capacity(info.raw_codewords());
    for i in 0..longest {
        result.extend(blocks.iter().filter_map(|b| b.get(i)));
    }
    for i in 0..info.ecc_per_block {
        result.extend(eccs.iter().map(|e| e[i]));
    }
    debug_assert_eq!(result.len(), info.raw_codewords());
    result
}
