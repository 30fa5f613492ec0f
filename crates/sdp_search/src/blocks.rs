//! Partition of the 64 fingerprint bits into contiguous blocks.

use sdp_simhash::FINGERPRINT_BITS;

use crate::error::SearchError;

/// Split the 64 bit positions into `blocks` contiguous masks.
///
/// Block `i` covers positions `[i * 64 / blocks, (i + 1) * 64 / blocks)`,
/// so widths differ by at most one bit and the masks tile the whole word
/// with no gaps and no overlap.
pub fn block_masks(blocks: usize) -> Result<Vec<u64>, SearchError> {
    if blocks == 0 || blocks > FINGERPRINT_BITS {
        return Err(SearchError::BlocksOutOfRange { blocks });
    }

    let mut masks = Vec::with_capacity(blocks);
    for i in 0..blocks {
        let start = i * FINGERPRINT_BITS / blocks;
        let end = (i + 1) * FINGERPRINT_BITS / blocks;
        let mut mask = 0u64;
        for bit in start..end {
            mask |= 1 << bit;
        }
        masks.push(mask);
    }
    Ok(masks)
}
