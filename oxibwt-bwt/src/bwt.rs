//! Sentinel-delimited Burrows-Wheeler Transform.
//!
//! A block is wrapped as `0x02 ++ block ++ 0x03` before sorting. Because both
//! sentinels are unique, every cyclic rotation of the wrapped buffer is
//! distinct and no separate origin pointer has to be stored: the inverse
//! finds its starting point from the position of the end sentinel.

use std::cmp::Ordering;

use oxibwt_core::{OxiBwtError, Result};

/// Start-of-block sentinel, prepended before sorting.
pub const START_SENTINEL: u8 = 0x02;

/// End-of-block sentinel, appended before sorting.
pub const END_SENTINEL: u8 = 0x03;

/// Number of bytes the sentinels add to a block.
pub const SENTINEL_OVERHEAD: usize = 2;

/// Perform the Burrows-Wheeler Transform on one block.
///
/// The output is `block.len() + 2` bytes long. Fails with
/// [`OxiBwtError::InvalidInput`] if `block` contains either sentinel byte.
pub fn transform(block: &[u8]) -> Result<Vec<u8>> {
    if let Some(pos) = block
        .iter()
        .position(|&b| b == START_SENTINEL || b == END_SENTINEL)
    {
        return Err(OxiBwtError::invalid_input(format!(
            "block contains sentinel byte {:#04x} at offset {}",
            block[pos], pos
        )));
    }

    let mut buffer = Vec::with_capacity(block.len() + SENTINEL_OVERHEAD);
    buffer.push(START_SENTINEL);
    buffer.extend_from_slice(block);
    buffer.push(END_SENTINEL);

    let n = buffer.len();

    // Rotation index table: one starting offset per position
    let mut table: Vec<usize> = (0..n).collect();
    table.sort_unstable_by(|&a, &b| compare_rotations(&buffer, a, b));

    // Last column: the byte preceding each sorted rotation
    Ok(table.iter().map(|&i| buffer[(i + n - 1) % n]).collect())
}

/// Compare the cyclic rotations of `buffer` starting at `a` and `b`.
fn compare_rotations(buffer: &[u8], a: usize, b: usize) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }

    let rotation_a = buffer[a..].iter().chain(&buffer[..a]);
    let rotation_b = buffer[b..].iter().chain(&buffer[..b]);
    rotation_a.cmp(rotation_b)
}

/// Perform the inverse Burrows-Wheeler Transform on one block.
///
/// Fails with [`OxiBwtError::InvalidInput`] if `data` lacks either sentinel,
/// or if following the permutation does not lead back to a
/// sentinel-delimited block.
pub fn inverse_transform(data: &[u8]) -> Result<Vec<u8>> {
    if !data.contains(&START_SENTINEL) {
        return Err(OxiBwtError::invalid_input(
            "permuted block is missing the start sentinel 0x02",
        ));
    }
    let Some(end_pos) = data.iter().position(|&b| b == END_SENTINEL) else {
        return Err(OxiBwtError::invalid_input(
            "permuted block is missing the end sentinel 0x03",
        ));
    };

    let n = data.len();
    let lf = lf_mapping(data);

    // The end sentinel's row is the rotation that starts with the start sentinel
    let mut rotation = Vec::with_capacity(n);
    let mut x = end_pos;
    for _ in 0..n {
        x = lf[x];
        rotation.push(data[x]);
    }

    if rotation.first() != Some(&START_SENTINEL) || rotation.last() != Some(&END_SENTINEL) {
        return Err(OxiBwtError::invalid_input(
            "permuted block does not reconstruct a sentinel-delimited block",
        ));
    }

    Ok(rotation[1..n - 1].to_vec())
}

/// Build the LF-mapping of a permuted block.
///
/// `map[i]` is the index in `data` supplying the byte at position `i` of the
/// sorted copy of `data`. Equal bytes are paired in order of appearance, so
/// the k-th occurrence of a value in sorted order maps to its k-th
/// occurrence in `data`. The result is a permutation of `0..data.len()`.
pub fn lf_mapping(data: &[u8]) -> Vec<usize> {
    let mut counts = [0usize; 256];
    for &byte in data {
        counts[byte as usize] += 1;
    }

    // First sorted position of each byte value
    let mut next = [0usize; 256];
    let mut total = 0;
    for (slot, &count) in next.iter_mut().zip(counts.iter()) {
        *slot = total;
        total += count;
    }

    let mut map = vec![0usize; data.len()];
    for (j, &byte) in data.iter().enumerate() {
        map[next[byte as usize]] = j;
        next[byte as usize] += 1;
    }

    map
}
