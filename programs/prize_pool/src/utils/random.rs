use anchor_lang::prelude::*;
use sha2::{Digest, Sha256};

use crate::errors::PrizePoolErrorCode;

/// Commitment for a draw secret.
pub fn hash_secret(secret: &[u8; 32]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(secret);
    hasher.finalize().into()
}

/// Uniform-ish value in `[0, bound)` derived from the revealed secret and
/// block entropy.
///
/// `SHA-256(secret || entropy)` is read as a 256-bit big-endian integer and
/// reduced exactly modulo `bound`, byte by byte, in integer arithmetic.
pub fn random_below(secret: &[u8; 32], entropy: &[u8; 32], bound: u64) -> Result<u64> {
    require!(bound > 0, PrizePoolErrorCode::EmptyTree);

    let mut hasher = Sha256::new();
    hasher.update(secret);
    hasher.update(entropy);
    let digest: [u8; 32] = hasher.finalize().into();

    let modulus = bound as u128;
    let mut acc: u128 = 0;
    for byte in digest {
        // acc < 2^64, so acc * 256 + 255 fits comfortably in u128.
        acc = (acc * 256 + byte as u128) % modulus;
    }
    Ok(acc as u64)
}

/// Most recent hash in raw `SlotHashes` sysvar data.
///
/// Layout: u64 LE entry count, then `(slot: u64, hash: [u8; 32])` entries,
/// newest first.
pub fn parse_latest_slot_hash(data: &[u8]) -> Result<[u8; 32]> {
    require!(data.len() >= 48, PrizePoolErrorCode::InvalidSlotHashes);

    let mut count = [0u8; 8];
    count.copy_from_slice(&data[0..8]);
    require!(u64::from_le_bytes(count) > 0, PrizePoolErrorCode::InvalidSlotHashes);

    let mut hash = [0u8; 32];
    hash.copy_from_slice(&data[16..48]);
    Ok(hash)
}

/// Draw entropy from the `SlotHashes` sysvar account.
pub fn latest_slot_hash(slot_hashes: &AccountInfo) -> Result<[u8; 32]> {
    let data = slot_hashes.try_borrow_data()?;
    parse_latest_slot_hash(&data)
}
