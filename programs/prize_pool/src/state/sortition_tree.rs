use anchor_lang::prelude::*;

use crate::constants::MAX_ENTRIES;
use crate::errors::PrizePoolErrorCode;

/// ---------------------------------------------------------------------------
/// SortitionTree
/// ---------------------------------------------------------------------------
///
/// Weighted binary sum-tree used for O(log n) weighted random draws.
///
/// Layout (heap order, fixed at initialization):
///   - `nodes[1]` is the root and holds the total weight
///   - node `i` has children `2i` and `2i + 1`
///   - leaves occupy `nodes[capacity..2 * capacity]`
///   - `nodes[0]` is unused
///
/// Leaf `i` belongs to ledger entry `i` and carries that entry's active amount.
/// Weights are plain integers, so every draw is exactly reproducible.
#[account]
pub struct SortitionTree {
    /// Number of leaves. Power of two.
    pub capacity: u32,

    /// Leaves that have been assigned a key (`0..leaf_count`).
    pub leaf_count: u32,

    /// Node weights, `2 * capacity` long.
    pub nodes: Vec<u64>,

    /// Key of each leaf, `capacity` long. `Pubkey::default()` = unassigned.
    pub keys: Vec<Pubkey>,

    /// PDA bump.
    pub bump: u8,

    /// Reserved for future fields.
    pub _reserved: [u8; 16],
}

impl SortitionTree {
    pub const SEED: &'static [u8] = b"sortition_tree";

    /// Serialized size at `MAX_ENTRIES` leaves, excluding the discriminator.
    pub const SIZE: usize =
        4   // capacity
            + 4   // leaf_count
            + 4 + (8 * 2 * MAX_ENTRIES)  // nodes
            + 4 + (32 * MAX_ENTRIES)     // keys
            + 1   // bump
            + 16; // reserved

    pub fn init(&mut self, capacity: usize, bump: u8) -> Result<()> {
        require!(
            capacity > 0 && capacity.is_power_of_two() && capacity <= MAX_ENTRIES,
            PrizePoolErrorCode::TreeFull
        );
        self.capacity = capacity as u32;
        self.leaf_count = 0;
        self.nodes = vec![0u64; 2 * capacity];
        self.keys = vec![Pubkey::default(); capacity];
        self.bump = bump;
        self._reserved = [0u8; 16];
        Ok(())
    }

    /// Root weight.
    pub fn total_weight(&self) -> u64 {
        self.nodes.get(1).copied().unwrap_or(0)
    }

    pub fn weight_of(&self, leaf: usize) -> u64 {
        let capacity = self.capacity as usize;
        if leaf >= capacity {
            return 0;
        }
        self.nodes[capacity + leaf]
    }

    pub fn leaf_of(&self, key: &Pubkey) -> Option<usize> {
        self.keys[..self.leaf_count as usize]
            .iter()
            .position(|k| k == key)
    }

    /// Sets the weight of `key`, assigning it the next free leaf if it has none.
    pub fn set(&mut self, key: Pubkey, weight: u64) -> Result<()> {
        let leaf = match self.leaf_of(&key) {
            Some(leaf) => leaf,
            None => self.leaf_count as usize,
        };
        self.set_leaf(leaf, key, weight)
    }

    /// Sets the weight of a known leaf and refreshes every ancestor.
    ///
    /// Weight 0 keeps the leaf (and its key) but removes it from future draws.
    /// A zero-weight leaf may be rebound to a new key; a weighted one may not.
    pub fn set_leaf(&mut self, leaf: usize, key: Pubkey, weight: u64) -> Result<()> {
        let capacity = self.capacity as usize;
        require!(leaf < capacity, PrizePoolErrorCode::TreeFull);

        let current = self.keys[leaf];
        if current == Pubkey::default() {
            self.keys[leaf] = key;
            self.leaf_count = self.leaf_count.max(leaf as u32 + 1);
        } else if current != key {
            require!(
                self.nodes[capacity + leaf] == 0,
                PrizePoolErrorCode::AssertInvariantFailed
            );
            self.keys[leaf] = key;
        }

        let mut node = capacity + leaf;
        self.nodes[node] = weight;
        while node > 1 {
            node /= 2;
            self.nodes[node] = self.nodes[2 * node]
                .checked_add(self.nodes[2 * node + 1])
                .ok_or(PrizePoolErrorCode::MathOverflow)?;
        }
        Ok(())
    }

    /// Leaf selected by `value`, which must lie in `[0, total_weight)`.
    ///
    /// Each leaf owns the half-open interval of width equal to its weight, laid
    /// out left to right, so zero-weight leaves can never be selected.
    pub fn draw_leaf(&self, value: u64) -> Result<usize> {
        let total = self.total_weight();
        require!(total > 0, PrizePoolErrorCode::EmptyTree);
        require!(value < total, PrizePoolErrorCode::DrawValueOutOfRange);

        let capacity = self.capacity as usize;
        let mut remaining = value;
        let mut node = 1usize;
        while node < capacity {
            let left = self.nodes[2 * node];
            if remaining < left {
                node = 2 * node;
            } else {
                remaining -= left;
                node = 2 * node + 1;
            }
        }
        Ok(node - capacity)
    }

    pub fn draw(&self, value: u64) -> Result<Pubkey> {
        let leaf = self.draw_leaf(value)?;
        Ok(self.keys[leaf])
    }
}
