use anchor_lang::prelude::*;

use crate::constants::NO_GROUP;
use crate::errors::PrizePoolErrorCode;
use crate::utils::random::hash_secret;

/// ---------------------------------------------------------------------------
/// PoolState
/// ---------------------------------------------------------------------------
///
/// Process-wide draw state: the pending commitment, draw bookkeeping and the
/// running total of credited-but-unwithdrawn prizes.
///
/// The PDA also signs for the pool token vault.
#[account]
pub struct PoolState {
    /// SHA-256 of the secret to be revealed by the next draw.
    pub hash_of_secret: [u8; 32],

    /// Completed draws, including an initial empty one.
    pub draw_count: u64,

    /// Slot of the last completed draw.
    pub last_draw_slot: u64,

    /// Slot of the last activation pass (draw or explicit).
    pub last_activation_slot: u64,

    /// Sum of `total_winnings` over all entries.
    pub unclaimed_winnings: u64,

    /// Yield rate observed at the last draw, 1e18 = 100% per slot. Advisory.
    pub supply_rate_mantissa: u64,

    // ─────────────────────────────
    // Last draw record
    // ─────────────────────────────
    /// `Pubkey::default()` until someone wins.
    pub last_winner: Pubkey,
    pub last_winner_group: i64,
    pub last_interest: u64,

    /// Donations received since initialization (analytics only).
    pub total_donations: u64,

    pub bump: u8,
    pub version: u8,
    pub _reserved: [u8; 32],
}

impl PoolState {
    pub const SEED: &'static [u8] = b"pool_state";

    pub const SIZE: usize =
        32  // hash_of_secret
            + 8   // draw_count
            + 8   // last_draw_slot
            + 8   // last_activation_slot
            + 8   // unclaimed_winnings
            + 8   // supply_rate_mantissa
            + 32  // last_winner
            + 8   // last_winner_group
            + 8   // last_interest
            + 8   // total_donations
            + 1   // bump
            + 1   // version
            + 32; // reserved

    pub fn init(
        &mut self,
        hash_of_secret: [u8; 32],
        supply_rate_mantissa: u64,
        slot: u64,
        bump: u8,
    ) -> Result<()> {
        require!(
            hash_of_secret != [0u8; 32],
            PrizePoolErrorCode::InvalidCommitment
        );
        self.hash_of_secret = hash_of_secret;
        self.draw_count = 0;
        self.last_draw_slot = slot;
        self.last_activation_slot = slot;
        self.unclaimed_winnings = 0;
        self.supply_rate_mantissa = supply_rate_mantissa;
        self.last_winner = Pubkey::default();
        self.last_winner_group = NO_GROUP;
        self.last_interest = 0;
        self.total_donations = 0;
        self.bump = bump;
        self.version = 1;
        self._reserved = [0u8; 32];
        Ok(())
    }

    pub fn has_drawn(&self) -> bool {
        self.draw_count > 0
    }

    /// Fails with `SecretMismatch` unless `secret` opens the current commitment.
    pub fn verify_secret(&self, secret: &[u8; 32]) -> Result<()> {
        require!(
            hash_secret(secret) == self.hash_of_secret,
            PrizePoolErrorCode::SecretMismatch
        );
        Ok(())
    }

    /// Records a finished draw and rotates the commitment.
    pub fn complete_draw(
        &mut self,
        next_hash_of_secret: [u8; 32],
        slot: u64,
        winner: Option<Pubkey>,
        winner_group: i64,
        interest: u64,
        supply_rate_mantissa: u64,
    ) -> Result<()> {
        let draw_count = self
            .draw_count
            .checked_add(1)
            .ok_or(PrizePoolErrorCode::MathOverflow)?;

        self.hash_of_secret = next_hash_of_secret;
        self.last_draw_slot = slot;
        self.draw_count = draw_count;
        self.supply_rate_mantissa = supply_rate_mantissa;
        self.last_interest = interest;
        if let Some(winner) = winner {
            self.last_winner = winner;
            self.last_winner_group = winner_group;
        }
        Ok(())
    }
}

/// Pool metadata returned by `get_pool_info`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct PoolInfo {
    pub hash_of_secret: [u8; 32],
    pub unclaimed_winnings: u64,
    pub supply_rate_mantissa: u64,
    pub ticket_price: u64,
    pub total_active: u64,
    pub total_pending: u64,
    pub draw_count: u64,
    pub last_winner: Pubkey,
    pub last_winner_group: i64,
    pub last_interest: u64,
    pub entry_count: u32,
    pub group_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::{expect_code, test_pool_state};

    #[test]
    fn pool_state_size_matches_serialization() {
        let state = test_pool_state(&[1u8; 32]);

        let mut bytes = Vec::new();
        state.serialize(&mut bytes).unwrap();
        assert_eq!(bytes.len(), PoolState::SIZE);
    }

    #[test]
    fn init_rejects_empty_commitment() {
        let mut state = test_pool_state(&[1u8; 32]);
        expect_code(
            state.init([0u8; 32], 0, 0, 0),
            PrizePoolErrorCode::InvalidCommitment,
        );
    }

    #[test]
    fn secret_must_open_commitment() {
        let state = test_pool_state(&[9u8; 32]);
        state.verify_secret(&[9u8; 32]).unwrap();
        expect_code(
            state.verify_secret(&[8u8; 32]),
            PrizePoolErrorCode::SecretMismatch,
        );
    }

    #[test]
    fn complete_draw_rotates_and_records() {
        let mut state = test_pool_state(&[9u8; 32]);
        let winner = Pubkey::new_unique();

        state
            .complete_draw([2u8; 32], 50, Some(winner), 3, 120, 77)
            .unwrap();
        assert_eq!(state.hash_of_secret, [2u8; 32]);
        assert_eq!(state.draw_count, 1);
        assert_eq!(state.last_draw_slot, 50);
        assert_eq!(state.last_winner, winner);
        assert_eq!(state.last_winner_group, 3);
        assert_eq!(state.last_interest, 120);
        assert_eq!(state.supply_rate_mantissa, 77);

        // An empty draw keeps the previous winner on record.
        state.complete_draw([3u8; 32], 60, None, NO_GROUP, 0, 77).unwrap();
        assert_eq!(state.last_winner, winner);
        assert_eq!(state.draw_count, 2);
    }
}
