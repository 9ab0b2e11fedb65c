use anchor_lang::prelude::*;

use crate::constants::{GROUP_SPLIT_EVEN, GROUP_SPLIT_PROPORTIONAL};
use crate::errors::PrizePoolErrorCode;

/// How a group's prize is divided among its members.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum GroupSplit {
    /// Equal shares.
    Even = GROUP_SPLIT_EVEN,
    /// Shares weighted by each member's active amount.
    Proportional = GROUP_SPLIT_PROPORTIONAL,
}

impl GroupSplit {
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn from_u8(value: u8) -> Result<Self> {
        match value {
            GROUP_SPLIT_EVEN => Ok(GroupSplit::Even),
            GROUP_SPLIT_PROPORTIONAL => Ok(GroupSplit::Proportional),
            _ => err!(PrizePoolErrorCode::InvalidGroupSplit),
        }
    }
}

/// Global configuration PDA.
///
/// Stores roles, the token mint and vault addresses, the ticket price,
/// pause flags and the group split policy. Holds no tokens.
#[account]
pub struct Config {
    /// 1 = buying and donations paused, 0 = enabled.
    pub pause_buy: u8,

    /// 1 = withdrawals paused, 0 = enabled.
    pub pause_withdraw: u8,

    /// Pool owner. Only the owner may update this account.
    pub authority: Pubkey,

    /// Operator allowed to draw, activate entries and set the reserve rate.
    pub admin: Pubkey,

    /// Mint of the pooled token.
    pub mint: Pubkey,

    /// Token account holding participant deposits in transit (owned by PoolState).
    pub pool_vault: Pubkey,

    /// Token account backing the reserve (owned by Reserve).
    pub reserve_vault: Pubkey,

    /// Price of one ticket in token base units. Immutable after initialization.
    pub ticket_price: u64,

    /// `GroupSplit` as u8.
    pub group_split: u8,

    /// Unix timestamp when the pool was initialized.
    pub started_at: i64,

    /// Slot when the pool was initialized.
    pub started_slot: u64,

    pub bump: u8,

    pub _reserved: [u8; 16],
}

impl Config {
    pub const SEED: &'static [u8] = b"config";

    /// Serialized size excluding the 8-byte Anchor discriminator.
    pub const SIZE: usize =
        1 +  // pause_buy
            1 +  // pause_withdraw
            32 + // authority
            32 + // admin
            32 + // mint
            32 + // pool_vault
            32 + // reserve_vault
            8 +  // ticket_price
            1 +  // group_split
            8 +  // started_at
            8 +  // started_slot
            1 +  // bump
            16;  // reserved

    pub fn is_buying_paused(&self) -> bool {
        self.pause_buy != 0
    }

    pub fn is_withdraw_paused(&self) -> bool {
        self.pause_withdraw != 0
    }

    /// Owner or admin.
    pub fn is_operator(&self, key: &Pubkey) -> bool {
        *key == self.authority || *key == self.admin
    }

    pub fn require_operator(&self, key: &Pubkey) -> Result<()> {
        require!(self.is_operator(key), PrizePoolErrorCode::NotAuthorized);
        Ok(())
    }

    /// Rejects keys that can never sign for the owner or admin role.
    pub fn require_assignable(key: &Pubkey) -> Result<()> {
        require!(
            *key != Pubkey::default(),
            PrizePoolErrorCode::InvalidAuthorityTarget
        );
        Ok(())
    }

    pub fn group_split_policy(&self) -> Result<GroupSplit> {
        GroupSplit::from_u8(self.group_split)
    }
}
