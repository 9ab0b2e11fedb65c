use anchor_lang::prelude::*;

use crate::errors::PrizePoolErrorCode;
use crate::utils::fixed::Fixed;

/// ---------------------------------------------------------------------------
/// Reserve
/// ---------------------------------------------------------------------------
///
/// Program-owned money market backing the pool's yield source.
///
/// The pool supplies principal into the reserve vault. Between accruals the
/// supplied balance grows linearly at `supply_rate_mantissa` (1e18 = 100% per
/// slot); every supply, redeem, funding or rate change folds the interest into
/// the balance, so growth compounds once per interaction.
///
/// Interest is backed by sponsor liquidity added through `fund_reserve`. The
/// reserve never credits more than `total_funded - total_interest_accrued`, so
/// the vault always covers the supplied balance.
#[account]
pub struct Reserve {
    /// Who may change the rate (mirrors Config authority at init).
    pub authority: Pubkey,

    pub mint: Pubkey,

    /// Token account holding reserve liquidity.
    pub liquidity_vault: Pubkey,

    /// Interest per slot, scaled by 1e18.
    pub supply_rate_mantissa: u64,

    /// Principal plus accrued interest owed to the pool as of `last_accrual_slot`.
    pub supplied_balance: u64,

    pub last_accrual_slot: u64,

    // ─────────────────────────────
    // Accounting / stats
    // ─────────────────────────────

    /// Total ever supplied by the pool (monotonic).
    pub total_supplied: u64,

    /// Total ever redeemed by the pool (monotonic).
    pub total_redeemed: u64,

    /// Sponsor liquidity deposited (monotonic). Caps total interest.
    pub total_funded: u64,

    /// Interest ever credited to the pool (monotonic).
    pub total_interest_accrued: u64,

    pub bump: u8,
    pub version: u8,
    pub _reserved: [u8; 32],
}

impl Reserve {
    pub const SEED: &'static [u8] = b"reserve";
    pub const SIZE: usize =
        32 + // authority
            32 + // mint
            32 + // liquidity_vault
            8  + // supply_rate_mantissa
            8  + // supplied_balance
            8  + // last_accrual_slot
            8  + // total_supplied
            8  + // total_redeemed
            8  + // total_funded
            8  + // total_interest_accrued
            1  + // bump
            1  + // version
            32;  // reserved
    // space = 8 (discriminator) + Reserve::SIZE

    /// Sponsor liquidity not yet credited as interest.
    pub fn uncredited_funding(&self) -> u64 {
        self.total_funded.saturating_sub(self.total_interest_accrued)
    }

    /// Interest owed on the supplied balance between `last_accrual_slot` and
    /// `slot`, capped by the sponsor liquidity still uncredited.
    pub fn accrued_interest(&self, slot: u64) -> Result<u64> {
        let available = self.uncredited_funding();
        if self.supplied_balance == 0 || self.supply_rate_mantissa == 0 || available == 0 {
            return Ok(0);
        }
        let elapsed = slot.saturating_sub(self.last_accrual_slot);
        let interest = self.interest_fraction(elapsed)?.apply_to(self.supplied_balance)?;
        Ok(interest.min(available))
    }

    /// Linear growth over `slots` slots at the current rate.
    pub fn interest_fraction(&self, slots: u64) -> Result<Fixed> {
        Fixed::from_mantissa(self.supply_rate_mantissa as u128).multiply(Fixed::new_fixed(slots))
    }

    /// Supplied balance as it would read at `slot`.
    pub fn balance_at(&self, slot: u64) -> Result<u64> {
        self.supplied_balance
            .checked_add(self.accrued_interest(slot)?)
            .ok_or_else(|| error!(PrizePoolErrorCode::MathOverflow))
    }

    /// Folds accrued interest into the supplied balance. Returns the interest.
    pub fn accrue(&mut self, slot: u64) -> Result<u64> {
        let interest = self.accrued_interest(slot)?;
        let supplied_balance = self
            .supplied_balance
            .checked_add(interest)
            .ok_or(PrizePoolErrorCode::MathOverflow)?;
        let total_interest = self
            .total_interest_accrued
            .checked_add(interest)
            .ok_or(PrizePoolErrorCode::MathOverflow)?;

        self.supplied_balance = supplied_balance;
        self.total_interest_accrued = total_interest;
        self.last_accrual_slot = self.last_accrual_slot.max(slot);
        Ok(interest)
    }

    pub fn record_supply(&mut self, amount: u64) -> Result<()> {
        self.supplied_balance = self
            .supplied_balance
            .checked_add(amount)
            .ok_or(PrizePoolErrorCode::MathOverflow)?;
        self.total_supplied = self
            .total_supplied
            .checked_add(amount)
            .ok_or(PrizePoolErrorCode::MathOverflow)?;
        Ok(())
    }

    pub fn record_redeem(&mut self, amount: u64) -> Result<()> {
        let supplied_balance = self
            .supplied_balance
            .checked_sub(amount)
            .ok_or(PrizePoolErrorCode::InsufficientLiquidity)?;
        let total_redeemed = self
            .total_redeemed
            .checked_add(amount)
            .ok_or(PrizePoolErrorCode::MathOverflow)?;

        self.supplied_balance = supplied_balance;
        self.total_redeemed = total_redeemed;
        Ok(())
    }

    /// Adds sponsor liquidity. Slots that passed unfunded earn nothing.
    pub fn record_funding(&mut self, slot: u64, amount: u64) -> Result<()> {
        let total_funded = self
            .total_funded
            .checked_add(amount)
            .ok_or(PrizePoolErrorCode::MathOverflow)?;
        self.accrue(slot)?;
        self.total_funded = total_funded;
        Ok(())
    }

    /// Accrues at the old rate up to `slot`, then switches rate.
    pub fn set_rate(&mut self, slot: u64, supply_rate_mantissa: u64) -> Result<()> {
        self.accrue(slot)?;
        self.supply_rate_mantissa = supply_rate_mantissa;
        Ok(())
    }
}
