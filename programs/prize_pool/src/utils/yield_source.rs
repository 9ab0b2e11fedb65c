use anchor_lang::prelude::*;

use crate::errors::PrizePoolErrorCode;
use crate::state::pool_state::PoolState;
use crate::state::reserve::Reserve;
use crate::utils::transfers::transfer_tokens_signed;

/// Money market the pool supplies principal to.
///
/// Draw and withdrawal logic only see this trait, so the backend can change
/// without touching them.
pub trait YieldSource {
    /// Moves `amount` from the pool into the market.
    fn supply(&mut self, amount: u64) -> Result<()>;

    /// Moves `amount` of underlying from the market back to the pool.
    fn redeem(&mut self, amount: u64) -> Result<()>;

    /// Principal plus interest currently owned by the pool.
    fn balance_of_underlying(&self) -> Result<u64>;

    /// Advisory rate, 1e18 = 100% per slot.
    fn supply_rate_per_slot(&self) -> u64;
}

/// Token accounts the reserve needs to move funds.
pub struct ReserveTransfers<'info> {
    pub token_program: AccountInfo<'info>,
    pub pool_vault: AccountInfo<'info>,
    pub pool_authority: AccountInfo<'info>,
    pub pool_authority_bump: u8,
    pub reserve_vault: AccountInfo<'info>,
    pub reserve_authority: AccountInfo<'info>,
    /// Reserve vault balance, tracked across calls within one instruction.
    pub reserve_liquidity: u64,
}

/// `YieldSource` backed by the program's own `Reserve` account.
pub struct ReserveYieldSource<'a, 'info> {
    reserve: &'a mut Reserve,
    slot: u64,
    transfers: Option<ReserveTransfers<'info>>,
}

impl<'a, 'info> ReserveYieldSource<'a, 'info> {
    pub fn new(reserve: &'a mut Reserve, slot: u64, transfers: ReserveTransfers<'info>) -> Self {
        Self {
            reserve,
            slot,
            transfers: Some(transfers),
        }
    }

    /// Read-only use (the draw): balance and rate, no token movement.
    pub fn accounting_only(reserve: &'a mut Reserve, slot: u64) -> Self {
        Self {
            reserve,
            slot,
            transfers: None,
        }
    }
}

impl<'a, 'info> YieldSource for ReserveYieldSource<'a, 'info> {
    fn supply(&mut self, amount: u64) -> Result<()> {
        let transfers = self
            .transfers
            .as_mut()
            .ok_or(PrizePoolErrorCode::ReserveTransfersUnavailable)?;
        self.reserve.accrue(self.slot)?;

        let bump = [transfers.pool_authority_bump];
        let seeds: &[&[u8]] = &[PoolState::SEED, &bump];
        transfer_tokens_signed(
            &transfers.token_program,
            &transfers.pool_vault,
            &transfers.reserve_vault,
            &transfers.pool_authority,
            &[seeds],
            amount,
        )?;

        transfers.reserve_liquidity = transfers
            .reserve_liquidity
            .checked_add(amount)
            .ok_or(PrizePoolErrorCode::MathOverflow)?;
        self.reserve.record_supply(amount)
    }

    fn redeem(&mut self, amount: u64) -> Result<()> {
        let transfers = self
            .transfers
            .as_mut()
            .ok_or(PrizePoolErrorCode::ReserveTransfersUnavailable)?;
        require!(
            transfers.reserve_liquidity >= amount,
            PrizePoolErrorCode::InsufficientLiquidity
        );
        self.reserve.accrue(self.slot)?;
        self.reserve.record_redeem(amount)?;

        let bump = [self.reserve.bump];
        let seeds: &[&[u8]] = &[Reserve::SEED, &bump];
        transfer_tokens_signed(
            &transfers.token_program,
            &transfers.reserve_vault,
            &transfers.pool_vault,
            &transfers.reserve_authority,
            &[seeds],
            amount,
        )?;

        transfers.reserve_liquidity -= amount;
        Ok(())
    }

    fn balance_of_underlying(&self) -> Result<u64> {
        self.reserve.balance_at(self.slot)
    }

    fn supply_rate_per_slot(&self) -> u64 {
        self.reserve.supply_rate_mantissa
    }
}
