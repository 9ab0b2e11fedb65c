use anchor_lang::prelude::*;

use crate::state::*;

#[derive(Accounts)]
pub struct GetPoolInfo<'info> {
    #[account(
        seeds = [Config::SEED],
        bump = config.bump,
    )]
    pub config: Box<Account<'info, Config>>,

    #[account(
        seeds = [PoolState::SEED],
        bump = pool_state.bump,
    )]
    pub pool_state: Box<Account<'info, PoolState>>,

    #[account(
        seeds = [EntryLedger::SEED],
        bump = entry_ledger.bump,
    )]
    pub entry_ledger: Box<Account<'info, EntryLedger>>,

    #[account(
        seeds = [GroupRegistry::SEED],
        bump = group_registry.bump,
    )]
    pub group_registry: Box<Account<'info, GroupRegistry>>,
}

/// Commitment, unclaimed winnings, rate and last draw record.
pub fn get_pool_info_handler(ctx: Context<GetPoolInfo>) -> Result<PoolInfo> {
    let config = &ctx.accounts.config;
    let state = &ctx.accounts.pool_state;
    let ledger = &ctx.accounts.entry_ledger;

    Ok(PoolInfo {
        hash_of_secret: state.hash_of_secret,
        unclaimed_winnings: state.unclaimed_winnings,
        supply_rate_mantissa: state.supply_rate_mantissa,
        ticket_price: config.ticket_price,
        total_active: ledger.total_active,
        total_pending: ledger.total_pending,
        draw_count: state.draw_count,
        last_winner: state.last_winner,
        last_winner_group: state.last_winner_group,
        last_interest: state.last_interest,
        entry_count: ledger.entries.len() as u32,
        group_count: ctx.accounts.group_registry.groups.len() as u32,
    })
}

#[derive(Accounts)]
pub struct GetInterestFraction<'info> {
    #[account(
        seeds = [Reserve::SEED],
        bump = reserve.bump,
    )]
    pub reserve: Box<Account<'info, Reserve>>,
}

/// Interest the reserve pays per unit over `slots` slots, as a 1e18 mantissa.
pub fn get_interest_fraction_handler(ctx: Context<GetInterestFraction>, slots: u64) -> Result<u128> {
    Ok(ctx.accounts.reserve.interest_fraction(slots)?.mantissa())
}
