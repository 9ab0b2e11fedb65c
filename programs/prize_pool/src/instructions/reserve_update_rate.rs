use anchor_lang::prelude::*;

use crate::state::*;

#[derive(Accounts)]
pub struct UpdateReserveRate<'info> {
    pub operator: Signer<'info>,

    #[account(
        seeds = [Config::SEED],
        bump = config.bump,
    )]
    pub config: Box<Account<'info, Config>>,

    #[account(
        mut,
        seeds = [Reserve::SEED],
        bump = reserve.bump,
    )]
    pub reserve: Box<Account<'info, Reserve>>,
}

/// Owner or admin. Interest up to the current slot accrues at the old rate.
pub fn update_reserve_rate_handler(
    ctx: Context<UpdateReserveRate>,
    supply_rate_mantissa: u64,
) -> Result<()> {
    ctx.accounts
        .config
        .require_operator(&ctx.accounts.operator.key())?;

    let slot = Clock::get()?.slot;
    let reserve = &mut ctx.accounts.reserve;
    let previous = reserve.supply_rate_mantissa;
    reserve.set_rate(slot, supply_rate_mantissa)?;

    msg!(
        "Reserve rate: {} -> {} at slot {} (balance={})",
        previous,
        supply_rate_mantissa,
        slot,
        reserve.supplied_balance
    );
    Ok(())
}
