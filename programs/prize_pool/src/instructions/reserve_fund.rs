use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::errors::PrizePoolErrorCode;
use crate::events::ReserveFunded;
use crate::state::*;
use crate::utils::transfers::transfer_tokens;

/// Sponsor liquidity for the reserve. It pays the interest the reserve owes
/// the pool; nobody gets tickets or prizes for it.
#[derive(Accounts)]
pub struct FundReserve<'info> {
    #[account(mut)]
    pub funder: Signer<'info>,

    #[account(
        mut,
        token::mint = config.mint,
        token::authority = funder,
    )]
    pub funder_token: Box<Account<'info, TokenAccount>>,

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

    #[account(
        mut,
        address = config.reserve_vault @ PrizePoolErrorCode::NotAuthorized
    )]
    pub reserve_vault: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

pub fn fund_reserve_handler(ctx: Context<FundReserve>, amount: u64) -> Result<()> {
    require!(
        ctx.accounts.funder_token.amount >= amount,
        PrizePoolErrorCode::InsufficientAllowance
    );

    transfer_tokens(
        &ctx.accounts.token_program.to_account_info(),
        &ctx.accounts.funder_token.to_account_info(),
        &ctx.accounts.reserve_vault.to_account_info(),
        &ctx.accounts.funder.to_account_info(),
        amount,
    )?;
    let slot = Clock::get()?.slot;
    ctx.accounts.reserve.record_funding(slot, amount)?;

    emit!(ReserveFunded {
        funder: ctx.accounts.funder.key(),
        amount,
    });
    Ok(())
}
