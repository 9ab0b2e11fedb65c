use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::errors::PrizePoolErrorCode;
use crate::events::PrizeDonated;
use crate::state::*;
use crate::utils::tickets::donate;
use crate::utils::transfers::SplTokenGateway;
use crate::utils::yield_source::{ReserveTransfers, ReserveYieldSource};

#[derive(Accounts)]
pub struct DonateToPrizePool<'info> {
    #[account(mut)]
    pub donor: Signer<'info>,

    #[account(
        mut,
        token::mint = config.mint,
        token::authority = donor,
    )]
    pub donor_token: Box<Account<'info, TokenAccount>>,

    #[account(
        seeds = [Config::SEED],
        bump = config.bump,
    )]
    pub config: Box<Account<'info, Config>>,

    #[account(
        mut,
        seeds = [PoolState::SEED],
        bump = pool_state.bump,
    )]
    pub pool_state: Box<Account<'info, PoolState>>,

    #[account(
        mut,
        seeds = [Reserve::SEED],
        bump = reserve.bump,
    )]
    pub reserve: Box<Account<'info, Reserve>>,

    #[account(
        mut,
        address = config.pool_vault @ PrizePoolErrorCode::NotAuthorized
    )]
    pub pool_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        address = config.reserve_vault @ PrizePoolErrorCode::NotAuthorized
    )]
    pub reserve_vault: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

/// Adds `amount` to next draw's prize without buying tickets.
pub fn donate_to_prize_pool_handler(ctx: Context<DonateToPrizePool>, amount: u64) -> Result<()> {
    let clock = Clock::get()?;
    let donor = ctx.accounts.donor.key();

    let mut token = SplTokenGateway {
        token_program: ctx.accounts.token_program.to_account_info(),
        pool_vault: ctx.accounts.pool_vault.to_account_info(),
        pool_authority: ctx.accounts.pool_state.to_account_info(),
        pool_authority_bump: ctx.accounts.pool_state.bump,
        participant: ctx.accounts.donor.to_account_info(),
        participant_token: ctx.accounts.donor_token.to_account_info(),
        participant_balance: ctx.accounts.donor_token.amount,
    };
    let transfers = ReserveTransfers {
        token_program: ctx.accounts.token_program.to_account_info(),
        pool_vault: ctx.accounts.pool_vault.to_account_info(),
        pool_authority: ctx.accounts.pool_state.to_account_info(),
        pool_authority_bump: ctx.accounts.pool_state.bump,
        reserve_vault: ctx.accounts.reserve_vault.to_account_info(),
        reserve_authority: ctx.accounts.reserve.to_account_info(),
        reserve_liquidity: ctx.accounts.reserve_vault.amount,
    };

    let config = &ctx.accounts.config;
    let state = &mut ctx.accounts.pool_state;
    let mut yield_source = ReserveYieldSource::new(&mut ctx.accounts.reserve, clock.slot, transfers);

    donate(config, state, &mut token, &mut yield_source, donor, amount)?;

    emit!(PrizeDonated { donor, amount });
    Ok(())
}
