use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{GROUP_SPLIT_EVEN, POOL_VAULT_SEED, RESERVE_VAULT_SEED};
use crate::errors::PrizePoolErrorCode;
use crate::state::*;

#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Global config PDA.
    #[account(
        init,
        payer = authority,
        space = 8 + Config::SIZE,
        seeds = [Config::SEED],
        bump
    )]
    pub config: Box<Account<'info, Config>>,

    /// Draw state PDA; also authority of the pool vault.
    #[account(
        init,
        payer = authority,
        space = 8 + PoolState::SIZE,
        seeds = [PoolState::SEED],
        bump
    )]
    pub pool_state: Box<Account<'info, PoolState>>,

    /// Money market backing the pool's yield.
    #[account(
        init,
        payer = authority,
        space = 8 + Reserve::SIZE,
        seeds = [Reserve::SEED],
        bump
    )]
    pub reserve: Box<Account<'info, Reserve>>,

    pub mint: Box<Account<'info, Mint>>,

    #[account(
        init,
        payer = authority,
        seeds = [POOL_VAULT_SEED],
        bump,
        token::mint = mint,
        token::authority = pool_state,
    )]
    pub pool_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        init,
        payer = authority,
        seeds = [RESERVE_VAULT_SEED],
        bump,
        token::mint = mint,
        token::authority = reserve,
    )]
    pub reserve_vault: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn initialize_handler(
    ctx: Context<Initialize>,
    ticket_price: u64,
    hash_of_secret: [u8; 32],
    supply_rate_mantissa: u64,
    admin: Pubkey,
) -> Result<()> {
    require!(ticket_price > 0, PrizePoolErrorCode::InvalidTicketPrice);
    Config::require_assignable(&admin)?;

    let authority_key = ctx.accounts.authority.key();
    let mint_key = ctx.accounts.mint.key();
    let pool_vault_key = ctx.accounts.pool_vault.key();
    let reserve_vault_key = ctx.accounts.reserve_vault.key();
    let clock = Clock::get()?;

    // ────────────────────────────────────────────────
    // Initialize config
    // ────────────────────────────────────────────────
    let cfg = &mut ctx.accounts.config;
    cfg.pause_buy = 0;
    cfg.pause_withdraw = 0;
    cfg.authority = authority_key;
    cfg.admin = admin;
    cfg.mint = mint_key;
    cfg.pool_vault = pool_vault_key;
    cfg.reserve_vault = reserve_vault_key;
    cfg.ticket_price = ticket_price;
    cfg.group_split = GROUP_SPLIT_EVEN;
    cfg.started_at = clock.unix_timestamp;
    cfg.started_slot = clock.slot;
    cfg.bump = ctx.bumps.config;
    cfg._reserved = [0; 16];

    // ────────────────────────────────────────────────
    // Initialize pool state
    // ────────────────────────────────────────────────
    ctx.accounts.pool_state.init(
        hash_of_secret,
        supply_rate_mantissa,
        clock.slot,
        ctx.bumps.pool_state,
    )?;

    // ────────────────────────────────────────────────
    // Initialize reserve
    // ────────────────────────────────────────────────
    let reserve = &mut ctx.accounts.reserve;
    reserve.authority = authority_key;
    reserve.mint = mint_key;
    reserve.liquidity_vault = reserve_vault_key;
    reserve.supply_rate_mantissa = supply_rate_mantissa;
    reserve.supplied_balance = 0;
    reserve.last_accrual_slot = clock.slot;
    reserve.total_supplied = 0;
    reserve.total_redeemed = 0;
    reserve.total_funded = 0;
    reserve.total_interest_accrued = 0;
    reserve.bump = ctx.bumps.reserve;
    reserve.version = 1;
    reserve._reserved = [0; 32];

    msg!(
        "Pool initialized: ticket_price={} rate={} admin={}",
        ticket_price,
        supply_rate_mantissa,
        admin
    );
    Ok(())
}
