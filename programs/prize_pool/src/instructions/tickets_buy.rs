use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::errors::PrizePoolErrorCode;
use crate::events::TicketsBought;
use crate::state::*;
use crate::utils::tickets::buy_tickets;
use crate::utils::transfers::SplTokenGateway;
use crate::utils::yield_source::{ReserveTransfers, ReserveYieldSource};

#[derive(Accounts)]
pub struct BuyTickets<'info> {
    #[account(mut)]
    pub participant: Signer<'info>,

    #[account(
        mut,
        token::mint = config.mint,
        token::authority = participant,
    )]
    pub participant_token: Box<Account<'info, TokenAccount>>,

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
        mut,
        seeds = [EntryLedger::SEED],
        bump = entry_ledger.bump,
    )]
    pub entry_ledger: Box<Account<'info, EntryLedger>>,

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

pub fn buy_tickets_handler(ctx: Context<BuyTickets>, count: u64) -> Result<()> {
    let clock = Clock::get()?;
    let participant = ctx.accounts.participant.key();

    let mut token = SplTokenGateway {
        token_program: ctx.accounts.token_program.to_account_info(),
        pool_vault: ctx.accounts.pool_vault.to_account_info(),
        pool_authority: ctx.accounts.pool_state.to_account_info(),
        pool_authority_bump: ctx.accounts.pool_state.bump,
        participant: ctx.accounts.participant.to_account_info(),
        participant_token: ctx.accounts.participant_token.to_account_info(),
        participant_balance: ctx.accounts.participant_token.amount,
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
    let ledger = &mut ctx.accounts.entry_ledger;
    let mut yield_source = ReserveYieldSource::new(&mut ctx.accounts.reserve, clock.slot, transfers);

    let purchase = buy_tickets(
        config,
        ledger,
        &mut token,
        &mut yield_source,
        participant,
        count,
    )?;

    emit!(TicketsBought {
        participant,
        tickets: count,
        cost: purchase.cost,
        pending_tickets_after: purchase.pending_tickets,
        entry_index: purchase.index as u32,
    });
    Ok(())
}
