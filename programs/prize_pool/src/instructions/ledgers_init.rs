use anchor_lang::prelude::*;

use crate::constants::MAX_ENTRIES;
use crate::errors::PrizePoolErrorCode;
use crate::state::*;

/// Creates the entry ledger, group registry and sortition tree.
///
/// Kept apart from `initialize` to stay within per-instruction heap limits.
#[derive(Accounts)]
pub struct InitializeLedgers<'info> {
    #[account(
        seeds = [Config::SEED],
        bump = config.bump,
        has_one = authority @ PrizePoolErrorCode::NotAuthorized
    )]
    pub config: Box<Account<'info, Config>>,

    #[account(
        init,
        payer = authority,
        space = 8 + EntryLedger::SIZE,
        seeds = [EntryLedger::SEED],
        bump
    )]
    pub entry_ledger: Box<Account<'info, EntryLedger>>,

    #[account(
        init,
        payer = authority,
        space = 8 + GroupRegistry::SIZE,
        seeds = [GroupRegistry::SEED],
        bump
    )]
    pub group_registry: Box<Account<'info, GroupRegistry>>,

    #[account(
        init,
        payer = authority,
        space = 8 + SortitionTree::SIZE,
        seeds = [SortitionTree::SEED],
        bump
    )]
    pub sortition_tree: Box<Account<'info, SortitionTree>>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn initialize_ledgers_handler(ctx: Context<InitializeLedgers>) -> Result<()> {
    let ledger = &mut ctx.accounts.entry_ledger;
    ledger.entries = Vec::new();
    ledger.total_active = 0;
    ledger.total_pending = 0;
    ledger.bump = ctx.bumps.entry_ledger;
    ledger._reserved = [0; 16];

    let registry = &mut ctx.accounts.group_registry;
    registry.groups = Vec::new();
    registry.bump = ctx.bumps.group_registry;
    registry._reserved = [0; 16];

    ctx.accounts
        .sortition_tree
        .init(MAX_ENTRIES, ctx.bumps.sortition_tree)?;

    msg!("Ledgers initialized: capacity={}", MAX_ENTRIES);
    Ok(())
}
