use anchor_lang::prelude::*;

use crate::events::EntriesActivated;
use crate::state::*;
use crate::utils::tickets::{activate_entries, activate_entry};

#[derive(Accounts)]
pub struct ActivateEntries<'info> {
    pub operator: Signer<'info>,

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
        seeds = [EntryLedger::SEED],
        bump = entry_ledger.bump,
    )]
    pub entry_ledger: Box<Account<'info, EntryLedger>>,

    #[account(
        mut,
        seeds = [SortitionTree::SEED],
        bump = sortition_tree.bump,
    )]
    pub sortition_tree: Box<Account<'info, SortitionTree>>,
}

/// Owner or admin. Rolls every pending entry into active without drawing.
pub fn activate_entries_handler(ctx: Context<ActivateEntries>) -> Result<()> {
    ctx.accounts
        .config
        .require_operator(&ctx.accounts.operator.key())?;

    let slot = Clock::get()?.slot;
    let state = &mut ctx.accounts.pool_state;
    let ledger = &mut ctx.accounts.entry_ledger;
    let tree = &mut ctx.accounts.sortition_tree;

    let activated = activate_entries(state, ledger, tree, slot)?;
    msg!("Activated {} entries, total_active={}", activated, ledger.total_active);

    emit!(EntriesActivated {
        activated,
        total_active: ledger.total_active,
        slot,
    });
    Ok(())
}

/// Owner or admin. Rolls one participant's pending tickets into active.
pub fn activate_entry_handler(ctx: Context<ActivateEntries>, participant: Pubkey) -> Result<()> {
    ctx.accounts
        .config
        .require_operator(&ctx.accounts.operator.key())?;

    let slot = Clock::get()?.slot;
    let ledger = &mut ctx.accounts.entry_ledger;
    let tree = &mut ctx.accounts.sortition_tree;

    let moved = activate_entry(ledger, tree, &participant)?;
    msg!("Activated {}: moved={}", participant, moved);

    emit!(EntriesActivated {
        activated: if moved > 0 { 1 } else { 0 },
        total_active: ledger.total_active,
        slot,
    });
    Ok(())
}
