use anchor_lang::prelude::*;

use crate::events::GroupCreated;
use crate::state::*;

/// Accounts shared by every group membership instruction.
#[derive(Accounts)]
pub struct ManageGroup<'info> {
    pub participant: Signer<'info>,

    #[account(
        mut,
        seeds = [EntryLedger::SEED],
        bump = entry_ledger.bump,
    )]
    pub entry_ledger: Box<Account<'info, EntryLedger>>,

    #[account(
        mut,
        seeds = [GroupRegistry::SEED],
        bump = group_registry.bump,
    )]
    pub group_registry: Box<Account<'info, GroupRegistry>>,
}

pub fn create_group_handler(ctx: Context<ManageGroup>) -> Result<()> {
    let participant = ctx.accounts.participant.key();
    let ledger = &mut ctx.accounts.entry_ledger;
    let registry = &mut ctx.accounts.group_registry;

    let group_id = registry.create_group(ledger, &participant)?;

    emit!(GroupCreated {
        group_id,
        creator: participant,
    });
    Ok(())
}
