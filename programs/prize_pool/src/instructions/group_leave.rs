use anchor_lang::prelude::*;

use crate::events::GroupLeft;
use crate::instructions::group_create::ManageGroup;

/// Leaves the caller's group. The last member leaving dissolves it.
pub fn leave_group_handler(ctx: Context<ManageGroup>) -> Result<()> {
    let participant = ctx.accounts.participant.key();
    let ledger = &mut ctx.accounts.entry_ledger;
    let registry = &mut ctx.accounts.group_registry;

    let group_id = registry.leave_group(ledger, &participant)?;
    let dissolved = registry.group(group_id)?.is_dissolved();

    emit!(GroupLeft {
        group_id,
        participant,
        dissolved,
    });
    Ok(())
}
