use anchor_lang::prelude::*;

use crate::events::GroupJoined;
use crate::instructions::group_create::ManageGroup;

pub fn join_group_handler(ctx: Context<ManageGroup>, group_id: u32) -> Result<()> {
    let participant = ctx.accounts.participant.key();
    let ledger = &mut ctx.accounts.entry_ledger;
    let registry = &mut ctx.accounts.group_registry;

    registry.join_group(ledger, &participant, group_id)?;
    let member_count = registry.group(group_id)?.members.len() as u8;

    emit!(GroupJoined {
        group_id,
        participant,
        member_count,
    });
    Ok(())
}
