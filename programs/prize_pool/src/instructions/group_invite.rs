use anchor_lang::prelude::*;

use crate::events::MemberInvited;
use crate::instructions::group_create::ManageGroup;

/// Invites the holder of `username` into the caller's group.
pub fn invite_handler(ctx: Context<ManageGroup>, username: String) -> Result<()> {
    let inviter = ctx.accounts.participant.key();
    let ledger = &ctx.accounts.entry_ledger;
    let registry = &mut ctx.accounts.group_registry;

    let (group_id, invitee) = registry.invite(ledger, &inviter, &username)?;

    emit!(MemberInvited {
        group_id,
        inviter,
        invitee,
    });
    Ok(())
}
