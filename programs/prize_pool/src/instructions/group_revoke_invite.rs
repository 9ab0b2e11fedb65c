use anchor_lang::prelude::*;

use crate::events::InviteRevoked;
use crate::instructions::group_create::ManageGroup;

pub fn revoke_invite_handler(ctx: Context<ManageGroup>, username: String) -> Result<()> {
    let member = ctx.accounts.participant.key();
    let ledger = &ctx.accounts.entry_ledger;
    let registry = &mut ctx.accounts.group_registry;

    let (group_id, invitee) = registry.revoke_invite(ledger, &member, &username)?;

    emit!(InviteRevoked {
        group_id,
        revoked_by: member,
        invitee,
    });
    Ok(())
}
