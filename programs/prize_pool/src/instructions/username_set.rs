use anchor_lang::prelude::*;

use crate::events::UsernameSet;
use crate::state::*;

#[derive(Accounts)]
pub struct SetUsername<'info> {
    pub participant: Signer<'info>,

    #[account(
        mut,
        seeds = [EntryLedger::SEED],
        bump = entry_ledger.bump,
    )]
    pub entry_ledger: Box<Account<'info, EntryLedger>>,
}

/// Creates the participant's entry if needed.
pub fn set_username_handler(ctx: Context<SetUsername>, username: String) -> Result<()> {
    let participant = ctx.accounts.participant.key();
    ctx.accounts
        .entry_ledger
        .set_username(participant, &username)?;

    emit!(UsernameSet {
        participant,
        username,
    });
    Ok(())
}
