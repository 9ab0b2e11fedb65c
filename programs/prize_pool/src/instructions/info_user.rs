//! Read-only participant queries. Results are returned through Anchor's
//! return-data mechanism; nothing is written.

use anchor_lang::prelude::*;

use crate::state::*;

#[derive(Accounts)]
pub struct GetUserInfo<'info> {
    #[account(
        seeds = [EntryLedger::SEED],
        bump = entry_ledger.bump,
    )]
    pub entry_ledger: Box<Account<'info, EntryLedger>>,
}

/// Aggregate info for `participant`. Unknown addresses report a zeroed entry
/// with no group.
pub fn get_user_info_handler(ctx: Context<GetUserInfo>, participant: Pubkey) -> Result<UserInfo> {
    ctx.accounts.entry_ledger.user_info(&participant)
}

/// Same as `get_user_info`, resolved by username.
pub fn get_entry_by_username_handler(
    ctx: Context<GetUserInfo>,
    username: String,
) -> Result<UserInfo> {
    ctx.accounts.entry_ledger.user_info_by_username(&username)
}
