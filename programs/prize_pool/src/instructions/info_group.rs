use anchor_lang::prelude::*;

use crate::state::*;

#[derive(Accounts)]
pub struct GetGroup<'info> {
    #[account(
        seeds = [GroupRegistry::SEED],
        bump = group_registry.bump,
    )]
    pub group_registry: Box<Account<'info, GroupRegistry>>,
}

pub fn get_group_handler(ctx: Context<GetGroup>, group_id: u32) -> Result<Group> {
    ctx.accounts
        .group_registry
        .group(group_id)
        .map(|group| group.clone())
}
