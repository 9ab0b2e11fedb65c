use anchor_lang::prelude::*;
use anchor_lang::solana_program::sysvar::slot_hashes;

use crate::events::DrawCompleted;
use crate::state::*;
use crate::utils::draw::execute_draw;
use crate::utils::random::latest_slot_hash;
use crate::utils::yield_source::ReserveYieldSource;

#[derive(Accounts)]
pub struct Draw<'info> {
    /// Owner or admin.
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
        seeds = [GroupRegistry::SEED],
        bump = group_registry.bump,
    )]
    pub group_registry: Box<Account<'info, GroupRegistry>>,

    #[account(
        mut,
        seeds = [SortitionTree::SEED],
        bump = sortition_tree.bump,
    )]
    pub sortition_tree: Box<Account<'info, SortitionTree>>,

    /// Read for the accrued balance only.
    #[account(
        seeds = [Reserve::SEED],
        bump = reserve.bump,
    )]
    pub reserve: Box<Account<'info, Reserve>>,

    /// CHECK: address validated, parsed as SlotHashes sysvar data
    #[account(address = slot_hashes::ID)]
    pub slot_hashes: UncheckedAccount<'info>,
}

/// Reveals `secret`, commits to `next_hash_of_secret` and runs the draw.
pub fn draw_handler(
    ctx: Context<Draw>,
    secret: [u8; 32],
    next_hash_of_secret: [u8; 32],
) -> Result<()> {
    ctx.accounts
        .config
        .require_operator(&ctx.accounts.operator.key())?;

    let slot = Clock::get()?.slot;
    let entropy = latest_slot_hash(&ctx.accounts.slot_hashes.to_account_info())?;

    let config = &ctx.accounts.config;
    let state = &mut ctx.accounts.pool_state;
    let ledger = &mut ctx.accounts.entry_ledger;
    let groups = &ctx.accounts.group_registry;
    let tree = &mut ctx.accounts.sortition_tree;
    let yield_source = ReserveYieldSource::accounting_only(&mut ctx.accounts.reserve, slot);

    let outcome = execute_draw(
        config,
        state,
        ledger,
        groups,
        tree,
        &yield_source,
        &secret,
        next_hash_of_secret,
        &entropy,
        slot,
    )?;

    emit!(DrawCompleted {
        draw_count: state.draw_count,
        winner: outcome.winner.unwrap_or_default(),
        group_id: outcome.group_id,
        interest: outcome.interest,
        random_value: outcome.random_value,
        eligible_weight: outcome.eligible_weight,
        activated: outcome.activated,
        unclaimed_winnings: state.unclaimed_winnings,
        slot,
    });
    Ok(())
}
