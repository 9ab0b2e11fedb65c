use anchor_lang::prelude::*;

use crate::errors::PrizePoolErrorCode;
use crate::state::config::{Config, GroupSplit};

#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    /// Global Config PDA.
    /// Only the `authority` stored in Config is allowed to update it.
    #[account(
        mut,
        seeds = [Config::SEED],
        bump = config.bump,
        has_one = authority @ PrizePoolErrorCode::NotAuthorized
    )]
    pub config: Account<'info, Config>,

    /// Current pool owner.
    pub authority: Signer<'info>,
}

/// Updates one or more configuration fields. `None` leaves a field unchanged.
/// The ticket price cannot be changed once the pool exists.
pub fn update_config_handler(
    ctx: Context<UpdateConfig>,
    pause_buy: Option<u8>,
    pause_withdraw: Option<u8>,
    new_authority: Option<Pubkey>,
    new_admin: Option<Pubkey>,
    group_split: Option<u8>,
) -> Result<()> {
    let config_key = ctx.accounts.config.key();
    let cfg = &mut ctx.accounts.config;

    // ─────────────────────────────────────────────
    // Validate everything first
    // ─────────────────────────────────────────────
    if let Some(new_auth) = new_authority {
        Config::require_assignable(&new_auth)?;
        require!(new_auth != *ctx.program_id, PrizePoolErrorCode::InvalidAuthorityTarget);
        require!(new_auth != config_key, PrizePoolErrorCode::InvalidAuthorityTarget);
    }
    if let Some(admin) = new_admin {
        Config::require_assignable(&admin)?;
    }
    let split = group_split.map(GroupSplit::from_u8).transpose()?;

    // ─────────────────────────────────────────────
    // Apply
    // ─────────────────────────────────────────────
    if let Some(pause) = pause_buy {
        cfg.pause_buy = if pause == 1 { 1 } else { 0 };
    }
    if let Some(pause) = pause_withdraw {
        cfg.pause_withdraw = if pause == 1 { 1 } else { 0 };
    }
    if let Some(v) = new_authority {
        cfg.authority = v;
    }
    if let Some(v) = new_admin {
        cfg.admin = v;
    }
    if let Some(v) = split {
        cfg.group_split = v.as_u8();
    }

    msg!(
        "Config updated: pause_buy={} pause_withdraw={} group_split={}",
        cfg.pause_buy,
        cfg.pause_withdraw,
        cfg.group_split
    );
    Ok(())
}
