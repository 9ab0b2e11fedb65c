use anchor_lang::prelude::*;
use solana_security_txt::security_txt;

// -----------------------------------------------------------------------------
// Program ID
// -----------------------------------------------------------------------------
declare_id!("6YLKCYDzrnKVufbhe4qe3itPcTCL6DhDBir1r8Ts7ajr");

security_txt! {
    name: "Prize Pool",
    project_url: "https://github.com/prize-pool/prize-pool-anchor",
    source_code: "https://github.com/prize-pool/prize-pool-anchor",
    contacts: "link:https://github.com/prize-pool/prize-pool-anchor/security/advisories/new",
    policy: "https://github.com/prize-pool/prize-pool-anchor/blob/main/SECURITY.md",
    preferred_languages: "en"
}

// -----------------------------------------------------------------------------
// Modules
// -----------------------------------------------------------------------------
pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;
pub mod utils;

use instructions::*;
use state::{Group, PoolInfo, UserInfo};

// -----------------------------------------------------------------------------
// Program Entrypoints
// -----------------------------------------------------------------------------
#[program]
pub mod prize_pool {
    use super::*;

    // -------------------------------------------------------------------------
    // initialize
    // -------------------------------------------------------------------------
    pub fn initialize(
        ctx: Context<Initialize>,
        ticket_price: u64,
        hash_of_secret: [u8; 32],
        supply_rate_mantissa: u64,
        admin: Pubkey,
    ) -> Result<()> {
        initialize_handler(ctx, ticket_price, hash_of_secret, supply_rate_mantissa, admin)
    }

    // -------------------------------------------------------------------------
    // initialize_ledgers
    // -------------------------------------------------------------------------
    pub fn initialize_ledgers(ctx: Context<InitializeLedgers>) -> Result<()> {
        initialize_ledgers_handler(ctx)
    }

    // -------------------------------------------------------------------------
    // update_config
    // -------------------------------------------------------------------------
    pub fn update_config(
        ctx: Context<UpdateConfig>,
        pause_buy: Option<u8>,
        pause_withdraw: Option<u8>,
        new_authority: Option<Pubkey>,
        new_admin: Option<Pubkey>,
        group_split: Option<u8>,
    ) -> Result<()> {
        update_config_handler(
            ctx,
            pause_buy,
            pause_withdraw,
            new_authority,
            new_admin,
            group_split,
        )
    }

    // -------------------------------------------------------------------------
    // emergency_pause_all
    // -------------------------------------------------------------------------
    pub fn emergency_pause_all(ctx: Context<UpdateConfig>) -> Result<()> {
        update_config_handler(ctx, Some(1), Some(1), None, None, None)
    }

    // -------------------------------------------------------------------------
    // buy_tickets
    // -------------------------------------------------------------------------
    pub fn buy_tickets(ctx: Context<BuyTickets>, count: u64) -> Result<()> {
        buy_tickets_handler(ctx, count)
    }

    // -------------------------------------------------------------------------
    // set_username
    // -------------------------------------------------------------------------
    pub fn set_username(ctx: Context<SetUsername>, username: String) -> Result<()> {
        set_username_handler(ctx, username)
    }

    // -------------------------------------------------------------------------
    // groups
    // -------------------------------------------------------------------------
    pub fn create_group(ctx: Context<ManageGroup>) -> Result<()> {
        create_group_handler(ctx)
    }

    pub fn invite(ctx: Context<ManageGroup>, username: String) -> Result<()> {
        invite_handler(ctx, username)
    }

    pub fn revoke_invite(ctx: Context<ManageGroup>, username: String) -> Result<()> {
        revoke_invite_handler(ctx, username)
    }

    pub fn join_group(ctx: Context<ManageGroup>, group_id: u32) -> Result<()> {
        join_group_handler(ctx, group_id)
    }

    pub fn leave_group(ctx: Context<ManageGroup>) -> Result<()> {
        leave_group_handler(ctx)
    }

    // -------------------------------------------------------------------------
    // activation (owner / admin)
    // -------------------------------------------------------------------------
    pub fn activate_entries(ctx: Context<ActivateEntries>) -> Result<()> {
        activate_entries_handler(ctx)
    }

    pub fn activate_entry(ctx: Context<ActivateEntries>, participant: Pubkey) -> Result<()> {
        activate_entry_handler(ctx, participant)
    }

    // -------------------------------------------------------------------------
    // draw (owner / admin)
    // -------------------------------------------------------------------------
    pub fn draw(
        ctx: Context<Draw>,
        secret: [u8; 32],
        next_hash_of_secret: [u8; 32],
    ) -> Result<()> {
        draw_handler(ctx, secret, next_hash_of_secret)
    }

    // -------------------------------------------------------------------------
    // withdraw
    // -------------------------------------------------------------------------
    pub fn withdraw(ctx: Context<Withdraw>, ticket_count: u64) -> Result<()> {
        withdraw_handler(ctx, ticket_count)
    }

    // -------------------------------------------------------------------------
    // donate_to_prize_pool
    // -------------------------------------------------------------------------
    pub fn donate_to_prize_pool(ctx: Context<DonateToPrizePool>, amount: u64) -> Result<()> {
        donate_to_prize_pool_handler(ctx, amount)
    }

    // -------------------------------------------------------------------------
    // reserve
    // -------------------------------------------------------------------------
    pub fn fund_reserve(ctx: Context<FundReserve>, amount: u64) -> Result<()> {
        fund_reserve_handler(ctx, amount)
    }

    pub fn update_reserve_rate(
        ctx: Context<UpdateReserveRate>,
        supply_rate_mantissa: u64,
    ) -> Result<()> {
        update_reserve_rate_handler(ctx, supply_rate_mantissa)
    }

    // -------------------------------------------------------------------------
    // views
    // -------------------------------------------------------------------------
    pub fn get_user_info(ctx: Context<GetUserInfo>, participant: Pubkey) -> Result<UserInfo> {
        get_user_info_handler(ctx, participant)
    }

    pub fn get_entry_by_username(ctx: Context<GetUserInfo>, username: String) -> Result<UserInfo> {
        get_entry_by_username_handler(ctx, username)
    }

    pub fn get_group(ctx: Context<GetGroup>, group_id: u32) -> Result<Group> {
        get_group_handler(ctx, group_id)
    }

    pub fn get_pool_info(ctx: Context<GetPoolInfo>) -> Result<PoolInfo> {
        get_pool_info_handler(ctx)
    }

    pub fn get_interest_fraction(ctx: Context<GetInterestFraction>, slots: u64) -> Result<u128> {
        get_interest_fraction_handler(ctx, slots)
    }
}
