pub mod config_update;
pub mod draw_execute;
pub mod entries_activate;
pub mod entry_withdraw;
pub mod group_create;
pub mod group_invite;
pub mod group_join;
pub mod group_leave;
pub mod group_revoke_invite;
pub mod info_group;
pub mod info_pool;
pub mod info_user;
pub mod initialize;
pub mod ledgers_init;
pub mod prize_donate;
pub mod reserve_fund;
pub mod reserve_update_rate;
pub mod tickets_buy;
pub mod username_set;

pub use config_update::*;
pub use draw_execute::*;
pub use entries_activate::*;
pub use entry_withdraw::*;
pub use group_create::*;
pub use group_invite::*;
pub use group_join::*;
pub use group_leave::*;
pub use group_revoke_invite::*;
pub use info_group::*;
pub use info_pool::*;
pub use info_user::*;
pub use initialize::*;
pub use ledgers_init::*;
pub use prize_donate::*;
pub use reserve_fund::*;
pub use reserve_update_rate::*;
pub use tickets_buy::*;
pub use username_set::*;
