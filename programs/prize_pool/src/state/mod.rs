pub mod config;
pub mod entry_ledger;
pub mod group_registry;
pub mod pool_state;
pub mod reserve;
pub mod sortition_tree;

pub use config::*;
pub use entry_ledger::*;
pub use group_registry::*;
pub use pool_state::*;
pub use reserve::*;
pub use sortition_tree::*;
