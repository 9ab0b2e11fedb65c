pub const POOL_VAULT_SEED: &[u8] = b"pool_vault";
pub const RESERVE_VAULT_SEED: &[u8] = b"reserve_vault";

/// Max participants the ledger (and the sortition tree) can hold.
/// Must stay a power of two: the tree is a complete binary tree over these leaves.
pub const MAX_ENTRIES: usize = 64;

pub const MAX_USERNAME_LEN: usize = 32;

pub const MAX_GROUPS: usize = 16;
pub const MAX_GROUP_MEMBERS: usize = 8;
pub const MAX_GROUP_INVITES: usize = 8;

/// `Entry.group_id` value for a participant outside any group.
pub const NO_GROUP: i64 = -1;

/// Fractional decimal digits carried by `Fixed`.
pub const FIXED_DIGITS: u32 = 18;
pub const FIXED_ONE: u128 = 1_000_000_000_000_000_000;

pub const GROUP_SPLIT_EVEN: u8 = 0;
pub const GROUP_SPLIT_PROPORTIONAL: u8 = 1;
