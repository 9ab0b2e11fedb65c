use anchor_lang::prelude::*;

use crate::constants::{MAX_ENTRIES, MAX_USERNAME_LEN, NO_GROUP};
use crate::errors::PrizePoolErrorCode;
use crate::state::sortition_tree::SortitionTree;

/// One participant's tickets, balances and winnings.
///
/// Amounts are in token base units:
///   active_amount  == active_tickets  * ticket_price
///   pending_amount == pending_tickets * ticket_price
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    /// Participant wallet.
    pub owner: Pubkey,

    /// Display name, unique across the ledger. Empty = none set.
    pub username: String,

    /// Eligible for the current draw.
    pub active_amount: u64,
    pub active_tickets: u64,

    /// Bought since the last activation; not yet eligible.
    pub pending_amount: u64,
    pub pending_tickets: u64,

    /// Prize value credited and not yet withdrawn.
    pub total_winnings: u64,

    /// Group id, or `NO_GROUP`.
    pub group_id: i64,
}

impl Entry {
    pub const SIZE: usize =
        32 + // owner
            4 + MAX_USERNAME_LEN + // username
            8 +  // active_amount
            8 +  // active_tickets
            8 +  // pending_amount
            8 +  // pending_tickets
            8 +  // total_winnings
            8;   // group_id

    pub fn new(owner: Pubkey) -> Self {
        Self {
            owner,
            username: String::new(),
            active_amount: 0,
            active_tickets: 0,
            pending_amount: 0,
            pending_tickets: 0,
            total_winnings: 0,
            group_id: NO_GROUP,
        }
    }

    pub fn total_tickets(&self) -> Result<u64> {
        self.active_tickets
            .checked_add(self.pending_tickets)
            .ok_or_else(|| error!(PrizePoolErrorCode::MathOverflow))
    }

    pub fn total_amount(&self) -> Result<u64> {
        self.active_amount
            .checked_add(self.pending_amount)
            .ok_or_else(|| error!(PrizePoolErrorCode::MathOverflow))
    }

    pub fn is_grouped(&self) -> bool {
        self.group_id != NO_GROUP
    }

    /// No tickets, no winnings and no group: the slot can be handed to someone else.
    pub fn is_vacant(&self) -> bool {
        self.active_tickets == 0
            && self.pending_tickets == 0
            && self.active_amount == 0
            && self.pending_amount == 0
            && self.total_winnings == 0
            && !self.is_grouped()
    }

    pub fn assert_invariant(&self, ticket_price: u64) -> Result<()> {
        let active = self
            .active_tickets
            .checked_mul(ticket_price)
            .ok_or(PrizePoolErrorCode::MathOverflow)?;
        let pending = self
            .pending_tickets
            .checked_mul(ticket_price)
            .ok_or(PrizePoolErrorCode::MathOverflow)?;

        require!(
            active == self.active_amount && pending == self.pending_amount,
            PrizePoolErrorCode::AssertInvariantFailed
        );
        Ok(())
    }
}

/// Aggregate view of one participant, returned by the info queries.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct UserInfo {
    pub owner: Pubkey,
    pub username: String,
    pub total_amount: u64,
    pub total_tickets: u64,
    pub active_amount: u64,
    pub active_tickets: u64,
    pub pending_amount: u64,
    pub pending_tickets: u64,
    pub total_winnings: u64,
    pub group_id: i64,
}

impl UserInfo {
    fn from_entry(entry: &Entry) -> Result<Self> {
        Ok(Self {
            owner: entry.owner,
            username: entry.username.clone(),
            total_amount: entry.total_amount()?,
            total_tickets: entry.total_tickets()?,
            active_amount: entry.active_amount,
            active_tickets: entry.active_tickets,
            pending_amount: entry.pending_amount,
            pending_tickets: entry.pending_tickets,
            total_winnings: entry.total_winnings,
            group_id: entry.group_id,
        })
    }
}

/// Tickets taken out of an entry by a withdrawal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TicketRemoval {
    pub from_pending: u64,
    pub from_active: u64,
    pub principal: u64,
}

/// ---------------------------------------------------------------------------
/// EntryLedger
/// ---------------------------------------------------------------------------
///
/// Every participant that ever interacted with the pool, in arrival order.
/// Entries are never removed, so an entry's index is stable and doubles as its
/// leaf index in the `SortitionTree`.
#[account]
pub struct EntryLedger {
    pub entries: Vec<Entry>,

    /// Sum of `active_amount` over all entries. Mirrors the tree root.
    pub total_active: u64,

    /// Sum of `pending_amount` over all entries.
    pub total_pending: u64,

    pub bump: u8,
    pub _reserved: [u8; 16],
}

impl EntryLedger {
    pub const SEED: &'static [u8] = b"entry_ledger";

    pub const SIZE: usize =
        4 + (Entry::SIZE * MAX_ENTRIES) + // entries
            8 +  // total_active
            8 +  // total_pending
            1 +  // bump
            16;  // reserved

    pub fn index_of(&self, owner: &Pubkey) -> Option<usize> {
        self.entries.iter().position(|e| e.owner == *owner)
    }

    pub fn require_index(&self, owner: &Pubkey) -> Result<usize> {
        self.index_of(owner)
            .ok_or_else(|| error!(PrizePoolErrorCode::NoEntry))
    }

    pub fn entry(&self, owner: &Pubkey) -> Option<&Entry> {
        self.entries.iter().find(|e| e.owner == *owner)
    }

    pub fn index_of_username(&self, username: &str) -> Option<usize> {
        if username.is_empty() {
            return None;
        }
        self.entries.iter().position(|e| e.username == username)
    }

    /// Vacant slot to recycle once the ledger is full. Unnamed slots go first so
    /// usernames survive as long as possible.
    fn reusable_slot(&self) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.is_vacant() && e.username.is_empty())
            .or_else(|| self.entries.iter().position(Entry::is_vacant))
    }

    /// Fails with `LedgerFull` when `owner` would need a new slot and none is left.
    pub fn ensure_capacity_for(&self, owner: &Pubkey) -> Result<()> {
        require!(
            self.index_of(owner).is_some()
                || self.entries.len() < MAX_ENTRIES
                || self.reusable_slot().is_some(),
            PrizePoolErrorCode::LedgerFull
        );
        Ok(())
    }

    /// Index of `owner`'s entry, creating one if needed.
    ///
    /// A full ledger recycles a vacant slot. The previous holder's username is
    /// released and its sortition leaf is rebound on the next activation.
    pub fn get_or_create(&mut self, owner: Pubkey) -> Result<usize> {
        if let Some(index) = self.index_of(&owner) {
            return Ok(index);
        }
        if self.entries.len() < MAX_ENTRIES {
            self.entries.push(Entry::new(owner));
            return Ok(self.entries.len() - 1);
        }

        let index = self
            .reusable_slot()
            .ok_or(PrizePoolErrorCode::LedgerFull)?;
        self.entries[index] = Entry::new(owner);
        Ok(index)
    }

    /// Upserts the username of `owner`, creating the entry if needed.
    /// The previous name, if any, is released.
    pub fn set_username(&mut self, owner: Pubkey, username: &str) -> Result<usize> {
        require!(
            !username.is_empty() && username.len() <= MAX_USERNAME_LEN,
            PrizePoolErrorCode::InvalidUsername
        );
        if let Some(holder) = self.index_of_username(username) {
            require_keys_eq!(
                self.entries[holder].owner,
                owner,
                PrizePoolErrorCode::DuplicateUsername
            );
        }

        let index = self.get_or_create(owner)?;
        self.entries[index].username = username.to_string();
        Ok(index)
    }

    /// Adds freshly bought tickets to the pending side of an entry.
    pub fn add_pending(&mut self, index: usize, tickets: u64, amount: u64) -> Result<()> {
        let entry = &self.entries[index];
        let pending_tickets = entry
            .pending_tickets
            .checked_add(tickets)
            .ok_or(PrizePoolErrorCode::MathOverflow)?;
        let pending_amount = entry
            .pending_amount
            .checked_add(amount)
            .ok_or(PrizePoolErrorCode::MathOverflow)?;
        let total_pending = self
            .total_pending
            .checked_add(amount)
            .ok_or(PrizePoolErrorCode::MathOverflow)?;

        let entry = &mut self.entries[index];
        entry.pending_tickets = pending_tickets;
        entry.pending_amount = pending_amount;
        self.total_pending = total_pending;
        Ok(())
    }

    /// Rolls one entry's pending tickets into active and refreshes its leaf.
    /// Returns the amount moved; 0 (and no writes) when nothing was pending.
    pub fn activate(&mut self, index: usize, tree: &mut SortitionTree) -> Result<u64> {
        let entry = &self.entries[index];
        let moved = entry.pending_amount;
        if moved == 0 && entry.pending_tickets == 0 {
            return Ok(0);
        }

        let active_amount = entry
            .active_amount
            .checked_add(moved)
            .ok_or(PrizePoolErrorCode::MathOverflow)?;
        let active_tickets = entry
            .active_tickets
            .checked_add(entry.pending_tickets)
            .ok_or(PrizePoolErrorCode::MathOverflow)?;
        let total_active = self
            .total_active
            .checked_add(moved)
            .ok_or(PrizePoolErrorCode::MathOverflow)?;
        let total_pending = self
            .total_pending
            .checked_sub(moved)
            .ok_or(PrizePoolErrorCode::AssertInvariantFailed)?;

        tree.set_leaf(index, entry.owner, active_amount)?;

        let entry = &mut self.entries[index];
        entry.active_amount = active_amount;
        entry.active_tickets = active_tickets;
        entry.pending_amount = 0;
        entry.pending_tickets = 0;
        self.total_active = total_active;
        self.total_pending = total_pending;
        Ok(moved)
    }

    /// Activates every entry with pending tickets. Returns how many were moved.
    pub fn activate_all(&mut self, tree: &mut SortitionTree) -> Result<u32> {
        let mut activated: u32 = 0;
        for index in 0..self.entries.len() {
            if self.activate(index, tree)? > 0 {
                activated += 1;
            }
        }
        Ok(activated)
    }

    /// Removes `count` tickets from an entry, pending first, then active.
    pub fn remove_tickets(
        &mut self,
        index: usize,
        count: u64,
        ticket_price: u64,
        tree: &mut SortitionTree,
    ) -> Result<TicketRemoval> {
        let entry = &self.entries[index];
        require!(
            count <= entry.total_tickets()?,
            PrizePoolErrorCode::InsufficientTickets
        );

        let from_pending = count.min(entry.pending_tickets);
        let from_active = count - from_pending;
        let pending_principal = from_pending
            .checked_mul(ticket_price)
            .ok_or(PrizePoolErrorCode::MathOverflow)?;
        let active_principal = from_active
            .checked_mul(ticket_price)
            .ok_or(PrizePoolErrorCode::MathOverflow)?;

        let pending_amount = entry
            .pending_amount
            .checked_sub(pending_principal)
            .ok_or(PrizePoolErrorCode::AssertInvariantFailed)?;
        let active_amount = entry
            .active_amount
            .checked_sub(active_principal)
            .ok_or(PrizePoolErrorCode::AssertInvariantFailed)?;
        let total_pending = self
            .total_pending
            .checked_sub(pending_principal)
            .ok_or(PrizePoolErrorCode::AssertInvariantFailed)?;
        let total_active = self
            .total_active
            .checked_sub(active_principal)
            .ok_or(PrizePoolErrorCode::AssertInvariantFailed)?;
        let principal = pending_principal
            .checked_add(active_principal)
            .ok_or(PrizePoolErrorCode::MathOverflow)?;

        if from_active > 0 {
            tree.set_leaf(index, entry.owner, active_amount)?;
        }

        let entry = &mut self.entries[index];
        entry.pending_tickets -= from_pending;
        entry.pending_amount = pending_amount;
        entry.active_tickets -= from_active;
        entry.active_amount = active_amount;
        self.total_pending = total_pending;
        self.total_active = total_active;

        Ok(TicketRemoval {
            from_pending,
            from_active,
            principal,
        })
    }

    pub fn credit_winnings(&mut self, index: usize, amount: u64) -> Result<()> {
        let entry = &mut self.entries[index];
        entry.total_winnings = entry
            .total_winnings
            .checked_add(amount)
            .ok_or(PrizePoolErrorCode::MathOverflow)?;
        Ok(())
    }

    /// Zeroes and returns an entry's winnings.
    pub fn take_winnings(&mut self, index: usize) -> u64 {
        std::mem::take(&mut self.entries[index].total_winnings)
    }

    /// All principal held for participants, active and pending.
    pub fn total_principal(&self) -> Result<u64> {
        self.total_active
            .checked_add(self.total_pending)
            .ok_or_else(|| error!(PrizePoolErrorCode::MathOverflow))
    }

    pub fn sum_winnings(&self) -> Result<u64> {
        self.entries.iter().try_fold(0u64, |acc, e| {
            acc.checked_add(e.total_winnings)
                .ok_or_else(|| error!(PrizePoolErrorCode::MathOverflow))
        })
    }

    /// Aggregate info for `owner`; unknown addresses get a zeroed record.
    pub fn user_info(&self, owner: &Pubkey) -> Result<UserInfo> {
        match self.entry(owner) {
            Some(entry) => UserInfo::from_entry(entry),
            None => UserInfo::from_entry(&Entry::new(*owner)),
        }
    }

    pub fn user_info_by_username(&self, username: &str) -> Result<UserInfo> {
        let index = self
            .index_of_username(username)
            .ok_or(PrizePoolErrorCode::UnknownUsername)?;
        UserInfo::from_entry(&self.entries[index])
    }
}
