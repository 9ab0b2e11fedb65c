use anchor_lang::prelude::*;

#[event]
pub struct TicketsBought {
    pub participant: Pubkey,
    pub tickets: u64,
    pub cost: u64,
    pub pending_tickets_after: u64,
    pub entry_index: u32,
}

#[event]
pub struct UsernameSet {
    pub participant: Pubkey,
    pub username: String,
}

#[event]
pub struct GroupCreated {
    pub group_id: u32,
    pub creator: Pubkey,
}

#[event]
pub struct MemberInvited {
    pub group_id: u32,
    pub inviter: Pubkey,
    pub invitee: Pubkey,
}

#[event]
pub struct InviteRevoked {
    pub group_id: u32,
    pub revoked_by: Pubkey,
    pub invitee: Pubkey,
}

#[event]
pub struct GroupJoined {
    pub group_id: u32,
    pub participant: Pubkey,
    pub member_count: u8,
}

#[event]
pub struct GroupLeft {
    pub group_id: u32,
    pub participant: Pubkey,
    pub dissolved: bool,
}

#[event]
pub struct EntriesActivated {
    pub activated: u32,
    pub total_active: u64,
    pub slot: u64,
}

#[event]
pub struct DrawCompleted {
    pub draw_count: u64,
    /// `Pubkey::default()` for an empty draw.
    pub winner: Pubkey,
    pub group_id: i64,
    pub interest: u64,
    pub random_value: u64,
    pub eligible_weight: u64,
    pub activated: u32,
    pub unclaimed_winnings: u64,
    pub slot: u64,
}

#[event]
pub struct Withdrawn {
    pub participant: Pubkey,
    pub tickets: u64,
    pub principal: u64,
    pub winnings: u64,
    pub payout: u64,
}

#[event]
pub struct PrizeDonated {
    pub donor: Pubkey,
    pub amount: u64,
}

#[event]
pub struct ReserveFunded {
    pub funder: Pubkey,
    pub amount: u64,
}
