use anchor_lang::prelude::*;

#[error_code]
pub enum PrizePoolErrorCode {
    // ─────────────────────────────
    // Setup and configuration
    // ─────────────────────────────
    #[msg("Ticket price must be greater than zero")]
    InvalidTicketPrice,

    #[msg("Commitment hash must not be empty")]
    InvalidCommitment,

    InvalidGroupSplit,

    // ─────────────────────────────
    // General / Access Control
    // ─────────────────────────────
    #[msg("Not authorized")]
    NotAuthorized,

    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Invalid amount")]
    InvalidAmount,

    AssertInvariantFailed,
    ParticipantMismatch,
    InvalidAuthorityTarget,

    // ─────────────────────────────
    // Ticket purchase / withdrawal
    // ─────────────────────────────
    #[msg("Token pull not covered by balance or allowance")]
    InsufficientAllowance,

    #[msg("Not enough tickets")]
    InsufficientTickets,

    #[msg("Ticket count must be at least one")]
    InvalidTicketCount,

    #[msg("Buying paused")]
    BuyingPaused,

    #[msg("Withdrawals paused")]
    WithdrawalsPaused,

    // ─────────────────────────────
    // Identity resolution
    // ─────────────────────────────
    #[msg("No entry for participant")]
    NoEntry,

    #[msg("Unknown username")]
    UnknownUsername,

    #[msg("Username already taken")]
    DuplicateUsername,

    #[msg("Invalid username")]
    InvalidUsername,

    LedgerFull,

    // ─────────────────────────────
    // Groups
    // ─────────────────────────────
    #[msg("Already in a group")]
    AlreadyGrouped,

    #[msg("Not in a group")]
    NotGrouped,

    #[msg("Not invited to this group")]
    NotInvited,

    UnknownGroup,
    GroupDissolved,
    GroupFull,
    GroupRegistryFull,

    // ─────────────────────────────
    // Draw
    // ─────────────────────────────
    #[msg("Secret does not match commitment")]
    SecretMismatch,

    #[msg("No eligible entries")]
    NoEligibleEntries,

    #[msg("Sortition tree is empty")]
    EmptyTree,

    TreeFull,
    DrawValueOutOfRange,
    InvalidSlotHashes,

    // ─────────────────────────────
    // Yield source
    // ─────────────────────────────
    #[msg("Reserve cannot cover redemption")]
    InsufficientLiquidity,

    ReserveTransfersUnavailable,
}
