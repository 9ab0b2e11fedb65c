use anchor_lang::prelude::*;

use crate::errors::PrizePoolErrorCode;
use crate::state::*;
use crate::utils::transfers::TokenGateway;
use crate::utils::yield_source::YieldSource;

/// Result of a successful `buy_tickets`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Purchase {
    pub index: usize,
    pub cost: u64,
    pub pending_tickets: u64,
}

/// `buyTickets`: pulls `count * ticket_price` from the participant, records the
/// tickets as pending and supplies the collateral to the yield source.
pub fn buy_tickets<T: TokenGateway, Y: YieldSource>(
    config: &Config,
    ledger: &mut EntryLedger,
    token: &mut T,
    yield_source: &mut Y,
    participant: Pubkey,
    count: u64,
) -> Result<Purchase> {
    require!(!config.is_buying_paused(), PrizePoolErrorCode::BuyingPaused);
    require!(count >= 1, PrizePoolErrorCode::InvalidTicketCount);

    let cost = count
        .checked_mul(config.ticket_price)
        .ok_or(PrizePoolErrorCode::MathOverflow)?;
    ledger.ensure_capacity_for(&participant)?;

    token.transfer_from(&participant, cost)?;

    let index = ledger.get_or_create(participant)?;
    ledger.add_pending(index, count, cost)?;
    yield_source.supply(cost)?;

    Ok(Purchase {
        index,
        cost,
        pending_tickets: ledger.entries[index].pending_tickets,
    })
}

/// Adds value to the yield source without tickets. It surfaces as interest
/// at the next draw.
pub fn donate<T: TokenGateway, Y: YieldSource>(
    config: &Config,
    state: &mut PoolState,
    token: &mut T,
    yield_source: &mut Y,
    donor: Pubkey,
    amount: u64,
) -> Result<()> {
    require!(!config.is_buying_paused(), PrizePoolErrorCode::BuyingPaused);
    require!(amount > 0, PrizePoolErrorCode::InvalidAmount);
    let total_donations = state
        .total_donations
        .checked_add(amount)
        .ok_or(PrizePoolErrorCode::MathOverflow)?;

    token.transfer_from(&donor, amount)?;
    yield_source.supply(amount)?;

    state.total_donations = total_donations;
    Ok(())
}

/// Rolls every pending entry into active. Returns the number of entries moved.
pub fn activate_entries(
    state: &mut PoolState,
    ledger: &mut EntryLedger,
    tree: &mut SortitionTree,
    slot: u64,
) -> Result<u32> {
    let activated = ledger.activate_all(tree)?;
    state.last_activation_slot = slot;
    Ok(activated)
}

/// Rolls one participant's pending tickets into active. Returns the amount moved.
pub fn activate_entry(
    ledger: &mut EntryLedger,
    tree: &mut SortitionTree,
    participant: &Pubkey,
) -> Result<u64> {
    let index = ledger.require_index(participant)?;
    ledger.activate(index, tree)
}
