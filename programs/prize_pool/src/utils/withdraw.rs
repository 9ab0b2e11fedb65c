use anchor_lang::prelude::*;

use crate::errors::PrizePoolErrorCode;
use crate::state::*;
use crate::utils::transfers::TokenGateway;
use crate::utils::yield_source::YieldSource;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WithdrawalReceipt {
    pub tickets_removed: u64,
    pub from_pending: u64,
    pub from_active: u64,
    pub principal: u64,
    pub winnings: u64,
    pub payout: u64,
}

/// `withdraw(participant, ticketCount)`.
///
/// Removes `ticket_count` tickets (pending first, then active) and pays out
/// their principal together with every credited prize. `ticket_count == 0`
/// claims prizes only. Ledger, tree and pool state are settled before the
/// yield source and token are called. Group membership is left alone.
#[allow(clippy::too_many_arguments)]
pub fn withdraw<T: TokenGateway, Y: YieldSource>(
    config: &Config,
    state: &mut PoolState,
    ledger: &mut EntryLedger,
    tree: &mut SortitionTree,
    token: &mut T,
    yield_source: &mut Y,
    participant: Pubkey,
    ticket_count: u64,
) -> Result<WithdrawalReceipt> {
    require!(
        !config.is_withdraw_paused(),
        PrizePoolErrorCode::WithdrawalsPaused
    );
    let index = ledger.require_index(&participant)?;

    let entry = &ledger.entries[index];
    require!(
        ticket_count <= entry.total_tickets()?,
        PrizePoolErrorCode::InsufficientTickets
    );
    let winnings = entry.total_winnings;
    let unclaimed_winnings = state
        .unclaimed_winnings
        .checked_sub(winnings)
        .ok_or(PrizePoolErrorCode::AssertInvariantFailed)?;

    let removal = ledger.remove_tickets(index, ticket_count, config.ticket_price, tree)?;
    let payout = removal
        .principal
        .checked_add(winnings)
        .ok_or(PrizePoolErrorCode::MathOverflow)?;
    ledger.take_winnings(index);
    state.unclaimed_winnings = unclaimed_winnings;

    if payout > 0 {
        yield_source.redeem(payout)?;
        token.transfer(&participant, payout)?;
    }

    Ok(WithdrawalReceipt {
        tickets_removed: ticket_count,
        from_pending: removal.from_pending,
        from_active: removal.from_active,
        principal: removal.principal,
        winnings,
        payout,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MAX_ENTRIES;
    use crate::utils::testing::{expect_code, TestPool};

    #[test]
    fn withdraw_without_entry_fails() {
        let mut pool = TestPool::new(10);
        expect_code(
            pool.withdraw(Pubkey::new_unique(), 1),
            PrizePoolErrorCode::NoEntry,
        );
    }

    #[test]
    fn withdraw_before_activation_returns_principal() {
        let mut pool = TestPool::new(10);
        let alice = pool.funded_user(100);
        pool.buy(alice, 3).unwrap();

        let receipt = pool.withdraw(alice, 2).unwrap();
        assert_eq!(receipt.from_pending, 2);
        assert_eq!(receipt.from_active, 0);
        assert_eq!(receipt.payout, 20);
        assert_eq!(pool.token.balance_of(&alice), 90);
        assert_eq!(pool.ledger.entry(&alice).unwrap().pending_tickets, 1);
        pool.assert_conservation();
    }

    #[test]
    fn withdraw_after_activation_updates_tree() {
        let mut pool = TestPool::new(10);
        let alice = pool.funded_user(100);
        let bob = pool.funded_user(100);
        pool.buy(alice, 3).unwrap();
        pool.buy(bob, 1).unwrap();
        pool.draw().unwrap();

        pool.withdraw(alice, 2).unwrap();
        assert_eq!(pool.tree.total_weight(), 20);
        assert_eq!(pool.ledger.entry(&alice).unwrap().active_amount, 10);
        pool.assert_conservation();
    }

    #[test]
    fn pending_tickets_are_withdrawn_before_active() {
        let mut pool = TestPool::new(10);
        let alice = pool.funded_user(100);
        pool.buy(alice, 2).unwrap();
        pool.draw().unwrap();
        pool.buy(alice, 1).unwrap();

        let receipt = pool.withdraw(alice, 2).unwrap();
        assert_eq!(receipt.from_pending, 1);
        assert_eq!(receipt.from_active, 1);
        let entry = pool.ledger.entry(&alice).unwrap();
        assert_eq!(entry.active_tickets, 1);
        assert_eq!(entry.pending_tickets, 0);
        assert_eq!(pool.tree.total_weight(), 10);
        pool.assert_conservation();
    }

    #[test]
    fn withdrawing_more_than_owned_fails() {
        let mut pool = TestPool::new(10);
        let alice = pool.funded_user(100);
        pool.buy(alice, 1).unwrap();
        expect_code(pool.withdraw(alice, 2), PrizePoolErrorCode::InsufficientTickets);
        assert_eq!(pool.ledger.entry(&alice).unwrap().pending_tickets, 1);
    }

    #[test]
    fn withdraw_zero_claims_winnings_only() {
        let mut pool = TestPool::new(10);
        let alice = pool.funded_user(100);
        pool.buy(alice, 4).unwrap();
        pool.yield_source.accrue(12);
        pool.draw().unwrap();
        let balance_before = pool.token.balance_of(&alice);

        let receipt = pool.withdraw(alice, 0).unwrap();
        assert_eq!(receipt.payout, 12);
        assert_eq!(receipt.winnings, 12);
        assert_eq!(pool.token.balance_of(&alice), balance_before + 12);

        let entry = pool.ledger.entry(&alice).unwrap();
        assert_eq!(entry.total_winnings, 0);
        assert_eq!(entry.active_tickets, 4);
        assert_eq!(pool.state.unclaimed_winnings, 0);
        assert_eq!(pool.tree.total_weight(), 40);
        pool.assert_conservation();
    }

    #[test]
    fn withdraw_zero_without_winnings_pays_nothing() {
        let mut pool = TestPool::new(10);
        let alice = pool.funded_user(100);
        pool.buy(alice, 1).unwrap();
        let redeemed_before = pool.yield_source.redeemed;

        let receipt = pool.withdraw(alice, 0).unwrap();
        assert_eq!(receipt.payout, 0);
        assert_eq!(pool.yield_source.redeemed, redeemed_before);
        assert_eq!(pool.token.paid_out, 0);
    }

    #[test]
    fn full_withdrawal_cannot_repeat() {
        let mut pool = TestPool::new(10);
        let alice = pool.funded_user(100);
        pool.buy(alice, 2).unwrap();
        pool.yield_source.accrue(5);
        pool.draw().unwrap();

        let receipt = pool.withdraw(alice, 2).unwrap();
        assert_eq!(receipt.payout, 25);
        assert_eq!(pool.token.balance_of(&alice), 105);

        expect_code(pool.withdraw(alice, 2), PrizePoolErrorCode::InsufficientTickets);
        assert_eq!(pool.withdraw(alice, 0).unwrap().payout, 0);
        assert_eq!(pool.token.balance_of(&alice), 105);
        pool.assert_conservation();
    }

    #[test]
    fn full_pool_admits_newcomer_after_someone_leaves() {
        let mut pool = TestPool::new(10);
        let users: Vec<Pubkey> = (0..MAX_ENTRIES).map(|_| pool.funded_user(100)).collect();
        for user in &users {
            pool.buy(*user, 1).unwrap();
        }
        pool.draw().unwrap();

        let newcomer = pool.funded_user(100);
        expect_code(pool.buy(newcomer, 1), PrizePoolErrorCode::LedgerFull);

        let leaver = users[5];
        assert_eq!(pool.withdraw(leaver, 1).unwrap().payout, 10);
        assert_eq!(pool.tree.weight_of(5), 0);

        let purchase = pool.buy(newcomer, 2).unwrap();
        assert_eq!(purchase.index, 5);
        assert!(pool.ledger.entry(&leaver).is_none());
        pool.draw().unwrap();

        assert_eq!(pool.tree.keys[5], newcomer);
        assert_eq!(pool.tree.weight_of(5), 20);
        assert_eq!(pool.tree.total_weight(), 10 * (MAX_ENTRIES as u64 + 1));
        assert_eq!(pool.token.balance_of(&leaver), 100);
        pool.assert_conservation();
    }

    #[test]
    fn group_membership_survives_full_withdrawal() {
        let mut pool = TestPool::new(10);
        let alice = pool.funded_user(100);
        pool.name(alice, "alice");
        pool.buy(alice, 1).unwrap();
        pool.groups.create_group(&mut pool.ledger, &alice).unwrap();

        pool.withdraw(alice, 1).unwrap();
        assert_eq!(pool.ledger.entry(&alice).unwrap().group_id, 0);
        assert!(pool.groups.group(0).unwrap().is_member(&alice));
    }

    #[test]
    fn paused_withdrawals_fail() {
        let mut pool = TestPool::new(10);
        let alice = pool.funded_user(100);
        pool.buy(alice, 1).unwrap();
        pool.config.pause_withdraw = 1;
        expect_code(pool.withdraw(alice, 1), PrizePoolErrorCode::WithdrawalsPaused);
    }

    #[test]
    fn redeem_failure_is_surfaced() {
        let mut pool = TestPool::new(10);
        let alice = pool.funded_user(100);
        pool.buy(alice, 1).unwrap();
        pool.yield_source.underlying = 5;
        expect_code(pool.withdraw(alice, 1), PrizePoolErrorCode::InsufficientLiquidity);
    }
}
