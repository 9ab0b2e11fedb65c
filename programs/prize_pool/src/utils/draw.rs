use anchor_lang::prelude::*;

use crate::constants::NO_GROUP;
use crate::errors::PrizePoolErrorCode;
use crate::state::*;
use crate::utils::fixed::Fixed;
use crate::utils::random::random_below;
use crate::utils::yield_source::YieldSource;

/// What a draw did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DrawOutcome {
    /// `None` for the initial empty draw.
    pub winner: Option<Pubkey>,
    pub group_id: i64,
    pub interest: u64,
    pub random_value: u64,
    pub eligible_weight: u64,
    pub activated: u32,
    /// Prize credited per participant.
    pub shares: Vec<(Pubkey, u64)>,
}

/// Interest earned since the last draw: everything the yield source holds
/// beyond principal and prizes already credited.
pub fn prize_for_cycle(underlying: u64, principal: u64, unclaimed_winnings: u64) -> Result<u64> {
    let owed = principal
        .checked_add(unclaimed_winnings)
        .ok_or(PrizePoolErrorCode::MathOverflow)?;
    Ok(underlying.saturating_sub(owed))
}

/// Splits `prize` between the members of a group.
///
/// `weights` are the members' active amounts in join order. The indivisible
/// remainder goes to the first member.
pub fn split_prize(policy: GroupSplit, weights: &[u64], prize: u64) -> Result<Vec<u64>> {
    require!(!weights.is_empty(), PrizePoolErrorCode::AssertInvariantFailed);

    let total_weight = weights.iter().try_fold(0u64, |acc, w| {
        acc.checked_add(*w)
            .ok_or_else(|| error!(PrizePoolErrorCode::MathOverflow))
    })?;

    let mut shares = match policy {
        GroupSplit::Proportional if total_weight > 0 => {
            let mut shares = Vec::with_capacity(weights.len());
            for weight in weights {
                shares.push(Fixed::from_ratio(*weight, total_weight)?.apply_to(prize)?);
            }
            shares
        }
        _ => vec![prize / weights.len() as u64; weights.len()],
    };

    let distributed = shares.iter().try_fold(0u64, |acc, s| {
        acc.checked_add(*s)
            .ok_or_else(|| error!(PrizePoolErrorCode::MathOverflow))
    })?;
    let remainder = prize
        .checked_sub(distributed)
        .ok_or(PrizePoolErrorCode::AssertInvariantFailed)?;
    shares[0] += remainder;

    Ok(shares)
}

/// Ledger indices and amounts to credit for a prize won by entry `winner`.
fn allocate_prize(
    policy: GroupSplit,
    ledger: &EntryLedger,
    groups: &GroupRegistry,
    winner: usize,
    prize: u64,
) -> Result<Vec<(usize, u64)>> {
    let group = match groups.group_of_entry(ledger.entries[winner].group_id)? {
        Some(group) => group,
        None => return Ok(vec![(winner, prize)]),
    };
    require!(
        group.is_member(&ledger.entries[winner].owner),
        PrizePoolErrorCode::AssertInvariantFailed
    );

    let mut members = Vec::with_capacity(group.members.len());
    let mut weights = Vec::with_capacity(group.members.len());
    for member in &group.members {
        let index = ledger.require_index(member)?;
        members.push(index);
        weights.push(ledger.entries[index].active_amount);
    }

    let shares = split_prize(policy, &weights, prize)?;
    Ok(members.into_iter().zip(shares).collect())
}

/// `draw(secret, nextHashOfSecret)`.
///
/// Verifies the revealed secret, activates pending entries, picks a winner
/// weighted by active amount and credits the cycle's interest to the winner
/// (or its group). Every check and external read happens before the first
/// write.
#[allow(clippy::too_many_arguments)]
pub fn execute_draw<Y: YieldSource>(
    config: &Config,
    state: &mut PoolState,
    ledger: &mut EntryLedger,
    groups: &GroupRegistry,
    tree: &mut SortitionTree,
    yield_source: &Y,
    secret: &[u8; 32],
    next_hash_of_secret: [u8; 32],
    entropy: &[u8; 32],
    slot: u64,
) -> Result<DrawOutcome> {
    state.verify_secret(secret)?;
    require!(
        next_hash_of_secret != [0u8; 32],
        PrizePoolErrorCode::InvalidCommitment
    );
    let policy = config.group_split_policy()?;

    // Pending tickets are activated below, so they count as eligible.
    let eligible_weight = ledger.total_principal()?;
    let underlying = yield_source.balance_of_underlying()?;
    let rate = yield_source.supply_rate_per_slot();

    if eligible_weight == 0 {
        require!(!state.has_drawn(), PrizePoolErrorCode::NoEligibleEntries);
        state.complete_draw(next_hash_of_secret, slot, None, NO_GROUP, 0, rate)?;
        msg!("Draw #{} completed with no entries", state.draw_count);
        return Ok(DrawOutcome {
            group_id: NO_GROUP,
            ..DrawOutcome::default()
        });
    }

    let interest = prize_for_cycle(underlying, eligible_weight, state.unclaimed_winnings)?;
    let unclaimed_winnings = state
        .unclaimed_winnings
        .checked_add(interest)
        .ok_or(PrizePoolErrorCode::MathOverflow)?;
    let random_value = random_below(secret, entropy, eligible_weight)?;

    // ─────────────────────────────
    // 1. Roll pending into active
    // ─────────────────────────────
    let activated = ledger.activate_all(tree)?;
    state.last_activation_slot = slot;
    require!(
        tree.total_weight() == eligible_weight && ledger.total_active == eligible_weight,
        PrizePoolErrorCode::AssertInvariantFailed
    );

    // ─────────────────────────────
    // 2. Select
    // ─────────────────────────────
    let winner_index = tree.draw_leaf(random_value)?;
    let winner = ledger.entries[winner_index].owner;
    let group_id = ledger.entries[winner_index].group_id;

    // ─────────────────────────────
    // 3. Credit
    // ─────────────────────────────
    let allocation = allocate_prize(policy, ledger, groups, winner_index, interest)?;
    let mut shares = Vec::with_capacity(allocation.len());
    for (index, amount) in allocation {
        ledger.credit_winnings(index, amount)?;
        shares.push((ledger.entries[index].owner, amount));
    }

    state.unclaimed_winnings = unclaimed_winnings;
    state.complete_draw(next_hash_of_secret, slot, Some(winner), group_id, interest, rate)?;

    msg!(
        "Draw #{} winner={} group={} interest={} value={}/{} activated={}",
        state.draw_count,
        winner,
        group_id,
        interest,
        random_value,
        eligible_weight,
        activated
    );

    Ok(DrawOutcome {
        winner: Some(winner),
        group_id,
        interest,
        random_value,
        eligible_weight,
        activated,
        shares,
    })
}
