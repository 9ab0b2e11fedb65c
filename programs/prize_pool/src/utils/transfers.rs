use anchor_lang::prelude::*;
use anchor_spl::token::{self, Transfer};

use crate::errors::PrizePoolErrorCode;
use crate::state::pool_state::PoolState;

/// Token movements the ledger engines need from the pooled token.
///
/// `transfer_from` pulls into the pool, `transfer` pays out of it.
pub trait TokenGateway {
    fn transfer_from(&mut self, from: &Pubkey, amount: u64) -> Result<()>;
    fn transfer(&mut self, to: &Pubkey, amount: u64) -> Result<()>;
    fn balance_of(&self, owner: &Pubkey) -> u64;
}

/// SPL token transfer signed by a wallet in the transaction.
pub fn transfer_tokens<'info>(
    token_program: &AccountInfo<'info>,
    from: &AccountInfo<'info>,
    to: &AccountInfo<'info>,
    authority: &AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    require!(amount > 0, PrizePoolErrorCode::InvalidAmount);

    token::transfer(
        CpiContext::new(
            token_program.clone(),
            Transfer {
                from: from.clone(),
                to: to.clone(),
                authority: authority.clone(),
            },
        ),
        amount,
    )
}

/// SPL token transfer signed by a program PDA.
pub fn transfer_tokens_signed<'info>(
    token_program: &AccountInfo<'info>,
    from: &AccountInfo<'info>,
    to: &AccountInfo<'info>,
    authority: &AccountInfo<'info>,
    signer_seeds: &[&[&[u8]]],
    amount: u64,
) -> Result<()> {
    require!(amount > 0, PrizePoolErrorCode::InvalidAmount);

    token::transfer(
        CpiContext::new_with_signer(
            token_program.clone(),
            Transfer {
                from: from.clone(),
                to: to.clone(),
                authority: authority.clone(),
            },
            signer_seeds,
        ),
        amount,
    )
}

/// `TokenGateway` over one participant's token account and the pool vault.
///
/// Pulls are signed by the participant; payouts by the `PoolState` PDA.
/// The participant's balance is read once from the token account and tracked
/// locally so a pull it cannot cover fails before any CPI.
pub struct SplTokenGateway<'info> {
    pub token_program: AccountInfo<'info>,
    pub pool_vault: AccountInfo<'info>,
    pub pool_authority: AccountInfo<'info>,
    pub pool_authority_bump: u8,
    pub participant: AccountInfo<'info>,
    pub participant_token: AccountInfo<'info>,
    pub participant_balance: u64,
}

impl<'info> TokenGateway for SplTokenGateway<'info> {
    fn transfer_from(&mut self, from: &Pubkey, amount: u64) -> Result<()> {
        require_keys_eq!(*from, self.participant.key(), PrizePoolErrorCode::ParticipantMismatch);
        require!(
            self.participant_balance >= amount,
            PrizePoolErrorCode::InsufficientAllowance
        );

        transfer_tokens(
            &self.token_program,
            &self.participant_token,
            &self.pool_vault,
            &self.participant,
            amount,
        )?;

        self.participant_balance -= amount;
        Ok(())
    }

    fn transfer(&mut self, to: &Pubkey, amount: u64) -> Result<()> {
        require_keys_eq!(*to, self.participant.key(), PrizePoolErrorCode::ParticipantMismatch);

        let bump = [self.pool_authority_bump];
        let seeds: &[&[u8]] = &[PoolState::SEED, &bump];
        transfer_tokens_signed(
            &self.token_program,
            &self.pool_vault,
            &self.participant_token,
            &self.pool_authority,
            &[seeds],
            amount,
        )?;

        self.participant_balance = self
            .participant_balance
            .checked_add(amount)
            .ok_or(PrizePoolErrorCode::MathOverflow)?;
        Ok(())
    }

    fn balance_of(&self, owner: &Pubkey) -> u64 {
        if *owner == self.participant.key() {
            self.participant_balance
        } else {
            0
        }
    }
}
