use anchor_lang::prelude::*;

use crate::{
    error::RaffleError,
    payout::VaultPayout,
    state::{RandomnessRequest, Raffle, RequestStatus, Vault},
};

/// Event emitted when a round is settled
#[event]
pub struct WinnerPicked {
    pub raffle: Pubkey,
    pub winner: Pubkey,
    /// Lamports paid out of the vault
    pub prize: u64,
    pub request_id: u64,
    pub winner_index: u64,
}

/// Coordinator callback delivering the random words for `request_id`.
///
/// The winner is entrant `random_words[0] mod entrants`. The coordinator
/// computes the same index off-chain and passes that entrant as `winner`;
/// any other account is rejected.
///
/// # Errors
/// - `UnauthorizedCallback` if the signer is not the raffle's coordinator
/// - `RequestNotPending` if the id is not the round's outstanding request.
///   A settled request's account is closed, so a second delivery for it
///   cannot even load its accounts
/// - `NoRandomWords` if the response is empty
/// - `WinnerAccountMismatch` / `TransferFailed` if the payout cannot be made;
///   the round then stays Calculating and the delivery may be retried
pub fn fulfill_random_words(
    ctx: Context<FulfillRandomWords>,
    request_id: u64,
    random_words: Vec<[u8; 32]>,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let coordinator = ctx.accounts.coordinator.key();
    let vault = ctx.accounts.vault.to_account_info();
    let winner = ctx.accounts.winner.to_account_info();

    let mut payout = VaultPayout {
        vault: &vault,
        winner: &winner,
    };
    let settlement = ctx.accounts.raffle.fulfill_random_words(
        &coordinator,
        request_id,
        &random_words,
        now,
        &mut payout,
    )?;

    // the account is closed on exit and the keeper gets its rent back
    ctx.accounts.request.mark_fulfilled()?;

    emit!(WinnerPicked {
        raffle: ctx.accounts.raffle.key(),
        winner: settlement.winner,
        prize: settlement.prize,
        request_id: settlement.request_id,
        winner_index: settlement.winner_index,
    });

    Ok(())
}

#[derive(Accounts)]
#[instruction(request_id: u64)]
pub struct FulfillRandomWords<'info> {
    #[account(
        mut,
        has_one = vault @ RaffleError::InvalidVault,
    )]
    pub raffle: Account<'info, Raffle>,

    #[account(
        mut,
        seeds = [
            b"vault",
            raffle.key().as_ref(),
        ],
        bump = vault.bump,
    )]
    pub vault: Account<'info, Vault>,

    #[account(
        mut,
        seeds = [
            b"request",
            raffle.key().as_ref(),
            request_id.to_le_bytes().as_ref(),
        ],
        bump = request.bump,
        constraint = request.status == RequestStatus::Pending @ RaffleError::RequestNotPending,
        has_one = payer @ RaffleError::InvalidRequestPayer,
        close = payer,
    )]
    pub request: Account<'info, RandomnessRequest>,

    /// Keeper that funded the request account; receives its rent
    #[account(mut)]
    pub payer: SystemAccount<'info>,

    /// Checked against the raffle's registered coordinator
    pub coordinator: Signer<'info>,

    /// CHECK: Compared with the selected entrant before any lamports move
    #[account(mut)]
    pub winner: UncheckedAccount<'info>,
}
