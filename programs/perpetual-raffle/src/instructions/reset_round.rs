use anchor_lang::prelude::*;

use crate::{
    error::RaffleError,
    state::{Config, RandomnessRequest, Raffle, RequestStatus},
};

/// Event emitted when a wedged round is reopened
#[event]
pub struct RoundReset {
    pub raffle: Pubkey,
    /// The request that will no longer be accepted
    pub request_id: u64,
    pub reset_at: i64,
}

/// Recovery path for a coordinator that never answers.
///
/// # Security Considerations
/// 1. Only the management authority may reset
/// 2. The request must be the raffle's pending one and at least one
///    interval old, so a timely answer cannot be pre-empted
/// 3. The request is cancelled and its account closed, so any later
///    delivery for it fails
///
/// # Implementation Notes
/// - Entrants and pot carry over; the next upkeep issues a fresh request
/// - The round timer is left untouched
/// - Rent of the request account goes back to the keeper that paid it
pub fn reset_round(ctx: Context<ResetRound>, request_id: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    ctx.accounts.raffle.reset_round(request_id, now)?;
    ctx.accounts.request.mark_cancelled()?;

    emit!(RoundReset {
        raffle: ctx.accounts.raffle.key(),
        request_id,
        reset_at: now,
    });

    Ok(())
}

#[derive(Accounts)]
#[instruction(request_id: u64)]
pub struct ResetRound<'info> {
    #[account(mut)]
    pub raffle: Account<'info, Raffle>,

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

    pub management_authority: Signer<'info>,

    #[account(
        seeds = [b"config"],
        bump = config.bump,
        has_one = management_authority @ RaffleError::NotProgramManagementAuthority,
    )]
    pub config: Account<'info, Config>,
}
