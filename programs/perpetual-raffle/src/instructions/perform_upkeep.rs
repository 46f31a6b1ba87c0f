use anchor_lang::prelude::*;

use crate::{randomness::RequestTable, state::Raffle};

/// Event emitted when a round stops taking entries and waits on randomness
#[event]
pub struct RoundCalculating {
    pub raffle: Pubkey,
    pub request_id: u64,
}

/// Instruction to start the draw for the current round. Callable by anyone.
///
/// Upkeep is re-checked here regardless of what `check_upkeep` reported, so
/// of two keepers racing on the same round only one gets through; the other
/// fails with `UpkeepNotNeeded`. The request account is only validated and
/// created after that check, so the loser still sees the raffle's snapshot.
///
/// After execution:
/// - The raffle is Calculating and refuses entries
/// - A request PDA ["request", raffle_key, request_id] holds the request for the coordinator
///
/// `perform_data` is reserved and ignored.
pub fn perform_upkeep(ctx: Context<PerformUpkeep>, _perform_data: Vec<u8>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let raffle_key = ctx.accounts.raffle.key();
    let request = ctx.accounts.request.to_account_info();
    let keeper = ctx.accounts.keeper.to_account_info();
    let system_program = ctx.accounts.system_program.to_account_info();

    let mut provider = RequestTable {
        program_id: ctx.program_id,
        raffle: raffle_key,
        request_id: ctx.accounts.raffle.next_request_id,
        now,
        request: &request,
        payer: &keeper,
        system_program: &system_program,
    };
    let request_id = ctx.accounts.raffle.perform_upkeep(now, &mut provider)?;

    emit!(RoundCalculating {
        raffle: raffle_key,
        request_id,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct PerformUpkeep<'info> {
    #[account(mut)]
    pub raffle: Account<'info, Raffle>,

    /// CHECK: PDA ["request", raffle, next_request_id], verified and created
    /// by `RequestTable` once upkeep is confirmed
    #[account(mut)]
    pub request: UncheckedAccount<'info>,

    /// Whoever triggers the round pays for the request account
    #[account(mut)]
    pub keeper: Signer<'info>,

    pub system_program: Program<'info, System>,
}
