use crate::{
    error::RaffleError,
    randomness::RandomnessConfig,
    state::{Config, Raffle, RaffleState, Vault, RAFFLE_ACCOUNT_SIZE, VAULT_ACCOUNT_SIZE},
};
use anchor_lang::prelude::*;

// Constants for validation
const MIN_ENTRANCE_FEE: u64 = 1_000_000; // 0.001 SOL
const MAX_ENTRANCE_FEE: u64 = 100_000_000_000; // 100 SOL
const MIN_INTERVAL: i64 = 10; // seconds
const MAX_INTERVAL: i64 = 30 * 24 * 60 * 60; // 30 days in seconds

/// Event emitted when a raffle is created
#[event]
pub struct RaffleCreated {
    pub raffle: Pubkey,
    pub vault: Pubkey,
    /// Minimum payment per entry in lamports
    pub entrance_fee: u64,
    /// Seconds between rounds
    pub interval: i64,
    pub coordinator: Pubkey,
    pub creation_time: i64,
}

/// Instruction to create a new perpetual raffle
///
/// # Arguments
/// * `ctx` - The context object containing all required accounts
/// * `entrance_fee` - Minimum lamports per entry
/// * `interval` - Seconds that must pass after a settlement before the next draw
/// * `randomness` - Coordinator identity and request parameters, fixed for the raffle's life
///
/// # Security Considerations
/// 1. Validates caller is the management authority via config PDA
/// 2. Entrance fee and interval must be inside the allowed bounds
/// 3. Randomness parameters must name a coordinator and sane request settings
/// 4. Uses a PDA for the vault with seeds ["vault", raffle_key]
///
/// # Implementation Notes
/// - Starts Open with the round timer at the current time
/// - Request ids start at 1
pub fn create_raffle(
    ctx: Context<CreateRaffle>,
    entrance_fee: u64,
    interval: i64,
    randomness: RandomnessConfig,
) -> Result<()> {
    let current_time = Clock::get()?.unix_timestamp;

    require!(
        (MIN_ENTRANCE_FEE..=MAX_ENTRANCE_FEE).contains(&entrance_fee),
        RaffleError::InvalidEntranceFee
    );
    require!(
        (MIN_INTERVAL..=MAX_INTERVAL).contains(&interval),
        RaffleError::InvalidInterval
    );
    randomness.validate()?;

    let coordinator = randomness.coordinator;
    let raffle = &mut ctx.accounts.raffle;
    raffle.vault = ctx.accounts.vault.key();
    raffle.entrance_fee = entrance_fee;
    raffle.interval = interval;
    raffle.randomness = randomness;
    raffle.raffle_state = RaffleState::Open;
    raffle.pot = 0;
    raffle.last_timestamp = current_time;
    raffle.recent_winner = None;
    raffle.pending_request = None;
    raffle.next_request_id = 1;
    raffle.players = Vec::new();

    ctx.accounts.vault.raffle = ctx.accounts.raffle.key();
    ctx.accounts.vault.bump = ctx.bumps.vault;

    ctx.accounts.config.raffle_counter = ctx
        .accounts
        .config
        .raffle_counter
        .checked_add(1)
        .ok_or(RaffleError::Overflow)?;

    emit!(RaffleCreated {
        raffle: ctx.accounts.raffle.key(),
        vault: ctx.accounts.vault.key(),
        entrance_fee,
        interval,
        coordinator,
        creation_time: current_time,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct CreateRaffle<'info> {
    #[account(
        init,
        payer = management_authority,
        space = RAFFLE_ACCOUNT_SIZE,
        seeds = [
            b"raffle",
            config.raffle_counter.to_le_bytes().as_ref(),
        ],
        bump
    )]
    pub raffle: Account<'info, Raffle>,

    #[account(mut)]
    pub management_authority: Signer<'info>,

    #[account(
        init,
        payer = management_authority,
        space = VAULT_ACCOUNT_SIZE,
        seeds = [
            b"vault",
            raffle.key().as_ref(),
        ],
        bump,
    )]
    pub vault: Account<'info, Vault>,

    #[account(
        mut,
        seeds = [b"config"],
        bump = config.bump,
        has_one = management_authority @ RaffleError::NotProgramManagementAuthority,
    )]
    pub config: Account<'info, Config>,

    pub system_program: Program<'info, System>,
}
