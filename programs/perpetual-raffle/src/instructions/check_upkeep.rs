use anchor_lang::prelude::*;

use crate::{state::Raffle, upkeep::UpkeepCheck};

/// Read-only upkeep probe meant to be simulated by keepers.
///
/// `check_data` is accepted for interface compatibility and ignored.
pub fn check_upkeep(ctx: Context<CheckUpkeep>, _check_data: Vec<u8>) -> Result<UpkeepCheck> {
    let now = Clock::get()?.unix_timestamp;
    Ok(UpkeepCheck::new(ctx.accounts.raffle.check_upkeep(now)))
}

#[derive(Accounts)]
pub struct CheckUpkeep<'info> {
    pub raffle: Account<'info, Raffle>,
}
