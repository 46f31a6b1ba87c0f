use anchor_lang::prelude::*;
use instructions::*;

pub mod error;
pub mod instructions;
pub mod payout;
pub mod randomness;
pub mod state;
pub mod upkeep;

#[cfg(test)]
mod testing;

use randomness::RandomnessConfig;
use upkeep::UpkeepCheck;

declare_id!("DdPGTZNPyj4EentTvTPPnYFSo6ZspiLvtwXwqJpEa4mC");

#[program]
pub mod perpetual_raffle {
    use super::*;

    pub fn init_config(ctx: Context<InitConfig>) -> Result<()> {
        instructions::init_config::init_config(ctx)
    }

    pub fn create_raffle(
        ctx: Context<CreateRaffle>,
        entrance_fee: u64,
        interval: i64,
        randomness: RandomnessConfig,
    ) -> Result<()> {
        instructions::create_raffle::create_raffle(ctx, entrance_fee, interval, randomness)
    }

    pub fn enter_raffle(ctx: Context<EnterRaffle>, amount: u64) -> Result<()> {
        instructions::enter_raffle::enter_raffle(ctx, amount)
    }

    pub fn check_upkeep(ctx: Context<CheckUpkeep>, check_data: Vec<u8>) -> Result<UpkeepCheck> {
        instructions::check_upkeep::check_upkeep(ctx, check_data)
    }

    pub fn perform_upkeep(ctx: Context<PerformUpkeep>, perform_data: Vec<u8>) -> Result<()> {
        instructions::perform_upkeep::perform_upkeep(ctx, perform_data)
    }

    pub fn fulfill_random_words(
        ctx: Context<FulfillRandomWords>,
        request_id: u64,
        random_words: Vec<[u8; 32]>,
    ) -> Result<()> {
        instructions::fulfill_random_words::fulfill_random_words(ctx, request_id, random_words)
    }

    pub fn reset_round(ctx: Context<ResetRound>, request_id: u64) -> Result<()> {
        instructions::reset_round::reset_round(ctx, request_id)
    }
}
