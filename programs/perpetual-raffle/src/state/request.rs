use anchor_lang::prelude::*;

use crate::{
    error::RaffleError,
    randomness::{RandomnessConfig, RANDOMNESS_CONFIG_SIZE},
};

// 8 discriminator + 32 raffle + 8 request_id + params + 8 requested_at
// + 32 payer + 1 status + 1 bump
pub const REQUEST_ACCOUNT_SIZE: usize = 8 + 32 + 8 + RANDOMNESS_CONFIG_SIZE + 8 + 32 + 1 + 1;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RequestStatus {
    #[default]
    Pending = 0,
    Fulfilled = 1,
    /// Dropped by the management authority; a late answer is rejected
    Cancelled = 2,
}

/// One entry of the per-raffle request table, PDA `["request", raffle, request_id]`.
///
/// Lives only while the request is outstanding. Fulfilling or cancelling it
/// closes the account and refunds the rent to `payer`.
#[account]
#[derive(Debug, PartialEq, Eq)]
pub struct RandomnessRequest {
    pub raffle: Pubkey,
    pub request_id: u64,
    pub params: RandomnessConfig,
    pub requested_at: i64,
    /// Keeper that paid the rent
    pub payer: Pubkey,
    pub status: RequestStatus,
    pub bump: u8,
}

impl RandomnessRequest {
    pub fn mark_fulfilled(&mut self) -> Result<()> {
        self.finish(RequestStatus::Fulfilled)
    }

    pub fn mark_cancelled(&mut self) -> Result<()> {
        self.finish(RequestStatus::Cancelled)
    }

    fn finish(&mut self, status: RequestStatus) -> Result<()> {
        require!(
            self.status == RequestStatus::Pending,
            RaffleError::RequestNotPending
        );
        self.status = status;
        Ok(())
    }
}
