use std::num::NonZeroU64;

use anchor_lang::prelude::*;

use crate::{
    error::RaffleError,
    payout::PrizeTransfer,
    randomness::{
        winner_index, RandomWord, RandomnessConfig, RandomnessProvider, RANDOMNESS_CONFIG_SIZE,
    },
    upkeep::UpkeepStatus,
};

/// Entries a single round can hold. Bounds the account size.
pub const MAX_PLAYERS: usize = 100;

// Space calculation:
// 8 (discriminator) +
// 32 (vault) +
// 8 (entrance_fee) +
// 8 (interval) +
// 83 (randomness) +
// 1 (raffle_state) +
// 8 (pot) +
// 8 (last_timestamp) +
// 33 (recent_winner: Option<Pubkey>) +
// 17 (pending_request: Option<PendingRequest>) +
// 8 (next_request_id) +
// 4 + 32 * MAX_PLAYERS (players)
pub const RAFFLE_ACCOUNT_SIZE: usize =
    8 + 32 + 8 + 8 + RANDOMNESS_CONFIG_SIZE + 1 + 8 + 8 + 33 + 17 + 8 + 4 + 32 * MAX_PLAYERS;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RaffleState {
    #[default]
    Open = 0,
    /// A randomness request is in flight; entries are blocked
    Calculating = 1,
}

/// The request the current round is waiting on.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingRequest {
    pub request_id: u64,
    pub requested_at: i64,
}

/// Outcome of a settled round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settlement {
    pub request_id: u64,
    pub winner: Pubkey,
    pub winner_index: u64,
    pub prize: u64,
}

#[account]
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Raffle {
    pub vault: Pubkey,
    pub entrance_fee: u64,
    /// Minimum seconds between the end of one round and the start of the next
    pub interval: i64,
    pub randomness: RandomnessConfig,
    pub raffle_state: RaffleState,
    /// Lamports paid in this round, held by the vault
    pub pot: u64,
    /// Creation time, then the time of the most recent settlement
    pub last_timestamp: i64,
    pub recent_winner: Option<Pubkey>,
    pub pending_request: Option<PendingRequest>,
    pub next_request_id: u64,
    pub players: Vec<Pubkey>,
}

impl Raffle {
    pub fn number_of_players(&self) -> u64 {
        self.players.len() as u64
    }

    pub fn player(&self, index: u64) -> Option<&Pubkey> {
        usize::try_from(index).ok().and_then(|i| self.players.get(i))
    }

    pub fn is_open(&self) -> bool {
        self.raffle_state == RaffleState::Open
    }

    /// Records one entry. Each call is its own prize-weighted slot, so the
    /// same player may appear several times.
    pub fn enter(&mut self, player: Pubkey, payment: u64) -> Result<()> {
        require!(
            payment >= self.entrance_fee,
            RaffleError::InsufficientPayment
        );
        require!(self.is_open(), RaffleError::RaffleNotOpen);
        require!(self.players.len() < MAX_PLAYERS, RaffleError::RaffleFull);

        let pot = self
            .pot
            .checked_add(payment)
            .ok_or(RaffleError::Overflow)?;

        self.players.push(player);
        self.pot = pot;

        Ok(())
    }

    pub fn check_upkeep(&self, now: i64) -> UpkeepStatus {
        UpkeepStatus::evaluate(self, now)
    }

    /// Starts drawing the current round: re-checks upkeep, moves to
    /// Calculating and asks `provider` for randomness. Returns the request id.
    pub fn perform_upkeep<P: RandomnessProvider>(
        &mut self,
        now: i64,
        provider: &mut P,
    ) -> Result<u64> {
        let status = self.check_upkeep(now);
        if !status.upkeep_needed() {
            return Err(status.rejection());
        }

        let next_request_id = self
            .next_request_id
            .checked_add(1)
            .ok_or(RaffleError::Overflow)?;

        // Calculating has to be in place before the request leaves
        self.raffle_state = RaffleState::Calculating;
        let request_id = match provider.request_random_words(&self.randomness) {
            Ok(request_id) => request_id,
            Err(err) => {
                self.raffle_state = RaffleState::Open;
                return Err(err);
            }
        };

        self.pending_request = Some(PendingRequest {
            request_id,
            requested_at: now,
        });
        self.next_request_id = next_request_id;

        Ok(request_id)
    }

    /// Completes the round the coordinator answered for. Nothing on the
    /// raffle changes unless the prize transfer went through.
    pub fn fulfill_random_words<T: PrizeTransfer>(
        &mut self,
        caller: &Pubkey,
        request_id: u64,
        random_words: &[RandomWord],
        now: i64,
        payout: &mut T,
    ) -> Result<Settlement> {
        require_keys_eq!(
            *caller,
            self.randomness.coordinator,
            RaffleError::UnauthorizedCallback
        );
        match self.pending_request {
            Some(pending) if pending.request_id == request_id => {}
            _ => return err!(RaffleError::RequestNotPending),
        }
        let word = random_words.first().ok_or(RaffleError::NoRandomWords)?;

        // perform_upkeep only leaves Open with at least one player, and
        // entries are blocked until this round settles
        let entrants = NonZeroU64::new(self.number_of_players())
            .ok_or(RaffleError::RaffleNotCalculating)?;
        let index = winner_index(word, entrants);
        let winner = self.players[index as usize];
        let prize = self.pot;

        payout.transfer_prize(&winner, prize)?;

        self.recent_winner = Some(winner);
        self.players.clear();
        self.pot = 0;
        self.raffle_state = RaffleState::Open;
        self.last_timestamp = now;
        self.pending_request = None;

        Ok(Settlement {
            request_id,
            winner,
            winner_index: index,
            prize,
        })
    }

    /// Recovery for a coordinator that never answers. Drops the pending
    /// request `request_id` once it is at least one interval old and reopens
    /// the round with its entrants and pot intact.
    pub fn reset_round(&mut self, request_id: u64, now: i64) -> Result<()> {
        let pending = self
            .pending_request
            .ok_or(RaffleError::RaffleNotCalculating)?;
        require!(
            pending.request_id == request_id,
            RaffleError::RequestNotPending
        );
        require!(
            now.saturating_sub(pending.requested_at) >= self.interval,
            RaffleError::RequestNotStale
        );

        self.pending_request = None;
        self.raffle_state = RaffleState::Open;

        Ok(())
    }
}
