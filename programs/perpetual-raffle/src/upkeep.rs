use anchor_lang::{error::Error, prelude::*};

use crate::{
    error::RaffleError,
    randomness::RandomnessProvider,
    state::{Raffle, RaffleState},
};

/// Why a raffle does or does not need upkeep. Every condition is reported on
/// its own so a keeper can tell which one is holding the round back.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct UpkeepStatus {
    pub is_open: bool,
    pub time_passed: bool,
    pub has_balance: bool,
    pub has_players: bool,
    pub pot: u64,
    pub players: u64,
    pub raffle_state: RaffleState,
}

impl UpkeepStatus {
    pub fn evaluate(raffle: &Raffle, now: i64) -> Self {
        Self {
            is_open: raffle.raffle_state == RaffleState::Open,
            time_passed: now.saturating_sub(raffle.last_timestamp) >= raffle.interval,
            has_balance: raffle.pot > 0,
            has_players: !raffle.players.is_empty(),
            pot: raffle.pot,
            players: raffle.players.len() as u64,
            raffle_state: raffle.raffle_state,
        }
    }

    pub fn upkeep_needed(&self) -> bool {
        self.is_open && self.time_passed && self.has_balance && self.has_players
    }

    /// `UpkeepNotNeeded` carrying the pot, entrant count and state seen at rejection.
    pub fn rejection(&self) -> Error {
        msg!(
            "Upkeep not needed: open={} time_passed={} pot={} players={} state={:?}",
            self.is_open,
            self.time_passed,
            self.pot,
            self.players,
            self.raffle_state
        );
        error!(RaffleError::UpkeepNotNeeded).with_values((
            format!("pot={} players={}", self.pot, self.players),
            format!("state={:?}", self.raffle_state),
        ))
    }
}

/// Return value of the `check_upkeep` instruction.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct UpkeepCheck {
    pub upkeep_needed: bool,
    /// Handed back verbatim to `perform_upkeep`; currently always empty
    pub perform_data: Vec<u8>,
    pub status: UpkeepStatus,
}

impl UpkeepCheck {
    pub fn new(status: UpkeepStatus) -> Self {
        Self {
            upkeep_needed: status.upkeep_needed(),
            perform_data: Vec::new(),
            status,
        }
    }
}

/// Keeper side of upkeep: poll cheaply, trigger only when eligible.
///
/// The program never calls this. It is the loop body for a Rust keeper that
/// mirrors the raffle account off-chain, and it runs the same check the
/// `perform_upkeep` instruction does. `perform_upkeep` re-validates on its
/// own, so two keepers that both saw an eligible raffle race harmlessly: the
/// loser gets `UpkeepNotNeeded`.
pub struct UpkeepTrigger;

impl UpkeepTrigger {
    /// Returns the issued request id, or `None` when the raffle did not need upkeep.
    pub fn poll<P: RandomnessProvider>(
        raffle: &mut Raffle,
        now: i64,
        provider: &mut P,
    ) -> Result<Option<u64>> {
        let status = raffle.check_upkeep(now);
        if !status.upkeep_needed() {
            return Ok(None);
        }
        raffle.perform_upkeep(now, provider).map(Some)
    }
}
