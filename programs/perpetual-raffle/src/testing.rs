//! Deterministic stand-ins for the coordinator and the lamport ledger, plus
//! hand-built accounts for exercising the on-chain adapters.

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;

use anchor_lang::{error::Error, prelude::*, solana_program::program_error::ProgramError};

use crate::{
    error::RaffleError,
    payout::PrizeTransfer,
    randomness::{RandomWord, RandomnessConfig, RandomnessProvider},
    state::{Raffle, RaffleState, Settlement},
};

/// 0.2 SOL
pub const ENTRANCE_FEE: u64 = 200_000_000;
pub const INTERVAL: i64 = 30;
pub const START: i64 = 1_700_000_000;

pub fn randomness_config(coordinator: Pubkey) -> RandomnessConfig {
    RandomnessConfig {
        coordinator,
        key_hash: [7; 32],
        subscription_id: 42,
        request_confirmations: 3,
        callback_gas_limit: 500_000,
        num_words: 1,
        native_payment: false,
    }
}

pub fn open_raffle(coordinator: Pubkey) -> Raffle {
    Raffle {
        vault: Pubkey::new_unique(),
        entrance_fee: ENTRANCE_FEE,
        interval: INTERVAL,
        randomness: randomness_config(coordinator),
        raffle_state: RaffleState::Open,
        last_timestamp: START,
        next_request_id: 1,
        ..Raffle::default()
    }
}

/// A random word whose integer value is `v`.
pub fn word(v: u64) -> RandomWord {
    let mut w = [0u8; 32];
    w[24..].copy_from_slice(&v.to_be_bytes());
    w
}

pub fn assert_raffle_error<T: Debug>(result: Result<T>, expected: RaffleError) {
    match result {
        Err(Error::AnchorError(e)) => {
            assert_eq!(e.error_code_number, u32::from(expected), "got {}", e.error_name)
        }
        other => panic!("expected {expected:?}, got {other:?}"),
    }
}

pub struct FakeCoordinator {
    pub key: Pubkey,
    pub requests: Vec<(u64, RandomnessConfig)>,
    pub refuse_requests: bool,
    last_request_id: u64,
}

impl FakeCoordinator {
    pub fn new() -> Self {
        Self {
            key: Pubkey::new_unique(),
            requests: Vec::new(),
            refuse_requests: false,
            last_request_id: 0,
        }
    }

    /// Answers a request the way the real coordinator would: as its own
    /// later call, signed with the coordinator key.
    pub fn deliver<T: PrizeTransfer>(
        &self,
        raffle: &mut Raffle,
        request_id: u64,
        random_words: &[RandomWord],
        now: i64,
        payout: &mut T,
    ) -> Result<Settlement> {
        raffle.fulfill_random_words(&self.key, request_id, random_words, now, payout)
    }
}

impl RandomnessProvider for FakeCoordinator {
    fn request_random_words(&mut self, config: &RandomnessConfig) -> Result<u64> {
        if self.refuse_requests {
            return Err(ProgramError::InsufficientFunds.into());
        }
        self.last_request_id += 1;
        self.requests.push((self.last_request_id, config.clone()));
        Ok(self.last_request_id)
    }
}

#[derive(Default)]
pub struct FakeBank {
    pub transfers: Vec<(Pubkey, u64)>,
    balances: HashMap<Pubkey, u64>,
    refusing: HashSet<Pubkey>,
}

impl FakeBank {
    pub fn fund(&mut self, account: Pubkey, lamports: u64) {
        *self.balances.entry(account).or_default() += lamports;
    }

    pub fn balance(&self, account: &Pubkey) -> u64 {
        self.balances.get(account).copied().unwrap_or_default()
    }

    pub fn refuse(&mut self, account: Pubkey) {
        self.refusing.insert(account);
    }

    pub fn accept(&mut self, account: Pubkey) {
        self.refusing.remove(&account);
    }
}

impl PrizeTransfer for FakeBank {
    fn transfer_prize(&mut self, winner: &Pubkey, amount: u64) -> Result<()> {
        if self.refusing.contains(winner) {
            return err!(RaffleError::TransferFailed);
        }
        self.fund(*winner, amount);
        self.transfers.push((*winner, amount));
        Ok(())
    }
}

/// Account fixture that turns into a leaked `AccountInfo<'static>`, which is
/// what the on-chain adapters and `try_accounts` borrow from.
pub struct TestAccount {
    pub key: Pubkey,
    pub owner: Pubkey,
    pub lamports: u64,
    pub data: Vec<u8>,
    pub is_signer: bool,
    pub is_writable: bool,
}

impl TestAccount {
    pub fn wallet(lamports: u64) -> Self {
        Self {
            key: Pubkey::new_unique(),
            owner: anchor_lang::system_program::ID,
            lamports,
            data: Vec::new(),
            is_signer: false,
            is_writable: true,
        }
    }

    /// A program owned account holding `account`, padded to `space` bytes.
    pub fn program_account<T: AccountSerialize>(key: Pubkey, account: &T, space: usize) -> Self {
        let mut data = Vec::with_capacity(space);
        account.try_serialize(&mut data).unwrap();
        data.resize(space, 0);
        Self {
            key,
            owner: crate::ID,
            lamports: 10_000_000,
            data,
            is_signer: false,
            is_writable: true,
        }
    }

    pub fn signer(mut self) -> Self {
        self.is_signer = true;
        self
    }

    pub fn read_only(mut self) -> Self {
        self.is_writable = false;
        self
    }

    pub fn into_info(self) -> AccountInfo<'static> {
        AccountInfo::new(
            Box::leak(Box::new(self.key)),
            self.is_signer,
            self.is_writable,
            Box::leak(Box::new(self.lamports)),
            Box::leak(self.data.into_boxed_slice()),
            Box::leak(Box::new(self.owner)),
            false,
            0,
        )
    }
}

/// Leaks the account list the way the runtime hands it to `try_accounts`.
pub fn account_infos(accounts: Vec<TestAccount>) -> &'static [AccountInfo<'static>] {
    let infos: Vec<_> = accounts.into_iter().map(TestAccount::into_info).collect();
    Box::leak(infos.into_boxed_slice())
}
