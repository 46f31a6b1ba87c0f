use std::num::NonZeroU64;

use anchor_lang::{
    prelude::*,
    solana_program::{program::invoke_signed, system_instruction},
};
use arrayref::array_refs;

use crate::{
    error::RaffleError,
    state::{RandomnessRequest, RequestStatus, REQUEST_ACCOUNT_SIZE},
};

/// A single 256-bit random value, big-endian.
pub type RandomWord = [u8; 32];

pub const MIN_REQUEST_CONFIRMATIONS: u16 = 3;
pub const MAX_REQUEST_CONFIRMATIONS: u16 = 200;
pub const MAX_NUM_WORDS: u32 = 500;

// 32 coordinator + 32 key_hash + 8 subscription_id + 2 request_confirmations
// + 4 callback_gas_limit + 4 num_words + 1 native_payment
pub const RANDOMNESS_CONFIG_SIZE: usize = 32 + 32 + 8 + 2 + 4 + 4 + 1;

/// Parameters sent to the randomness coordinator with every request.
/// Fixed when the raffle is created.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct RandomnessConfig {
    /// The only signer allowed to deliver random words back to the raffle
    pub coordinator: Pubkey,
    /// Gas lane / key identifying which oracle key answers the request
    pub key_hash: [u8; 32],
    pub subscription_id: u64,
    pub request_confirmations: u16,
    pub callback_gas_limit: u32,
    pub num_words: u32,
    /// Pay the coordinator in native SOL instead of its token
    pub native_payment: bool,
}

impl RandomnessConfig {
    pub fn validate(&self) -> Result<()> {
        require!(
            self.coordinator != Pubkey::default(),
            RaffleError::InvalidRandomnessConfig
        );
        require!(
            (MIN_REQUEST_CONFIRMATIONS..=MAX_REQUEST_CONFIRMATIONS)
                .contains(&self.request_confirmations),
            RaffleError::InvalidRandomnessConfig
        );
        require!(
            self.callback_gas_limit > 0,
            RaffleError::InvalidRandomnessConfig
        );
        require!(
            self.num_words > 0 && self.num_words <= MAX_NUM_WORDS,
            RaffleError::InvalidRandomnessConfig
        );
        Ok(())
    }
}

/// Outbound half of the randomness protocol. An implementation records the
/// request where the coordinator can see it and hands back the identifier
/// the coordinator will echo when it answers. The answer arrives later as a
/// separate `fulfill_random_words` call.
pub trait RandomnessProvider {
    fn request_random_words(&mut self, config: &RandomnessConfig) -> Result<u64>;
}

/// Event emitted when a randomness request is registered for the coordinator
#[event]
pub struct RandomWordsRequested {
    pub raffle: Pubkey,
    pub request_id: u64,
    pub key_hash: [u8; 32],
    pub subscription_id: u64,
    pub request_confirmations: u16,
    pub callback_gas_limit: u32,
    pub num_words: u32,
    pub native_payment: bool,
}

/// On-chain provider: every request is written into its own PDA keyed by
/// `(raffle, request_id)`, which is the table the coordinator watches and the
/// record `fulfill_random_words` correlates against.
///
/// The PDA is created here rather than by account validation, so the upkeep
/// re-check runs first. A keeper that lost the race still holds the address
/// for the previous id and is turned away with `UpkeepNotNeeded`.
pub struct RequestTable<'a, 'info> {
    pub program_id: &'a Pubkey,
    pub raffle: Pubkey,
    pub request_id: u64,
    pub now: i64,
    pub request: &'a AccountInfo<'info>,
    /// Keeper funding the request account
    pub payer: &'a AccountInfo<'info>,
    pub system_program: &'a AccountInfo<'info>,
}

impl RequestTable<'_, '_> {
    pub fn address(program_id: &Pubkey, raffle: &Pubkey, request_id: u64) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[b"request", raffle.as_ref(), &request_id.to_le_bytes()],
            program_id,
        )
    }

    fn create_account(&self, bump: u8) -> Result<()> {
        let lamports = Rent::get()?.minimum_balance(REQUEST_ACCOUNT_SIZE);
        let ix = system_instruction::create_account(
            self.payer.key,
            self.request.key,
            lamports,
            REQUEST_ACCOUNT_SIZE as u64,
            self.program_id,
        );

        let request_id = self.request_id.to_le_bytes();
        let signer: &[&[&[u8]]] = &[&[
            b"request".as_ref(),
            self.raffle.as_ref(),
            &request_id,
            &[bump],
        ]];

        invoke_signed(
            &ix,
            &[
                self.payer.clone(),
                self.request.clone(),
                self.system_program.clone(),
            ],
            signer,
        )?;

        Ok(())
    }
}

/// Writes `record` with its discriminator into a freshly created request account.
pub fn write_request(request: &AccountInfo, record: &RandomnessRequest) -> Result<()> {
    let mut data = request.try_borrow_mut_data()?;
    let mut writer = std::io::Cursor::new(&mut data[..]);
    record.try_serialize(&mut writer)
}

impl RandomnessProvider for RequestTable<'_, '_> {
    fn request_random_words(&mut self, config: &RandomnessConfig) -> Result<u64> {
        let (expected, bump) = Self::address(self.program_id, &self.raffle, self.request_id);
        require_keys_eq!(
            expected,
            *self.request.key,
            RaffleError::RequestAccountMismatch
        );
        require!(
            self.request.lamports() == 0,
            RaffleError::RequestAlreadyExists
        );

        self.create_account(bump)?;
        write_request(
            self.request,
            &RandomnessRequest {
                raffle: self.raffle,
                request_id: self.request_id,
                params: config.clone(),
                requested_at: self.now,
                payer: *self.payer.key,
                status: RequestStatus::Pending,
                bump,
            },
        )?;

        emit!(RandomWordsRequested {
            raffle: self.raffle,
            request_id: self.request_id,
            key_hash: config.key_hash,
            subscription_id: config.subscription_id,
            request_confirmations: config.request_confirmations,
            callback_gas_limit: config.callback_gas_limit,
            num_words: config.num_words,
            native_payment: config.native_payment,
        });

        Ok(self.request_id)
    }
}

/// `word mod entrants`, treating the word as a 256-bit big-endian integer.
pub fn winner_index(word: &RandomWord, entrants: NonZeroU64) -> u64 {
    let (a, b, c, d) = array_refs![word, 8, 8, 8, 8];
    let modulus = u128::from(entrants.get());

    // acc < modulus <= 2^64, so shifting in one more limb always fits in u128
    let rem = [a, b, c, d].iter().fold(0u128, |acc, limb| {
        ((acc << 64) | u128::from(u64::from_be_bytes(**limb))) % modulus
    });

    rem as u64
}
