use anchor_lang::error_code;

#[error_code]
pub enum RaffleError {
    Overflow,
    #[msg("Payment is below the raffle entrance fee")]
    InsufficientPayment,
    #[msg("Raffle is not open for entries")]
    RaffleNotOpen,
    #[msg("Upkeep is not needed")]
    UpkeepNotNeeded,
    #[msg("Prize transfer to the winner failed")]
    TransferFailed,
    #[msg("Only the registered randomness coordinator may deliver random words")]
    UnauthorizedCallback,
    #[msg("Request id does not match the pending randomness request")]
    RequestNotPending,
    #[msg("Randomness response carried no random words")]
    NoRandomWords,
    #[msg("Raffle has no room for more entries this round")]
    RaffleFull,
    #[msg("Winner account does not match the selected entrant")]
    WinnerAccountMismatch,
    #[msg("Raffle is not waiting on randomness")]
    RaffleNotCalculating,
    #[msg("Pending randomness request is not old enough to be reset")]
    RequestNotStale,
    #[msg("Only the program management authority can manage raffles")]
    NotProgramManagementAuthority,
    #[msg("Entrance fee is outside the allowed range")]
    InvalidEntranceFee,
    #[msg("Interval is outside the allowed range")]
    InvalidInterval,
    #[msg("Randomness configuration is invalid")]
    InvalidRandomnessConfig,
    #[msg("Vault does not belong to this raffle")]
    InvalidVault,
    #[msg("Request account is not the PDA for the next request id")]
    RequestAccountMismatch,
    #[msg("Request account already exists")]
    RequestAlreadyExists,
    #[msg("Rent refund must go to the keeper that paid for the request")]
    InvalidRequestPayer,
    #[msg("Only the program upgrade authority can initialize the config")]
    NotUpgradeAuthority,
}
