use anchor_lang::prelude::*;

use crate::error::RaffleError;

// 8 discriminator + 32 management_authority + 1 bump + 8 raffle_counter
pub const CONFIG_ACCOUNT_SIZE: usize = 8 + 32 + 1 + 8;

#[account]
pub struct Config {
    pub management_authority: Pubkey,
    pub bump: u8,
    pub raffle_counter: u64,
}

impl Config {
    /// Only the upgrade authority recorded in the program's ProgramData may
    /// initialize the config. A frozen program has none, so nobody can.
    pub fn check_upgrade_authority(
        upgrade_authority: Option<Pubkey>,
        signer: &Pubkey,
    ) -> Result<()> {
        require!(
            upgrade_authority == Some(*signer),
            RaffleError::NotUpgradeAuthority
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::assert_raffle_error;

    #[test]
    fn upgrade_authority_may_initialize() {
        let authority = Pubkey::new_unique();
        assert!(Config::check_upgrade_authority(Some(authority), &authority).is_ok());
    }

    #[test]
    fn anyone_else_is_refused() {
        assert_raffle_error(
            Config::check_upgrade_authority(Some(Pubkey::new_unique()), &Pubkey::new_unique()),
            RaffleError::NotUpgradeAuthority,
        );
    }

    #[test]
    fn frozen_program_cannot_be_initialized() {
        assert_raffle_error(
            Config::check_upgrade_authority(None, &Pubkey::new_unique()),
            RaffleError::NotUpgradeAuthority,
        );
    }
}
