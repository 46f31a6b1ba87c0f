use anchor_lang::prelude::*;

use crate::error::RaffleError;

/// Moves the pot to the round winner. Settlement only mutates the raffle
/// after this has succeeded.
pub trait PrizeTransfer {
    fn transfer_prize(&mut self, winner: &Pubkey, amount: u64) -> Result<()>;
}

/// Pays out of the raffle vault PDA into the account supplied by the
/// fulfilling coordinator.
pub struct VaultPayout<'a, 'info> {
    pub vault: &'a AccountInfo<'info>,
    pub winner: &'a AccountInfo<'info>,
}

impl PrizeTransfer for VaultPayout<'_, '_> {
    fn transfer_prize(&mut self, winner: &Pubkey, amount: u64) -> Result<()> {
        require_keys_eq!(
            *self.winner.key,
            *winner,
            RaffleError::WinnerAccountMismatch
        );
        require!(self.winner.is_writable, RaffleError::TransferFailed);

        let pre_transfer_balance = self.winner.lamports();

        // Direct lamport moves only work because the vault is a PDA owned by this program
        self.vault
            .sub_lamports(amount)
            .map_err(|_| error!(RaffleError::TransferFailed))?;
        self.winner
            .add_lamports(amount)
            .map_err(|_| error!(RaffleError::TransferFailed))?;

        let post_transfer_balance = self.winner.lamports();
        require!(
            post_transfer_balance
                == pre_transfer_balance
                    .checked_add(amount)
                    .ok_or(RaffleError::Overflow)?,
            RaffleError::TransferFailed
        );

        Ok(())
    }
}
