use anchor_lang::prelude::*;

use crate::{
    error::RaffleError,
    state::{Raffle, Vault},
};

/// Event emitted for every accepted entry
#[event]
pub struct RaffleEntered {
    pub raffle: Pubkey,
    pub player: Pubkey,
    /// Lamports paid for this entry
    pub amount: u64,
}

/// Instruction to enter the current round
///
/// # Arguments
/// * `ctx` - The context object containing all required accounts
/// * `amount` - Lamports to pay, at least the raffle's entrance fee
///
/// # Security Considerations
/// 1. Rejects underpayment with `InsufficientPayment`
/// 2. Rejects entries while a draw is in flight with `RaffleNotOpen`
/// 3. Vault must be the one recorded on the raffle
///
/// # Implementation Notes
/// - Updates raffle state before performing the transfer
/// - Verifies the vault balance grew by exactly `amount`
pub fn enter_raffle(ctx: Context<EnterRaffle>, amount: u64) -> Result<()> {
    let player = ctx.accounts.player.key();
    ctx.accounts.raffle.enter(player, amount)?;

    let pre_transfer_balance = ctx.accounts.vault.to_account_info().lamports();

    anchor_lang::solana_program::program::invoke(
        &anchor_lang::solana_program::system_instruction::transfer(
            &player,
            &ctx.accounts.vault.key(),
            amount,
        ),
        &[
            ctx.accounts.player.to_account_info(),
            ctx.accounts.system_program.to_account_info(),
            ctx.accounts.vault.to_account_info(),
        ],
    )?;

    let post_transfer_balance = ctx.accounts.vault.to_account_info().lamports();
    require!(
        post_transfer_balance
            == pre_transfer_balance
                .checked_add(amount)
                .ok_or(RaffleError::Overflow)?,
        RaffleError::TransferFailed
    );

    emit!(RaffleEntered {
        raffle: ctx.accounts.raffle.key(),
        player,
        amount,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct EnterRaffle<'info> {
    #[account(
        mut,
        has_one = vault @ RaffleError::InvalidVault,
    )]
    pub raffle: Account<'info, Raffle>,

    #[account(
        mut,
        seeds = [
            b"vault",
            raffle.key().as_ref(),
        ],
        bump = vault.bump,
    )]
    pub vault: Account<'info, Vault>,

    #[account(mut)]
    pub player: Signer<'info>,

    pub system_program: Program<'info, System>,
}
