use crate::{
    error::RaffleError,
    program::PerpetualRaffle,
    state::{Config, CONFIG_ACCOUNT_SIZE},
};
use anchor_lang::prelude::*;

/// Instruction to initialize the program configuration
/// This should be called once during program deployment
///
/// # Security Considerations
/// - The caller of this instruction must be the program's upgrade authority,
///   so nobody can front-run deployment and pick the management authority
/// - Creates a PDA with seed "config"
/// - The management authority is set once and is the only account allowed
///   to create raffles and reset wedged rounds
/// - The raffle counter starts at zero and seeds every raffle PDA
pub fn init_config(ctx: Context<InitConfig>) -> Result<()> {
    Config::check_upgrade_authority(
        ctx.accounts.program_data.upgrade_authority_address,
        &ctx.accounts.upgrade_authority.key(),
    )?;

    ctx.accounts.config.management_authority = ctx.accounts.management_authority.key();
    ctx.accounts.config.bump = ctx.bumps.config;
    ctx.accounts.config.raffle_counter = 0;
    Ok(())
}

#[derive(Accounts)]
pub struct InitConfig<'info> {
    #[account(
        init,
        payer = upgrade_authority,
        space = CONFIG_ACCOUNT_SIZE,
        seeds = [b"config"],
        bump
    )]
    pub config: Account<'info, Config>,

    #[account(mut)]
    pub upgrade_authority: Signer<'info>,
    pub management_authority: SystemAccount<'info>,

    #[account(
        constraint = program.programdata_address()? == Some(program_data.key()) @ RaffleError::NotUpgradeAuthority
    )]
    pub program: Program<'info, PerpetualRaffle>,
    pub program_data: Account<'info, ProgramData>,

    pub system_program: Program<'info, System>,
}
