use anchor_lang::prelude::*;

// 8 discriminator, 32 pubkey, 1 bump
pub const VAULT_ACCOUNT_SIZE: usize = 8 + 32 + 1;

/// Program owned PDA holding the pot of a raffle. Anything above its rent
/// exempt minimum belongs to the current round.
#[account]
pub struct Vault {
    pub raffle: Pubkey,
    pub bump: u8,
}
