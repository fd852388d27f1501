//! Client configuration

use {
    crate::state::proposal::DiscriminatorCheck,
    solana_sdk::pubkey::Pubkey,
    std::time::Duration,
};

/// Default limit on a single chain-state request
pub const DEFAULT_RPC_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings of a `GovernanceProposalClient`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProposalClientConfig {
    /// Governance program owning the proposals
    pub program_id: Pubkey,

    /// Validation applied to the leading account discriminator
    pub discriminator_check: DiscriminatorCheck,

    /// Limit on a single chain-state request
    pub rpc_timeout: Duration,
}

impl Default for ProposalClientConfig {
    fn default() -> Self {
        Self {
            program_id: crate::id(),
            discriminator_check: DiscriminatorCheck::default(),
            rpc_timeout: DEFAULT_RPC_TIMEOUT,
        }
    }
}

impl ProposalClientConfig {
    /// Sets the Governance program id
    pub fn with_program_id(mut self, program_id: Pubkey) -> Self {
        self.program_id = program_id;
        self
    }

    /// Sets the discriminator validation
    pub fn with_discriminator_check(mut self, discriminator_check: DiscriminatorCheck) -> Self {
        self.discriminator_check = discriminator_check;
        self
    }

    /// Sets the chain-state request limit
    pub fn with_rpc_timeout(mut self, rpc_timeout: Duration) -> Self {
        self.rpc_timeout = rpc_timeout;
        self
    }
}
