//! Error types

use {
    solana_sdk::pubkey::{ParsePubkeyError, Pubkey},
    std::time::Duration,
    thiserror::Error,
};

/// Error reported by a chain-state provider
pub type ChainStateError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that may be returned by the Governance proposal client.
#[derive(Debug, Error)]
pub enum ProposalClientError {
    /// Account data is shorter than the leading discriminator
    #[error("Account data too short: {len} bytes")]
    AccountDataTooShort {
        /// Length of the data that was received
        len: usize,
    },

    /// A field read would run past the end of the account data
    #[error(
        "Unexpected end of account data at offset {offset}: needed {needed} bytes, {remaining} remaining"
    )]
    UnexpectedEndOfData {
        /// Offset of the read that failed
        offset: usize,
        /// Number of bytes the read required
        needed: usize,
        /// Number of bytes left in the buffer
        remaining: usize,
    },

    /// Leading account discriminator doesn't match the expected value
    #[error("Account discriminator mismatch: expected {expected:?}, found {actual:?}")]
    DiscriminatorMismatch {
        /// Discriminator the caller expected
        expected: [u8; 8],
        /// Discriminator found in the account data
        actual: [u8; 8],
    },

    /// Vote choice is neither `approve` nor `deny`
    #[error("Invalid vote choice `{0}`, expected `approve` or `deny`")]
    InvalidVoteChoice(String),

    /// Address can't be parsed as an account identifier
    #[error("Invalid address `{address}`: {source}")]
    InvalidAddress {
        /// The rejected input
        address: String,
        /// Parser failure
        #[source]
        source: ParsePubkeyError,
    },

    /// Instruction data doesn't encode a known vote instruction
    #[error("Invalid vote instruction data")]
    InvalidInstructionData,

    /// Account doesn't exist on chain
    #[error("Account {0} not found")]
    AccountNotFound(Pubkey),

    /// Chain-state provider couldn't supply a recent blockhash
    #[error("Recent blockhash unavailable: {0}")]
    BlockhashUnavailable(Box<ProposalClientError>),

    /// Chain-state provider failed
    #[error("Chain state error: {0}")]
    ChainState(ChainStateError),

    /// Chain-state request didn't complete in time
    #[error("Chain state request timed out after {0:?}")]
    Timeout(Duration),

    /// Transaction couldn't be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),
}

impl ProposalClientError {
    /// Returns true for failures caused by the caller's input. These are the only
    /// failures surfaced to the caller instead of being masked with substitute data
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ProposalClientError::InvalidVoteChoice(_)
                | ProposalClientError::InvalidAddress { .. }
                | ProposalClientError::BlockhashUnavailable(_)
        )
    }
}
