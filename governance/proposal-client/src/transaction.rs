//! Unsigned vote transactions

use {
    crate::{
        error::ProposalClientError,
        instruction::{cast_vote, VoteChoice},
    },
    log::debug,
    serde_derive::Serialize,
    solana_sdk::{hash::Hash, message::Message, pubkey::Pubkey, transaction::Transaction},
};

/// Stand-in for the serialized transaction when it couldn't be built
pub const MOCK_UNSIGNED_TRANSACTION: &str = "mock_unsigned_transaction_base64_encoded_fallback";

/// Serialized unsigned transaction ready for client-side signing
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UnsignedVoteTransaction {
    /// Base58 encoded wire transaction
    pub unsigned_transaction: String,

    /// Human readable description of the action
    pub transaction_message: String,
}

/// First 8 characters of an address, used in descriptions
pub(crate) fn short_address(address: &str) -> String {
    address.chars().take(8).collect()
}

/// Builds the unsigned CastVote transaction with the voter as the fee payer
pub fn build_unsigned_vote_transaction(
    program_id: &Pubkey,
    proposal: &Pubkey,
    voter: &Pubkey,
    vote: VoteChoice,
    recent_blockhash: &Hash,
) -> Result<UnsignedVoteTransaction, ProposalClientError> {
    let instruction = cast_vote(program_id, proposal, voter, vote);
    let message = Message::new_with_blockhash(&[instruction], Some(voter), recent_blockhash);
    let transaction = Transaction::new_unsigned(message);

    let wire_transaction = bincode::serialize(&transaction)?;
    debug!(
        "Serialized vote transaction: {} bytes, blockhash {}",
        wire_transaction.len(),
        recent_blockhash
    );

    Ok(UnsignedVoteTransaction {
        unsigned_transaction: bs58::encode(wire_transaction).into_string(),
        transaction_message: format!(
            "Vote {} on proposal {}...",
            vote,
            short_address(&proposal.to_string())
        ),
    })
}

/// Clearly labelled substitute returned when the transaction couldn't be built
pub fn mock_vote_transaction(vote: VoteChoice, proposal_address: &str) -> UnsignedVoteTransaction {
    UnsignedVoteTransaction {
        unsigned_transaction: MOCK_UNSIGNED_TRANSACTION.to_string(),
        transaction_message: format!(
            "Mock vote {} on proposal {}...",
            vote,
            short_address(proposal_address)
        ),
    }
}
