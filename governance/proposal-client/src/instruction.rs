//! Vote instructions

use {
    crate::error::ProposalClientError,
    solana_sdk::{
        instruction::{AccountMeta, Instruction},
        pubkey::Pubkey,
    },
    std::{fmt, str::FromStr},
};

/// Leading instruction data byte of CastVote
pub const CAST_VOTE_DISCRIMINATOR: u8 = 1;

/// Voter's choice on a proposal
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VoteChoice {
    /// Vote for the proposal
    Approve,

    /// Vote against the proposal
    Deny,
}

impl VoteChoice {
    /// Literal accepted by `from_str`
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteChoice::Approve => "approve",
            VoteChoice::Deny => "deny",
        }
    }

    /// Choice byte carried in the instruction data
    pub fn to_byte(self) -> u8 {
        match self {
            VoteChoice::Approve => 0,
            VoteChoice::Deny => 1,
        }
    }
}

impl FromStr for VoteChoice {
    type Err = ProposalClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "approve" => Ok(VoteChoice::Approve),
            "deny" => Ok(VoteChoice::Deny),
            _ => Err(ProposalClientError::InvalidVoteChoice(s.to_string())),
        }
    }
}

impl fmt::Display for VoteChoice {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Instructions built by the client for the Governance program
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GovernanceVoteInstruction {
    /// Casts a vote on a Proposal
    ///
    ///   0. `[writable]` Proposal account
    ///   1. `[signer]` Voter account, also the fee payer
    CastVote {
        /// The voter's choice
        vote: VoteChoice,
    },
}

impl GovernanceVoteInstruction {
    /// Packs the instruction into its wire data
    pub fn pack(&self) -> Vec<u8> {
        match self {
            GovernanceVoteInstruction::CastVote { vote } => {
                vec![CAST_VOTE_DISCRIMINATOR, vote.to_byte()]
            }
        }
    }

    /// Unpacks wire data produced by `pack`
    pub fn unpack(input: &[u8]) -> Result<Self, ProposalClientError> {
        match input {
            [CAST_VOTE_DISCRIMINATOR, 0] => Ok(GovernanceVoteInstruction::CastVote {
                vote: VoteChoice::Approve,
            }),
            [CAST_VOTE_DISCRIMINATOR, 1] => Ok(GovernanceVoteInstruction::CastVote {
                vote: VoteChoice::Deny,
            }),
            _ => Err(ProposalClientError::InvalidInstructionData),
        }
    }
}

/// Parses an account address, reporting the offending input on failure
pub fn parse_address(address: &str) -> Result<Pubkey, ProposalClientError> {
    Pubkey::from_str(address).map_err(|source| ProposalClientError::InvalidAddress {
        address: address.to_string(),
        source,
    })
}

/// Creates CastVote instruction
///
/// The instruction only carries the proposal and the voter. It doesn't derive the
/// vote record address or reference the voter's token owner record
pub fn cast_vote(
    program_id: &Pubkey,
    // Accounts
    proposal: &Pubkey,
    voter: &Pubkey,
    // Args
    vote: VoteChoice,
) -> Instruction {
    let accounts = vec![
        AccountMeta::new(*proposal, false),
        AccountMeta::new_readonly(*voter, true),
    ];

    let instruction = GovernanceVoteInstruction::CastVote { vote };

    Instruction {
        program_id: *program_id,
        accounts,
        data: instruction.pack(),
    }
}
