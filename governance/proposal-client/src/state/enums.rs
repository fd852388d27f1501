//! State enumerations

use std::fmt;

/// What state a Proposal is in
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProposalState {
    /// Draft - Proposal enters Draft state when it's created
    Draft,

    /// SigningOff - The Proposal is being signed off by Signatories
    /// Proposal enters the state when first Signatory Sings and leaves it when last Signatory signs
    SigningOff,

    /// Taking votes
    Voting,

    /// Voting ended with success
    Succeeded,

    /// Voting on Proposal succeeded and now instructions are being executed
    /// Proposal enter this state when first instruction is executed and leaves when the last instruction is executed
    Executing,

    /// Completed
    Completed,

    /// Cancelled
    Cancelled,

    /// Defeated
    Defeated,

    /// Same as Executing but indicates some instructions failed to execute
    /// Proposal can't be transitioned from ExecutingWithErrors to Completed state
    ExecutingWithErrors,

    /// The state byte doesn't match any known state
    Unknown,
}

/// Known proposal states indexed by their on-chain byte value
const PROPOSAL_STATES: [ProposalState; 9] = [
    ProposalState::Draft,
    ProposalState::SigningOff,
    ProposalState::Voting,
    ProposalState::Succeeded,
    ProposalState::Executing,
    ProposalState::Completed,
    ProposalState::Cancelled,
    ProposalState::Defeated,
    ProposalState::ExecutingWithErrors,
];

impl ProposalState {
    /// Maps the on-chain state byte to a state, unrecognized values map to Unknown
    pub fn from_byte(value: u8) -> Self {
        PROPOSAL_STATES
            .get(value as usize)
            .copied()
            .unwrap_or(ProposalState::Unknown)
    }

    /// Name of the state as exposed to callers
    pub fn name(&self) -> &'static str {
        match self {
            ProposalState::Draft => "Draft",
            ProposalState::SigningOff => "SigningOff",
            ProposalState::Voting => "Voting",
            ProposalState::Succeeded => "Succeeded",
            ProposalState::Executing => "Executing",
            ProposalState::Completed => "Completed",
            ProposalState::Cancelled => "Cancelled",
            ProposalState::Defeated => "Defeated",
            ProposalState::ExecutingWithErrors => "ExecutingWithErrors",
            ProposalState::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ProposalState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}
