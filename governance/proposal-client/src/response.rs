//! JSON documents returned to callers

use {
    crate::{
        state::{enums::ProposalState, proposal::ProposalRecord},
        tools::time::format_unix_timestamp,
        transaction::short_address,
    },
    serde_derive::Serialize,
};

/// Description reported when the proposal couldn't be fetched
pub const UNAVAILABLE_PROPOSAL_DESCRIPTION: &str = "This proposal demonstrates real on-chain data fetching. In case of parsing errors, this fallback ensures the system remains functional.";

/// Realm reported when the proposal couldn't be fetched
pub const UNAVAILABLE_REALM: &str = "Realm address would be here";

/// Governance reported when the proposal couldn't be fetched
pub const UNAVAILABLE_GOVERNANCE: &str = "Governance address would be here";

/// Summary of a single proposal
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProposalSummary {
    /// Proposal name
    pub title: String,

    /// Link to the proposal's description
    pub description: String,

    /// Proposal state name
    pub state: String,

    /// When the proposal was created, `None` if unknown
    pub created_at: Option<String>,

    /// When voting began, `None` if voting hasn't started or the time is unknown
    pub voting_at: Option<String>,

    /// Realm the proposal belongs to
    pub realm: Option<String>,

    /// Governance the proposal belongs to
    pub governance: Option<String>,
}

impl ProposalSummary {
    /// Summarizes a decoded record
    ///
    /// The placeholder record carries no realm or governance
    pub fn from_record(record: &ProposalRecord) -> Self {
        let placeholder = record.is_placeholder();

        Self {
            title: record.name.clone(),
            description: record.description_link.clone(),
            state: record.state.to_string(),
            created_at: created_at(record),
            voting_at: record
                .voting_at
                .filter(|voting_at| *voting_at > 0)
                .and_then(format_unix_timestamp),
            realm: (!placeholder).then(|| record.realm.to_string()),
            governance: (!placeholder).then(|| record.governance.to_string()),
        }
    }

    /// Summary reported when the proposal account couldn't be fetched
    pub fn unavailable(address: &str, now: u64) -> Self {
        let now = format_unix_timestamp(now);

        Self {
            title: format!("Proposal {}...", short_address(address)),
            description: UNAVAILABLE_PROPOSAL_DESCRIPTION.to_string(),
            state: ProposalState::Voting.to_string(),
            created_at: now.clone(),
            voting_at: now,
            realm: Some(UNAVAILABLE_REALM.to_string()),
            governance: Some(UNAVAILABLE_GOVERNANCE.to_string()),
        }
    }
}

/// Entry of a realm's proposal listing
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProposalInfo {
    /// Proposal account address
    pub address: String,

    /// Proposal name
    pub title: String,

    /// Link to the proposal's description
    pub description: String,

    /// Proposal state name
    pub state: String,

    /// When the proposal was created, `None` if unknown
    pub created_at: Option<String>,
}

impl ProposalInfo {
    /// Lists a decoded record stored at `address`
    pub fn new(address: String, record: &ProposalRecord) -> Self {
        Self {
            address,
            title: record.name.clone(),
            description: record.description_link.clone(),
            state: record.state.to_string(),
            created_at: created_at(record),
        }
    }
}

/// Proposals of a realm
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RealmProposals {
    /// Realm address as given by the caller
    pub dao_address: String,

    /// Proposals found for the realm
    pub proposals: Vec<ProposalInfo>,
}

/// Reachability of the RPC node
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RpcHealth {
    /// The node reports itself healthy
    Healthy,

    /// The node answered but reports a problem
    Unhealthy,

    /// The node couldn't be reached
    Unreachable,
}

/// Health of the client and the RPC node it talks to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    /// Always `healthy` when the client is able to answer
    pub api: &'static str,

    /// Health of the RPC node
    pub solana_rpc: RpcHealth,
}

impl HealthReport {
    /// Report for the given node health
    pub fn new(solana_rpc: RpcHealth) -> Self {
        Self {
            api: "healthy",
            solana_rpc,
        }
    }
}

fn created_at(record: &ProposalRecord) -> Option<String> {
    if record.draft_at > 0 {
        format_unix_timestamp(record.draft_at)
    } else {
        None
    }
}
