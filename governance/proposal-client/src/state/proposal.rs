//! Proposal Account

use {
    crate::{
        error::ProposalClientError,
        outcome::Outcome,
        state::enums::ProposalState,
        tools::{reader::AccountDataReader, time::unix_timestamp_now},
    },
    log::warn,
    solana_sdk::pubkey::{Pubkey, PUBKEY_BYTES},
};

/// Length of the leading account discriminator
pub const ACCOUNT_DISCRIMINATOR_LEN: usize = 8;

/// Offset of the realm key in the proposal account data
/// The discriminator, the account type byte and the governing token mint precede it
pub const REALM_OFFSET: usize = ACCOUNT_DISCRIMINATOR_LEN + 1 + PUBKEY_BYTES;

/// Name reported when the proposal account couldn't be decoded
pub const PLACEHOLDER_PROPOSAL_NAME: &str = "Parsed Proposal";

/// Description link reported when the proposal account couldn't be decoded
pub const PLACEHOLDER_DESCRIPTION_LINK: &str = "https://example.com/proposal";

/// How the leading account discriminator is treated
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DiscriminatorCheck {
    /// Any 8 bytes are accepted
    #[default]
    Lenient,

    /// The discriminator must match the given bytes
    Expect([u8; ACCOUNT_DISCRIMINATOR_LEN]),
}

/// Decoded view of a governance Proposal account
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProposalRecord {
    /// Governance account type
    pub account_type: u8,

    /// The mint of the governing token used to vote on the proposal
    pub governing_token_mint: Pubkey,

    /// Realm the proposal belongs to
    pub realm: Pubkey,

    /// Governance account the Proposal belongs to
    pub governance: Pubkey,

    /// The owner of the proposal
    pub proposal_owner: Pubkey,

    /// Seed used to derive the proposal address
    pub proposal_seed: Pubkey,

    /// Proposal name
    pub name: String,

    /// Link to proposal's description
    pub description_link: String,

    /// Current proposal state
    pub state: ProposalState,

    /// When the Proposal was created and entered Draft state
    pub draft_at: u64,

    /// When Signatories started signing off the Proposal
    pub signing_off_at: Option<u64>,

    /// When the Proposal began voting
    pub voting_at: Option<u64>,
}

impl ProposalRecord {
    /// Decodes the account data, failing on the first read that overruns the buffer
    pub fn try_decode(
        data: &[u8],
        discriminator_check: DiscriminatorCheck,
    ) -> Result<Self, ProposalClientError> {
        if data.len() < ACCOUNT_DISCRIMINATOR_LEN {
            return Err(ProposalClientError::AccountDataTooShort { len: data.len() });
        }

        let mut reader = AccountDataReader::new(data);
        let discriminator = reader.read_array::<ACCOUNT_DISCRIMINATOR_LEN>()?;
        if let DiscriminatorCheck::Expect(expected) = discriminator_check {
            if discriminator != expected {
                return Err(ProposalClientError::DiscriminatorMismatch {
                    expected,
                    actual: discriminator,
                });
            }
        }

        let account_type = reader.read_u8()?;
        let governing_token_mint = reader.read_pubkey()?;
        let realm = reader.read_pubkey()?;
        let governance = reader.read_pubkey()?;
        let proposal_owner = reader.read_pubkey()?;
        let proposal_seed = reader.read_pubkey()?;
        let name = reader.read_string()?;
        let description_link = reader.read_string()?;
        let state = ProposalState::from_byte(reader.read_u8()?);

        // Timestamps are only present in accounts long enough to hold them
        let draft_at = reader.read_optional_u64().unwrap_or_default();
        let signing_off_at = reader.read_optional_u64();
        let voting_at = reader.read_optional_u64();

        Ok(Self {
            account_type,
            governing_token_mint,
            realm,
            governance,
            proposal_owner,
            proposal_seed,
            name,
            description_link,
            state,
            draft_at,
            signing_off_at,
            voting_at,
        })
    }

    /// Substitute record used when the account data can't be decoded
    pub fn placeholder(now: u64) -> Self {
        Self {
            account_type: 0,
            governing_token_mint: Pubkey::default(),
            realm: Pubkey::default(),
            governance: Pubkey::default(),
            proposal_owner: Pubkey::default(),
            proposal_seed: Pubkey::default(),
            name: PLACEHOLDER_PROPOSAL_NAME.to_string(),
            description_link: PLACEHOLDER_DESCRIPTION_LINK.to_string(),
            state: ProposalState::Voting,
            draft_at: now,
            signing_off_at: None,
            voting_at: Some(now),
        }
    }

    /// Returns true for the substitute record
    pub fn is_placeholder(&self) -> bool {
        self.realm == Pubkey::default()
            && self.governance == Pubkey::default()
            && self.name == PLACEHOLDER_PROPOSAL_NAME
    }
}

/// Decodes a Proposal account
///
/// Never fails: structural problems with the data yield the placeholder record
/// tagged as a fallback together with the reason
pub fn decode_proposal(
    data: &[u8],
    discriminator_check: DiscriminatorCheck,
) -> Outcome<ProposalRecord> {
    match ProposalRecord::try_decode(data, discriminator_check) {
        Ok(record) => Outcome::Decoded(record),
        Err(reason) => {
            warn!("Failed to parse proposal account data: {}", reason);
            Outcome::FallbackUsed {
                value: ProposalRecord::placeholder(unix_timestamp_now()),
                reason,
            }
        }
    }
}
