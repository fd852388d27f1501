use spl_governance_proposal_client::state::{enums::ProposalState, proposal::ProposalRecord};

pub const PROPOSAL_V2_DISCRIMINATOR: [u8; 8] = [0, 0, 0, 0, 0, 0, 0, 1];

fn write_string(data: &mut Vec<u8>, value: &str) {
    data.extend_from_slice(&(value.len() as u32).to_le_bytes());
    data.extend_from_slice(value.as_bytes());
}

/// Serializes the record the way the Governance program lays out a proposal account
pub fn serialize_proposal(discriminator: [u8; 8], record: &ProposalRecord) -> Vec<u8> {
    let mut data = discriminator.to_vec();
    data.push(record.account_type);
    for key in [
        &record.governing_token_mint,
        &record.realm,
        &record.governance,
        &record.proposal_owner,
        &record.proposal_seed,
    ] {
        data.extend_from_slice(key.as_ref());
    }
    write_string(&mut data, &record.name);
    write_string(&mut data, &record.description_link);
    data.push(state_byte(record.state));
    data.extend_from_slice(&record.draft_at.to_le_bytes());
    for timestamp in [record.signing_off_at, record.voting_at].into_iter().flatten() {
        data.extend_from_slice(&timestamp.to_le_bytes());
    }
    data
}

pub fn state_byte(state: ProposalState) -> u8 {
    state as u8
}
