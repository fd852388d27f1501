use solana_sdk::pubkey::Pubkey;
use spl_governance_proposal_client::state::proposal::ProposalRecord;

#[derive(Debug)]
pub struct RealmCookie {
    pub address: Pubkey,
}

#[derive(Debug)]
pub struct ProposalCookie {
    pub address: Pubkey,

    pub account: ProposalRecord,

    pub data: Vec<u8>,
}
