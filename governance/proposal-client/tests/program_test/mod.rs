use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use async_trait::async_trait;
use solana_sdk::{hash::Hash, pubkey::Pubkey};
use spl_governance_proposal_client::{
    client::{AccountFilter, ChainStateClient, ChainStateResult},
    config::ProposalClientConfig,
    service::GovernanceProposalClient,
    state::{enums::ProposalState, proposal::ProposalRecord},
};

pub mod cookies;
use self::cookies::{ProposalCookie, RealmCookie};

pub mod tools;
use self::tools::{serialize_proposal, PROPOSAL_V2_DISCRIMINATOR};

/// In-memory chain state
#[derive(Default)]
pub struct MockChainState {
    accounts: Mutex<BTreeMap<Pubkey, Vec<u8>>>,
    blockhash: Hash,
    fail_requests: AtomicBool,
    unhealthy: AtomicBool,
    response_delay: Mutex<Option<Duration>>,
    request_count: AtomicUsize,
    program_account_filters: Mutex<Vec<AccountFilter>>,
}

impl MockChainState {
    pub fn new(blockhash: Hash) -> Self {
        Self {
            blockhash,
            ..Self::default()
        }
    }

    pub fn set_account(&self, address: Pubkey, data: Vec<u8>) {
        self.accounts.lock().unwrap().insert(address, data);
    }

    pub fn fail_requests(&self) {
        self.fail_requests.store(true, Ordering::SeqCst);
    }

    pub fn report_unhealthy(&self) {
        self.unhealthy.store(true, Ordering::SeqCst);
    }

    pub fn delay_responses(&self, delay: Duration) {
        *self.response_delay.lock().unwrap() = Some(delay);
    }

    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    pub fn program_account_filters(&self) -> Vec<AccountFilter> {
        self.program_account_filters.lock().unwrap().clone()
    }

    async fn begin_request(&self) -> ChainStateResult<()> {
        self.request_count.fetch_add(1, Ordering::SeqCst);

        let delay = *self.response_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail_requests.load(Ordering::SeqCst) {
            return Err("connection refused".into());
        }
        Ok(())
    }
}

fn matches_filter(data: &[u8], filter: &AccountFilter) -> bool {
    match filter {
        AccountFilter::Memcmp { offset, bytes } => data
            .get(*offset..offset + bytes.len())
            .map_or(false, |window| window == bytes.as_slice()),
        AccountFilter::DataSize(size) => data.len() as u64 == *size,
    }
}

#[async_trait]
impl ChainStateClient for MockChainState {
    async fn get_account_data(&self, address: &Pubkey) -> ChainStateResult<Option<Vec<u8>>> {
        self.begin_request().await?;
        Ok(self.accounts.lock().unwrap().get(address).cloned())
    }

    async fn get_latest_blockhash(&self) -> ChainStateResult<Hash> {
        self.begin_request().await?;
        Ok(self.blockhash)
    }

    async fn get_health(&self) -> ChainStateResult<bool> {
        self.begin_request().await?;
        Ok(!self.unhealthy.load(Ordering::SeqCst))
    }

    async fn get_program_accounts(
        &self,
        _program_id: &Pubkey,
        filters: Vec<AccountFilter>,
    ) -> ChainStateResult<Vec<(Pubkey, Vec<u8>)>> {
        self.begin_request().await?;
        self.program_account_filters
            .lock()
            .unwrap()
            .extend(filters.iter().cloned());

        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, data)| filters.iter().all(|filter| matches_filter(data, filter)))
            .map(|(address, data)| (*address, data.clone()))
            .collect())
    }
}

pub struct ProposalClientTest {
    pub chain: Arc<MockChainState>,
    pub client: GovernanceProposalClient,
    pub blockhash: Hash,
    next_draft_at: AtomicUsize,
}

impl ProposalClientTest {
    pub fn start_new() -> Self {
        Self::start_with_config(ProposalClientConfig::default())
    }

    pub fn start_with_config(config: ProposalClientConfig) -> Self {
        let blockhash = Hash::new_unique();
        let chain = Arc::new(MockChainState::new(blockhash));
        let client = GovernanceProposalClient::new(chain.clone(), config);

        Self {
            chain,
            client,
            blockhash,
            next_draft_at: AtomicUsize::new(1_700_000_000),
        }
    }

    pub fn with_realm(&self) -> RealmCookie {
        RealmCookie {
            address: Pubkey::new_unique(),
        }
    }

    pub fn with_proposal(&self, realm_cookie: &RealmCookie) -> ProposalCookie {
        self.with_proposal_in_state(realm_cookie, ProposalState::Voting)
    }

    pub fn with_proposal_in_state(
        &self,
        realm_cookie: &RealmCookie,
        state: ProposalState,
    ) -> ProposalCookie {
        let draft_at = self.next_draft_at.fetch_add(3600, Ordering::SeqCst) as u64;

        let account = ProposalRecord {
            account_type: 5,
            governing_token_mint: Pubkey::new_unique(),
            realm: realm_cookie.address,
            governance: Pubkey::new_unique(),
            proposal_owner: Pubkey::new_unique(),
            proposal_seed: Pubkey::new_unique(),
            name: format!("Proposal #{}", draft_at),
            description_link: "https://forum.example.org/t/proposal".to_string(),
            state,
            draft_at,
            signing_off_at: Some(draft_at + 60),
            voting_at: Some(draft_at + 120),
        };

        self.with_proposal_account(account)
    }

    pub fn with_proposal_account(&self, account: ProposalRecord) -> ProposalCookie {
        let address = Pubkey::new_unique();
        let data = serialize_proposal(PROPOSAL_V2_DISCRIMINATOR, &account);
        self.chain.set_account(address, data.clone());

        ProposalCookie {
            address,
            account,
            data,
        }
    }

    pub fn with_account_data(&self, data: Vec<u8>) -> Pubkey {
        let address = Pubkey::new_unique();
        self.chain.set_account(address, data);
        address
    }
}
