//! Governance proposal client

use {
    crate::{
        client::{AccountFilter, ChainStateClient, ChainStateResult},
        config::ProposalClientConfig,
        error::ProposalClientError,
        instruction::{parse_address, VoteChoice},
        outcome::Outcome,
        response::{HealthReport, ProposalInfo, ProposalSummary, RpcHealth},
        state::proposal::{decode_proposal, DiscriminatorCheck, ProposalRecord, REALM_OFFSET},
        tools::time::unix_timestamp_now,
        transaction::{
            build_unsigned_vote_transaction, mock_vote_transaction, UnsignedVoteTransaction,
        },
    },
    log::{info, warn},
    std::{fmt, future::Future, str::FromStr, sync::Arc},
};

/// Reads Governance proposals and prepares votes on them
///
/// Every operation makes at most one chain-state request, bounded by the
/// configured timeout
#[derive(Clone)]
pub struct GovernanceProposalClient {
    chain: Arc<dyn ChainStateClient>,
    config: ProposalClientConfig,
}

impl fmt::Debug for GovernanceProposalClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GovernanceProposalClient")
            .field("config", &self.config)
            .finish()
    }
}

impl GovernanceProposalClient {
    /// Creates a client reading chain state through `chain`
    pub fn new(chain: Arc<dyn ChainStateClient>, config: ProposalClientConfig) -> Self {
        Self { chain, config }
    }

    /// Client configuration
    pub fn config(&self) -> &ProposalClientConfig {
        &self.config
    }

    async fn with_timeout<T, F>(&self, request: F) -> Result<T, ProposalClientError>
    where
        F: Future<Output = ChainStateResult<T>>,
    {
        match tokio::time::timeout(self.config.rpc_timeout, request).await {
            Ok(result) => result.map_err(ProposalClientError::ChainState),
            Err(_) => Err(ProposalClientError::Timeout(self.config.rpc_timeout)),
        }
    }

    /// Fetches and summarizes the proposal stored at `proposal_address`
    ///
    /// Only an invalid address is rejected. A missing account or an unreachable
    /// node yields the unavailable summary, undecodable data the placeholder one
    pub async fn fetch_proposal_data(&self, proposal_address: &str) -> Outcome<ProposalSummary> {
        info!("Fetching proposal {}", proposal_address);

        let proposal = match parse_address(proposal_address) {
            Ok(proposal) => proposal,
            Err(err) => return Outcome::Rejected(err),
        };

        let data = match self
            .with_timeout(self.chain.get_account_data(&proposal))
            .await
            .and_then(|data| data.ok_or(ProposalClientError::AccountNotFound(proposal)))
        {
            Ok(data) => data,
            Err(reason) => {
                warn!(
                    "Error fetching proposal data for {}: {}",
                    proposal_address, reason
                );
                return Outcome::FallbackUsed {
                    value: ProposalSummary::unavailable(proposal_address, unix_timestamp_now()),
                    reason,
                };
            }
        };

        decode_proposal(&data, self.config.discriminator_check)
            .map(|record| ProposalSummary::from_record(&record))
    }

    /// Prepares an unsigned CastVote transaction for the voter to sign
    ///
    /// The vote choice and both addresses are validated before any chain-state
    /// request is made
    pub async fn prepare_vote_transaction(
        &self,
        proposal_address: &str,
        voter_address: &str,
        vote_choice: &str,
    ) -> Outcome<UnsignedVoteTransaction> {
        info!(
            "Preparing {} vote on proposal {} for {}",
            vote_choice, proposal_address, voter_address
        );

        let vote = match VoteChoice::from_str(vote_choice) {
            Ok(vote) => vote,
            Err(err) => return Outcome::Rejected(err),
        };
        let proposal = match parse_address(proposal_address) {
            Ok(proposal) => proposal,
            Err(err) => return Outcome::Rejected(err),
        };
        let voter = match parse_address(voter_address) {
            Ok(voter) => voter,
            Err(err) => return Outcome::Rejected(err),
        };

        let recent_blockhash = match self.with_timeout(self.chain.get_latest_blockhash()).await {
            Ok(recent_blockhash) => recent_blockhash,
            Err(err) => {
                return Outcome::Rejected(ProposalClientError::BlockhashUnavailable(Box::new(err)))
            }
        };

        match build_unsigned_vote_transaction(
            &self.config.program_id,
            &proposal,
            &voter,
            vote,
            &recent_blockhash,
        ) {
            Ok(transaction) => Outcome::Decoded(transaction),
            Err(reason) => {
                warn!("Failed to build vote transaction: {}", reason);
                Outcome::FallbackUsed {
                    value: mock_vote_transaction(vote, proposal_address),
                    reason,
                }
            }
        }
    }

    /// Lists the proposals of the realm at `realm_address`
    ///
    /// Accounts which can't be decoded are left out. An unreachable node yields
    /// an empty listing
    pub async fn get_realm_proposals(&self, realm_address: &str) -> Outcome<Vec<ProposalInfo>> {
        info!("Fetching proposals for realm {}", realm_address);

        let realm = match parse_address(realm_address) {
            Ok(realm) => realm,
            Err(err) => return Outcome::Rejected(err),
        };

        let mut filters = vec![AccountFilter::Memcmp {
            offset: REALM_OFFSET,
            bytes: realm.to_bytes().to_vec(),
        }];
        if let DiscriminatorCheck::Expect(discriminator) = self.config.discriminator_check {
            filters.push(AccountFilter::Memcmp {
                offset: 0,
                bytes: discriminator.to_vec(),
            });
        }

        let accounts = match self
            .with_timeout(
                self.chain
                    .get_program_accounts(&self.config.program_id, filters),
            )
            .await
        {
            Ok(accounts) => accounts,
            Err(reason) => {
                warn!(
                    "Failed to fetch proposals for realm {}: {}",
                    realm_address, reason
                );
                return Outcome::FallbackUsed {
                    value: vec![],
                    reason,
                };
            }
        };

        let proposals = accounts
            .into_iter()
            .filter_map(|(address, data)| {
                match ProposalRecord::try_decode(&data, self.config.discriminator_check) {
                    Ok(record) => Some(ProposalInfo::new(address.to_string(), &record)),
                    Err(err) => {
                        warn!("Skipping proposal account {}: {}", address, err);
                        None
                    }
                }
            })
            .collect();

        Outcome::Decoded(proposals)
    }

    /// Reports the health of the RPC node
    pub async fn health(&self) -> HealthReport {
        let solana_rpc = match self.with_timeout(self.chain.get_health()).await {
            Ok(true) => RpcHealth::Healthy,
            Ok(false) => RpcHealth::Unhealthy,
            Err(err) => {
                warn!("RPC node unreachable: {}", err);
                RpcHealth::Unreachable
            }
        };

        HealthReport::new(solana_rpc)
    }
}
