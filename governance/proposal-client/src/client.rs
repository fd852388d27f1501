//! Chain-state providers

use {
    crate::error::ChainStateError,
    async_trait::async_trait,
    solana_account_decoder::UiAccountEncoding,
    solana_client::{
        client_error::ClientErrorKind,
        nonblocking::rpc_client::RpcClient,
        rpc_config::{RpcAccountInfoConfig, RpcProgramAccountsConfig},
        rpc_filter::{Memcmp, RpcFilterType},
    },
    solana_sdk::{hash::Hash, pubkey::Pubkey},
    std::{fmt, sync::Arc},
};

/// Result of a chain-state request
pub type ChainStateResult<T> = Result<T, ChainStateError>;

/// Filter applied to program accounts on the provider side
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccountFilter {
    /// Account data at `offset` starts with `bytes`
    Memcmp {
        /// Offset into the account data
        offset: usize,
        /// Bytes to compare
        bytes: Vec<u8>,
    },

    /// Account data is exactly this long
    DataSize(u64),
}

impl From<AccountFilter> for RpcFilterType {
    fn from(filter: AccountFilter) -> Self {
        match filter {
            AccountFilter::Memcmp { offset, bytes } => {
                RpcFilterType::Memcmp(Memcmp::new_base58_encoded(offset, &bytes))
            }
            AccountFilter::DataSize(size) => RpcFilterType::DataSize(size),
        }
    }
}

/// Read access to chain state
#[async_trait]
pub trait ChainStateClient: Send + Sync {
    /// Raw data of the account, `None` if the account doesn't exist
    async fn get_account_data(&self, address: &Pubkey) -> ChainStateResult<Option<Vec<u8>>>;

    /// Recent blockhash for new transactions
    async fn get_latest_blockhash(&self) -> ChainStateResult<Hash>;

    /// Whether the node reports itself healthy. Errors mean the node couldn't be reached
    async fn get_health(&self) -> ChainStateResult<bool>;

    /// Addresses and data of the program's accounts matching all filters
    async fn get_program_accounts(
        &self,
        program_id: &Pubkey,
        filters: Vec<AccountFilter>,
    ) -> ChainStateResult<Vec<(Pubkey, Vec<u8>)>>;
}

/// Chain-state provider backed by a JSON RPC node
pub struct ChainStateRpcClient {
    rpc_client: Arc<RpcClient>,
}

impl fmt::Debug for ChainStateRpcClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainStateRpcClient")
            .field("url", &self.rpc_client.url())
            .finish()
    }
}

impl ChainStateRpcClient {
    /// Wraps an RPC client
    pub fn new(rpc_client: Arc<RpcClient>) -> Self {
        Self { rpc_client }
    }
}

#[async_trait]
impl ChainStateClient for ChainStateRpcClient {
    async fn get_account_data(&self, address: &Pubkey) -> ChainStateResult<Option<Vec<u8>>> {
        let response = self
            .rpc_client
            .get_account_with_commitment(address, self.rpc_client.commitment())
            .await?;
        Ok(response.value.map(|account| account.data))
    }

    async fn get_latest_blockhash(&self) -> ChainStateResult<Hash> {
        self.rpc_client
            .get_latest_blockhash()
            .await
            .map_err(Into::into)
    }

    async fn get_health(&self) -> ChainStateResult<bool> {
        match self.rpc_client.get_health().await {
            Ok(()) => Ok(true),
            // The node answered but reported a problem
            Err(err) if matches!(err.kind(), ClientErrorKind::RpcError(_)) => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    async fn get_program_accounts(
        &self,
        program_id: &Pubkey,
        filters: Vec<AccountFilter>,
    ) -> ChainStateResult<Vec<(Pubkey, Vec<u8>)>> {
        let config = RpcProgramAccountsConfig {
            filters: Some(filters.into_iter().map(Into::into).collect()),
            account_config: RpcAccountInfoConfig {
                encoding: Some(UiAccountEncoding::Base64),
                commitment: Some(self.rpc_client.commitment()),
                ..RpcAccountInfoConfig::default()
            },
            ..RpcProgramAccountsConfig::default()
        };

        let accounts = self
            .rpc_client
            .get_program_accounts_with_config(program_id, config)
            .await?;
        Ok(accounts
            .into_iter()
            .map(|(address, account)| (address, account.data))
            .collect())
    }
}

/// Chain-state provider for building transactions without network access
///
/// Supplies a fixed blockhash and knows no accounts
#[derive(Clone, Copy, Debug)]
pub struct ChainStateOfflineClient {
    blockhash: Hash,
}

impl ChainStateOfflineClient {
    /// Creates a provider which hands out `blockhash`
    pub fn new(blockhash: Hash) -> Self {
        Self { blockhash }
    }
}

#[async_trait]
impl ChainStateClient for ChainStateOfflineClient {
    async fn get_account_data(&self, _address: &Pubkey) -> ChainStateResult<Option<Vec<u8>>> {
        Ok(None)
    }

    async fn get_latest_blockhash(&self) -> ChainStateResult<Hash> {
        Ok(self.blockhash)
    }

    async fn get_health(&self) -> ChainStateResult<bool> {
        Err("Unable to check health in offline mode".into())
    }

    async fn get_program_accounts(
        &self,
        _program_id: &Pubkey,
        _filters: Vec<AccountFilter>,
    ) -> ChainStateResult<Vec<(Pubkey, Vec<u8>)>> {
        Err("Unable to fetch program accounts in offline mode".into())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_memcmp_filter_conversion() {
        let realm = Pubkey::new_unique();
        let filter = AccountFilter::Memcmp {
            offset: 41,
            bytes: realm.to_bytes().to_vec(),
        };

        let mut data = vec![0; 41];
        data.extend_from_slice(realm.as_ref());

        match RpcFilterType::from(filter) {
            RpcFilterType::Memcmp(memcmp) => {
                assert!(memcmp.bytes_match(&data));
                assert!(!memcmp.bytes_match(&data[1..]));
            }
            other => panic!("unexpected filter {:?}", other),
        }

        assert!(matches!(
            RpcFilterType::from(AccountFilter::DataSize(120)),
            RpcFilterType::DataSize(120)
        ));
    }

    #[tokio::test]
    async fn test_offline_client() {
        let blockhash = Hash::new_unique();
        let client = ChainStateOfflineClient::new(blockhash);

        assert_eq!(client.get_latest_blockhash().await.unwrap(), blockhash);
        assert_eq!(
            client
                .get_account_data(&Pubkey::new_unique())
                .await
                .unwrap(),
            None
        );
        assert!(client.get_health().await.is_err());
        assert!(client
            .get_program_accounts(&crate::id(), vec![])
            .await
            .is_err());
    }
}
