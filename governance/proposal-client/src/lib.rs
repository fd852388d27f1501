#![deny(missing_docs)]
//! An off-chain client for SPL Governance proposals.
//!
//! Decodes proposal accounts fetched from the chain and prepares unsigned
//! vote transactions for the voter to sign on their own device.

pub mod client;
pub mod config;
pub mod error;
pub mod instruction;
pub mod outcome;
pub mod response;
pub mod service;
pub mod state;
pub mod tools;
pub mod transaction;

// Export current sdk types for downstream users building with a different sdk version
pub use solana_sdk;

solana_sdk::declare_id!("GovER5Lthms3bLBqWub97yVrMmEogzX7xNjdXpPPCVZw");
