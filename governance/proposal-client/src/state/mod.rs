//! Governance accounts

pub mod enums;
pub mod proposal;
