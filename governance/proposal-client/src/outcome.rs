//! Tagged results which keep real data apart from substitute data

use crate::error::ProposalClientError;

/// Result of a client operation
///
/// Operations favour availability: failures other than invalid input are absorbed
/// and replaced with substitute data, but the substitution is always visible here
#[derive(Debug)]
pub enum Outcome<T> {
    /// Value built from real chain data
    Decoded(T),

    /// Substitute value used because the real one couldn't be produced
    FallbackUsed {
        /// The substitute value
        value: T,
        /// Why the real value couldn't be produced
        reason: ProposalClientError,
    },

    /// The request was refused and there is no value
    Rejected(ProposalClientError),
}

impl<T> Outcome<T> {
    /// Returns true if the value comes from real chain data
    pub fn is_decoded(&self) -> bool {
        matches!(self, Outcome::Decoded(_))
    }

    /// Returns true if the value is a substitute
    pub fn is_fallback(&self) -> bool {
        matches!(self, Outcome::FallbackUsed { .. })
    }

    /// Returns true if the request was refused
    pub fn is_rejected(&self) -> bool {
        matches!(self, Outcome::Rejected(_))
    }

    /// The value, real or substitute
    pub fn value(&self) -> Option<&T> {
        match self {
            Outcome::Decoded(value) | Outcome::FallbackUsed { value, .. } => Some(value),
            Outcome::Rejected(_) => None,
        }
    }

    /// The reason a substitute was used or the request refused
    pub fn reason(&self) -> Option<&ProposalClientError> {
        match self {
            Outcome::Decoded(_) => None,
            Outcome::FallbackUsed { reason, .. } | Outcome::Rejected(reason) => Some(reason),
        }
    }

    /// Maps the value, keeping the tag
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U> {
        match self {
            Outcome::Decoded(value) => Outcome::Decoded(f(value)),
            Outcome::FallbackUsed { value, reason } => Outcome::FallbackUsed {
                value: f(value),
                reason,
            },
            Outcome::Rejected(reason) => Outcome::Rejected(reason),
        }
    }

    /// Converts into a `Result`, substitutes count as success
    pub fn into_result(self) -> Result<T, ProposalClientError> {
        match self {
            Outcome::Decoded(value) | Outcome::FallbackUsed { value, .. } => Ok(value),
            Outcome::Rejected(reason) => Err(reason),
        }
    }
}
