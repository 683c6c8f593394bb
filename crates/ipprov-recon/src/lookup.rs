//! The lookup capability and its best-effort result type.

use async_trait::async_trait;
use ipprov_core::Address;
use serde::{Deserialize, Serialize};

use crate::error::{ReconError, ReconResult};

/// Source of reverse-DNS and registry answers for an address.
///
/// Implementations return the collaborator's raw text; parsing happens in
/// [`crate::dns`] and [`crate::whois`].
#[async_trait]
pub trait LookupService: Send + Sync {
    /// PTR names for `addr`, one per line.
    async fn reverse_dns(&self, addr: &Address) -> ReconResult<String>;

    /// Registry response for `addr` as `key: value` lines.
    async fn whois(&self, addr: &Address) -> ReconResult<String>;
}

/// Outcome of one best-effort lookup.
///
/// `Answered` with an empty value means the query worked and found nothing;
/// `Unavailable` means the query itself failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "lowercase")]
pub enum Lookup<T> {
    /// The collaborator answered
    Answered(T),
    /// The collaborator failed; holds the reason
    Unavailable(String),
}

impl<T> Lookup<T> {
    /// Answered value, if any.
    #[must_use]
    pub const fn answer(&self) -> Option<&T> {
        match self {
            Self::Answered(value) => Some(value),
            Self::Unavailable(_) => None,
        }
    }

    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Answered(_))
    }

    /// Transform the answered value.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Lookup<U> {
        match self {
            Self::Answered(value) => Lookup::Answered(f(value)),
            Self::Unavailable(reason) => Lookup::Unavailable(reason),
        }
    }
}

impl<T> From<ReconResult<T>> for Lookup<T> {
    fn from(result: ReconResult<T>) -> Self {
        match result {
            Ok(value) => Self::Answered(value),
            Err(e) => Self::Unavailable(e.to_string()),
        }
    }
}

impl<T> From<ReconError> for Lookup<T> {
    fn from(err: ReconError) -> Self {
        Self::Unavailable(err.to_string())
    }
}
