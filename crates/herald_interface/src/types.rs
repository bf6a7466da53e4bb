//! Credential verification types.

use derive_getters::Getters;
use herald_core::Platform;
use serde::Serialize;

/// Account details returned by a successful credential check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct CredentialStatus {
    /// Platform checked
    platform: Platform,
    /// Account, user or blog name
    account: String,
    /// Extra detail such as karma or blog URL
    details: Option<String>,
}

impl CredentialStatus {
    /// Create a credential status.
    pub fn new(platform: Platform, account: impl Into<String>, details: Option<String>) -> Self {
        Self {
            platform,
            account: account.into(),
            details,
        }
    }
}

/// Outcome of verifying one enabled platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CredentialCheck {
    /// Platform checked
    pub platform: Platform,
    /// Account details, or the failure message
    pub outcome: Result<CredentialStatus, String>,
}

impl CredentialCheck {
    /// True when the credentials were accepted.
    pub fn is_verified(&self) -> bool {
        self.outcome.is_ok()
    }
}
