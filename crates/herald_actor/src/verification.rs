//! Credential verification summary.

use herald_interface::CredentialCheck;

/// Aggregate of credential checks across enabled platforms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationSummary {
    checks: Vec<CredentialCheck>,
}

impl VerificationSummary {
    /// Summarise the checks of all enabled platforms.
    pub fn new(checks: Vec<CredentialCheck>) -> Self {
        Self { checks }
    }

    /// Individual checks.
    pub fn checks(&self) -> &[CredentialCheck] {
        &self.checks
    }

    /// Number of enabled platforms checked.
    pub fn enabled(&self) -> usize {
        self.checks.len()
    }

    /// Number of platforms whose credentials were accepted.
    pub fn verified(&self) -> usize {
        self.checks.iter().filter(|c| c.is_verified()).count()
    }

    /// True when at least one platform verified and none failed.
    pub fn is_success(&self) -> bool {
        let verified = self.verified();
        verified > 0 && verified == self.enabled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_core::Platform;
    use herald_interface::CredentialStatus;

    fn ok(platform: Platform) -> CredentialCheck {
        CredentialCheck {
            platform,
            outcome: Ok(CredentialStatus::new(platform, "acct", None)),
        }
    }

    fn failed(platform: Platform) -> CredentialCheck {
        CredentialCheck {
            platform,
            outcome: Err("401 Unauthorized".to_string()),
        }
    }

    #[test]
    fn test_no_platforms_is_failure() {
        assert!(!VerificationSummary::new(vec![]).is_success());
    }

    #[test]
    fn test_partial_verification_is_failure() {
        let summary = VerificationSummary::new(vec![ok(Platform::Twitter), failed(Platform::Reddit)]);
        assert_eq!(summary.enabled(), 2);
        assert_eq!(summary.verified(), 1);
        assert!(!summary.is_success());
    }

    #[test]
    fn test_all_verified_is_success() {
        let summary = VerificationSummary::new(vec![ok(Platform::Twitter), ok(Platform::Blogger)]);
        assert!(summary.is_success());
    }
}
