//! Credential verification.

use herald::{HeraldConfig, VerificationSummary, build_dispatcher};
use herald_error::HeraldResult;
use std::process::ExitCode;

/// Verify credentials of every enabled platform.
///
/// Fails when nothing verifies or any enabled platform is rejected.
pub async fn verify_credentials(config: &HeraldConfig) -> HeraldResult<ExitCode> {
    let dispatcher = build_dispatcher(config)?;
    let summary = VerificationSummary::new(dispatcher.verify_credentials().await);

    for platform in config.switched_on() {
        if !dispatcher.is_enabled(platform) {
            println!("- {}: credentials not configured", platform);
        }
    }
    for check in summary.checks() {
        match &check.outcome {
            Ok(status) => match status.details() {
                Some(details) => {
                    println!("✓ {}: {} ({})", check.platform, status.account(), details)
                }
                None => println!("✓ {}: {}", check.platform, status.account()),
            },
            Err(e) => println!("✗ {}: {}", check.platform, e),
        }
    }

    println!(
        "{}/{} enabled platforms verified",
        summary.verified(),
        summary.enabled()
    );

    if summary.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
