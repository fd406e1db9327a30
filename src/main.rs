use anyhow::Result;
use std::sync::Arc;

use notify_harness::{
    config::AppConfig,
    providers::StructuredLogger,
    services::{NotificationClient, NotificationSender, ScenarioRunner},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Missing credentials abort here, before any request is sent.
    let config = AppConfig::load()?;

    StructuredLogger::init(&config.log_level, config.logger.clone())?;

    let client = NotificationClient::new(&config)?;

    StructuredLogger::log_info(
        "Starting notification harness",
        None,
        None,
        Some(serde_json::json!({
            "deployment": config.target.deployment,
            "endpoint": client.endpoint(),
            "verification_field": config.target.verification_field(),
            "applicant_field": config.target.applicant_field(),
            "auth_scheme": client.scheme_name(),
        })),
    );

    let sender: Arc<dyn NotificationSender + Send + Sync> = Arc::new(client);
    let runner = ScenarioRunner::new(sender, config);

    let report = runner.run_all().await?;

    println!("{}", serde_json::to_string_pretty(&report)?);

    if !report.all_passed() {
        StructuredLogger::log_error(
            &format!("Scenario run failed: {}", report.summary()),
            None,
            None,
        );
        std::process::exit(1);
    }

    Ok(())
}
