use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;

use crate::config::AppConfig;
use crate::models::{Outcome, RunReport, Scenario, ScenarioResult};
use crate::providers::StructuredLogger;
use crate::services::{NotificationSender, ScenarioCatalog};
use crate::utils::error::Result;
use crate::utils::scenario_request_id;

pub struct ScenarioRunner {
    sender: Arc<dyn NotificationSender + Send + Sync>,
    config: AppConfig,
}

impl ScenarioRunner {
    pub fn new(sender: Arc<dyn NotificationSender + Send + Sync>, config: AppConfig) -> Self {
        Self { sender, config }
    }

    /// Sends one request and compares the status with the expectation. An
    /// unexpected status is a `Failed` result, a transport error an
    /// `Errored` one; neither is returned as `Err`.
    pub async fn run_scenario(&self, scenario: &Scenario) -> ScenarioResult {
        let request_id = scenario_request_id(&scenario.name);
        let started_at = Utc::now();
        let clock = Instant::now();

        if let Some(note) = &scenario.known_issue {
            StructuredLogger::log_warning(
                &format!("Known issue: {}", note),
                Some(&scenario.name),
                Some(&request_id),
            );
        }

        let response = self
            .sender
            .send_notification(&scenario.record, &scenario.credential, &request_id)
            .await;

        let duration_ms = clock.elapsed().as_millis() as u64;

        let (outcome, actual_status, error) = match response {
            Ok(response) if response.status_code == scenario.expected_status => {
                StructuredLogger::log_info(
                    &format!("Scenario passed with status {}", response.status_code),
                    Some(&scenario.name),
                    Some(&request_id),
                    None,
                );
                (Outcome::Passed, Some(response.status_code), None)
            }
            Ok(response) => {
                let message = format!(
                    "expected status {} but got {}",
                    scenario.expected_status, response.status_code
                );
                StructuredLogger::log_error(
                    &format!("Scenario failed: {}; body: {}", message, response.body),
                    Some(&scenario.name),
                    Some(&request_id),
                );
                (Outcome::Failed, Some(response.status_code), Some(message))
            }
            Err(e) => {
                StructuredLogger::log_error(
                    &format!("Scenario errored: {}", e),
                    Some(&scenario.name),
                    Some(&request_id),
                );
                (Outcome::Errored, None, Some(e.to_string()))
            }
        };

        ScenarioResult {
            scenario: scenario.name.clone(),
            outcome,
            expected_status: scenario.expected_status,
            actual_status,
            request_id,
            error,
            known_issue: scenario.known_issue.clone(),
            started_at,
            duration_ms,
        }
    }

    pub async fn run(&self, scenarios: &[Scenario]) -> RunReport {
        let started_at = Utc::now();
        let mut results = Vec::with_capacity(scenarios.len());

        for scenario in scenarios {
            results.push(self.run_scenario(scenario).await);
        }

        RunReport {
            target: self.sender.endpoint(),
            started_at,
            finished_at: Utc::now(),
            results,
        }
    }

    /// Runs the configured catalogue in order. Only a bad `scenarios.only`
    /// selection fails here, before anything is sent.
    pub async fn run_all(&self) -> Result<RunReport> {
        let scenarios = ScenarioCatalog::new(&self.config).selected()?;

        StructuredLogger::log_info(
            "Running notification scenarios",
            None,
            None,
            Some(serde_json::json!({
                "target": self.sender.endpoint(),
                "scenarios": scenarios.len(),
            })),
        );

        let report = self.run(&scenarios).await;

        StructuredLogger::log_info("Scenario run finished", None, None, Some(report.summary()));

        Ok(report)
    }
}
