use notify_harness::config::{
    AppConfig, CredentialsConfig, Deployment, ScenarioConfig, TargetConfig, WebClientConfig,
};

pub const TEST_TOKEN: &str = "test-token";
pub const TEST_VERIFICATION_UUID: &str = "19779c90-3ed5-419d-98ca-e14accd01da5";
pub const TEST_APPLICANT_UUID: &str = "190cb624-6a61-4f39-ad1a-e33afca07179";

pub fn create_test_config(deployment: Deployment) -> AppConfig {
    AppConfig {
        log_level: "info".to_string(),
        target: TargetConfig {
            base_uri: Some("http://127.0.0.1:8080".to_string()),
            ..TargetConfig::for_deployment(deployment)
        },
        webclient: WebClientConfig { timeout: 5 },
        scenarios: ScenarioConfig::default(),
        logger: None,
        credentials: CredentialsConfig {
            authentication_token: TEST_TOKEN.to_string(),
            verification_uuid: TEST_VERIFICATION_UUID.to_string(),
            applicant_uuid: TEST_APPLICANT_UUID.to_string(),
        },
    }
}
