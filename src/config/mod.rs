use std::fmt;

use serde::{Deserialize, Serialize};

use crate::utils::error::{AppError, Result};

pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";
pub const CONFIG_FILE_ENV: &str = "NOTIFY_HARNESS_CONFIG";

pub const AUTHENTICATION_TOKEN_ENV: &str = "AUTHENTICATION_TOKEN";
pub const VERIFICATION_UUID_ENV: &str = "VERIFICATION_UUID";
pub const APPLICANT_UUID_ENV: &str = "APPLICANT_UUID";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub target: TargetConfig,
    #[serde(default)]
    pub webclient: WebClientConfig,
    #[serde(default)]
    pub scenarios: ScenarioConfig,
    #[serde(default)]
    pub logger: Option<LoggerConfig>,
    pub credentials: CredentialsConfig,
}

/// Known deployments of the notification endpoint. They differ in URL and
/// in the name of the verification key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Deployment {
    #[default]
    Idv,
    Rv,
}

impl Deployment {
    pub fn default_base_uri(&self) -> &'static str {
        match self {
            Deployment::Idv => "https://idvserver.testlab.local",
            Deployment::Rv => "https://qa.contego.com",
        }
    }

    pub fn default_path(&self) -> &'static str {
        match self {
            Deployment::Idv => "/webhook/idv/notificationresult/idvnotify",
            Deployment::Rv => "/webhook/rv/notificationresult/rvnotify",
        }
    }

    pub fn verification_field(&self) -> &'static str {
        match self {
            Deployment::Idv => "verification_uuid",
            Deployment::Rv => "check_uuid",
        }
    }

    /// Seed for the wrong-token scenario; base64-encoded before use.
    pub fn wrong_token_seed(&self) -> &'static str {
        match self {
            Deployment::Idv => "TheWrongToken",
            Deployment::Rv => "TheWrongKey",
        }
    }

    /// Applicant value sent alongside a null verification identifier.
    pub fn null_case_applicant(&self) -> &'static str {
        match self {
            Deployment::Idv => "SomeUUID",
            Deployment::Rv => "SomeKey",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthScheme {
    #[default]
    Basic,
    Bearer,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetConfig {
    #[serde(default)]
    pub deployment: Deployment,
    #[serde(default)]
    pub base_uri: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub verification_field: Option<String>,
    #[serde(default)]
    pub applicant_field: Option<String>,
    #[serde(default)]
    pub auth_scheme: AuthScheme,
}

impl TargetConfig {
    pub fn for_deployment(deployment: Deployment) -> Self {
        Self {
            deployment,
            ..Self::default()
        }
    }

    pub fn base_uri(&self) -> &str {
        self.base_uri
            .as_deref()
            .unwrap_or_else(|| self.deployment.default_base_uri())
    }

    pub fn path(&self) -> &str {
        self.path
            .as_deref()
            .unwrap_or_else(|| self.deployment.default_path())
    }

    pub fn verification_field(&self) -> &str {
        self.verification_field
            .as_deref()
            .unwrap_or_else(|| self.deployment.verification_field())
    }

    pub fn applicant_field(&self) -> &str {
        self.applicant_field.as_deref().unwrap_or("applicant_uuid")
    }

    /// Base URI and path joined with exactly one slash between them.
    pub fn endpoint_url(&self) -> String {
        let base = self.base_uri().trim_end_matches('/');
        let path = self.path().trim_start_matches('/');
        if path.is_empty() {
            base.to_string()
        } else {
            format!("{}/{}", base, path)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebClientConfig {
    /// Seconds.
    pub timeout: u64,
}

impl Default for WebClientConfig {
    fn default() -> Self {
        Self { timeout: 30 }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub resubmit_valid: bool,
    #[serde(default)]
    pub only: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggerConfig {
    pub dir: String,
    pub file_name: String,
    #[serde(default = "default_max_log_files")]
    pub max_log_files: usize,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct CredentialsConfig {
    pub authentication_token: String,
    pub verification_uuid: String,
    pub applicant_uuid: String,
}

impl fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("authentication_token", &"<redacted>")
            .field("verification_uuid", &self.verification_uuid)
            .field("applicant_uuid", &self.applicant_uuid)
            .finish()
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_log_files() -> usize {
    7
}

impl AppConfig {
    /// Loads `config.yaml` (or the file named by `NOTIFY_HARNESS_CONFIG`),
    /// `APP__*` overrides and the credential variables from the process
    /// environment.
    pub fn load() -> Result<Self> {
        let config_file =
            std::env::var(CONFIG_FILE_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load_with(&config_file, |key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::load`] but credential variables are resolved
    /// through `lookup`. The config file is optional.
    pub fn load_with<F>(config_file: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_file).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("scenarios.only"),
            )
            .set_override_option(
                "credentials.authentication_token",
                lookup(AUTHENTICATION_TOKEN_ENV),
            )?
            .set_override_option("credentials.verification_uuid", lookup(VERIFICATION_UUID_ENV))?
            .set_override_option("credentials.applicant_uuid", lookup(APPLICANT_UUID_ENV))?
            .build()?;

        let required = [
            (
                "credentials.authentication_token",
                "Authentication token has not been defined",
            ),
            (
                "credentials.verification_uuid",
                "Verification UUID has not been defined",
            ),
            (
                "credentials.applicant_uuid",
                "Applicant UUID has not been defined",
            ),
        ];
        for (key, message) in required {
            if settings.get_string(key).is_err() {
                return Err(AppError::configuration(message));
            }
        }

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.target.base_uri().trim().is_empty() {
            return Err(AppError::configuration("Target base URI must not be empty"));
        }
        if !self.target.base_uri().starts_with("http://")
            && !self.target.base_uri().starts_with("https://")
        {
            return Err(AppError::configuration(format!(
                "Target base URI must start with http:// or https://, got '{}'",
                self.target.base_uri()
            )));
        }
        let endpoint = self.target.endpoint_url();
        if let Err(e) = reqwest::Url::parse(&endpoint) {
            return Err(AppError::configuration(format!(
                "Target endpoint '{}' is not a valid URL: {}",
                endpoint, e
            )));
        }
        if self.webclient.timeout == 0 {
            return Err(AppError::configuration("webclient.timeout must be greater than zero"));
        }
        Ok(())
    }
}
