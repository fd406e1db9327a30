use crate::config::AppConfig;
use crate::models::{Credential, NotificationRecord, Scenario};
use crate::utils::encode_base64;
use crate::utils::error::{AppError, Result};

pub const STATUS_CREATED: u16 = 201;
pub const STATUS_BAD_REQUEST: u16 = 400;
pub const STATUS_UNAUTHORIZED: u16 = 401;
pub const STATUS_UNPROCESSABLE_ENTITY: u16 = 422;

pub const VALID_NOTIFICATION: &str = "valid_notification_created";
pub const UNRECOGNIZED_FIELD: &str = "unrecognized_field_unprocessable_entity";
pub const EMPTY_NOTIFICATION: &str = "empty_notification_bad_request";
pub const MISSING_VERIFICATION_ID: &str = "missing_verification_id_bad_request";
pub const MISSING_APPLICANT_ID: &str = "missing_applicant_id_created";
pub const NULL_VERIFICATION_ID: &str = "null_verification_id_bad_request";
pub const WRONG_TOKEN: &str = "wrong_token_unauthorized";
pub const EMPTY_CREDENTIAL: &str = "empty_credential_unauthorized";
pub const NO_AUTHORIZATION_HEADER: &str = "no_authorization_header_unauthorized";
pub const VALID_NOTIFICATION_RESUBMITTED: &str = "valid_notification_resubmitted_created";

pub const UNRECOGNIZED_FIELD_KEY: &str = "incorrect_uuid";

pub const MISSING_APPLICANT_NOTE: &str = "Record reuses the applicant identifier under the verification key and the \
     endpoint accepts it with 201 instead of rejecting the missing applicant with 400; \
     needs product-owner clarification";

/// Builds the fixed scenario matrix from read-only configuration.
pub struct ScenarioCatalog<'a> {
    config: &'a AppConfig,
}

impl<'a> ScenarioCatalog<'a> {
    pub fn new(config: &'a AppConfig) -> Self {
        Self { config }
    }

    /// Scenarios selected by `scenarios.only`, or all of them when the list
    /// is empty. Unknown names are rejected.
    pub fn selected(&self) -> Result<Vec<Scenario>> {
        let all = self.all();
        let only = &self.config.scenarios.only;
        if only.is_empty() {
            return Ok(all);
        }

        if let Some(unknown) = only
            .iter()
            .find(|name| !all.iter().any(|s| &s.name == *name))
        {
            return Err(AppError::configuration(format!(
                "Unknown scenario '{}' in scenarios.only",
                unknown
            )));
        }

        Ok(all
            .into_iter()
            .filter(|s| only.iter().any(|name| name == &s.name))
            .collect())
    }

    pub fn all(&self) -> Vec<Scenario> {
        let mut scenarios = self.standard();
        if self.config.scenarios.resubmit_valid {
            scenarios.push(self.valid_notification_resubmitted());
        }
        scenarios
    }

    pub fn standard(&self) -> Vec<Scenario> {
        vec![
            self.valid_notification(),
            self.unrecognized_field(),
            self.empty_notification(),
            self.missing_verification_id(),
            self.missing_applicant_id(),
            self.null_verification_id(),
            self.wrong_token(),
            self.empty_credential(),
            self.no_authorization_header(),
        ]
    }

    pub fn valid_record(&self) -> NotificationRecord {
        let credentials = &self.config.credentials;
        NotificationRecord::new()
            .with_field(self.verification_field(), &credentials.verification_uuid)
            .with_field(self.applicant_field(), &credentials.applicant_uuid)
    }

    pub fn valid_notification(&self) -> Scenario {
        Scenario::new(
            VALID_NOTIFICATION,
            self.valid_record(),
            self.valid_credential(),
            STATUS_CREATED,
        )
    }

    pub fn unrecognized_field(&self) -> Scenario {
        let credentials = &self.config.credentials;
        let record = NotificationRecord::new()
            .with_field(UNRECOGNIZED_FIELD_KEY, &credentials.verification_uuid)
            .with_field(self.applicant_field(), &credentials.applicant_uuid);
        Scenario::new(
            UNRECOGNIZED_FIELD,
            record,
            self.valid_credential(),
            STATUS_UNPROCESSABLE_ENTITY,
        )
    }

    pub fn empty_notification(&self) -> Scenario {
        Scenario::new(
            EMPTY_NOTIFICATION,
            NotificationRecord::new(),
            self.valid_credential(),
            STATUS_BAD_REQUEST,
        )
    }

    pub fn missing_verification_id(&self) -> Scenario {
        let record = NotificationRecord::new()
            .with_field(self.applicant_field(), &self.config.credentials.applicant_uuid);
        Scenario::new(
            MISSING_VERIFICATION_ID,
            record,
            self.valid_credential(),
            STATUS_BAD_REQUEST,
        )
    }

    /// Observed behaviour, kept as-is: the applicant identifier is sent under
    /// the verification key and the endpoint answers 201.
    pub fn missing_applicant_id(&self) -> Scenario {
        let record = NotificationRecord::new()
            .with_field(self.verification_field(), &self.config.credentials.applicant_uuid);
        Scenario::new(
            MISSING_APPLICANT_ID,
            record,
            self.valid_credential(),
            STATUS_CREATED,
        )
        .with_known_issue(MISSING_APPLICANT_NOTE)
    }

    pub fn null_verification_id(&self) -> Scenario {
        let record = NotificationRecord::new()
            .with_null(self.verification_field())
            .with_field(
                self.applicant_field(),
                self.config.target.deployment.null_case_applicant(),
            );
        Scenario::new(
            NULL_VERIFICATION_ID,
            record,
            self.valid_credential(),
            STATUS_BAD_REQUEST,
        )
    }

    /// The wrong token is itself base64 text, encoded again by the scheme.
    pub fn wrong_token(&self) -> Scenario {
        Scenario::new(
            WRONG_TOKEN,
            self.valid_record(),
            Credential::token(encode_base64(
                self.config.target.deployment.wrong_token_seed(),
            )),
            STATUS_UNAUTHORIZED,
        )
    }

    pub fn empty_credential(&self) -> Scenario {
        Scenario::new(
            EMPTY_CREDENTIAL,
            self.valid_record(),
            Credential::token(""),
            STATUS_UNAUTHORIZED,
        )
    }

    pub fn no_authorization_header(&self) -> Scenario {
        Scenario::new(
            NO_AUTHORIZATION_HEADER,
            self.valid_record(),
            Credential::Absent,
            STATUS_UNAUTHORIZED,
        )
    }

    pub fn valid_notification_resubmitted(&self) -> Scenario {
        Scenario::new(
            VALID_NOTIFICATION_RESUBMITTED,
            self.valid_record(),
            self.valid_credential(),
            STATUS_CREATED,
        )
    }

    fn valid_credential(&self) -> Credential {
        Credential::token(&self.config.credentials.authentication_token)
    }

    fn verification_field(&self) -> &str {
        self.config.target.verification_field()
    }

    fn applicant_field(&self) -> &str {
        self.config.target.applicant_field()
    }
}
