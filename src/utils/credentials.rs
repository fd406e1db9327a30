use base64::Engine;

/// Turns a raw token into an `Authorization` header value.
pub trait CredentialScheme: Send + Sync {
    fn name(&self) -> &'static str;

    fn authorization_value(&self, token: &str) -> String;
}

/// `Basic <base64(token)>`. An empty token yields `"Basic "`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicScheme;

impl CredentialScheme for BasicScheme {
    fn name(&self) -> &'static str {
        "basic"
    }

    fn authorization_value(&self, token: &str) -> String {
        format!("Basic {}", encode_base64(token))
    }
}

/// `Bearer <token>`, token sent as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct BearerScheme;

impl CredentialScheme for BearerScheme {
    fn name(&self) -> &'static str {
        "bearer"
    }

    fn authorization_value(&self, token: &str) -> String {
        format!("Bearer {}", token)
    }
}

pub fn encode_base64(value: &str) -> String {
    base64::engine::general_purpose::STANDARD.encode(value.as_bytes())
}

