//! Explicit credentials for the prediction service
//!
//! The client takes a credential object at construction time; there is no
//! ambient application-default lookup. The HTTP layer attaches the token as
//! a bearer Authorization header.

use async_trait::async_trait;

use crate::error::PredictError;

/// Environment variable consulted by [`EnvToken`] by default
pub const DEFAULT_TOKEN_VAR: &str = "GOOGLE_ML_TOKEN";

/// Source of bearer tokens for outgoing requests
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn token(&self) -> Result<String, PredictError>;
}

/// Fixed token supplied by the caller
pub struct StaticToken {
    token: String,
}

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl TokenProvider for StaticToken {
    async fn token(&self) -> Result<String, PredictError> {
        if self.token.is_empty() {
            return Err(PredictError::Credentials("empty bearer token".to_string()));
        }
        Ok(self.token.clone())
    }
}

/// Token read from an environment variable at call time
pub struct EnvToken {
    var: String,
}

impl EnvToken {
    pub fn new() -> Self {
        Self::from_var(DEFAULT_TOKEN_VAR)
    }

    pub fn from_var(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvToken {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenProvider for EnvToken {
    async fn token(&self) -> Result<String, PredictError> {
        match std::env::var(&self.var) {
            Ok(token) if !token.is_empty() => Ok(token),
            _ => Err(PredictError::Credentials(format!(
                "environment variable {} is not set",
                self.var
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_token() {
        let provider = StaticToken::new("abc123");
        assert_eq!(provider.token().await.unwrap(), "abc123");
    }

    #[tokio::test]
    async fn test_static_token_rejects_empty() {
        let provider = StaticToken::new("");
        assert!(matches!(
            provider.token().await,
            Err(PredictError::Credentials(_))
        ));
    }

    #[tokio::test]
    async fn test_env_token_missing_variable() {
        let provider = EnvToken::from_var("BWP_TEST_TOKEN_THAT_DOES_NOT_EXIST");
        let err = provider.token().await.unwrap_err();
        assert!(err.to_string().contains("BWP_TEST_TOKEN_THAT_DOES_NOT_EXIST"));
    }
}
