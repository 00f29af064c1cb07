//! Credential access
//!
//! The client never creates or refreshes tokens. It asks a [`CredentialSource`]
//! for the current bearer token right before every request.

/// Supplies the bearer token attached to outbound requests
pub trait CredentialSource: Send + Sync {
    /// Returns the current token, or `None` when the user is not signed in
    fn bearer_token(&self) -> Option<String>;
}

/// A token fixed at construction time
#[derive(Debug, Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl CredentialSource for StaticToken {
    fn bearer_token(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Reads the token from an environment variable on every request
#[derive(Debug, Clone)]
pub struct EnvToken {
    var: String,
}

impl EnvToken {
    /// Default variable holding the token
    pub const DEFAULT_VAR: &'static str = "LESSONREEL_TOKEN";

    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvToken {
    fn default() -> Self {
        Self::new(Self::DEFAULT_VAR)
    }
}

impl CredentialSource for EnvToken {
    fn bearer_token(&self) -> Option<String> {
        std::env::var(&self.var).ok().filter(|t| !t.is_empty())
    }
}

/// Sends requests without an `Authorization` header
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCredentials;

impl CredentialSource for NoCredentials {
    fn bearer_token(&self) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_token() {
        assert_eq!(StaticToken::new("abc").bearer_token(), Some("abc".to_string()));
        assert_eq!(NoCredentials.bearer_token(), None);
    }

    #[test]
    fn test_env_token_missing_variable() {
        let source = EnvToken::new("LESSONREEL_TEST_TOKEN_THAT_IS_NEVER_SET");
        assert_eq!(source.bearer_token(), None);
    }
}
