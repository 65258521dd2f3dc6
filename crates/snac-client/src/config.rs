//! Connection settings for the host.

use std::time::Duration;

use reqwest::Url;

use crate::error::{ClientError, Result};

/// Default host address of a local installation.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3333/";

/// HTTP request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the host lives and which project the alignment belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Host root; always ends with `/`.
    base_url: Url,
    /// Host project the schema is attached to.
    project_id: Option<String>,
    pub timeout: Duration,
}

impl ClientConfig {
    /// Parses `base_url`, appending a trailing slash if needed.
    pub fn new(base_url: &str) -> Result<Self> {
        let mut raw = base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let base_url = Url::parse(&raw)
            .map_err(|e| ClientError::Config(format!("invalid host URL '{base_url}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Config(format!(
                "host URL '{base_url}' cannot be used as a base"
            )));
        }
        Ok(Self {
            base_url,
            project_id: None,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    #[must_use]
    pub fn with_project(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }

    /// Project id, or a config error for project-scoped commands.
    pub fn require_project(&self) -> Result<&str> {
        self.project_id()
            .ok_or_else(|| ClientError::Config("no project selected".to_string()))
    }

    /// URL of a command registered by `module` (`snac` or `core`).
    pub fn command_url(&self, module: &str, command: &str) -> Result<Url> {
        self.base_url
            .join(&format!("command/{module}/{command}"))
            .map_err(|e| ClientError::Config(format!("invalid command URL: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_path_prefix() {
        let config = ClientConfig::new("http://host:3333/refine").unwrap();
        assert_eq!(
            config.command_url("snac", "get-model").unwrap().as_str(),
            "http://host:3333/refine/command/snac/get-model"
        );
    }

    #[test]
    fn core_commands() {
        let config = ClientConfig::new(DEFAULT_BASE_URL).unwrap();
        assert_eq!(
            config.command_url("core", "get-csrf-token").unwrap().as_str(),
            "http://127.0.0.1:3333/command/core/get-csrf-token"
        );
    }

    #[test]
    fn project_is_required_for_scoped_commands() {
        let config = ClientConfig::new(DEFAULT_BASE_URL).unwrap();
        assert!(matches!(config.require_project(), Err(ClientError::Config(_))));
        assert_eq!(config.with_project("1234").require_project().unwrap(), "1234");
    }

    #[test]
    fn rejects_garbage() {
        assert!(ClientConfig::new("not a url").is_err());
    }
}
