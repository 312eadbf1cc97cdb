//! Configuration validation.

use super::types::{Config, ConfigError};

/// A value sent as a single space-free protocol word.
fn check_word(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} is empty")));
    }
    if value.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(ConfigError::Invalid(format!(
            "{field} {value:?} contains whitespace or control characters"
        )));
    }
    if value.starts_with(':') {
        return Err(ConfigError::Invalid(format!(
            "{field} {value:?} starts with ':'"
        )));
    }
    Ok(())
}

impl Config {
    /// Reject configurations the client cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::Invalid("server.host is empty".into()));
        }
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port is 0".into()));
        }

        check_word("identity.nick", &self.identity.nick)?;
        check_word("identity.username", self.identity.username())?;
        let realname = self.identity.realname();
        if realname.contains(['\0', '\r', '\n']) {
            return Err(ConfigError::Invalid(format!(
                "identity.realname {realname:?} contains a line break or NUL"
            )));
        }

        if self.ui.input_poll_ms == 0 || self.ui.display_poll_ms == 0 {
            return Err(ConfigError::Invalid("ui poll intervals must be non-zero".into()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::config::Config;

    #[test]
    fn test_rejects_bad_nick() {
        assert!(Config::from_args("h", "6667", "bad nick").is_err());
        assert!(Config::from_args("h", "6667", "").is_err());
        assert!(Config::from_args("h", "6667", ":bob").is_err());
    }

    #[test]
    fn test_rejects_bad_username_and_realname() {
        let mut config = Config::from_args("h", "6667", "bob").unwrap();
        config.identity.username = Some(":rob".into());
        assert!(config.validate().is_err());
        config.identity.username = Some("rob ert".into());
        assert!(config.validate().is_err());

        config.identity.username = None;
        config.identity.realname = Some("Bob\r\nQUIT".into());
        assert!(config.validate().is_err());
        config.identity.realname = Some(":Bob Smith".into());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_host_and_zero_port() {
        assert!(Config::from_args("  ", "6667", "bob").is_err());
        assert!(Config::from_args("h", "0", "bob").is_err());
    }

    #[test]
    fn test_rejects_zero_poll() {
        let mut config = Config::from_args("h", "6667", "bob").unwrap();
        config.ui.display_poll_ms = 0;
        assert!(config.validate().is_err());
    }
}
