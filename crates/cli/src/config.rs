//! Configuration file and command-line overrides for the CLI.

use std::path::Path;

use anyhow::Context;
use hookchat_webhook::{AuthMode, CustomAuthHeaders, DEFAULT_TIMEOUT, WebhookConfig};
use serde::Deserialize;

/// Config file read when `--config` is not given, if it exists.
pub const DEFAULT_CONFIG_PATH: &str = "hookchat.toml";

const DEFAULT_GREETING: &str = "Hi, I'm the webhook chat assistant. Configure the webhook URL \
     and auth in hookchat.toml, then start chatting.";

/// Top-level configuration, loaded from a TOML file.
///
/// # Example
///
/// ```toml
/// [webhook]
/// url = "https://automation.example.com/webhook/chat"
/// auth_mode = "x-api-key"
/// auth_token = "secret"
/// timeout_ms = 30000
///
/// [chat]
/// greeting = "Hello!"
/// ```
#[derive(Default, Deserialize)]
pub struct ChatConfig {
    #[serde(default)]
    pub webhook: WebhookSection,
    #[serde(default)]
    pub chat: ChatSection,
}

/// The `[webhook]` table.
#[derive(Deserialize)]
pub struct WebhookSection {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub auth_mode: AuthMode,
    #[serde(default)]
    pub auth_token: String,
    /// Pairs, a single pair, or a table of header names to values.
    #[serde(default)]
    pub custom_headers: CustomAuthHeaders,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default)]
    pub debug_auth_errors: bool,
    #[serde(default)]
    pub strict_auth: bool,
}

impl Default for WebhookSection {
    fn default() -> Self {
        Self {
            url: String::new(),
            auth_mode: AuthMode::None,
            auth_token: String::new(),
            custom_headers: CustomAuthHeaders::default(),
            timeout_ms: default_timeout_ms(),
            debug_auth_errors: false,
            strict_auth: false,
        }
    }
}

/// The `[chat]` table.
#[derive(Debug, Deserialize)]
pub struct ChatSection {
    /// First assistant message of an interactive session. Empty disables it.
    #[serde(default = "default_greeting")]
    pub greeting: String,
}

impl Default for ChatSection {
    fn default() -> Self {
        Self {
            greeting: default_greeting(),
        }
    }
}

/// Values given on the command line or through the environment.
#[derive(Debug, Default)]
pub struct Overrides {
    pub url: Option<String>,
    pub auth_mode: Option<AuthMode>,
    pub auth_token: Option<String>,
    pub debug_auth_errors: bool,
}

fn default_timeout_ms() -> u64 {
    u64::try_from(DEFAULT_TIMEOUT.as_millis()).unwrap_or(30_000)
}

fn default_greeting() -> String {
    DEFAULT_GREETING.to_owned()
}

impl ChatConfig {
    /// Load the config file at `path`, or [`DEFAULT_CONFIG_PATH`] when it
    /// exists, or built-in defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = match path {
            Some(path) => path,
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => Path::new(DEFAULT_CONFIG_PATH),
            None => return Ok(Self::default()),
        };

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn parse(contents: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Apply command-line and environment values on top of the file.
    pub fn apply(&mut self, overrides: Overrides) {
        if let Some(url) = overrides.url {
            self.webhook.url = url;
        }
        if let Some(mode) = overrides.auth_mode {
            self.webhook.auth_mode = mode;
        }
        if let Some(token) = overrides.auth_token {
            self.webhook.auth_token = token;
        }
        if overrides.debug_auth_errors {
            self.webhook.debug_auth_errors = true;
        }
    }

    /// Build the immutable client configuration.
    pub fn webhook_config(&self) -> WebhookConfig {
        let section = &self.webhook;
        WebhookConfig::new(section.url.clone())
            .with_auth_mode(section.auth_mode)
            .with_auth_token(section.auth_token.clone())
            .with_custom_headers(section.custom_headers.clone())
            .with_timeout_ms(section.timeout_ms)
            .with_debug_auth_errors(section.debug_auth_errors)
            .with_strict_auth(section.strict_auth)
    }

    /// Greeting for interactive sessions, if any.
    pub fn greeting(&self) -> Option<&str> {
        let greeting = self.chat.greeting.trim();
        (!greeting.is_empty()).then_some(greeting)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use hookchat_webhook::AuthHeaderResolver;

    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = ChatConfig::parse("").unwrap();
        let webhook = config.webhook_config();
        assert!(!webhook.is_configured());
        assert_eq!(webhook.auth_mode, AuthMode::None);
        assert_eq!(webhook.timeout, Duration::from_millis(30_000));
        assert!(config.greeting().is_some());
    }

    #[test]
    fn full_file() {
        let toml = r#"
            [webhook]
            url = "https://automation.example.com/webhook/chat"
            auth_mode = "authorization-raw"
            auth_token = "Token abc"
            timeout_ms = 5000
            debug_auth_errors = true
            strict_auth = true

            [chat]
            greeting = "Hello!"
        "#;
        let config = ChatConfig::parse(toml).unwrap();
        let webhook = config.webhook_config();
        assert_eq!(webhook.url, "https://automation.example.com/webhook/chat");
        assert_eq!(webhook.auth_mode, AuthMode::AuthorizationRaw);
        assert_eq!(webhook.auth_token, "Token abc");
        assert_eq!(webhook.timeout, Duration::from_millis(5000));
        assert!(webhook.debug_auth_errors);
        assert!(webhook.strict_auth);
        assert_eq!(config.greeting(), Some("Hello!"));
    }

    #[test]
    fn custom_headers_in_every_shape() {
        let shapes = [
            r#"custom_headers = [["X-API-KEY", "abc"]]"#,
            r#"custom_headers = ["X-API-KEY", "abc"]"#,
            r#"custom_headers = { "X-API-KEY" = "abc" }"#,
        ];
        for shape in shapes {
            let toml = format!("[webhook]\nurl = \"https://x\"\nauth_mode = \"custom\"\n{shape}\n");
            let config = ChatConfig::parse(&toml).unwrap();
            let resolved = AuthHeaderResolver::from_config(&config.webhook_config()).resolve();
            assert_eq!(resolved.get("X-API-KEY").map(String::as_str), Some("abc"), "{shape}");
            assert_eq!(resolved.len(), 1);
        }
    }

    #[test]
    fn unknown_auth_mode_is_accepted() {
        let config = ChatConfig::parse("[webhook]\nauth_mode = \"oauth\"\n").unwrap();
        assert_eq!(config.webhook.auth_mode, AuthMode::Unrecognized);
    }

    #[test]
    fn empty_greeting_disables_it() {
        let config = ChatConfig::parse("[chat]\ngreeting = \"  \"\n").unwrap();
        assert_eq!(config.greeting(), None);
    }

    #[test]
    fn overrides_win_over_file() {
        let mut config =
            ChatConfig::parse("[webhook]\nurl = \"https://file\"\nauth_token = \"file\"\n")
                .unwrap();
        config.apply(Overrides {
            url: Some("https://flag".into()),
            auth_mode: Some(AuthMode::Bearer),
            auth_token: None,
            debug_auth_errors: true,
        });
        let webhook = config.webhook_config();
        assert_eq!(webhook.url, "https://flag");
        assert_eq!(webhook.auth_mode, AuthMode::Bearer);
        assert_eq!(webhook.auth_token, "file");
        assert!(webhook.debug_auth_errors);
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = ChatConfig::load(Some(Path::new("/nonexistent/hookchat.toml")));
        assert!(err.is_err());
    }
}
