use std::collections::{BTreeMap, HashMap};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::auth::AuthHeaderResolver;
use crate::error::ChatError;

/// Hard ceiling for a single webhook call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);

/// How credentials are attached to outgoing requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthMode {
    /// No auth header, unless custom headers are configured.
    #[default]
    None,

    /// `Authorization: Bearer <token>`.
    Bearer,

    /// `Authorization: <token>` with the token used verbatim.
    AuthorizationRaw,

    /// `X-API-KEY: <token>`.
    XApiKey,

    /// Arbitrary headers taken from [`CustomAuthHeaders`].
    Custom,

    /// Any mode name this client does not know. Resolves to no headers.
    #[serde(other)]
    Unrecognized,
}

impl AuthMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Bearer => "bearer",
            Self::AuthorizationRaw => "authorization-raw",
            Self::XApiKey => "x-api-key",
            Self::Custom => "custom",
            Self::Unrecognized => "unrecognized",
        }
    }

    /// Whether this mode emits a header built from the auth token.
    pub fn uses_token(self) -> bool {
        matches!(self, Self::Bearer | Self::AuthorizationRaw | Self::XApiKey)
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthMode {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mode = match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "" | "none" => Self::None,
            "bearer" => Self::Bearer,
            "authorization-raw" => Self::AuthorizationRaw,
            "x-api-key" => Self::XApiKey,
            "custom" => Self::Custom,
            _ => Self::Unrecognized,
        };
        Ok(mode)
    }
}

/// Custom auth headers in any of the accepted shapes.
///
/// Keys and values are loosely typed and coerced to strings when the
/// headers are resolved.
///
/// ```toml
/// custom_headers = [["X-API-KEY", "abc"], ["X-Tenant", "acme"]]  # pairs
/// custom_headers = ["X-API-KEY", "abc"]                          # one pair
/// custom_headers = { "X-API-KEY" = "abc" }                       # mapping
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CustomAuthHeaders {
    /// A list of `[key, value]` pairs.
    Pairs(Vec<Vec<Value>>),

    /// A single `[key, value]` pair.
    Pair(Vec<Value>),

    /// A `key -> value` mapping.
    Map(BTreeMap<String, Value>),
}

impl CustomAuthHeaders {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Pairs(pairs) => pairs.is_empty(),
            Self::Pair(pair) => pair.is_empty(),
            Self::Map(map) => map.is_empty(),
        }
    }
}

impl Default for CustomAuthHeaders {
    fn default() -> Self {
        Self::Pairs(Vec::new())
    }
}

impl<K: Into<String>, V: Into<String>> From<Vec<(K, V)>> for CustomAuthHeaders {
    fn from(pairs: Vec<(K, V)>) -> Self {
        Self::Pairs(
            pairs
                .into_iter()
                .map(|(k, v)| vec![Value::String(k.into()), Value::String(v.into())])
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<String>> From<(K, V)> for CustomAuthHeaders {
    fn from((key, value): (K, V)) -> Self {
        Self::Pair(vec![Value::String(key.into()), Value::String(value.into())])
    }
}

impl From<BTreeMap<String, String>> for CustomAuthHeaders {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self::Map(map.into_iter().map(|(k, v)| (k, Value::String(v))).collect())
    }
}

impl From<HashMap<String, String>> for CustomAuthHeaders {
    fn from(map: HashMap<String, String>) -> Self {
        Self::Map(map.into_iter().map(|(k, v)| (k, Value::String(v))).collect())
    }
}

/// Static configuration for the webhook client.
///
/// Built once at startup and never mutated afterwards.
#[derive(Clone)]
pub struct WebhookConfig {
    /// Target webhook URL. An empty URL means "not configured".
    pub url: String,

    pub auth_mode: AuthMode,

    /// Credential used by the token-based auth modes.
    pub auth_token: String,

    /// Headers used by [`AuthMode::Custom`], and by [`AuthMode::None`] when
    /// non-empty.
    pub custom_headers: CustomAuthHeaders,

    /// Request timeout.
    pub timeout: Duration,

    /// Append the resolved auth header values to server error messages.
    ///
    /// This exposes credentials in error text and is meant for operators
    /// debugging auth mismatches only.
    pub debug_auth_errors: bool,

    /// Reject sends whose auth mode has no usable credential instead of
    /// silently sending without auth.
    pub strict_auth: bool,
}

impl WebhookConfig {
    /// Create a new configuration targeting the given URL.
    ///
    /// Defaults to no auth, a 30-second timeout, and no auth diagnostics in
    /// error messages.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            auth_mode: AuthMode::None,
            auth_token: String::new(),
            custom_headers: CustomAuthHeaders::default(),
            timeout: DEFAULT_TIMEOUT,
            debug_auth_errors: false,
            strict_auth: false,
        }
    }

    #[must_use]
    pub fn with_auth_mode(mut self, mode: AuthMode) -> Self {
        self.auth_mode = mode;
        self
    }

    #[must_use]
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = token.into();
        self
    }

    /// Set the custom auth headers from any accepted shape.
    #[must_use]
    pub fn with_custom_headers(mut self, headers: impl Into<CustomAuthHeaders>) -> Self {
        self.custom_headers = headers.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_timeout_ms(mut self, millis: u64) -> Self {
        self.timeout = Duration::from_millis(millis);
        self
    }

    #[must_use]
    pub fn with_debug_auth_errors(mut self, enabled: bool) -> Self {
        self.debug_auth_errors = enabled;
        self
    }

    #[must_use]
    pub fn with_strict_auth(mut self, enabled: bool) -> Self {
        self.strict_auth = enabled;
        self
    }

    /// Whether a webhook URL has been set.
    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty()
    }

    /// Check that a call can be attempted with this configuration.
    pub fn validate(&self) -> Result<(), ChatError> {
        if !self.is_configured() {
            return Err(ChatError::Configuration("webhook not configured".into()));
        }

        if self.strict_auth {
            let resolver = AuthHeaderResolver::from_config(self);
            let mode = resolver.effective_mode();
            if mode.uses_token() && self.auth_token.trim().is_empty() {
                return Err(ChatError::Configuration(format!(
                    "auth mode `{mode}` requires an auth token"
                )));
            }
            if mode == AuthMode::Custom && resolver.resolve().is_empty() {
                return Err(ChatError::Configuration(
                    "auth mode `custom` requires at least one header with a non-empty value"
                        .into(),
                ));
            }
        }

        Ok(())
    }
}

impl fmt::Debug for WebhookConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = if self.auth_token.is_empty() {
            ""
        } else {
            "[REDACTED]"
        };
        let custom_headers = if self.custom_headers.is_empty() {
            "[]"
        } else {
            "[REDACTED]"
        };
        f.debug_struct("WebhookConfig")
            .field("url", &self.url)
            .field("auth_mode", &self.auth_mode)
            .field("auth_token", &token)
            .field("custom_headers", &custom_headers)
            .field("timeout", &self.timeout)
            .field("debug_auth_errors", &self.debug_auth_errors)
            .field("strict_auth", &self.strict_auth)
            .finish()
    }
}
