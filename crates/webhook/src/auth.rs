use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

use crate::config::{AuthMode, CustomAuthHeaders, WebhookConfig};

/// Resolved auth headers, ordered by header name.
pub type AuthHeaders = BTreeMap<String, String>;

const AUTHORIZATION: &str = "Authorization";
const X_API_KEY: &str = "X-API-KEY";
const BEARER_PREFIX: &str = "bearer ";

/// Turns static auth configuration into the headers attached to each request.
///
/// Resolution is a pure function of the configuration: absent credentials
/// produce no header rather than an error, and calling [`resolve`] again
/// yields the same mapping.
///
/// [`resolve`]: AuthHeaderResolver::resolve
#[derive(Clone)]
pub struct AuthHeaderResolver {
    mode: AuthMode,
    token: String,
    custom: CustomAuthHeaders,
}

impl AuthHeaderResolver {
    pub fn new(mode: AuthMode, token: impl Into<String>, custom: CustomAuthHeaders) -> Self {
        Self {
            mode,
            token: token.into(),
            custom,
        }
    }

    pub fn from_config(config: &WebhookConfig) -> Self {
        Self::new(
            config.auth_mode,
            config.auth_token.clone(),
            config.custom_headers.clone(),
        )
    }

    /// The mode actually applied.
    ///
    /// `none` with custom headers configured is treated as `custom` for
    /// compatibility with configurations that only list headers.
    pub fn effective_mode(&self) -> AuthMode {
        if self.mode == AuthMode::None && !self.custom.is_empty() {
            AuthMode::Custom
        } else {
            self.mode
        }
    }

    pub fn resolve(&self) -> AuthHeaders {
        let token = self.token.trim();
        match self.effective_mode() {
            AuthMode::None | AuthMode::Unrecognized => AuthHeaders::new(),
            AuthMode::Bearer => token_header(AUTHORIZATION, token, bearer_value),
            AuthMode::AuthorizationRaw => token_header(AUTHORIZATION, token, str::to_owned),
            AuthMode::XApiKey => token_header(X_API_KEY, token, str::to_owned),
            AuthMode::Custom => normalize_custom(&self.custom),
        }
    }
}

impl fmt::Debug for AuthHeaderResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthHeaderResolver")
            .field("mode", &self.mode)
            .field("token", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

/// Render resolved headers for diagnostics, e.g. `Authorization=Bearer abc`.
///
/// Values are printed as-is.
pub fn describe(headers: &AuthHeaders) -> String {
    if headers.is_empty() {
        return "none".into();
    }
    headers
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn token_header(name: &str, token: &str, render: impl Fn(&str) -> String) -> AuthHeaders {
    let mut headers = AuthHeaders::new();
    if !token.is_empty() {
        headers.insert(name.to_owned(), render(token));
    }
    headers
}

fn bearer_value(token: &str) -> String {
    let prefixed = token
        .get(..BEARER_PREFIX.len())
        .is_some_and(|p| p.eq_ignore_ascii_case(BEARER_PREFIX));
    if prefixed {
        token.to_owned()
    } else {
        format!("Bearer {token}")
    }
}

fn normalize_custom(custom: &CustomAuthHeaders) -> AuthHeaders {
    let mut headers = AuthHeaders::new();
    match custom {
        CustomAuthHeaders::Pairs(pairs) => {
            for pair in pairs {
                insert_pair(&mut headers, pair);
            }
        }
        CustomAuthHeaders::Pair(pair) => insert_pair(&mut headers, pair),
        CustomAuthHeaders::Map(map) => {
            for (key, value) in map {
                insert_entry(&mut headers, key.clone(), value);
            }
        }
    }
    headers
}

fn insert_pair(headers: &mut AuthHeaders, pair: &[Value]) {
    let [key, value, ..] = pair else {
        return;
    };
    if let Some(key) = scalar_text(key) {
        insert_entry(headers, key, value);
    }
}

fn insert_entry(headers: &mut AuthHeaders, key: String, value: &Value) {
    if key.is_empty() {
        return;
    }
    if let Some(value) = scalar_text(value) {
        headers.insert(key, value);
    }
}

/// Coerce a scalar to header text. Null, empty strings, and nested values
/// are treated as absent.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
