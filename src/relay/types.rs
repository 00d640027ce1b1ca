//! Wire types for the upstream session-issuance API.
//!
//! The upstream response shape is not stable across API revisions: the
//! client secret arrives either as a bare string or as an object carrying
//! the value and its expiry. Both shapes are modeled explicitly and
//! normalized into [`SessionToken`] at the parse boundary, so the rest of
//! the relay only ever sees one record type.

use serde::{Deserialize, Serialize};

/// The normalized result handed back to the browser.
///
/// `expires_at` is unix seconds; it serializes as an explicit `null` when
/// the upstream did not report an expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionToken {
    pub client_secret: String,
    pub expires_at: Option<i64>,
}

/// Body of the outbound session-creation call.
#[derive(Debug, Serialize)]
pub struct SessionRequest<'a> {
    pub workflow: WorkflowRef<'a>,
    pub user: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in_seconds: Option<u64>,
}

/// Workflow selector inside the outbound body.
#[derive(Debug, Serialize)]
pub struct WorkflowRef<'a> {
    pub id: &'a str,
}

/// Successful upstream response body.
///
/// Older API revisions put the expiry next to a bare-string secret; newer
/// ones nest it inside the secret object. Both are accepted.
#[derive(Debug, Deserialize)]
pub struct SessionCreated {
    pub client_secret: ClientSecret,
    #[serde(default)]
    pub expires_at: Option<i64>,
}

/// The two shapes the upstream uses for the client secret.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ClientSecret {
    Plain(String),
    Detailed {
        value: String,
        #[serde(default)]
        expires_at: Option<i64>,
    },
}

impl SessionCreated {
    /// Collapse both shapes into one record. The expiry nested inside the
    /// secret object wins over a top-level one.
    pub fn into_token(self) -> SessionToken {
        match self.client_secret {
            ClientSecret::Plain(value) => SessionToken {
                client_secret: value,
                expires_at: self.expires_at,
            },
            ClientSecret::Detailed { value, expires_at } => SessionToken {
                client_secret: value,
                expires_at: expires_at.or(self.expires_at),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> SessionToken {
        serde_json::from_value::<SessionCreated>(value)
            .unwrap()
            .into_token()
    }

    #[test]
    fn test_bare_string_secret() {
        let token = parse(json!({"client_secret": "abc123"}));
        assert_eq!(token.client_secret, "abc123");
        assert_eq!(token.expires_at, None);
    }

    #[test]
    fn test_structured_secret() {
        let token = parse(json!({
            "client_secret": {"value": "abc123", "expires_at": 1234567890}
        }));
        assert_eq!(token.client_secret, "abc123");
        assert_eq!(token.expires_at, Some(1234567890));
    }

    #[test]
    fn test_top_level_expiry_beside_bare_secret() {
        let token = parse(json!({
            "id": "cksess_001",
            "object": "chatkit.session",
            "client_secret": "ek_abc",
            "expires_at": 1700000000
        }));
        assert_eq!(token.client_secret, "ek_abc");
        assert_eq!(token.expires_at, Some(1700000000));
    }

    #[test]
    fn test_nested_expiry_wins_over_top_level() {
        let token = parse(json!({
            "client_secret": {"value": "ek_abc", "expires_at": 111},
            "expires_at": 222
        }));
        assert_eq!(token.expires_at, Some(111));
    }

    #[test]
    fn test_structured_secret_without_expiry() {
        let token = parse(json!({"client_secret": {"value": "ek_abc"}}));
        assert_eq!(token.expires_at, None);
    }

    #[test]
    fn test_token_serializes_missing_expiry_as_null() {
        let token = SessionToken {
            client_secret: "abc123".to_string(),
            expires_at: None,
        };
        let rendered = serde_json::to_value(&token).unwrap();
        assert_eq!(rendered, json!({"client_secret": "abc123", "expires_at": null}));
    }

    #[test]
    fn test_request_omits_unset_ttl() {
        let request = SessionRequest {
            workflow: WorkflowRef { id: "wf_1" },
            user: "user_a",
            expires_in_seconds: None,
        };
        let rendered = serde_json::to_value(&request).unwrap();
        assert_eq!(rendered, json!({"workflow": {"id": "wf_1"}, "user": "user_a"}));
    }

    #[test]
    fn test_request_carries_configured_ttl() {
        let request = SessionRequest {
            workflow: WorkflowRef { id: "wf_1" },
            user: "user_a",
            expires_in_seconds: Some(600),
        };
        let rendered = serde_json::to_value(&request).unwrap();
        assert_eq!(rendered["expires_in_seconds"], json!(600));
    }

    #[test]
    fn test_missing_secret_is_a_parse_error() {
        let result = serde_json::from_value::<SessionCreated>(json!({"expires_at": 5}));
        assert!(result.is_err());
    }
}
