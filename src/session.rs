//! Session derived from the stored bearer token.
//!
//! The token's claims are decoded locally without checking the signature;
//! the backend remains the authority on whether the token is valid.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use serde_json::{Map, Value};

use crate::error::{ClientError, Result};

pub const ADMIN_ROLE: &str = "ROLE_ADMIN";

const LENIENT: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Claims {
    pub sub: Option<String>,
    pub display_name: Option<String>,
    pub roles: Option<Vec<String>>,
}

impl Claims {
    /// Pick the known claims out of a JSON object. A claim with an
    /// unexpected type is dropped rather than failing the whole token.
    pub fn from_object(object: &Map<String, Value>) -> Self {
        let scalar = |key: &str| match object.get(key) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };
        let roles = match object.get("roles") {
            Some(Value::Array(items)) => Some(
                items
                    .iter()
                    .filter_map(|item| item.as_str().map(str::to_string))
                    .collect(),
            ),
            _ => None,
        };
        Self {
            sub: scalar("sub"),
            display_name: match object.get("displayName") {
                Some(Value::String(s)) => Some(s.clone()),
                _ => None,
            },
            roles,
        }
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles
            .as_ref()
            .map_or(false, |roles| roles.iter().any(|r| r == role))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Session {
    Anonymous,
    Authenticated { token: String, claims: Claims },
}

impl Session {
    /// Build a session from whatever is in storage. Anything that fails to
    /// decode is treated as logged out.
    pub fn from_token(token: Option<String>) -> Self {
        let Some(token) = token.filter(|t| !t.is_empty()) else {
            return Session::Anonymous;
        };
        match decode_claims(&token) {
            Ok(claims) => Session::Authenticated { token, claims },
            Err(e) => {
                log::warn!("ignoring stored token: {}", e);
                Session::Anonymous
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated { .. })
    }

    pub fn is_admin(&self) -> bool {
        match self {
            Session::Authenticated { claims, .. } => claims.has_role(ADMIN_ROLE),
            Session::Anonymous => false,
        }
    }

    /// Label for the login control once signed in.
    pub fn label(&self) -> Option<&str> {
        match self {
            Session::Authenticated { claims, .. } => Some(
                claims
                    .display_name
                    .as_deref()
                    .filter(|n| !n.is_empty())
                    .or_else(|| claims.sub.as_deref().filter(|s| !s.is_empty()))
                    .unwrap_or("User"),
            ),
            Session::Anonymous => None,
        }
    }

    /// Token for the `Authorization` header; empty when logged out.
    pub fn bearer_token(&self) -> &str {
        match self {
            Session::Authenticated { token, .. } => token,
            Session::Anonymous => "",
        }
    }
}

pub fn decode_claims(token: &str) -> Result<Claims> {
    let mut segments = token.split('.');
    let payload = match (segments.next(), segments.next()) {
        (Some(_), Some(payload)) if !payload.is_empty() => payload,
        _ => return Err(ClientError::Decode("token has no payload segment".to_string())),
    };

    let bytes = URL_SAFE_LENIENT
        .decode(payload)
        .or_else(|_| STANDARD_LENIENT.decode(payload))
        .map_err(|e| ClientError::Decode(format!("payload is not base64: {}", e)))?;

    match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(object)) => Ok(Claims::from_object(&object)),
        Ok(_) => Err(ClientError::Decode("payload is not a JSON object".to_string())),
        Err(e) => Err(ClientError::Decode(format!("payload is not JSON: {}", e))),
    }
}
