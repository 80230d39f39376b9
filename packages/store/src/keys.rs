//! Key naming and the two-entry session encoding shared by every backend.

use api::{AdminInfo, Session};

use crate::config::SessionConfig;
use crate::StoreError;

/// Names of the two entries a session is stored under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionKeys {
    pub token: String,
    pub admin: String,
}

impl Default for SessionKeys {
    fn default() -> Self {
        Self {
            token: "admin_token".to_string(),
            admin: "admin_info".to_string(),
        }
    }
}

impl From<&SessionConfig> for SessionKeys {
    fn from(config: &SessionConfig) -> Self {
        Self {
            token: config.token_key.clone(),
            admin: config.admin_key.clone(),
        }
    }
}

pub(crate) fn encode(session: &Session) -> Result<(String, String), StoreError> {
    let admin = serde_json::to_string(&session.admin).map_err(|e| StoreError::Corrupt(e.to_string()))?;
    Ok((session.access_token.clone(), admin))
}

pub(crate) fn decode(token: Option<String>, admin: Option<String>) -> Result<Option<Session>, StoreError> {
    let (Some(token), Some(admin)) = (token, admin) else {
        return Ok(None);
    };
    if token.is_empty() {
        return Ok(None);
    }
    let admin: AdminInfo = serde_json::from_str(&admin).map_err(|e| StoreError::Corrupt(e.to_string()))?;
    Ok(Some(Session {
        access_token: token,
        token_type: None,
        admin,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_requires_both_entries() {
        assert_eq!(decode(Some("tok".into()), None), Ok(None));
        assert_eq!(decode(None, Some("{}".into())), Ok(None));
        assert!(matches!(
            decode(Some("tok".into()), Some("not json".into())),
            Err(StoreError::Corrupt(_))
        ));
    }
}
