//! Authenticated session as handed out by the session provider

use serde::{Deserialize, Serialize};

use super::entity::OwnerId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: OwnerId,
    #[serde(default)]
    pub email: Option<String>,
}

/// A signed-in session. Its presence is the only authorization gate the
/// engine knows about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user: SessionUser,
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Unix seconds
    #[serde(default)]
    pub expires_at: Option<i64>,
}

/// Seconds before expiry at which a token is already treated as expired
pub const EXPIRY_MARGIN_SECS: i64 = 30;

impl Session {
    pub fn owner(&self) -> &OwnerId {
        &self.user.id
    }

    /// True once the token is within `EXPIRY_MARGIN_SECS` of its expiry, so
    /// it gets refreshed before the server starts refusing it
    pub fn is_expired(&self, now_unix: i64) -> bool {
        self.expires_at
            .is_some_and(|at| at <= now_unix + EXPIRY_MARGIN_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(expires_at: Option<i64>) -> Session {
        Session {
            user: SessionUser { id: OwnerId::new("u1"), email: None },
            access_token: "a".into(),
            refresh_token: Some("r".into()),
            expires_at,
        }
    }

    #[test]
    fn test_expiry_has_margin() {
        let s = session(Some(1_000));
        assert!(!s.is_expired(969));
        assert!(s.is_expired(970));
        assert!(s.is_expired(999));
        assert!(s.is_expired(1_200));
    }

    #[test]
    fn test_no_expiry_never_expires() {
        assert!(!session(None).is_expired(i64::MAX - EXPIRY_MARGIN_SECS));
    }
}
