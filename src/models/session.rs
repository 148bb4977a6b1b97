use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Session {
    pub session_id: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Validity is a strict comparison: a session whose expiry equals `at` is
    /// already invalid. Logout stamps `expires_at` with the current instant,
    /// which makes the session invalid immediately under this rule.
    pub fn is_active(&self, at: DateTime<Utc>) -> bool {
        at < self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn session_expiring_at(expires_at: DateTime<Utc>) -> Session {
        Session {
            session_id: "3f2d9c1e-0000-4000-8000-000000000001".to_string(),
            user_id: 1,
            created_at: expires_at - Duration::minutes(30),
            expires_at,
        }
    }

    #[test]
    fn future_expiry_is_active() {
        let now = Utc::now();
        let session = session_expiring_at(now + Duration::minutes(5));
        assert!(session.is_active(now));
    }

    #[test]
    fn past_expiry_is_inactive() {
        let now = Utc::now();
        let session = session_expiring_at(now - Duration::seconds(1));
        assert!(!session.is_active(now));
    }

    #[test]
    fn expiry_equal_to_now_is_inactive() {
        let now = Utc::now();
        let session = session_expiring_at(now);
        assert!(!session.is_active(now));
    }
}
