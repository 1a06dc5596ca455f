//! Session authentication
//!
//! Username-based register/login with opaque session tokens stored in the
//! database. Sign-in/out events go out on a broadcast channel so other parts
//! of the app can react without being wired into the auth flow.

use crate::database::models::{Profile, Session};
use crate::database::{self, Database};
use crate::errors::WaypostError;
use crate::logger::{self, LogTag};
use chrono::{Duration, Utc};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Sign-in/out notifications
#[derive(Debug, Clone)]
pub enum AuthEvent {
    SignedIn { user_id: String },
    SignedOut { user_id: String },
}

/// Auth service: session issuance, lookup, and event notification
#[derive(Clone)]
pub struct Auth {
    db: Database,
    session_ttl_days: i64,
    events: broadcast::Sender<AuthEvent>,
}

impl Auth {
    pub fn new(db: Database, session_ttl_days: i64) -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            db,
            session_ttl_days,
            events,
        }
    }

    /// Subscribe to sign-in/out events
    pub fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }

    fn issue_session(&self, user_id: &str) -> Result<Session, WaypostError> {
        let now = Utc::now();
        let session = Session {
            token: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            created_at: now,
            expires_at: now + Duration::days(self.session_ttl_days),
        };
        self.db
            .insert_session(&session)
            .map_err(|e| WaypostError::database("insert session", e))?;
        Ok(session)
    }

    fn notify(&self, event: AuthEvent) {
        // No receivers is fine
        let _ = self.events.send(event);
    }

    /// Create a profile and sign it in
    pub fn register(&self, username: &str) -> Result<(Profile, Session), WaypostError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(WaypostError::validation("username"));
        }

        // The UNIQUE constraint is the duplicate check; a read-then-insert
        // would race against a concurrent registration of the same name
        let user_id = Uuid::new_v4().to_string();
        if let Err(e) = self.db.create_profile(&user_id, username) {
            if database::is_unique_violation(&e) {
                return Err(WaypostError::auth("username already taken"));
            }
            return Err(WaypostError::database("create profile", e));
        }

        let session = self.issue_session(&user_id)?;
        let profile = self
            .db
            .get_profile(&user_id)
            .map_err(|e| WaypostError::database("lookup profile", e))?
            .ok_or_else(|| WaypostError::database("lookup profile", "row missing after insert"))?;

        logger::info(LogTag::Auth, &format!("Registered user '{}'", username));
        self.notify(AuthEvent::SignedIn {
            user_id: user_id.clone(),
        });

        Ok((profile, session))
    }

    /// Sign an existing profile in
    pub fn login(&self, username: &str) -> Result<(Profile, Session), WaypostError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(WaypostError::validation("username"));
        }

        let profile = self
            .db
            .get_profile_by_username(username)
            .map_err(|e| WaypostError::database("lookup profile", e))?
            .ok_or_else(|| WaypostError::auth("unknown username"))?;

        let session = self.issue_session(&profile.id)?;

        logger::debug(LogTag::Auth, &format!("User '{}' signed in", username));
        self.notify(AuthEvent::SignedIn {
            user_id: profile.id.clone(),
        });

        Ok((profile, session))
    }

    /// Delete the session (sign out)
    pub fn logout(&self, token: &str) -> Result<(), WaypostError> {
        let session = self
            .db
            .get_session(token)
            .map_err(|e| WaypostError::database("lookup session", e))?;

        self.db
            .delete_session(token)
            .map_err(|e| WaypostError::database("delete session", e))?;

        if let Some(session) = session {
            self.notify(AuthEvent::SignedOut {
                user_id: session.user_id,
            });
        }
        Ok(())
    }

    /// Resolve a bearer token to a live session
    pub fn authenticate(&self, token: &str) -> Result<Session, WaypostError> {
        let session = self
            .db
            .get_session(token)
            .map_err(|e| WaypostError::database("lookup session", e))?
            .ok_or_else(|| WaypostError::auth("unknown session token"))?;

        if session.expires_at < Utc::now() {
            // Expired sessions are removed on sight
            let _ = self.db.delete_session(token);
            return Err(WaypostError::auth("session expired"));
        }

        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> Auth {
        Auth::new(Database::open_in_memory().unwrap(), 30)
    }

    #[test]
    fn test_register_login_logout_flow() {
        let auth = setup();

        let (profile, session) = auth.register("alice").unwrap();
        assert_eq!(profile.username, "alice");
        assert_eq!(auth.authenticate(&session.token).unwrap().user_id, profile.id);

        auth.logout(&session.token).unwrap();
        assert!(auth.authenticate(&session.token).is_err());

        let (profile2, session2) = auth.login("alice").unwrap();
        assert_eq!(profile2.id, profile.id);
        assert!(auth.authenticate(&session2.token).is_ok());
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let auth = setup();
        auth.register("alice").unwrap();
        assert!(matches!(
            auth.register("alice"),
            Err(WaypostError::Auth { .. })
        ));
    }

    #[test]
    fn test_expired_session_rejected() {
        let db = Database::open_in_memory().unwrap();
        let auth = Auth::new(db.clone(), 30);
        let (profile, _) = auth.register("bob").unwrap();

        let expired = Session {
            token: "stale-token".to_string(),
            user_id: profile.id,
            created_at: Utc::now() - Duration::days(60),
            expires_at: Utc::now() - Duration::days(30),
        };
        db.insert_session(&expired).unwrap();

        assert!(matches!(
            auth.authenticate("stale-token"),
            Err(WaypostError::Auth { .. })
        ));
        // Removed on sight
        assert!(db.get_session("stale-token").unwrap().is_none());
    }

    #[tokio::test]
    async fn test_sign_in_event_broadcast() {
        let auth = setup();
        let mut rx = auth.subscribe();

        let (profile, _) = auth.register("carol").unwrap();

        match rx.try_recv().unwrap() {
            AuthEvent::SignedIn { user_id } => assert_eq!(user_id, profile.id),
            other => panic!("unexpected event: {:?}", other),
        }
    }
}
