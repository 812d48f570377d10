//! Session holder: bearer token and logged-in user, persisted in the store.

use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::gateway::Gateway;
use crate::models::user::{Credentials, User};
use chrono::Local;

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: User,
    pub logged_in_at: String, // RFC 3339, local time
}

impl Session {
    pub fn new(token: String, user: User) -> Self {
        Self {
            token,
            user,
            logged_in_at: Local::now().to_rfc3339(),
        }
    }

    pub fn load(pool: &mut DbPool) -> AppResult<Option<Self>> {
        Ok(queries::load_session(pool)?.map(|(token, user, logged_in_at)| Self {
            token,
            user,
            logged_in_at,
        }))
    }

    /// Stored session, or `AppError::NotLoggedIn`.
    pub fn require(pool: &mut DbPool) -> AppResult<Self> {
        Self::load(pool)?.ok_or(AppError::NotLoggedIn)
    }

    pub fn save(&self, pool: &mut DbPool) -> AppResult<()> {
        queries::save_session(pool, &self.token, &self.user, &self.logged_in_at)
    }

    pub fn clear(pool: &mut DbPool) -> AppResult<bool> {
        queries::clear_session(pool)
    }
}

/// Result of a logout: the local session is always dropped, the server
/// call may still have failed.
#[derive(Debug)]
pub struct LogoutOutcome {
    pub user: User,
    pub remote_error: Option<AppError>,
}

pub struct AuthLogic;

impl AuthLogic {
    pub fn login(
        gw: &dyn Gateway,
        pool: &mut DbPool,
        credentials: &Credentials,
    ) -> AppResult<Session> {
        let (token, user) = gw.login(credentials)?;
        let session = Session::new(token, user);
        session.save(pool)?;

        ttlog(
            &pool.conn,
            "login",
            &session.user.username,
            &format!("Logged in as {} <{}>", session.user.username, session.user.email),
        )?;

        Ok(session)
    }

    pub fn register(
        gw: &dyn Gateway,
        pool: &mut DbPool,
        username: &str,
        email: &str,
        password: &str,
    ) -> AppResult<User> {
        let user = gw.register(username, email, password)?;
        ttlog(
            &pool.conn,
            "register",
            &user.username,
            &format!("Registered account {} <{}>", user.username, user.email),
        )?;
        Ok(user)
    }

    pub fn logout(gw: &dyn Gateway, pool: &mut DbPool) -> AppResult<LogoutOutcome> {
        let session = Session::require(pool)?;
        let remote_error = gw.logout(&session.token).err();
        Session::clear(pool)?;

        let note = match &remote_error {
            Some(e) => format!("Local session cleared (server: {})", e),
            None => "Logged out".to_string(),
        };
        ttlog(&pool.conn, "logout", &session.user.username, &note)?;

        Ok(LogoutOutcome {
            user: session.user,
            remote_error,
        })
    }

    /// Ask the backend who the stored token belongs to.
    pub fn me(gw: &dyn Gateway, pool: &mut DbPool) -> AppResult<User> {
        let session = Session::require(pool)?;
        gw.me(&session.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;
    use crate::gateway::InMemoryGateway;

    fn pool() -> DbPool {
        let pool = DbPool::in_memory().unwrap();
        init_db(&pool.conn).unwrap();
        pool
    }

    fn creds(who: &str, pw: &str) -> Credentials {
        Credentials {
            username_or_email: who.into(),
            password: pw.into(),
        }
    }

    #[test]
    fn login_persists_session_and_logout_clears_it() {
        let gw = InMemoryGateway::default();
        gw.add_user("ola", "ola@example.com", "secret");
        let mut p = pool();

        let s = AuthLogic::login(&gw, &mut p, &creds("ola@example.com", "secret")).unwrap();
        assert_eq!(Session::load(&mut p).unwrap(), Some(s.clone()));
        assert_eq!(AuthLogic::me(&gw, &mut p).unwrap().username, "ola");

        let out = AuthLogic::logout(&gw, &mut p).unwrap();
        assert_eq!(out.user.username, "ola");
        assert!(out.remote_error.is_none());
        assert!(Session::load(&mut p).unwrap().is_none());
    }

    #[test]
    fn failed_login_stores_nothing() {
        let gw = InMemoryGateway::default();
        gw.add_user("ola", "ola@example.com", "secret");
        let mut p = pool();

        let err = AuthLogic::login(&gw, &mut p, &creds("ola", "wrong")).unwrap_err();
        assert!(matches!(err, AppError::Api { status: 401, .. }));
        assert!(Session::load(&mut p).unwrap().is_none());
    }

    #[test]
    fn commands_without_session_are_rejected() {
        let gw = InMemoryGateway::default();
        let mut p = pool();
        assert!(matches!(AuthLogic::me(&gw, &mut p), Err(AppError::NotLoggedIn)));
        assert!(matches!(
            AuthLogic::logout(&gw, &mut p),
            Err(AppError::NotLoggedIn)
        ));
    }

    #[test]
    fn logout_with_stale_token_still_clears_locally() {
        let gw = InMemoryGateway::default();
        let mut p = pool();
        let user = gw.add_user("ola", "ola@example.com", "secret");
        Session::new("stale".into(), user).save(&mut p).unwrap();

        let out = AuthLogic::logout(&gw, &mut p).unwrap();
        assert!(out.remote_error.is_some());
        assert!(Session::load(&mut p).unwrap().is_none());
    }
}
