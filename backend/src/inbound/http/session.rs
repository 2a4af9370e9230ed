//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! The only attribute stored per session is the authenticated username.

use actix_session::{Session, SessionExt};
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::{Ready, ready};
use tracing::warn;

use crate::domain::{Error, Username};

/// Session attribute holding the logged-in username.
pub const USER_NAME_KEY: &str = "userName";

/// Newtype exposing the session operations handlers need.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Record `username` as the session's user and rotate the session id.
    pub fn persist_user(&self, username: &Username) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_NAME_KEY, username.as_ref())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Username stored in the session, if any.
    ///
    /// A stored value that is not a valid username is treated as absent.
    pub fn user_name(&self) -> Result<Option<Username>, Error> {
        let raw = self
            .0
            .get::<String>(USER_NAME_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        Ok(raw.and_then(|value| match Username::new(value) {
            Ok(name) => Some(name),
            Err(error) => {
                warn!(%error, "ignoring invalid username in session cookie");
                None
            }
        }))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Ok(Self::new(req.get_session())))
    }
}
