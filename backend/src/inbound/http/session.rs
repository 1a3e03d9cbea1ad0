//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Wraps Actix cookie sessions so handlers and the domain deal only with
//! user identities. Also provides the adapter that lets an authentication
//! source establish a session through the `SessionGateway` port without
//! importing Actix.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use uuid::Uuid;

use crate::domain::ports::{SessionGateway, SessionGatewayError};
use crate::domain::{Error, User, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated user's id in the session cookie.
    ///
    /// The session id is rotated so a pre-login cookie cannot be fixed to
    /// the authenticated session.
    pub fn persist_user(&self, user_id: &UserId) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, user_id.to_string())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the current user id from the session, if present.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let raw = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        match raw {
            Some(raw) => match Uuid::parse_str(&raw) {
                Ok(id) => Ok(Some(UserId::new(id))),
                Err(error) => {
                    tracing::warn!("invalid user id in session cookie: {error}");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// Require an authenticated user id or return `401 Unauthorized`.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.user_id()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Drop every session entry and invalidate the cookie.
    pub fn purge(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

/// `SessionGateway` adapter over the request's cookie session.
///
/// Borrowing keeps the gateway tied to the request scope; sources receive it
/// as `&dyn SessionGateway` and never learn about cookies.
pub struct CookieSessionGateway<'a> {
    session: &'a SessionContext,
}

impl<'a> CookieSessionGateway<'a> {
    /// Adapt the given session wrapper.
    pub const fn new(session: &'a SessionContext) -> Self {
        Self { session }
    }
}

impl SessionGateway for CookieSessionGateway<'_> {
    fn establish(&self, user: &User) -> Result<(), SessionGatewayError> {
        self.session
            .persist_user(user.id())
            .map_err(|error| SessionGatewayError::establish(error.to_string()))
    }
}
