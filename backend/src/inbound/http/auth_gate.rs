//! Session gate for routes that require a logged-in user.
//!
//! [`RequireSession`] wraps a scope. Requests without a `userName` session
//! attribute are answered with `403 please login` before the wrapped service
//! runs; otherwise the username is stored in the request extensions where
//! handlers read it through [`AuthenticatedUser`].

use std::task::{Context, Poll};

use actix_session::SessionExt;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{FromRequest, HttpMessage, HttpRequest, ResponseError, dev::Payload};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::debug;

use super::session::SessionContext;
use crate::domain::{Error, Username};

/// Message returned to callers without a session.
pub const LOGIN_REQUIRED_MESSAGE: &str = "please login";

/// Middleware rejecting requests that carry no authenticated session.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use cityinfo::inbound::http::auth_gate::RequireSession;
///
/// let _app = App::new().service(web::scope("").wrap(RequireSession));
/// ```
#[derive(Clone, Copy, Default)]
pub struct RequireSession;

impl<S, B> Transform<S, ServiceRequest> for RequireSession
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = RequireSessionMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireSessionMiddleware { service }))
    }
}

/// Service produced by [`RequireSession`].
pub struct RequireSessionMiddleware<S> {
    service: S,
}

enum Gate {
    Pass,
    Reject(Option<Error>),
}

impl<S, B> Service<ServiceRequest> for RequireSessionMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let gate = match SessionContext::new(req.get_session()).user_name() {
            Ok(Some(username)) => {
                req.extensions_mut().insert(AuthenticatedUser(username));
                Gate::Pass
            }
            Ok(None) => Gate::Reject(None),
            Err(error) => Gate::Reject(Some(error)),
        };

        match gate {
            Gate::Pass => {
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            // Build the error inside the future so it sees the request's trace id.
            Gate::Reject(failure) => Box::pin(async move {
                let error = match failure {
                    Some(error) => Error::internal(error.message().to_owned()),
                    None => {
                        debug!(path = req.path(), "rejected request without session");
                        Error::forbidden(LOGIN_REQUIRED_MESSAGE)
                    }
                };
                let (request, _) = req.into_parts();
                let response = error.error_response().map_into_right_body();
                Ok(ServiceResponse::new(request, response))
            }),
        }
    }
}

/// Username of the session that passed [`RequireSession`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(pub Username);

impl AuthenticatedUser {
    pub fn username(&self) -> &Username {
        &self.0
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AuthenticatedUser>()
                .cloned()
                .ok_or_else(|| Error::forbidden(LOGIN_REQUIRED_MESSAGE)),
        )
    }
}
