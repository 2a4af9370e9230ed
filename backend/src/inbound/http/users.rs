//! Signup and login handlers.
//!
//! ```text
//! POST /signup {"username":"alice","password":"wonderland"}
//! POST /login  {"username":"alice","password":"wonderland"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{Credentials, CredentialsValidationError, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Request body shared by `POST /signup` and `POST /login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CredentialsRequest {
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = "wonderland")]
    pub password: String,
}

impl TryFrom<&CredentialsRequest> for Credentials {
    type Error = CredentialsValidationError;

    fn try_from(value: &CredentialsRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

fn map_validation_error(err: CredentialsValidationError) -> Error {
    match err {
        CredentialsValidationError::EmptyUsername => {
            Error::invalid_request("username must not be empty")
                .with_details(json!({ "field": "username", "code": "empty_username" }))
        }
        CredentialsValidationError::EmptyPassword => {
            Error::invalid_request("password must not be empty")
                .with_details(json!({ "field": "password", "code": "empty_password" }))
        }
    }
}

/// Register a new user.
#[utoipa::path(
    post,
    path = "/signup",
    request_body = CredentialsRequest,
    responses(
        (status = 201, description = "User created"),
        (status = 400, description = "Empty username or password, or malformed body", body = Error),
        (status = 409, description = "Username already taken", body = Error),
        (status = 500, description = "Storage or hashing failure", body = Error)
    ),
    tags = ["users"],
    operation_id = "signup",
    security([])
)]
#[post("/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = Credentials::try_from(&*payload).map_err(map_validation_error)?;
    state.accounts.sign_up(&credentials).await?;
    info!(username = %credentials.username(), "signup succeeded");
    Ok(HttpResponse::Created().finish())
}

/// Verify credentials and start a session.
#[utoipa::path(
    post,
    path = "/login",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Login success", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Empty username or password, or malformed body", body = Error),
        (status = 403, description = "Unknown user or wrong password", body = Error),
        (status = 500, description = "Storage or hashing failure", body = Error)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = Credentials::try_from(&*payload).map_err(map_validation_error)?;
    let username = state.accounts.authenticate(&credentials).await?;
    session.persist_user(&username)?;
    Ok(HttpResponse::Ok().finish())
}
