//! Tests for HTTP error mapping.

use super::*;
use actix_web::body::to_bytes;
use actix_web::{App, test as actix_test};
use rstest::rstest;
use serde::Deserialize;
use serde_json::{Value, json};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::forbidden("please login"), StatusCode::FORBIDDEN)]
#[case(Error::conflict("taken"), StatusCode::CONFLICT)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] expected: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), expected);
}

async fn body_of(error: &Error) -> (HttpResponse<()>, Value) {
    let response = ResponseError::error_response(error);
    let (response, body) = response.into_parts();
    let bytes = to_bytes(body).await.expect("reading response body succeeds");
    let value = serde_json::from_slice(&bytes).expect("error body is JSON");
    (response, value)
}

#[actix_web::test]
async fn client_errors_keep_message_and_details() {
    let error = Error::invalid_request("bad")
        .with_trace_id(TRACE_ID)
        .with_details(json!({ "field": "name" }));
    let (response, body) = body_of(&error).await;

    assert_eq!(
        response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok()),
        Some(TRACE_ID)
    );
    assert_eq!(
        body,
        json!({
            "code": "invalid_request",
            "message": "bad",
            "traceId": TRACE_ID,
            "details": { "field": "name" }
        })
    );
}

#[actix_web::test]
async fn internal_errors_are_redacted() {
    let error = Error::internal("connection string leaked")
        .with_trace_id(TRACE_ID)
        .with_details(json!({ "secret": "x" }));
    let (_, body) = body_of(&error).await;

    assert_eq!(
        body,
        json!({
            "code": "internal_error",
            "message": INTERNAL_ERROR_MESSAGE,
            "traceId": TRACE_ID
        })
    );
}

#[actix_web::test]
async fn missing_trace_id_omits_header() {
    let (response, body) = body_of(&Error::conflict("taken")).await;
    assert!(response.headers().get(TRACE_ID_HEADER).is_none());
    assert!(body.get("traceId").is_none());
}

#[derive(Deserialize)]
#[expect(dead_code, reason = "fields exist only to drive deserialisation")]
struct Payload {
    name: String,
    population: i32,
}

#[rstest]
#[case("{not json", "application/json")]
#[case(r#"{"name": "Oslo", "population": "many"}"#, "application/json")]
#[case(r#"{"name": "Oslo"}"#, "application/json")]
#[case(r#"{"name": "Oslo", "population": 1}"#, "text/plain")]
#[actix_web::test]
async fn malformed_json_bodies_are_bad_requests(#[case] body: &str, #[case] content_type: &str) {
    let app = actix_test::init_service(App::new().app_data(json_config()).route(
        "/",
        web::post().to(|_: web::Json<Payload>| async { HttpResponse::Ok().finish() }),
    ))
    .await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/")
            .insert_header(("content-type", content_type))
            .set_payload(body.to_owned())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_request");
}

#[test]
fn actix_errors_become_internal() {
    let actix = actix_web::error::ErrorBadGateway("upstream");
    assert_eq!(Error::from(actix).code(), ErrorCode::InternalError);
}
