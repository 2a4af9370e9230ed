//! City handlers. All routes here sit behind [`super::auth_gate::RequireSession`].
//!
//! ```text
//! GET   /cities/Tokyo
//! POST  /city {"name":"Sapporo","countryCode":"JPN","district":"Hokkaido","population":1790886}
//! PATCH /city/population {"id":1,"population":1800000}
//! ```

use actix_web::{HttpResponse, get, patch, post, web};
use tracing::debug;

use crate::domain::{City, CityPopulation, Error, NewCity};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth_gate::AuthenticatedUser;
use crate::inbound::http::state::HttpState;

/// Acknowledgment body for successful mutations.
pub const OK_BODY: &str = "OK";

fn ok_text() -> HttpResponse {
    HttpResponse::Ok().content_type("text/plain").body(OK_BODY)
}

/// Fetch a city by exact name.
///
/// An unknown name is answered with `200` and a zero-valued city.
#[utoipa::path(
    get,
    path = "/cities/{cityName}",
    params(("cityName" = String, Path, description = "Exact city name")),
    responses(
        (status = 200, description = "City, or zero-valued fields when not found", body = City),
        (status = 403, description = "No session", body = Error),
        (status = 500, description = "Storage failure", body = Error)
    ),
    tags = ["cities"],
    operation_id = "getCity",
    security(("SessionCookie" = []))
)]
#[get("/cities/{city_name}")]
pub async fn get_city(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<City>> {
    let name = path.into_inner();
    debug!(username = %user.username(), city = %name, "city lookup");
    let city = state.cities.find_by_name(&name).await?;
    Ok(web::Json(city))
}

/// Insert a city. Any `id` in the body is ignored.
#[utoipa::path(
    post,
    path = "/city",
    request_body = NewCity,
    responses(
        (status = 200, description = "City stored", body = String, content_type = "text/plain"),
        (status = 400, description = "Malformed body", body = Error),
        (status = 403, description = "No session", body = Error),
        (status = 500, description = "Storage failure", body = Error)
    ),
    tags = ["cities"],
    operation_id = "createCity",
    security(("SessionCookie" = []))
)]
#[post("/city")]
pub async fn create_city(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<NewCity>,
) -> ApiResult<HttpResponse> {
    let city = state.cities.create(payload.into_inner()).await?;
    debug!(username = %user.username(), city_id = city.id, "city created");
    Ok(ok_text())
}

/// Overwrite a city's population.
#[utoipa::path(
    patch,
    path = "/city/population",
    request_body = CityPopulation,
    responses(
        (status = 200, description = "Population stored", body = String, content_type = "text/plain"),
        (status = 400, description = "Malformed body", body = Error),
        (status = 403, description = "No session", body = Error),
        (status = 500, description = "Storage failure", body = Error)
    ),
    tags = ["cities"],
    operation_id = "updatePopulation",
    security(("SessionCookie" = []))
)]
#[patch("/city/population")]
pub async fn update_population(
    state: web::Data<HttpState>,
    payload: web::Json<CityPopulation>,
) -> ApiResult<HttpResponse> {
    state.cities.update_population(payload.into_inner()).await?;
    Ok(ok_text())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Username;
    use crate::inbound::http::auth_gate::RequireSession;
    use crate::inbound::http::error::json_config;
    use crate::inbound::http::session::SessionContext;
    use crate::inbound::http::test_utils::{TestContext, session_cookie, test_session_middleware};
    use actix_web::cookie::Cookie;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::{fixture, rstest};
    use serde_json::{Value, json};

    #[fixture]
    fn ctx() -> TestContext {
        TestContext::new()
    }

    macro_rules! cities_app {
        ($ctx:expr) => {
            actix_test::init_service(
                App::new()
                    .app_data(web::Data::new($ctx.state.clone()))
                    .app_data(json_config())
                    .wrap(test_session_middleware())
                    .route(
                        "/test-login",
                        web::get().to(|session: SessionContext| async move {
                            session.persist_user(&Username::new("alice").expect("valid name"))?;
                            Ok::<_, Error>(HttpResponse::Ok())
                        }),
                    )
                    .service(
                        web::scope("")
                            .wrap(RequireSession)
                            .service(get_city)
                            .service(create_city)
                            .service(update_population),
                    ),
            )
            .await
        };
    }

    async fn login<S, B>(app: &S) -> Cookie<'static>
    where
        S: actix_web::dev::Service<
                actix_http::Request,
                Response = actix_web::dev::ServiceResponse<B>,
                Error = actix_web::Error,
            >,
    {
        let res = actix_test::call_service(app, actix_test::TestRequest::get().uri("/test-login").to_request())
            .await;
        session_cookie(&res).expect("session cookie set")
    }

    fn tokyo() -> Value {
        json!({
            "name": "Tokyo",
            "countryCode": "JPN",
            "district": "Tokyo-to",
            "population": 7_980_230
        })
    }

    #[rstest]
    #[case(actix_test::TestRequest::get().uri("/cities/Tokyo"))]
    #[case(actix_test::TestRequest::post().uri("/city").set_json(tokyo()))]
    #[case(actix_test::TestRequest::patch().uri("/city/population").set_json(json!({"id": 1, "population": 2})))]
    #[actix_web::test]
    async fn gated_routes_require_session(ctx: TestContext, #[case] request: actix_test::TestRequest) {
        let app = cities_app!(ctx);
        let res = actix_test::call_service(&app, request.to_request()).await;

        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["message"], "please login");
        assert_eq!(ctx.cities.calls(), 0);
    }

    #[rstest]
    #[actix_web::test]
    async fn create_then_fetch_round_trips(ctx: TestContext) {
        let app = cities_app!(ctx);
        let cookie = login(&app).await;

        let mut payload = tokyo();
        payload["id"] = json!(999);
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/city")
                .cookie(cookie.clone())
                .set_json(payload)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(actix_test::read_body(res).await, OK_BODY);

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/cities/Tokyo")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        let mut expected = tokyo();
        expected["id"] = json!(1);
        assert_eq!(body, expected);
    }

    #[rstest]
    #[actix_web::test]
    async fn unknown_city_is_zero_valued(ctx: TestContext) {
        let app = cities_app!(ctx);
        let cookie = login(&app).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/cities/Atlantis")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(
            body,
            json!({ "id": 0, "name": "", "countryCode": "", "district": "", "population": 0 })
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn city_names_with_spaces_are_decoded(ctx: TestContext) {
        let app = cities_app!(ctx);
        let cookie = login(&app).await;
        let mut payload = tokyo();
        payload["name"] = json!("New York");
        actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/city")
                .cookie(cookie.clone())
                .set_json(payload)
                .to_request(),
        )
        .await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/cities/New%20York")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["name"], "New York");
    }

    #[rstest]
    #[actix_web::test]
    async fn population_update_is_idempotent(ctx: TestContext) {
        let app = cities_app!(ctx);
        let cookie = login(&app).await;
        actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/city")
                .cookie(cookie.clone())
                .set_json(tokyo())
                .to_request(),
        )
        .await;

        for _ in 0..2 {
            let res = actix_test::call_service(
                &app,
                actix_test::TestRequest::patch()
                    .uri("/city/population")
                    .cookie(cookie.clone())
                    .set_json(json!({ "id": 1, "population": 8_000_000 }))
                    .to_request(),
            )
            .await;
            assert_eq!(res.status(), StatusCode::OK);
            assert_eq!(actix_test::read_body(res).await, OK_BODY);
        }

        let rows = ctx.cities.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].population, 8_000_000);
        assert_eq!(rows[0].district, "Tokyo-to");
    }

    #[rstest]
    #[case("/city", json!("Tokyo"))]
    #[case("/city", json!({ "name": "Tokyo", "countryCode": "JPN", "district": "x", "population": "lots" }))]
    #[case("/city/population", json!({ "id": "one", "population": 2 }))]
    #[actix_web::test]
    async fn malformed_bodies_are_rejected(
        ctx: TestContext,
        #[case] uri: &str,
        #[case] payload: Value,
    ) {
        let app = cities_app!(ctx);
        let cookie = login(&app).await;
        let request = if uri == "/city" {
            actix_test::TestRequest::post()
        } else {
            actix_test::TestRequest::patch()
        };

        let res = actix_test::call_service(
            &app,
            request.uri(uri).cookie(cookie).set_json(payload).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ctx.cities.calls(), 0);
    }

    #[rstest]
    #[actix_web::test]
    async fn partial_city_is_stored_with_zero_values(ctx: TestContext) {
        let app = cities_app!(ctx);
        let cookie = login(&app).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/city")
                .cookie(cookie)
                .set_json(json!({ "name": "Nowhere" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let rows = ctx.cities.rows();
        assert_eq!(rows[0].name, "Nowhere");
        assert_eq!(rows[0].country_code, "");
        assert_eq!(rows[0].population, 0);
    }
}
