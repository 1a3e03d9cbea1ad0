//! Authentication API handlers.
//!
//! ```text
//! POST /api/v1/login {"email":"admin@example.com","password":"password"}
//! POST /api/v1/logout
//! GET  /api/v1/auth/sources
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{LoginForm, RegisteredSource};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::{CookieSessionGateway, SessionContext};
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/v1/login`.
///
/// Example JSON:
/// `{"email":"admin@example.com","password":"password"}`
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct LoginRequest {
    /// Login identifier; an email address for the internal source.
    pub email: String,
    /// Secret, passed through verbatim.
    pub password: String,
}

/// Authenticate against the configured source and establish a session.
///
/// Uses the centralised `Error` type so clients get a consistent error
/// schema across all endpoints. Field-shape failures come back as 400 with
/// per-field details; credential failures as 401 with a deliberately
/// non-enumerating message.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = crate::domain::Error),
        (status = 401, description = "Invalid credentials", body = crate::domain::Error),
        (status = 500, description = "Internal server error")
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let LoginRequest { email, password } = payload.into_inner();
    let form = LoginForm::new(&email, password);
    let gateway = CookieSessionGateway::new(&session);

    state.auth.login(form, &gateway).await?;
    Ok(HttpResponse::Ok().finish())
}

/// Invalidate the current session.
///
/// Always succeeds: logging out without a session is a no-op.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses(
        (status = 200, description = "Session cleared"),
    ),
    tags = ["auth"],
    operation_id = "logout"
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> ApiResult<HttpResponse> {
    if let Some(user_id) = session.user_id()? {
        tracing::info!(user = %user_id, "session terminated");
    }
    session.purge();
    Ok(HttpResponse::Ok().finish())
}

/// List the registered authentication sources for login-page display.
#[utoipa::path(
    get,
    path = "/api/v1/auth/sources",
    responses(
        (status = 200, description = "Registered sources", body = [RegisteredSource]),
        (status = 500, description = "Internal server error")
    ),
    tags = ["auth"],
    operation_id = "listAuthSources",
    security([])
)]
#[get("/auth/sources")]
pub async fn auth_sources(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<RegisteredSource>>> {
    Ok(web::Json(state.auth.sources()))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test, web};
    use rstest::rstest;
    use serde_json::Value;

    use super::*;
    use crate::inbound::http::test_utils::{seeded_state, test_session_middleware};

    fn test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new().service(
            web::scope("/api/v1")
                .wrap(test_session_middleware())
                .app_data(web::Data::new(seeded_state()))
                .service(login)
                .service(logout)
                .service(auth_sources),
        )
    }

    fn login_request(email: &str, password: &str) -> actix_http::Request {
        actix_test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(&LoginRequest {
                email: email.into(),
                password: password.into(),
            })
            .to_request()
    }

    #[actix_web::test]
    async fn login_success_sets_the_session_cookie() {
        let app = actix_test::init_service(test_app()).await;
        let response = actix_test::call_service(&app, login_request("admin@example.com", "password")).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response
                .response()
                .cookies()
                .any(|cookie| cookie.name() == "session" && !cookie.value().is_empty())
        );
    }

    #[rstest]
    #[case("", "password", "email", "Email/Username not provided")]
    #[case("admin@example.com", "", "password", "Password not provided")]
    #[case("not-an-email", "password", "email", "Email/Username is not valid")]
    #[actix_web::test]
    async fn login_rejects_malformed_payloads_with_field_details(
        #[case] email: &str,
        #[case] password: &str,
        #[case] field: &str,
        #[case] message: &str,
    ) {
        let app = actix_test::init_service(test_app()).await;
        let response = actix_test::call_service(&app, login_request(email, password)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("error payload");
        assert_eq!(
            value.get("message").and_then(Value::as_str),
            Some(message)
        );
        assert_eq!(
            value.get("code").and_then(Value::as_str),
            Some("invalid_request")
        );
        let first = value
            .pointer("/details/fields/0")
            .expect("field detail entry");
        assert_eq!(first.get("field").and_then(Value::as_str), Some(field));
        assert_eq!(first.get("message").and_then(Value::as_str), Some(message));
    }

    #[rstest]
    #[case("admin@example.com", "wrong-password")]
    #[case("nobody@example.com", "password")]
    #[actix_web::test]
    async fn login_failures_share_one_generic_message(
        #[case] email: &str,
        #[case] password: &str,
    ) {
        let app = actix_test::init_service(test_app()).await;
        let response = actix_test::call_service(&app, login_request(email, password)).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("error payload");
        assert_eq!(
            value.get("message").and_then(Value::as_str),
            Some("Incorrect username or password.")
        );
        assert!(
            value.get("details").is_none(),
            "credential failures carry no field details"
        );
    }

    #[actix_web::test]
    async fn failed_logins_do_not_set_a_session_cookie() {
        let app = actix_test::init_service(test_app()).await;
        let response = actix_test::call_service(&app, login_request("admin@example.com", "wrong-password")).await;

        assert!(
            response
                .response()
                .cookies()
                .all(|cookie| cookie.name() != "session" || cookie.value().is_empty())
        );
    }

    #[actix_web::test]
    async fn logout_clears_an_established_session() {
        let app = actix_test::init_service(test_app()).await;
        let login_res = actix_test::call_service(&app, login_request("admin@example.com", "password")).await;
        let cookie = login_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie")
            .into_owned();

        let logout_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/logout")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(logout_res.status(), StatusCode::OK);
        let cleared = logout_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("removal cookie");
        assert!(cleared.value().is_empty());
    }

    #[actix_web::test]
    async fn logout_without_a_session_is_a_no_op() {
        let app = actix_test::init_service(test_app()).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/logout")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn source_listing_names_the_active_source() {
        let app = actix_test::init_service(test_app()).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/auth/sources")
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("sources payload");
        let sources = value.as_array().expect("array");
        assert_eq!(sources.len(), 1);
        let first = sources.first().expect("internal entry");
        assert_eq!(first.get("name").and_then(Value::as_str), Some("internal"));
        assert_eq!(
            first.get("friendlyName").and_then(Value::as_str),
            Some("internal")
        );
        assert_eq!(first.get("active").and_then(Value::as_bool), Some(true));
    }
}
