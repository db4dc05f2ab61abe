use actix_web::cookie::{Cookie, SameSite};
use actix_web::{test, web, App};
use serde_json::json;
use shopimport_server::{configure, AppState, Settings};

const DEMO_EMAIL: &str = "demo@example.com";
const DEMO_PASSWORD: &str = "demo-password";

fn state_with(demo_mode: bool) -> web::Data<AppState> {
    let mut config = Settings::new_for_test().expect("Failed to load test config");
    config.auth.demo_mode = demo_mode;
    web::Data::new(AppState::new(config).expect("Failed to build state"))
}

macro_rules! app {
    ($state:expr) => {
        test::init_service(App::new().app_data($state.clone()).configure(configure)).await
    };
}

fn session_cookie(resp: &actix_web::dev::ServiceResponse) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == "session_token")
        .map(|c| c.into_owned())
}

#[actix_web::test]
async fn test_login_me_logout_flow() {
    let state = state_with(false);
    let app = app!(state);

    let resp = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": DEMO_EMAIL, "password": DEMO_PASSWORD }))
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), 200);

    let cookie = session_cookie(&resp).expect("login should set the session cookie");
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.path(), Some("/"));
    assert_eq!(cookie.same_site(), Some(SameSite::Strict));
    assert_eq!(cookie.max_age().map(|d| d.whole_seconds()), Some(604_800));

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["email"], DEMO_EMAIL);
    assert_eq!(body["user"]["id"], "1");

    let resp = test::TestRequest::get()
        .uri("/api/auth/me")
        .cookie(cookie.clone())
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["isAuthenticated"], true);
    assert_eq!(body["user"]["email"], DEMO_EMAIL);

    let resp = test::TestRequest::post()
        .uri("/api/auth/logout")
        .cookie(cookie.clone())
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), 200);
    let cleared = session_cookie(&resp).expect("logout should clear the cookie");
    assert_eq!(cleared.value(), "");
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);

    // the old token is revoked server-side even if the client keeps it
    let resp = test::TestRequest::get()
        .uri("/api/auth/me")
        .cookie(cookie)
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn test_login_missing_fields() {
    let state = state_with(false);
    let app = app!(state);

    for body in [
        json!({ "password": DEMO_PASSWORD }),
        json!({ "email": DEMO_EMAIL }),
        json!({ "email": "", "password": DEMO_PASSWORD }),
        json!({}),
    ] {
        let resp = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(body)
            .send_request(&app)
            .await;
        assert_eq!(resp.status(), 400);
    }
}

#[actix_web::test]
async fn test_login_malformed_json() {
    let state = state_with(false);
    let app = app!(state);

    let resp = test::TestRequest::post()
        .uri("/api/auth/login")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{not json")
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_invalid_login() {
    let state = state_with(false);
    let app = app!(state);

    for (email, password) in [
        ("nonexistent@example.com", "whatever"),
        (DEMO_EMAIL, "wrong-password"),
    ] {
        let resp = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "email": email, "password": password }))
            .send_request(&app)
            .await;
        assert_eq!(resp.status(), 401);
        assert!(session_cookie(&resp).is_none());

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["status"], 401);
    }
}

#[actix_web::test]
async fn test_demo_mode_accepts_any_password() {
    let state = state_with(true);
    let app = app!(state);

    let resp = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": DEMO_EMAIL, "password": "anything" }))
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), 200);
    assert!(session_cookie(&resp).is_some());

    let resp = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "other@example.com", "password": "anything" }))
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn test_me_without_or_with_bad_session() {
    let state = state_with(false);
    let app = app!(state);

    let resp = test::TestRequest::get().uri("/api/auth/me").send_request(&app).await;
    assert_eq!(resp.status(), 401);

    let resp = test::TestRequest::get()
        .uri("/api/auth/me")
        .cookie(Cookie::new("session_token", "forged"))
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn test_me_with_dangling_user_is_not_found() {
    let state = state_with(false);
    let app = app!(state);

    let token = state.auth_service.create_session("ghost").await.unwrap();
    let resp = test::TestRequest::get()
        .uri("/api/auth/me")
        .cookie(Cookie::new("session_token", token))
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn test_logout_without_cookie_succeeds() {
    let state = state_with(false);
    let app = app!(state);

    let resp = test::TestRequest::post().uri("/api/auth/logout").send_request(&app).await;
    assert_eq!(resp.status(), 200);
}
