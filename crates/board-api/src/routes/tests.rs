use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use board_common::{
    AppConfig, AppSettings, AuthConfig, CorsConfig, DatabaseConfig, Environment, JwtConfig,
    RateLimitConfig, ServerConfig, StorageConfig,
};
use board_core::{Ad, User, UserRole};
use board_service::testing::{TestContext, TEST_JWT_SECRET, TEST_PASSWORD};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::server::create_app;
use crate::state::AppState;

const BOUNDARY: &str = "board-test-boundary";

fn test_config() -> AppConfig {
    AppConfig {
        app: AppSettings {
            name: "classifieds-board-test".to_string(),
            env: Environment::Development,
        },
        api: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            url: String::new(),
            max_connections: 1,
            min_connections: 0,
            run_migrations: false,
        },
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry: 3600,
        },
        auth: AuthConfig {
            allow_admin_registration: false,
        },
        rate_limit: RateLimitConfig {
            requests_per_second: 10,
            burst: 50,
        },
        cors: CorsConfig::default(),
        storage: StorageConfig {
            upload_dir: "./uploads".to_string(),
        },
    }
}

fn app(t: &TestContext) -> Router {
    create_app(AppState::new(t.ctx.clone(), test_config()))
}

fn token(t: &TestContext, user: &User) -> String {
    t.ctx
        .jwt_service()
        .issue(&user.email, user.role)
        .unwrap()
        .token
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

async fn send_json(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let (status, body) = send(app, request).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, value)
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn authed(method: &str, uri: &str, token: &str) -> axum::http::request::Builder {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Parts are `(name, file name and content type, bytes)`
fn multipart_body(parts: &[(&str, Option<(&str, &str)>, &[u8])]) -> Body {
    let mut body = Vec::new();
    for (name, file, bytes) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match file {
            Some((file_name, content_type)) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                     Content-Type: {content_type}\r\n\r\n"
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{name}\"\r\n\
                     Content-Type: application/json\r\n\r\n"
                )
                .as_bytes(),
            ),
        }
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    Body::from(body)
}

fn multipart_request(
    method: &str,
    uri: &str,
    token: &str,
    parts: &[(&str, Option<(&str, &str)>, &[u8])],
) -> Request<Body> {
    authed(method, uri, token)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(multipart_body(parts))
        .unwrap()
}

const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

async fn seeded() -> (TestContext, User, User, User, Ad) {
    let t = TestContext::new();
    let owner = t.seed_user("owner@example.com", UserRole::Regular).await;
    let other = t.seed_user("other@example.com", UserRole::Regular).await;
    let admin = t.seed_user("admin@example.com", UserRole::Admin).await;
    let ad = t.seed_ad(&owner).await;
    (t, owner, other, admin, ad)
}

#[tokio::test]
async fn test_state_hands_out_services_over_one_context() {
    let (t, owner, other, _, ad) = seeded().await;
    let state = AppState::new(t.ctx.clone(), test_config());

    assert!(state.database().is_none());
    assert_eq!(state.config().app.name, "classifieds-board-test");
    assert!(format!("{state:?}").contains("classifieds-board-test"));

    let detail = state.ads().get(ad.id).await.unwrap();
    assert_eq!(detail.pk, ad.id.into_inner());
    assert_eq!(detail.email, owner.email);

    let identity = state.jwt_service().authenticate(&token(&t, &other)).unwrap();
    assert_eq!(identity.email, other.email);
    assert_eq!(state.users().me(&identity).await.unwrap().id, other.id.into_inner());
    assert!(!state.authorization().can_mutate_ad(ad.id, &identity).await);
    assert!(
        state
            .authorization()
            .can_mutate_ad(ad.id, &TestContext::identity(&owner))
            .await
    );
    assert_eq!(state.comments().list_for_ad(ad.id).await.unwrap().count, 0);
}

#[tokio::test]
async fn test_health_endpoints() {
    let t = TestContext::new();
    let app = app(&t);

    let (status, body) = send_json(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send_json(&app, get("/health/ready")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["checks"]["database"], "not_configured");
}

#[tokio::test]
async fn test_register_login_and_me() {
    let t = TestContext::new();
    let app = app(&t);

    let registration = json!({
        "username": "ann@example.com",
        "password": TEST_PASSWORD,
        "firstName": "Ann",
        "lastName": "Lee",
        "phone": "+7 (999) 123-45-67",
        "role": "USER"
    });
    let (status, body) = send_json(&app, json_request("POST", "/register", None, &registration)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], "ann@example.com");

    let (status, _) = send_json(&app, json_request("POST", "/register", None, &registration)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let credentials = json!({"username": "ann@example.com", "password": TEST_PASSWORD});
    let (status, body) = send_json(&app, json_request("POST", "/login", None, &credentials)).await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();

    let request = authed("GET", "/users/me", &token).body(Body::empty()).unwrap();
    let (status, body) = send_json(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["firstName"], "Ann");
    assert_eq!(body["role"], "USER");
}

#[tokio::test]
async fn test_register_validation_details() {
    let t = TestContext::new();
    let app = app(&t);

    let registration = json!({
        "username": "ann@example.com",
        "password": "short",
        "firstName": "Ann",
        "lastName": "Lee",
        "phone": "not a phone"
    });
    let (status, body) = send_json(&app, json_request("POST", "/register", None, &registration)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"]["details"]["phone"].is_array());
}

#[tokio::test]
async fn test_bad_login_is_unauthorized() {
    let (t, owner, ..) = seeded().await;
    let app = app(&t);

    let credentials = json!({"username": owner.email, "password": "wrong-password"});
    let (status, _) = send_json(&app, json_request("POST", "/login", None, &credentials)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_ad_and_fetch_image() {
    let t = TestContext::new();
    let ann = t.seed_user("ann@example.com", UserRole::Regular).await;
    let app = app(&t);
    let token = token(&t, &ann);

    let properties = json!({"title": "Bike", "price": 100, "description": "Red bicycle, barely used"});
    let request = multipart_request(
        "POST",
        "/ads",
        &token,
        &[
            ("properties", None, properties.to_string().as_bytes()),
            ("image", Some(("bike.png", "image/png")), PNG),
        ],
    );
    let (status, body) = send_json(&app, request).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["author"], ann.id.into_inner());
    let pk = body["pk"].as_i64().unwrap();
    assert_eq!(body["image"], format!("/ads/{pk}/image"));

    let (status, body) = send_json(&app, get("/ads")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);

    let (status, body) = send_json(&app, get(&format!("/ads/{pk}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "ann@example.com");
    assert_eq!(body["authorFirstName"], ann.first_name);

    let response = app
        .clone()
        .oneshot(get(&format!("/ads/{pk}/image")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], PNG);
}

#[tokio::test]
async fn test_create_ad_rejections() {
    let t = TestContext::new();
    let ann = t.seed_user("ann@example.com", UserRole::Regular).await;
    let app = app(&t);
    let token = token(&t, &ann);
    let properties = json!({"title": "Bike", "price": 100, "description": "Red bicycle, barely used"});

    // No image part
    let request = multipart_request(
        "POST",
        "/ads",
        &token,
        &[("properties", None, properties.to_string().as_bytes())],
    );
    let (status, body) = send_json(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Image is required");

    // Disallowed type
    let request = multipart_request(
        "POST",
        "/ads",
        &token,
        &[
            ("properties", None, properties.to_string().as_bytes()),
            ("image", Some(("anim.gif", "image/gif")), &b"GIF89a"[..]),
        ],
    );
    let (status, _) = send_json(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // No token
    let request = Request::post("/ads")
        .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(multipart_body(&[("properties", None, properties.to_string().as_bytes())]))
        .unwrap();
    let (status, _) = send_json(&app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    assert!(t.ads.is_empty());
}

#[tokio::test]
async fn test_guard_blocks_non_owner_and_admits_admin() {
    let (t, owner, other, admin, ad) = seeded().await;
    let app = app(&t);
    let uri = format!("/ads/{}", ad.id);
    let patch = json!({"price": 1});

    let (status, body) = send_json(&app, json_request("PATCH", &uri, Some(&token(&t, &other)), &patch)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "FORBIDDEN");

    let request = authed("DELETE", &uri, &token(&t, &other)).body(Body::empty()).unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send_json(&app, json_request("PATCH", &uri, Some(&token(&t, &owner)), &patch)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["price"], 1);
    assert_eq!(body["title"], ad.title);

    let request = authed("DELETE", &uri, &token(&t, &admin)).body(Body::empty()).unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, get(&uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_replace_ad_image_guarded() {
    let (t, owner, other, _, ad) = seeded().await;
    let app = app(&t);
    let uri = format!("/ads/{}/image", ad.id);
    let parts: &[(&str, Option<(&str, &str)>, &[u8])] =
        &[("image", Some(("new.jpg", "image/jpeg")), PNG)];

    let (status, _) = send(&app, multipart_request("PATCH", &uri, &token(&t, &other), parts)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, multipart_request("PATCH", &uri, &token(&t, &owner), parts)).await;
    assert_eq!(status, StatusCode::OK);

    let response = app.clone().oneshot(get(&uri)).await.unwrap();
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/jpeg");
}

#[tokio::test]
async fn test_comment_flow_and_relation_mismatch() {
    let (t, owner, other, _, ad) = seeded().await;
    let second_ad = t.seed_ad(&owner).await;
    let app = app(&t);
    let other_token = token(&t, &other);

    let (status, body) = send_json(
        &app,
        json_request(
            "POST",
            &format!("/ads/{}/comments", ad.id),
            Some(&other_token),
            &json!({"text": "Is it still available?"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["authorFirstName"], other.first_name);
    let pk = body["pk"].as_i64().unwrap();

    let (status, body) = send_json(&app, get(&format!("/ads/{}/comments", ad.id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);

    // Addressed through the wrong ad, even by its author
    let request = authed("DELETE", &format!("/ads/{}/comments/{pk}", second_ad.id), &other_token)
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send_json(
        &app,
        json_request(
            "PATCH",
            &format!("/ads/{}/comments/{pk}", ad.id),
            Some(&token(&t, &owner)),
            &json!({"text": "Edited by the ad owner"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let request = authed("DELETE", &format!("/ads/{}/comments/{pk}", ad.id), &other_token)
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_short_comment_is_rejected() {
    let (t, owner, _, _, ad) = seeded().await;
    let app = app(&t);

    let (status, body) = send_json(
        &app,
        json_request(
            "POST",
            &format!("/ads/{}/comments", ad.id),
            Some(&token(&t, &owner)),
            &json!({"text": "1234567"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Comment text must be 8 to 64 characters");
}

#[tokio::test]
async fn test_invalid_path_and_missing_images() {
    let (t, owner, ..) = seeded().await;
    let app = app(&t);

    let (status, body) = send_json(&app, get("/ads/abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_PATH_PARAMETER");

    let (status, _) = send(&app, get("/ads/999/image")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, get(&format!("/users/{}/image", owner.id))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_avatar_and_password() {
    let (t, owner, ..) = seeded().await;
    let app = app(&t);
    let token = token(&t, &owner);

    let request = multipart_request(
        "PATCH",
        "/users/me/image",
        &token,
        &[("image", Some(("me.png", "image/png")), PNG)],
    );
    let (status, body) = send_json(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["image"], format!("/users/{}/image", owner.id));

    let (status, bytes) = send(&app, get(&format!("/users/{}/image", owner.id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, PNG);

    let change = json!({"currentPassword": "not-the-password", "newPassword": "new-password"});
    let (status, _) = send(&app, json_request("POST", "/users/set_password", Some(&token), &change)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let change = json!({"currentPassword": TEST_PASSWORD, "newPassword": "new-password"});
    let (status, _) = send(&app, json_request("POST", "/users/set_password", Some(&token), &change)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_list_my_ads_requires_token() {
    let (t, owner, other, ..) = seeded().await;
    let app = app(&t);

    let (status, _) = send(&app, get("/ads/me")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let request = authed("GET", "/ads/me", &token(&t, &owner)).body(Body::empty()).unwrap();
    let (_, body) = send_json(&app, request).await;
    assert_eq!(body["count"], 1);

    let request = authed("GET", "/ads/me", &token(&t, &other)).body(Body::empty()).unwrap();
    let (_, body) = send_json(&app, request).await;
    assert_eq!(body["count"], 0);

    let request = authed("GET", "/ads/me", "not-a-token").body(Body::empty()).unwrap();
    let (status, body) = send_json(&app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "INVALID_TOKEN");
}
