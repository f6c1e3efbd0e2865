//! Server setup and initialization
//!
//! `create_app_state` is the composition root: it opens the pools, applies
//! migrations, and wires the stores into a `ServiceContext`.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use dating_cache::{RedisPool, RedisSessionStore};
use dating_common::{AppConfig, AppError, JwtService};
use dating_db::{create_pool, run_migrations, PgUnitOfWorkFactory, PgUserStore, PoolSettings};
use dating_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::{apply_api_middleware, apply_middleware};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let api = apply_api_middleware(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    );
    let router = apply_middleware(api.merge(health_routes()));
    router.with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&PoolSettings::from(&config.database))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if config.database.run_migrations {
        run_migrations(&pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
    }

    info!("Connecting to Redis...");
    let redis_pool =
        RedisPool::from_config(&config.redis).map_err(|e| AppError::Cache(e.to_string()))?;
    let shared_redis = Arc::new(redis_pool.clone());

    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.expiry_seconds,
    ));

    let service_context = ServiceContextBuilder::new()
        .pool(pool.clone())
        .redis_pool(shared_redis)
        .user_store(Arc::new(PgUserStore::new(pool.clone())))
        .unit_of_work(Arc::new(PgUnitOfWorkFactory::new(pool)))
        .session_store(Arc::new(RedisSessionStore::new(redis_pool)))
        .jwt_service(jwt_service)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server until ctrl-c
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler available; run until the process is killed.
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid listen address: {e}")))?;

    let state = create_app_state(config).await?;
    let app = create_app(state);

    run_server(app, addr).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use dating_service::testing::InMemoryStore;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn test_config() -> AppConfig {
        AppConfig::from_lookup(|key: &str| match key {
            "DATABASE_URL" => Some("postgres://localhost/unused".to_string()),
            "REDIS_URL" => Some("redis://localhost".to_string()),
            "JWT_SECRET" => Some("test-secret".to_string()),
            "RATE_LIMIT_BURST" => Some("1000".to_string()),
            _ => None,
        })
        .unwrap()
    }

    fn test_app() -> Router {
        let store = Arc::new(InMemoryStore::new());
        let ctx = ServiceContextBuilder::new()
            .user_store(store.clone())
            .unit_of_work(store.clone())
            .session_store(store)
            .jwt_service(Arc::new(JwtService::new("test-secret", 1800)))
            .build()
            .unwrap();
        create_app(AppState::new(ctx, test_config()))
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn post_json(uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
        let mut builder = Request::post(uri).header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get(uri: &str, token: &str) -> Request<Body> {
        Request::get(uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap()
    }

    async fn register_and_login(app: &Router, email: &str, gender: &str, lat: f64) -> (i64, String) {
        let (status, user) = send(
            app,
            post_json(
                "/user/create",
                None,
                &json!({
                    "email": email,
                    "password": "pa55word",
                    "name": email,
                    "gender": gender,
                    "dob": "1995-05-05",
                    "locationLat": lat,
                    "locationLong": 0.0,
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{user}");

        let (status, token) = send(
            app,
            post_json("/login", None, &json!({"email": email, "password": "pa55word"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        (
            user["id"].as_i64().unwrap(),
            token["token"].as_str().unwrap().to_string(),
        )
    }

    #[tokio::test]
    async fn test_healthz() {
        let app = test_app();
        let response = app
            .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"OK");
    }

    #[tokio::test]
    async fn test_readiness_without_pools_is_unavailable() {
        let app = test_app();
        let (status, body) = send(
            &app,
            Request::get("/health/ready").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "not_ready");
    }

    #[tokio::test]
    async fn test_create_user_validation_error_body() {
        let app = test_app();
        let (status, body) = send(
            &app,
            post_json(
                "/user/create",
                None,
                &json!({"email": "bad", "password": "x", "name": "X", "gender": "Q", "dob": "1990-01-01"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["details"].get("email").is_some());
        assert!(body["error"]["details"].get("gender").is_some());
    }

    #[tokio::test]
    async fn test_create_user_response_has_no_password() {
        let app = test_app();
        let (status, body) = send(
            &app,
            post_json(
                "/user/create",
                None,
                &json!({"email": "a@example.com", "password": "pw", "name": "A", "gender": "F", "dob": "1990-01-01"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(body.get("password").is_none());
        assert!(body.get("location_lat").is_none());
        assert_eq!(body["gender"], "F");
    }

    #[tokio::test]
    async fn test_protected_routes_require_bearer() {
        let app = test_app();
        let (status, body) = send(
            &app,
            post_json("/swipe", None, &json!({"user_id": 1, "preference": "yes"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "MISSING_AUTHORIZATION");

        let (status, _) = send(&app, get("/discover", "garbage")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let basic = Request::get("/discover")
            .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&app, basic).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "INVALID_AUTHORIZATION_FORMAT");
    }

    #[tokio::test]
    async fn test_login_unknown_email_is_404() {
        let app = test_app();
        let (status, body) = send(
            &app,
            post_json("/login", None, &json!({"email": "ghost@example.com", "password": "x"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "UNKNOWN_EMAIL");
    }

    #[tokio::test]
    async fn test_swipe_match_and_discover_flow() {
        let app = test_app();
        let (alice, alice_token) = register_and_login(&app, "alice@example.com", "F", 0.0).await;
        let (bob, bob_token) = register_and_login(&app, "bob@example.com", "M", 0.1).await;
        let (carol, _) = register_and_login(&app, "carol@example.com", "F", 0.05).await;

        let (status, body) = send(
            &app,
            get("/discover?gender=F&min_age=18&max_age=99", &bob_token),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let ids: Vec<i64> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["user"]["id"].as_i64().unwrap())
            .collect();
        // carol is nearer to bob than alice is
        assert_eq!(ids, vec![carol, alice]);

        let (status, first) = send(
            &app,
            post_json("/swipe", Some(&alice_token), &json!({"user_id": bob, "preference": "yes"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(first, json!({"matched": false}));

        let (_, second) = send(
            &app,
            post_json("/swipe", Some(&bob_token), &json!({"user_id": alice, "preference": "yes"})),
        )
        .await;
        assert_eq!(second["matched"], true);
        assert!(second["match_id"].is_i64());

        let (_, body) = send(&app, get("/discover", &bob_token)).await;
        let ids: Vec<i64> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["user"]["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![carol]);
    }

    #[tokio::test]
    async fn test_swipe_on_self_and_unknown_user() {
        let app = test_app();
        let (me, token) = register_and_login(&app, "me@example.com", "M", 0.0).await;

        let (status, body) = send(
            &app,
            post_json("/swipe", Some(&token), &json!({"user_id": me, "preference": "yes"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "CANNOT_SWIPE_SELF");

        let (status, _) = send(
            &app,
            post_json("/swipe", Some(&token), &json!({"user_id": 9999, "preference": "no"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(
            &app,
            post_json("/swipe", Some(&token), &json!({"user_id": me, "preference": "maybe"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_BODY");
    }

    #[tokio::test]
    async fn test_logout_revokes_token() {
        let app = test_app();
        let (_, token) = register_and_login(&app, "me@example.com", "M", 0.0).await;

        let response = app
            .clone()
            .oneshot(
                Request::post("/logout")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let (status, body) = send(&app, get("/discover", &token)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "SESSION_REVOKED");
    }
}
