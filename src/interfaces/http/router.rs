//! API Router with Swagger UI

use std::path::Path;

use axum::{
    extract::OriginalUri,
    http::{Method, StatusCode},
    middleware,
    routing::{get, post},
    Json, Router,
};
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::interfaces::http::common::{ApiResponse, Pagination};
use crate::interfaces::http::middleware::{auth_middleware, AuthState};
use crate::interfaces::http::modules::{auth, cpd, health, operations};

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Auth
        auth::login,
        auth::register,
        auth::get_current_user,
        // Operations
        operations::list_operations,
        operations::create_operation,
        operations::get_operation_stats,
        operations::get_operation,
        operations::update_operation,
        operations::delete_operation,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            Pagination,
            // Health
            health::HealthResponse,
            health::ComponentHealth,
            // Auth
            auth::LoginRequest,
            auth::RegisterRequest,
            auth::AuthResponse,
            auth::UserInfo,
            auth::ProfileResponse,
            // Operations
            operations::CreateOperationRequest,
            operations::UpdateOperationRequest,
            operations::OperationResponse,
            operations::OperationStatsResponse,
            // CPD (schema shipped ahead of the feature)
            cpd::CreateCpdEntryRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service liveness. Use for uptime and readiness monitoring."),
        (name = "Authentication", description = "User login and registration. The token returned in `data.token` is passed in the `Authorization: Bearer <token>` header."),
        (name = "Operations", description = "The surgical logbook: CRUD over the caller's own operation entries, with search, pagination, sorting and aggregate statistics. Every record belongs to exactly one user."),
    ),
    info(
        title = "Medical Logbook API",
        version = "1.0.0",
        description = "REST API for a personal surgical operation logbook.

## Authentication

Obtain a token via `POST /api/auth/login` or `POST /api/auth/register` and
pass it in the `Authorization: Bearer <token>` header. All `/api/operations`
routes and `/api/auth/me` require it.

## Response format

Every endpoint answers with the standard envelope:
```json
{\"success\": true, \"data\": {...}, \"message\": \"...\"}
```

On failure:
```json
{\"success\": false, \"error\": \"description\"}
```

List endpoints add a `pagination` block:
```json
{\"page\": 1, \"limit\": 10, \"total\": 42, \"totalPages\": 5}
```
"
    )
)]
pub struct ApiDoc;

/// Structured 404 for unmatched method+path pairs under `/api`
async fn route_not_found(method: Method, OriginalUri(uri): OriginalUri) -> (StatusCode, Json<ApiResponse<()>>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::error(format!(
            "Route {} {} not found",
            method,
            uri.path()
        ))),
    )
}

/// Create the application router: JSON API under `/api`, Swagger UI under
/// `/docs`, static web client from `web_dir` at the root.
pub fn create_api_router(db: DatabaseConnection, jwt_config: JwtConfig, web_dir: &Path) -> Router {
    let middleware_state = AuthState {
        jwt_config: jwt_config.clone(),
    };

    let auth_state = auth::AuthHandlerState {
        db: db.clone(),
        jwt_config,
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Auth routes (public)
    let auth_routes = Router::new()
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .method_not_allowed_fallback(route_not_found)
        .with_state(auth_state.clone());

    // Auth routes (protected)
    let auth_protected_routes = Router::new()
        .route("/me", get(auth::get_current_user))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(auth_state);

    // Operation routes (protected). "/stats" must sit above "/{id}" in the
    // same router so the literal segment wins.
    let operation_state = operations::OperationHandlerState { db: db.clone() };
    let operation_routes = Router::new()
        .route(
            "/",
            get(operations::list_operations).post(operations::create_operation),
        )
        .route("/stats", get(operations::get_operation_stats))
        .route(
            "/{id}",
            get(operations::get_operation)
                .put(operations::update_operation)
                .delete(operations::delete_operation),
        )
        .method_not_allowed_fallback(route_not_found)
        .layer(middleware::from_fn_with_state(
            middleware_state,
            auth_middleware,
        ))
        .with_state(operation_state);

    // Health route (public)
    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health::HealthState { db });

    // Everything under /api answers the structured 404 for unknown routes
    // and for known paths hit with the wrong method
    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/auth", auth_protected_routes)
        .nest("/operations", operation_routes)
        .merge(health_routes)
        .fallback(route_not_found)
        .method_not_allowed_fallback(route_not_found);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    // Build router
    Router::new()
        // Swagger UI
        .merge(swagger_routes)
        // JSON API
        .nest("/api", api_routes)
        // Static web client
        .fallback_service(ServeDir::new(web_dir))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

// ── Tests ──────────────────────────────────────────────────────
