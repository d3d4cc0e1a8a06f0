//! Operation API handlers
//!
//! Every route requires an authenticated identity; all reads and writes are
//! owner-scoped at the repository level. Note the deliberate asymmetry from
//! the original behavior: fetching a foreign record answers 403, while
//! updating or deleting one collapses the ownership mismatch into 404.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    CreateOperationRequest, ListOperationsParams, OperationResponse, OperationStatsResponse,
    UpdateOperationRequest,
};
use crate::infrastructure::database::repositories::OperationRepository;
use crate::interfaces::http::common::{
    ApiError, ApiResponse, Pagination, ValidatedJson, ValidatedQuery,
};
use crate::interfaces::http::middleware::AuthenticatedUser;

/// Operations handler state
#[derive(Clone)]
pub struct OperationHandlerState {
    pub db: sea_orm::DatabaseConnection,
}

impl OperationHandlerState {
    fn operations(&self) -> OperationRepository {
        OperationRepository::new(self.db.clone())
    }
}

fn require_user(user: Option<axum::Extension<AuthenticatedUser>>) -> Result<AuthenticatedUser, ApiError> {
    user.map(|axum::Extension(u)| u)
        .ok_or_else(|| ApiError::Unauthenticated("User not authenticated".to_string()))
}

#[utoipa::path(
    get,
    path = "/api/operations",
    tag = "Operations",
    security(("bearer_auth" = [])),
    params(ListOperationsParams),
    responses(
        (status = 200, description = "Page of the caller's operations", body = ApiResponse<Vec<OperationResponse>>),
        (status = 400, description = "Invalid query parameters"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_operations(
    State(state): State<OperationHandlerState>,
    user: Option<axum::Extension<AuthenticatedUser>>,
    ValidatedQuery(params): ValidatedQuery<ListOperationsParams>,
) -> Result<Json<ApiResponse<Vec<OperationResponse>>>, ApiError> {
    let user = require_user(user)?;
    let query = params.into_query();

    let (rows, total) = state.operations().list_for_user(&user.id, &query).await?;

    let items: Vec<OperationResponse> = rows.into_iter().map(OperationResponse::from).collect();
    let pagination = Pagination::new(query.page, query.limit, total);

    Ok(Json(ApiResponse::paginated(items, pagination)))
}

#[utoipa::path(
    post,
    path = "/api/operations",
    tag = "Operations",
    security(("bearer_auth" = [])),
    request_body = CreateOperationRequest,
    responses(
        (status = 201, description = "Operation created", body = ApiResponse<OperationResponse>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn create_operation(
    State(state): State<OperationHandlerState>,
    user: Option<axum::Extension<AuthenticatedUser>>,
    ValidatedJson(request): ValidatedJson<CreateOperationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<OperationResponse>>), ApiError> {
    let user = require_user(user)?;

    let created = state
        .operations()
        .create(&user.id, request.into_new_operation())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            OperationResponse::from(created),
            "Operation created successfully",
        )),
    ))
}

#[utoipa::path(
    get,
    path = "/api/operations/stats",
    tag = "Operations",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Aggregate statistics for the caller's logbook", body = ApiResponse<OperationStatsResponse>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_operation_stats(
    State(state): State<OperationHandlerState>,
    user: Option<axum::Extension<AuthenticatedUser>>,
) -> Result<Json<ApiResponse<OperationStatsResponse>>, ApiError> {
    let user = require_user(user)?;

    let stats = state.operations().stats_for_user(&user.id).await?;

    let response = OperationStatsResponse {
        total_operations: stats.total,
        operations_by_level: stats.by_level,
        operations_by_month: stats.by_month,
        recent_operations: stats
            .recent
            .into_iter()
            .map(OperationResponse::from)
            .collect(),
    };

    Ok(Json(ApiResponse::success(response)))
}

#[utoipa::path(
    get,
    path = "/api/operations/{id}",
    tag = "Operations",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Operation id")),
    responses(
        (status = 200, description = "Operation details", body = ApiResponse<OperationResponse>),
        (status = 403, description = "Owned by a different user"),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_operation(
    State(state): State<OperationHandlerState>,
    user: Option<axum::Extension<AuthenticatedUser>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<OperationResponse>>, ApiError> {
    let user = require_user(user)?;

    let operation = state.operations().find_by_id(&id).await?;

    let Some(operation) = operation else {
        return Err(ApiError::NotFound("Operation not found".to_string()));
    };

    // Ownership mismatch is distinguished from non-existence here
    if operation.user_id != user.id {
        return Err(ApiError::Forbidden("Access denied".to_string()));
    }

    Ok(Json(ApiResponse::success(OperationResponse::from(operation))))
}

#[utoipa::path(
    put,
    path = "/api/operations/{id}",
    tag = "Operations",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Operation id")),
    request_body = UpdateOperationRequest,
    responses(
        (status = 200, description = "Operation updated", body = ApiResponse<OperationResponse>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Not found or not owned by the caller")
    )
)]
pub async fn update_operation(
    State(state): State<OperationHandlerState>,
    user: Option<axum::Extension<AuthenticatedUser>>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateOperationRequest>,
) -> Result<Json<ApiResponse<OperationResponse>>, ApiError> {
    let user = require_user(user)?;

    let updated = state
        .operations()
        .update(&id, &user.id, request.into_patch())
        .await?;

    let Some(updated) = updated else {
        return Err(ApiError::NotFound(
            "Operation not found or access denied".to_string(),
        ));
    };

    Ok(Json(ApiResponse::success_with_message(
        OperationResponse::from(updated),
        "Operation updated successfully",
    )))
}

#[utoipa::path(
    delete,
    path = "/api/operations/{id}",
    tag = "Operations",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Operation id")),
    responses(
        (status = 200, description = "Operation deleted"),
        (status = 404, description = "Not found or not owned by the caller")
    )
)]
pub async fn delete_operation(
    State(state): State<OperationHandlerState>,
    user: Option<axum::Extension<AuthenticatedUser>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let user = require_user(user)?;

    let deleted = state.operations().delete(&id, &user.id).await?;

    if !deleted {
        return Err(ApiError::NotFound(
            "Operation not found or access denied".to_string(),
        ));
    }

    Ok(Json(ApiResponse::message("Operation deleted successfully")))
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::infrastructure::database::repositories::UserRepository;
    use crate::interfaces::http::testing::{
        create_operation, operation_body, register_user, send, test_app,
    };

    #[tokio::test]
    async fn create_returns_the_wire_shape() {
        let (app, _db) = test_app().await;
        let token = register_user(&app, "surgeon1").await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/operations",
            Some(&token),
            Some(operation_body("Appendicectomy")),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "Operation created successfully");
        let data = &body["data"];
        assert_eq!(data["operation"], "Appendicectomy");
        assert_eq!(data["age"], 58);
        assert_eq!(data["operatorLevel"], "Specialist Registrar");
        assert!(data.get("operationName").is_none());
        assert!(data.get("patientAge").is_none());
    }

    #[tokio::test]
    async fn create_rejects_out_of_range_age() {
        let (app, _db) = test_app().await;
        let token = register_user(&app, "surgeon1").await;

        for age in [-1, 151] {
            let mut body = operation_body("Appendicectomy");
            body["age"] = json!(age);
            let (status, resp) = send(&app, "POST", "/api/operations", Some(&token), Some(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "age {age}: {resp}");
            assert_eq!(resp["error"], "Validation failed");
        }

        for age in [0, 150] {
            let mut body = operation_body("Appendicectomy");
            body["age"] = json!(age);
            let (status, _) = send(&app, "POST", "/api/operations", Some(&token), Some(body)).await;
            assert_eq!(status, StatusCode::CREATED, "age {age} should be accepted");
        }
    }

    #[tokio::test]
    async fn list_requires_authentication() {
        let (app, _db) = test_app().await;
        let (status, body) = send(&app, "GET", "/api/operations", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Access token is required");
    }

    #[tokio::test]
    async fn list_paginates_round_trip() {
        let (app, _db) = test_app().await;
        let token = register_user(&app, "surgeon1").await;

        for i in 0..15 {
            create_operation(&app, &token, &format!("Operation {i:02}")).await;
        }

        let (status, body) = send(
            &app,
            "GET",
            "/api/operations?limit=10&page=2",
            Some(&token),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 5);
        assert_eq!(body["pagination"]["page"], 2);
        assert_eq!(body["pagination"]["limit"], 10);
        assert_eq!(body["pagination"]["total"], 15);
        assert_eq!(body["pagination"]["totalPages"], 2);
    }

    #[tokio::test]
    async fn list_rejects_bad_query() {
        let (app, _db) = test_app().await;
        let token = register_user(&app, "surgeon1").await;

        let (status, _) = send(&app, "GET", "/api/operations?limit=500", Some(&token), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            "GET",
            "/api/operations?sortBy=password_hash",
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn list_search_matches_substrings_across_columns() {
        let (app, _db) = test_app().await;
        let token = register_user(&app, "surgeon1").await;

        create_operation(&app, &token, "Laparoscopic cholecystectomy").await;
        create_operation(&app, &token, "Total hip replacement").await;

        let (status, body) = send(
            &app,
            "GET",
            "/api/operations?search=cholecyst",
            Some(&token),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let items = body["data"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["operation"], "Laparoscopic cholecystectomy");

        // hospital is searched too; both rows share it
        let (_, body) = send(
            &app,
            "GET",
            "/api/operations?search=Elsewhere",
            Some(&token),
            None,
        )
        .await;
        assert_eq!(body["data"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn lists_are_scoped_to_the_owner() {
        let (app, _db) = test_app().await;
        let token_a = register_user(&app, "surgeon-a").await;
        let token_b = register_user(&app, "surgeon-b").await;

        create_operation(&app, &token_a, "Appendicectomy").await;

        let (_, body) = send(&app, "GET", "/api/operations", Some(&token_b), None).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 0);
        assert_eq!(body["pagination"]["total"], 0);
    }

    #[tokio::test]
    async fn get_distinguishes_foreign_from_missing() {
        let (app, _db) = test_app().await;
        let token_a = register_user(&app, "surgeon-a").await;
        let token_b = register_user(&app, "surgeon-b").await;

        let id = create_operation(&app, &token_a, "Appendicectomy").await;

        // Owner reads it fine
        let (status, _) = send(&app, "GET", &format!("/api/operations/{id}"), Some(&token_a), None).await;
        assert_eq!(status, StatusCode::OK);

        // Foreign record: 403, not 404
        let (status, body) = send(&app, "GET", &format!("/api/operations/{id}"), Some(&token_b), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "Access denied");

        // Missing record: 404
        let (status, body) = send(&app, "GET", "/api/operations/no-such-id", Some(&token_b), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Operation not found");
    }

    #[tokio::test]
    async fn update_changes_only_supplied_fields() {
        let (app, _db) = test_app().await;
        let token = register_user(&app, "surgeon1").await;
        let id = create_operation(&app, &token, "Appendicectomy").await;

        let (status, body) = send(
            &app,
            "PUT",
            &format!("/api/operations/{id}"),
            Some(&token),
            Some(json!({"notes": "Uncomplicated"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Operation updated successfully");
        let data = &body["data"];
        assert_eq!(data["notes"], "Uncomplicated");
        // Everything else untouched
        assert_eq!(data["operation"], "Appendicectomy");
        assert_eq!(data["hospital"], "St Elsewhere");
        assert_eq!(data["age"], 58);
        assert_eq!(data["operatorLevel"], "Specialist Registrar");
    }

    #[tokio::test]
    async fn update_collapses_ownership_mismatch_into_404() {
        let (app, _db) = test_app().await;
        let token_a = register_user(&app, "surgeon-a").await;
        let token_b = register_user(&app, "surgeon-b").await;
        let id = create_operation(&app, &token_a, "Appendicectomy").await;

        let (status, body) = send(
            &app,
            "PUT",
            &format!("/api/operations/{id}"),
            Some(&token_b),
            Some(json!({"notes": "not mine"})),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Operation not found or access denied");
    }

    #[tokio::test]
    async fn delete_twice_then_404() {
        let (app, _db) = test_app().await;
        let token = register_user(&app, "surgeon1").await;
        let id = create_operation(&app, &token, "Appendicectomy").await;

        let (status, body) = send(&app, "DELETE", &format!("/api/operations/{id}"), Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Operation deleted successfully");

        let (status, body) = send(&app, "DELETE", &format!("/api/operations/{id}"), Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Operation not found or access denied");
    }

    #[tokio::test]
    async fn delete_by_foreign_user_is_404_and_keeps_the_row() {
        let (app, _db) = test_app().await;
        let token_a = register_user(&app, "surgeon-a").await;
        let token_b = register_user(&app, "surgeon-b").await;
        let id = create_operation(&app, &token_a, "Appendicectomy").await;

        let (status, _) = send(&app, "DELETE", &format!("/api/operations/{id}"), Some(&token_b), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        // Still readable by its owner
        let (status, _) = send(&app, "GET", &format!("/api/operations/{id}"), Some(&token_a), None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn stats_sum_and_recent_ordering() {
        let (app, _db) = test_app().await;
        let token = register_user(&app, "surgeon1").await;

        // 4 entries as Specialist Registrar, then 3 as Consultant
        for i in 0..4 {
            create_operation(&app, &token, &format!("Registrar case {i}")).await;
        }
        for i in 0..3 {
            let mut body = operation_body(&format!("Consultant case {i}"));
            body["operatorLevel"] = json!("Consultant");
            let (status, _) = send(&app, "POST", "/api/operations", Some(&token), Some(body)).await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, body) = send(&app, "GET", "/api/operations/stats", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);

        let data = &body["data"];
        assert_eq!(data["totalOperations"], 7);
        assert_eq!(data["operationsByLevel"]["Specialist Registrar"], 4);
        assert_eq!(data["operationsByLevel"]["Consultant"], 3);

        // Per-level counts sum to the total
        let by_level_sum: u64 = data["operationsByLevel"]
            .as_object()
            .unwrap()
            .values()
            .map(|v| v.as_u64().unwrap())
            .sum();
        assert_eq!(by_level_sum, 7);

        // All seven fall in the current month bucket
        let month = chrono::Utc::now().date_naive().format("%Y-%m").to_string();
        assert_eq!(data["operationsByMonth"][&month], 7);

        // Recent list: newest first, capped at 5
        let recent = data["recentOperations"].as_array().unwrap();
        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0]["operation"], "Consultant case 2");
        assert_eq!(recent[4]["operation"], "Registrar case 2");
    }

    #[tokio::test]
    async fn stats_are_scoped_to_the_owner() {
        let (app, _db) = test_app().await;
        let token_a = register_user(&app, "surgeon-a").await;
        let token_b = register_user(&app, "surgeon-b").await;

        create_operation(&app, &token_a, "Appendicectomy").await;

        let (_, body) = send(&app, "GET", "/api/operations/stats", Some(&token_b), None).await;
        assert_eq!(body["data"]["totalOperations"], 0);
        assert!(body["data"]["recentOperations"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn deleting_a_user_cascades_to_their_operations() {
        let (app, db) = test_app().await;
        let token = register_user(&app, "surgeon1").await;
        let op_id = create_operation(&app, &token, "Appendicectomy").await;

        let (_, me) = send(&app, "GET", "/api/auth/me", Some(&token), None).await;
        let user_row_id = me["data"]["id"].as_str().unwrap().to_string();

        assert!(UserRepository::new(db.clone()).delete(&user_row_id).await.unwrap());

        use sea_orm::EntityTrait;
        use crate::infrastructure::database::entities::operation;
        let leftover = operation::Entity::find_by_id(&op_id).one(&db).await.unwrap();
        assert!(leftover.is_none(), "operation should be cascade-deleted");
    }
}
