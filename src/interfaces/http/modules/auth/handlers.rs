//! Authentication API handlers

use axum::{extract::State, http::StatusCode, Json};

use super::dto::{AuthResponse, LoginRequest, ProfileResponse, RegisterRequest, UserInfo};
use crate::infrastructure::crypto::jwt::{create_token, JwtConfig};
use crate::infrastructure::crypto::password::{hash_password, verify_password};
use crate::infrastructure::database::repositories::{NewUser, UserRepository};
use crate::interfaces::http::common::{ApiError, ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;

/// Auth state
#[derive(Clone)]
pub struct AuthHandlerState {
    pub db: sea_orm::DatabaseConnection,
    pub jwt_config: JwtConfig,
}

impl AuthHandlerState {
    fn users(&self) -> UserRepository {
        UserRepository::new(self.db.clone())
    }
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Successful login", body = ApiResponse<AuthResponse>),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, ApiError> {
    let user = state.users().find_by_user_id(&request.user_id).await?;

    // Same message for unknown user and wrong password
    let Some(user) = user else {
        return Err(ApiError::Unauthenticated(
            "Invalid User ID or Password".to_string(),
        ));
    };

    let password_valid = verify_password(&request.password, &user.password_hash).unwrap_or(false);
    if !password_valid {
        return Err(ApiError::Unauthenticated(
            "Invalid User ID or Password".to_string(),
        ));
    }

    let token = create_token(&user.id, &user.user_id, &state.jwt_config)?;

    let response = AuthResponse {
        token,
        user: UserInfo::from(&user),
    };

    Ok(Json(ApiResponse::success_with_message(
        response,
        "Login successful",
    )))
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = ApiResponse<AuthResponse>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "User ID or email already exists")
    )
)]
pub async fn register(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AuthResponse>>), ApiError> {
    let users = state.users();

    if users.user_id_exists(&request.user_id).await? {
        return Err(ApiError::Conflict("User ID already exists".to_string()));
    }

    if let Some(ref email) = request.email {
        if users.email_exists(email).await? {
            return Err(ApiError::Conflict("Email already exists".to_string()));
        }
    }

    let password_hash = hash_password(&request.password)?;

    let user = users
        .create(NewUser {
            user_id: request.user_id,
            password_hash,
            full_name: request.full_name,
            email: request.email,
            specialty: request.specialty,
            hospital_affiliation: request.hospital_affiliation,
        })
        .await?;

    let token = create_token(&user.id, &user.user_id, &state.jwt_config)?;

    let response = AuthResponse {
        token,
        user: UserInfo::from(&user),
    };

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            response,
            "Registration successful",
        )),
    ))
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user profile", body = ApiResponse<ProfileResponse>),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "User no longer exists")
    )
)]
pub async fn get_current_user(
    State(state): State<AuthHandlerState>,
    user: Option<axum::Extension<AuthenticatedUser>>,
) -> Result<Json<ApiResponse<ProfileResponse>>, ApiError> {
    let Some(user) = user else {
        return Err(ApiError::Unauthenticated(
            "User not authenticated".to_string(),
        ));
    };

    let db_user = state.users().find_by_id(&user.id).await?;

    let Some(db_user) = db_user else {
        return Err(ApiError::NotFound("User not found".to_string()));
    };

    Ok(Json(ApiResponse::success(ProfileResponse::from(&db_user))))
}

// ── Tests ──────────────────────────────────────────────────────
