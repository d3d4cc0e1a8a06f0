//! Authentication DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::infrastructure::database::entities::user;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 100, message = "userId is required"))]
    pub user_id: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 100, message = "userId must be 3-100 characters"))]
    pub user_id: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
    #[validate(length(max = 200, message = "fullName must be at most 200 characters"))]
    pub full_name: Option<String>,
    #[validate(email(message = "invalid email format"))]
    pub email: Option<String>,
    #[validate(length(max = 100, message = "specialty must be at most 100 characters"))]
    pub specialty: Option<String>,
    #[validate(length(max = 200, message = "hospitalAffiliation must be at most 200 characters"))]
    pub hospital_affiliation: Option<String>,
}

/// Public user projection returned with a token. Never carries the hash.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: String,
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl From<&user::Model> for UserInfo {
    fn from(model: &user::Model) -> Self {
        Self {
            id: model.id.clone(),
            user_id: model.user_id.clone(),
            full_name: model.full_name.clone(),
            email: model.email.clone(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserInfo,
}

/// Full profile for the current-user endpoint
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: String,
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hospital_affiliation: Option<String>,
}

impl From<&user::Model> for ProfileResponse {
    fn from(model: &user::Model) -> Self {
        Self {
            id: model.id.clone(),
            user_id: model.user_id.clone(),
            full_name: model.full_name.clone(),
            email: model.email.clone(),
            specialty: model.specialty.clone(),
            hospital_affiliation: model.hospital_affiliation.clone(),
        }
    }
}
