//! Operation DTOs
//!
//! The wire format renames a few columns: `operation_name` travels as
//! `operation`, `patient_age` as `age`, `operation_date` as `date` (list and
//! detail responses only carry the day, not the time).

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::infrastructure::database::entities::operation::{
    self, AsaGrade, OperatorLevel, Urgency,
};
use crate::infrastructure::database::repositories::{
    ListQuery, NewOperation, OperationPatch, SortBy, SortOrder,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOperationRequest {
    #[validate(length(min = 1, max = 50, message = "patientId must be 1-50 characters"))]
    pub patient_id: String,
    pub date_of_birth: Option<NaiveDate>,
    #[validate(range(min = 0, max = 150, message = "age must be between 0 and 150"))]
    pub age: i32,
    pub operation_date: NaiveDate,
    #[validate(length(min = 1, max = 200, message = "operatorName must be 1-200 characters"))]
    pub operator_name: String,
    pub operator_level: OperatorLevel,
    pub urgency: Option<Urgency>,
    pub asa_grade: Option<AsaGrade>,
    #[validate(length(min = 1, max = 500, message = "operation must be 1-500 characters"))]
    pub operation: String,
    #[validate(length(min = 1, max = 200, message = "hospital must be 1-200 characters"))]
    pub hospital: String,
    #[validate(length(max = 2000, message = "notes must be at most 2000 characters"))]
    pub notes: Option<String>,
    #[validate(length(max = 2000, message = "complications must be at most 2000 characters"))]
    pub complications: Option<String>,
    pub is_private: bool,
}

impl CreateOperationRequest {
    pub fn into_new_operation(self) -> NewOperation {
        NewOperation {
            patient_id: self.patient_id,
            patient_age: self.age,
            date_of_birth: self.date_of_birth,
            operation_date: self.operation_date,
            operator_name: self.operator_name,
            operator_level: self.operator_level,
            urgency: self.urgency,
            asa_grade: self.asa_grade,
            operation_name: self.operation,
            hospital: self.hospital,
            notes: self.notes,
            complications: self.complications,
            is_private: self.is_private,
        }
    }
}

/// Partial update; absent fields stay untouched.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOperationRequest {
    #[validate(length(min = 1, max = 50, message = "patientId must be 1-50 characters"))]
    pub patient_id: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    #[validate(range(min = 0, max = 150, message = "age must be between 0 and 150"))]
    pub age: Option<i32>,
    pub operation_date: Option<NaiveDate>,
    #[validate(length(min = 1, max = 200, message = "operatorName must be 1-200 characters"))]
    pub operator_name: Option<String>,
    pub operator_level: Option<OperatorLevel>,
    pub urgency: Option<Urgency>,
    pub asa_grade: Option<AsaGrade>,
    #[validate(length(min = 1, max = 500, message = "operation must be 1-500 characters"))]
    pub operation: Option<String>,
    #[validate(length(min = 1, max = 200, message = "hospital must be 1-200 characters"))]
    pub hospital: Option<String>,
    #[validate(length(max = 2000, message = "notes must be at most 2000 characters"))]
    pub notes: Option<String>,
    #[validate(length(max = 2000, message = "complications must be at most 2000 characters"))]
    pub complications: Option<String>,
    pub is_private: Option<bool>,
}

impl UpdateOperationRequest {
    pub fn into_patch(self) -> OperationPatch {
        OperationPatch {
            patient_id: self.patient_id,
            patient_age: self.age,
            date_of_birth: self.date_of_birth,
            operation_date: self.operation_date,
            operator_name: self.operator_name,
            operator_level: self.operator_level,
            urgency: self.urgency,
            asa_grade: self.asa_grade,
            operation_name: self.operation,
            hospital: self.hospital,
            notes: self.notes,
            complications: self.complications,
            is_private: self.is_private,
        }
    }
}

/// Sortable columns, named as they appear on the wire
#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
pub enum SortField {
    #[serde(rename = "operation_date")]
    OperationDate,
    #[serde(rename = "operation_name")]
    OperationName,
    #[serde(rename = "hospital")]
    Hospital,
    #[serde(rename = "created_at")]
    CreatedAt,
}

impl From<SortField> for SortBy {
    fn from(field: SortField) -> Self {
        match field {
            SortField::OperationDate => Self::OperationDate,
            SortField::OperationName => Self::OperationName,
            SortField::Hospital => Self::Hospital,
            SortField::CreatedAt => Self::CreatedAt,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
pub enum SortDirection {
    #[serde(rename = "asc")]
    Asc,
    #[serde(rename = "desc")]
    Desc,
}

impl From<SortDirection> for SortOrder {
    fn from(dir: SortDirection) -> Self {
        match dir {
            SortDirection::Asc => Self::Asc,
            SortDirection::Desc => Self::Desc,
        }
    }
}

/// List query parameters
#[derive(Debug, Default, Deserialize, Validate, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListOperationsParams {
    /// Page number (1-based). Default: 1
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: Option<u32>,
    /// Page size (1-100). Default: 10
    #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
    pub limit: Option<u32>,
    /// Substring match over operation, hospital, patient id and operator name
    #[validate(length(max = 100, message = "search must be at most 100 characters"))]
    pub search: Option<String>,
    /// Sort column. Default: operation_date
    pub sort_by: Option<SortField>,
    /// Sort direction. Default: desc
    pub sort_order: Option<SortDirection>,
}

impl ListOperationsParams {
    pub fn into_query(self) -> ListQuery {
        ListQuery {
            page: self.page.unwrap_or(1),
            limit: self.limit.unwrap_or(10),
            search: self.search.filter(|s| !s.is_empty()),
            sort_by: self.sort_by.map(SortBy::from).unwrap_or(SortBy::OperationDate),
            sort_order: self
                .sort_order
                .map(SortOrder::from)
                .unwrap_or(SortOrder::Desc),
        }
    }
}

/// One logbook entry as it travels to clients
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OperationResponse {
    pub id: String,
    pub patient_id: String,
    pub age: i32,
    pub operation: String,
    pub hospital: String,
    /// Operation day, `YYYY-MM-DD`
    pub date: String,
    pub operator_level: OperatorLevel,
    pub operator_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgency: Option<Urgency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asa_grade: Option<AsaGrade>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complications: Option<String>,
    pub is_private: bool,
    pub created_at: DateTime<Utc>,
}

impl From<operation::Model> for OperationResponse {
    fn from(model: operation::Model) -> Self {
        Self {
            id: model.id,
            patient_id: model.patient_id,
            age: model.patient_age,
            operation: model.operation_name,
            hospital: model.hospital,
            date: model.operation_date.format("%Y-%m-%d").to_string(),
            operator_level: model.operator_level,
            operator_name: model.operator_name,
            urgency: model.urgency,
            asa_grade: model.asa_grade,
            notes: model.notes,
            complications: model.complications,
            is_private: model.is_private,
            created_at: model.created_at,
        }
    }
}

/// Aggregate statistics payload
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OperationStatsResponse {
    pub total_operations: u64,
    pub operations_by_level: BTreeMap<String, u64>,
    pub operations_by_month: BTreeMap<String, u64>,
    pub recent_operations: Vec<OperationResponse>,
}
