//! Operation entity: one surgical case entry owned by a user

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Seniority of the clinician performing the operation
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(30))")]
pub enum OperatorLevel {
    #[sea_orm(string_value = "Consultant")]
    Consultant,
    #[sea_orm(string_value = "Specialist Registrar")]
    #[serde(rename = "Specialist Registrar")]
    SpecialistRegistrar,
    #[sea_orm(string_value = "Core Trainee")]
    #[serde(rename = "Core Trainee")]
    CoreTrainee,
    #[sea_orm(string_value = "Foundation Doctor")]
    #[serde(rename = "Foundation Doctor")]
    FoundationDoctor,
    #[sea_orm(string_value = "Medical Student")]
    #[serde(rename = "Medical Student")]
    MedicalStudent,
    #[sea_orm(string_value = "Other")]
    Other,
}

impl std::fmt::Display for OperatorLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Consultant => write!(f, "Consultant"),
            Self::SpecialistRegistrar => write!(f, "Specialist Registrar"),
            Self::CoreTrainee => write!(f, "Core Trainee"),
            Self::FoundationDoctor => write!(f, "Foundation Doctor"),
            Self::MedicalStudent => write!(f, "Medical Student"),
            Self::Other => write!(f, "Other"),
        }
    }
}

/// Case urgency (NCEPOD classification)
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum Urgency {
    #[sea_orm(string_value = "Elective")]
    Elective,
    #[sea_orm(string_value = "Urgent")]
    Urgent,
    #[sea_orm(string_value = "Emergency")]
    Emergency,
    #[sea_orm(string_value = "Immediate")]
    Immediate,
}

/// ASA physical-status grade
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
pub enum AsaGrade {
    #[sea_orm(string_value = "ASA I")]
    #[serde(rename = "ASA I")]
    I,
    #[sea_orm(string_value = "ASA II")]
    #[serde(rename = "ASA II")]
    Ii,
    #[sea_orm(string_value = "ASA III")]
    #[serde(rename = "ASA III")]
    Iii,
    #[sea_orm(string_value = "ASA IV")]
    #[serde(rename = "ASA IV")]
    Iv,
    #[sea_orm(string_value = "ASA V")]
    #[serde(rename = "ASA V")]
    V,
    #[sea_orm(string_value = "ASA VI")]
    #[serde(rename = "ASA VI")]
    Vi,
}

/// Operation model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "operations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Owning user (internal id). Ownership is exclusive and immutable.
    pub user_id: String,

    pub patient_id: String,
    pub patient_age: i32,
    #[sea_orm(nullable)]
    pub date_of_birth: Option<NaiveDate>,
    pub operation_date: NaiveDate,

    pub operator_name: String,
    pub operator_level: OperatorLevel,
    #[sea_orm(nullable)]
    pub urgency: Option<Urgency>,
    #[sea_orm(nullable)]
    pub asa_grade: Option<AsaGrade>,

    pub operation_name: String,
    pub hospital: String,
    #[sea_orm(nullable)]
    pub notes: Option<String>,
    #[sea_orm(nullable)]
    pub complications: Option<String>,
    pub is_private: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
