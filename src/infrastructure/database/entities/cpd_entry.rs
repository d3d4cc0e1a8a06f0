//! Continuing professional development (CPD) entry
//!
//! Declared in the schema ahead of the CPD feature; no routes use it yet.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cpd_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Owning user (internal id)
    pub user_id: String,

    pub title: String,
    #[sea_orm(nullable)]
    pub description: Option<String>,
    pub category: String,
    pub hours: f64,
    pub date_completed: NaiveDate,
    #[sea_orm(nullable)]
    pub provider: Option<String>,
    #[sea_orm(nullable)]
    pub certificate_url: Option<String>,

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
