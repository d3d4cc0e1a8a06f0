use std::collections::BTreeMap;

use chrono::{Months, NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::infrastructure::database::entities::operation::{
    self, AsaGrade, OperatorLevel, Urgency,
};

/// Columns a list query may sort on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    OperationDate,
    OperationName,
    Hospital,
    CreatedAt,
}

impl SortBy {
    fn column(self) -> operation::Column {
        match self {
            Self::OperationDate => operation::Column::OperationDate,
            Self::OperationName => operation::Column::OperationName,
            Self::Hospital => operation::Column::Hospital,
            Self::CreatedAt => operation::Column::CreatedAt,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Normalized pagination/search/sort parameters for list queries
#[derive(Debug, Clone)]
pub struct ListQuery {
    /// 1-based page number
    pub page: u32,
    /// Page size, 1–100
    pub limit: u32,
    pub search: Option<String>,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            search: None,
            sort_by: SortBy::OperationDate,
            sort_order: SortOrder::Desc,
        }
    }
}

/// Fields required to create an operation row
#[derive(Debug, Clone)]
pub struct NewOperation {
    pub patient_id: String,
    pub patient_age: i32,
    pub date_of_birth: Option<NaiveDate>,
    pub operation_date: NaiveDate,
    pub operator_name: String,
    pub operator_level: OperatorLevel,
    pub urgency: Option<Urgency>,
    pub asa_grade: Option<AsaGrade>,
    pub operation_name: String,
    pub hospital: String,
    pub notes: Option<String>,
    pub complications: Option<String>,
    pub is_private: bool,
}

/// Partial update; only supplied fields change.
#[derive(Debug, Clone, Default)]
pub struct OperationPatch {
    pub patient_id: Option<String>,
    pub patient_age: Option<i32>,
    pub date_of_birth: Option<NaiveDate>,
    pub operation_date: Option<NaiveDate>,
    pub operator_name: Option<String>,
    pub operator_level: Option<OperatorLevel>,
    pub urgency: Option<Urgency>,
    pub asa_grade: Option<AsaGrade>,
    pub operation_name: Option<String>,
    pub hospital: Option<String>,
    pub notes: Option<String>,
    pub complications: Option<String>,
    pub is_private: Option<bool>,
}

/// Aggregate figures for one owner's logbook
#[derive(Debug)]
pub struct OperationStats {
    pub total: u64,
    /// Count per operator level
    pub by_level: BTreeMap<String, u64>,
    /// Count per "YYYY-MM" month, trailing 12 months
    pub by_month: BTreeMap<String, u64>,
    /// Five most recently created entries, newest first
    pub recent: Vec<operation::Model>,
}

pub struct OperationRepository {
    db: DatabaseConnection,
}

impl OperationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<operation::Model>, DbErr> {
        operation::Entity::find_by_id(id).one(&self.db).await
    }

    /// Paginated list of one owner's operations with search and sorting.
    /// Returns the page of rows plus the total matching count.
    pub async fn list_for_user(
        &self,
        owner_id: &str,
        query: &ListQuery,
    ) -> Result<(Vec<operation::Model>, u64), DbErr> {
        let mut find = operation::Entity::find().filter(operation::Column::UserId.eq(owner_id));

        // OR-substring match across the searchable text columns
        if let Some(ref search) = query.search {
            if !search.is_empty() {
                find = find.filter(
                    Condition::any()
                        .add(operation::Column::OperationName.contains(search))
                        .add(operation::Column::Hospital.contains(search))
                        .add(operation::Column::PatientId.contains(search))
                        .add(operation::Column::OperatorName.contains(search)),
                );
            }
        }

        let total = find.clone().count(&self.db).await?;

        let column = query.sort_by.column();
        find = match query.sort_order {
            SortOrder::Asc => find.order_by_asc(column),
            SortOrder::Desc => find.order_by_desc(column),
        };

        let offset = u64::from(query.page - 1) * u64::from(query.limit);
        let rows = find
            .offset(offset)
            .limit(u64::from(query.limit))
            .all(&self.db)
            .await?;

        Ok((rows, total))
    }

    pub async fn create(
        &self,
        owner_id: &str,
        data: NewOperation,
    ) -> Result<operation::Model, DbErr> {
        let now = Utc::now();

        let row = operation::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            user_id: Set(owner_id.to_string()),
            patient_id: Set(data.patient_id),
            patient_age: Set(data.patient_age),
            date_of_birth: Set(data.date_of_birth),
            operation_date: Set(data.operation_date),
            operator_name: Set(data.operator_name),
            operator_level: Set(data.operator_level),
            urgency: Set(data.urgency),
            asa_grade: Set(data.asa_grade),
            operation_name: Set(data.operation_name),
            hospital: Set(data.hospital),
            notes: Set(data.notes),
            complications: Set(data.complications),
            is_private: Set(data.is_private),
            created_at: Set(now),
            updated_at: Set(now),
        };

        row.insert(&self.db).await
    }

    /// Apply a partial update to a row the owner holds.
    /// Returns `None` when the id does not exist or belongs to another user.
    pub async fn update(
        &self,
        id: &str,
        owner_id: &str,
        patch: OperationPatch,
    ) -> Result<Option<operation::Model>, DbErr> {
        let existing = operation::Entity::find_by_id(id)
            .filter(operation::Column::UserId.eq(owner_id))
            .one(&self.db)
            .await?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut active: operation::ActiveModel = existing.into();

        if let Some(patient_id) = patch.patient_id {
            active.patient_id = Set(patient_id);
        }
        if let Some(patient_age) = patch.patient_age {
            active.patient_age = Set(patient_age);
        }
        if let Some(date_of_birth) = patch.date_of_birth {
            active.date_of_birth = Set(Some(date_of_birth));
        }
        if let Some(operation_date) = patch.operation_date {
            active.operation_date = Set(operation_date);
        }
        if let Some(operator_name) = patch.operator_name {
            active.operator_name = Set(operator_name);
        }
        if let Some(operator_level) = patch.operator_level {
            active.operator_level = Set(operator_level);
        }
        if let Some(urgency) = patch.urgency {
            active.urgency = Set(Some(urgency));
        }
        if let Some(asa_grade) = patch.asa_grade {
            active.asa_grade = Set(Some(asa_grade));
        }
        if let Some(operation_name) = patch.operation_name {
            active.operation_name = Set(operation_name);
        }
        if let Some(hospital) = patch.hospital {
            active.hospital = Set(hospital);
        }
        if let Some(notes) = patch.notes {
            active.notes = Set(Some(notes));
        }
        if let Some(complications) = patch.complications {
            active.complications = Set(Some(complications));
        }
        if let Some(is_private) = patch.is_private {
            active.is_private = Set(is_private);
        }

        active.updated_at = Set(Utc::now());

        Ok(Some(active.update(&self.db).await?))
    }

    /// Delete by id and owner. Returns `false` when nothing matched.
    pub async fn delete(&self, id: &str, owner_id: &str) -> Result<bool, DbErr> {
        let result = operation::Entity::delete_many()
            .filter(operation::Column::Id.eq(id))
            .filter(operation::Column::UserId.eq(owner_id))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Aggregate statistics for one owner's logbook.
    pub async fn stats_for_user(&self, owner_id: &str) -> Result<OperationStats, DbErr> {
        let total = operation::Entity::find()
            .filter(operation::Column::UserId.eq(owner_id))
            .count(&self.db)
            .await?;

        // Count per operator level
        let level_rows: Vec<(OperatorLevel, i64)> = operation::Entity::find()
            .select_only()
            .column(operation::Column::OperatorLevel)
            .column_as(operation::Column::Id.count(), "count")
            .filter(operation::Column::UserId.eq(owner_id))
            .group_by(operation::Column::OperatorLevel)
            .into_tuple()
            .all(&self.db)
            .await?;

        let by_level: BTreeMap<String, u64> = level_rows
            .into_iter()
            .map(|(level, count)| (level.to_string(), count.max(0) as u64))
            .collect();

        // Count per calendar month over the trailing 12 months, bucketed
        // in Rust so the query stays portable across backends
        let today = Utc::now().date_naive();
        let since = today
            .checked_sub_months(Months::new(12))
            .unwrap_or(NaiveDate::MIN);

        let dates: Vec<NaiveDate> = operation::Entity::find()
            .select_only()
            .column(operation::Column::OperationDate)
            .filter(operation::Column::UserId.eq(owner_id))
            .filter(operation::Column::OperationDate.gte(since))
            .into_tuple()
            .all(&self.db)
            .await?;

        let mut by_month: BTreeMap<String, u64> = BTreeMap::new();
        for date in dates {
            *by_month.entry(date.format("%Y-%m").to_string()).or_insert(0) += 1;
        }

        let recent = operation::Entity::find()
            .filter(operation::Column::UserId.eq(owner_id))
            .order_by_desc(operation::Column::CreatedAt)
            .limit(5)
            .all(&self.db)
            .await?;

        Ok(OperationStats {
            total,
            by_level,
            by_month,
            recent,
        })
    }
}
