use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};

use crate::infrastructure::database::entities::user;

/// Fields required to create a user row. The password arrives pre-hashed.
#[derive(Debug)]
pub struct NewUser {
    pub user_id: String,
    pub password_hash: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub specialty: Option<String>,
    pub hospital_affiliation: Option<String>,
}

/// Profile patch; only supplied fields change.
#[derive(Debug, Default)]
pub struct UserPatch {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub specialty: Option<String>,
    pub hospital_affiliation: Option<String>,
}

pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<user::Model>, DbErr> {
        user::Entity::find_by_id(id).one(&self.db).await
    }

    pub async fn find_by_user_id(&self, user_id: &str) -> Result<Option<user::Model>, DbErr> {
        user::Entity::find()
            .filter(user::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>, DbErr> {
        user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
    }

    pub async fn user_id_exists(&self, user_id: &str) -> Result<bool, DbErr> {
        Ok(self.find_by_user_id(user_id).await?.is_some())
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool, DbErr> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    pub async fn create(&self, new_user: NewUser) -> Result<user::Model, DbErr> {
        let now = Utc::now();

        let row = user::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            user_id: Set(new_user.user_id),
            password_hash: Set(new_user.password_hash),
            full_name: Set(new_user.full_name),
            email: Set(new_user.email),
            specialty: Set(new_user.specialty),
            hospital_affiliation: Set(new_user.hospital_affiliation),
            created_at: Set(now),
            updated_at: Set(now),
        };

        row.insert(&self.db).await
    }

    /// Apply a partial profile update. Returns `None` when the row is gone.
    pub async fn update(&self, id: &str, patch: UserPatch) -> Result<Option<user::Model>, DbErr> {
        let Some(existing) = user::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active: user::ActiveModel = existing.into();

        if let Some(full_name) = patch.full_name {
            active.full_name = Set(Some(full_name));
        }
        if let Some(email) = patch.email {
            active.email = Set(Some(email));
        }
        if let Some(specialty) = patch.specialty {
            active.specialty = Set(Some(specialty));
        }
        if let Some(hospital_affiliation) = patch.hospital_affiliation {
            active.hospital_affiliation = Set(Some(hospital_affiliation));
        }

        active.updated_at = Set(Utc::now());

        Ok(Some(active.update(&self.db).await?))
    }

    pub async fn update_password(&self, id: &str, new_password_hash: &str) -> Result<bool, DbErr> {
        let Some(existing) = user::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(false);
        };

        let mut active: user::ActiveModel = existing.into();
        active.password_hash = Set(new_password_hash.to_string());
        active.updated_at = Set(Utc::now());
        active.update(&self.db).await?;

        Ok(true)
    }

    /// Delete a user row. Dependent operations and CPD entries cascade.
    pub async fn delete(&self, id: &str) -> Result<bool, DbErr> {
        let result = user::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{ConnectOptions, Database, DatabaseConnection};
    use sea_orm_migration::MigratorTrait;

    use super::*;
    use crate::infrastructure::database::migrator::Migrator;

    async fn repo() -> UserRepository {
        let mut opts = ConnectOptions::new("sqlite::memory:");
        opts.max_connections(1);
        let db: DatabaseConnection = Database::connect(opts).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        UserRepository::new(db)
    }

    fn new_user(user_id: &str) -> NewUser {
        NewUser {
            user_id: user_id.to_string(),
            password_hash: "$2b$12$hash".to_string(),
            full_name: None,
            email: None,
            specialty: None,
            hospital_affiliation: None,
        }
    }

    #[tokio::test]
    async fn lookups_by_natural_keys() {
        let users = repo().await;
        let mut data = new_user("surgeon1");
        data.email = Some("s1@example.org".to_string());
        let created = users.create(data).await.unwrap();

        assert!(users.user_id_exists("surgeon1").await.unwrap());
        assert!(!users.user_id_exists("surgeon2").await.unwrap());
        assert!(users.email_exists("s1@example.org").await.unwrap());

        let by_user_id = users.find_by_user_id("surgeon1").await.unwrap().unwrap();
        assert_eq!(by_user_id.id, created.id);
        let by_email = users.find_by_email("s1@example.org").await.unwrap().unwrap();
        assert_eq!(by_email.id, created.id);
    }

    #[tokio::test]
    async fn patch_touches_only_supplied_fields() {
        let users = repo().await;
        let mut data = new_user("surgeon1");
        data.full_name = Some("A. Surgeon".to_string());
        data.specialty = Some("General Surgery".to_string());
        let created = users.create(data).await.unwrap();

        let updated = users
            .update(
                &created.id,
                UserPatch {
                    specialty: Some("Vascular Surgery".to_string()),
                    ..UserPatch::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.specialty.as_deref(), Some("Vascular Surgery"));
        assert_eq!(updated.full_name.as_deref(), Some("A. Surgeon"));
        assert_eq!(updated.user_id, "surgeon1");
    }

    #[tokio::test]
    async fn update_password_replaces_the_hash() {
        let users = repo().await;
        let created = users.create(new_user("surgeon1")).await.unwrap();

        assert!(users.update_password(&created.id, "$2b$12$new").await.unwrap());
        let reloaded = users.find_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(reloaded.password_hash, "$2b$12$new");

        assert!(!users.update_password("missing", "$2b$12$x").await.unwrap());
    }

    #[tokio::test]
    async fn delete_reports_missing_rows() {
        let users = repo().await;
        let created = users.create(new_user("surgeon1")).await.unwrap();

        assert!(users.delete(&created.id).await.unwrap());
        assert!(!users.delete(&created.id).await.unwrap());
    }
}
