use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    FromQueryResult, QueryFilter, QueryOrder, QuerySelect, Set, SqlErr, TransactionTrait,
};

use crate::errors::InternalError;
use crate::errors::internal::CredentialError;
use crate::providers::role_provider::ROLE_MEMBER;
use crate::types::db::{role, user, user_info, user_role};
use crate::types::dto::user::UserProfileFields;

/// Fields needed to verify a logon attempt
#[derive(Clone, FromQueryResult)]
pub struct UserForAuth {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
    pub is_authorised: bool,
}

impl std::fmt::Debug for UserForAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserForAuth")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .field("is_authorised", &self.is_authorised)
            .finish()
    }
}

/// A registration ready to persist; the password is already hashed
#[derive(Debug)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub profile: UserProfileFields,
}

/// CredentialStore manages identities, password hashes and role grants
pub struct CredentialStore {
    db: DatabaseConnection,
}

impl CredentialStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Load the credential record for a username
    ///
    /// # Returns
    /// * `Err(CredentialError::UsernameNotFound)` - No user with that name
    pub async fn get_user_for_auth(&self, username: &str) -> Result<UserForAuth, InternalError> {
        let found = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .select_only()
            .column(user::Column::Id)
            .column(user::Column::Username)
            .column(user::Column::PasswordHash)
            .column(user::Column::IsAuthorised)
            .into_model::<UserForAuth>()
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_user_for_auth", e))?;

        found.ok_or_else(|| CredentialError::UsernameNotFound(username.to_string()).into())
    }

    /// Names of all roles granted to a user, sorted
    pub async fn get_roles_for_user(&self, user_id: i32) -> Result<Vec<String>, InternalError> {
        let roles = role::Entity::find()
            .inner_join(user_role::Entity)
            .filter(user_role::Column::UserId.eq(user_id))
            .order_by_asc(role::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("get_roles_for_user", e))?;

        Ok(roles.into_iter().map(|r| r.name).collect())
    }

    /// Register a user together with their profile and the Member role
    ///
    /// User, profile and role grant are written in one transaction.
    ///
    /// # Returns
    /// * `Ok(i32)` - id of the new user
    /// * `Err(CredentialError::DuplicateUsername)` - username already taken
    pub async fn add_user(&self, new_user: NewUser) -> Result<i32, InternalError> {
        let existing = user::Entity::find()
            .filter(user::Column::Username.eq(&new_user.username))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("add_user", e))?;

        if existing.is_some() {
            return Err(CredentialError::DuplicateUsername(new_user.username).into());
        }

        let now = Utc::now().timestamp();
        let txn = self.db.begin().await.map_err(InternalError::transaction_begin)?;

        let created = user::ActiveModel {
            username: Set(new_user.username.clone()),
            password_hash: Set(new_user.password_hash),
            is_authorised: Set(true),
            last_logon: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                CredentialError::DuplicateUsername(new_user.username.clone()).into()
            }
            _ => InternalError::database("insert_user", e),
        })?;

        let mut profile = user_info::ActiveModel {
            user_id: Set(created.id),
            version: Set(0),
            updated_at: Set(now),
            ..Default::default()
        };
        new_user.profile.apply_to(&mut profile);
        profile
            .insert(&txn)
            .await
            .map_err(|e| InternalError::database("insert_user_info", e))?;

        let member = Self::find_role(&txn, ROLE_MEMBER).await?;
        Self::insert_grant(&txn, created.id, member.id).await?;

        txn.commit().await.map_err(InternalError::transaction_commit)?;

        tracing::info!(user_id = created.id, "User registered: {}", created.username);
        Ok(created.id)
    }

    /// Grant a role by name
    ///
    /// # Returns
    /// * `Ok(true)` - role newly granted
    /// * `Ok(false)` - user already held the role
    pub async fn grant_role(&self, username: &str, role_name: &str) -> Result<bool, InternalError> {
        let user_id = self.find_user_id(username).await?;
        let role = Self::find_role(&self.db, role_name).await?;

        let existing = user_role::Entity::find_by_id((user_id, role.id))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("grant_role", e))?;

        if existing.is_some() {
            return Ok(false);
        }

        Self::insert_grant(&self.db, user_id, role.id).await?;
        tracing::info!(user_id, "Granted role {}", role.name);
        Ok(true)
    }

    /// Revoke a role by name
    ///
    /// # Returns
    /// * `Ok(false)` - user did not hold the role
    pub async fn revoke_role(&self, username: &str, role_name: &str) -> Result<bool, InternalError> {
        let user_id = self.find_user_id(username).await?;
        let role = Self::find_role(&self.db, role_name).await?;

        let result = user_role::Entity::delete_many()
            .filter(user_role::Column::UserId.eq(user_id))
            .filter(user_role::Column::RoleId.eq(role.id))
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("revoke_role", e))?;

        if result.rows_affected > 0 {
            tracing::info!(user_id, "Revoked role {}", role.name);
        }
        Ok(result.rows_affected > 0)
    }

    /// Enable or disable logon for a user
    pub async fn set_authorised(&self, username: &str, is_authorised: bool) -> Result<(), InternalError> {
        let result = user::Entity::update_many()
            .col_expr(user::Column::IsAuthorised, is_authorised.into())
            .col_expr(user::Column::UpdatedAt, Utc::now().timestamp().into())
            .filter(user::Column::Username.eq(username))
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("set_authorised", e))?;

        if result.rows_affected == 0 {
            return Err(CredentialError::UsernameNotFound(username.to_string()).into());
        }

        tracing::info!("User {} authorised set to {}", username, is_authorised);
        Ok(())
    }

    async fn find_user_id(&self, username: &str) -> Result<i32, InternalError> {
        user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_user_id", e))?
            .map(|u| u.id)
            .ok_or_else(|| CredentialError::UsernameNotFound(username.to_string()).into())
    }

    async fn find_role(conn: &impl ConnectionTrait, role_name: &str) -> Result<role::Model, InternalError> {
        role::Entity::find()
            .filter(role::Column::Name.eq(role_name))
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_role", e))?
            .ok_or_else(|| CredentialError::RoleNotFound(role_name.to_string()).into())
    }

    async fn insert_grant(conn: &impl ConnectionTrait, user_id: i32, role_id: i32) -> Result<(), InternalError> {
        user_role::Entity::insert(user_role::ActiveModel {
            user_id: Set(user_id),
            role_id: Set(role_id),
        })
        .exec_without_returning(conn)
        .await
        .map_err(|e| InternalError::database("insert_user_role", e))?;

        Ok(())
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("db", &"<connection>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::role_provider::ROLE_ADMIN;
    use crate::test::utils::{sample_profile, setup_test_db};

    async fn setup_store() -> (DatabaseConnection, CredentialStore) {
        let db = setup_test_db().await;
        let store = CredentialStore::new(db.clone());
        (db, store)
    }

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            password_hash: "$argon2id$v=19$placeholder".to_string(),
            profile: sample_profile("Asha", "Rao"),
        }
    }

    #[tokio::test]
    async fn test_add_user_creates_user_profile_and_member_grant() {
        let (db, store) = setup_store().await;

        let user_id = store.add_user(new_user("asha")).await.unwrap();

        let info = user_info::Entity::find()
            .filter(user_info::Column::UserId.eq(user_id))
            .one(&db)
            .await
            .unwrap()
            .expect("profile should exist");
        assert_eq!(info.prim_first_name, "Asha");
        assert_eq!(info.version, 0);

        let roles = store.get_roles_for_user(user_id).await.unwrap();
        assert_eq!(roles, vec![ROLE_MEMBER.to_string()]);
    }

    #[tokio::test]
    async fn test_add_user_fails_with_duplicate_username() {
        let (db, store) = setup_store().await;
        store.add_user(new_user("asha")).await.unwrap();

        let result = store.add_user(new_user("asha")).await;

        assert!(matches!(
            result,
            Err(InternalError::Credential(CredentialError::DuplicateUsername(_)))
        ));
        let profiles = user_info::Entity::find().all(&db).await.unwrap();
        assert_eq!(profiles.len(), 1);
    }

    #[tokio::test]
    async fn test_get_user_for_auth() {
        let (_db, store) = setup_store().await;
        let user_id = store.add_user(new_user("asha")).await.unwrap();

        let found = store.get_user_for_auth("asha").await.unwrap();
        assert_eq!(found.id, user_id);
        assert!(found.is_authorised);
        assert!(!format!("{:?}", found).contains("placeholder"));

        let missing = store.get_user_for_auth("nobody").await;
        assert!(matches!(
            missing,
            Err(InternalError::Credential(CredentialError::UsernameNotFound(_)))
        ));
    }

    #[tokio::test]
    async fn test_grant_and_revoke_role() {
        let (_db, store) = setup_store().await;
        let user_id = store.add_user(new_user("asha")).await.unwrap();

        assert!(store.grant_role("asha", ROLE_ADMIN).await.unwrap());
        assert!(!store.grant_role("asha", ROLE_ADMIN).await.unwrap());
        assert_eq!(
            store.get_roles_for_user(user_id).await.unwrap(),
            vec![ROLE_ADMIN.to_string(), ROLE_MEMBER.to_string()]
        );

        assert!(store.revoke_role("asha", ROLE_MEMBER).await.unwrap());
        assert!(!store.revoke_role("asha", ROLE_MEMBER).await.unwrap());
        assert_eq!(store.get_roles_for_user(user_id).await.unwrap(), vec![ROLE_ADMIN.to_string()]);
    }

    #[tokio::test]
    async fn test_grant_unknown_role_fails() {
        let (_db, store) = setup_store().await;
        store.add_user(new_user("asha")).await.unwrap();

        let result = store.grant_role("asha", "Treasurer").await;
        assert!(matches!(
            result,
            Err(InternalError::Credential(CredentialError::RoleNotFound(_)))
        ));
    }

    #[tokio::test]
    async fn test_set_authorised() {
        let (_db, store) = setup_store().await;
        store.add_user(new_user("asha")).await.unwrap();

        store.set_authorised("asha", false).await.unwrap();
        assert!(!store.get_user_for_auth("asha").await.unwrap().is_authorised);

        let result = store.set_authorised("nobody", true).await;
        assert!(matches!(
            result,
            Err(InternalError::Credential(CredentialError::UsernameNotFound(_)))
        ));
    }
}
