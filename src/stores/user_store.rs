use chrono::Utc;
use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use crate::errors::InternalError;
use crate::errors::internal::UserError;
use crate::stores::ResidenceStore;
use crate::types::db::{user, user_info};
use crate::types::dto::user::UpdateUserInfoRequest;

/// Reads and updates users and their profiles
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Load an authorised user with their profile
    ///
    /// # Returns
    /// * `Err(UserError::UserIdNotFound)` - no authorised user with that id
    pub async fn get_authorised_user(
        &self,
        user_id: i32,
    ) -> Result<(user::Model, user_info::Model), InternalError> {
        let found = user::Entity::find_by_id(user_id)
            .filter(user::Column::IsAuthorised.eq(true))
            .find_also_related(user_info::Entity)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_authorised_user", e))?;

        match found {
            Some((u, Some(info))) => Ok((u, info)),
            Some((u, None)) => {
                tracing::error!(user_id = u.id, "User has no profile record");
                Err(UserError::UserIdNotFound { user_id }.into())
            }
            None => Err(UserError::UserIdNotFound { user_id }.into()),
        }
    }

    /// All authorised users with profiles, ordered by id
    pub async fn list_authorised_users(&self) -> Result<Vec<(user::Model, user_info::Model)>, InternalError> {
        let rows = user::Entity::find()
            .filter(user::Column::IsAuthorised.eq(true))
            .find_also_related(user_info::Entity)
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_authorised_users", e))?;

        Ok(rows
            .into_iter()
            .filter_map(|(u, info)| info.map(|info| (u, info)))
            .collect())
    }

    /// Record a logon time for a user
    pub async fn update_last_logon(&self, user_id: i32, logon_at: i64) -> Result<(), InternalError> {
        let result = user::Entity::update_many()
            .col_expr(user::Column::LastLogon, Some(logon_at).into())
            .col_expr(user::Column::UpdatedAt, logon_at.into())
            .filter(user::Column::Id.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("update_last_logon", e))?;

        if result.rows_affected == 0 {
            return Err(UserError::UserIdNotFound { user_id }.into());
        }

        Ok(())
    }

    /// Replace a profile's editable fields if its version still matches
    ///
    /// On success the stored version becomes `version + 1`. Flat and parking
    /// assignments are replaced in the same transaction when the request
    /// carries them. A mismatch or an unknown flat/parking id changes nothing.
    pub async fn update_user_info(&self, request: &UpdateUserInfoRequest) -> Result<user_info::Model, InternalError> {
        let user_info_id = request.user_info_id;
        let expected_version = request.version;

        // The maximum version can never have been stored by an update
        let next_version = expected_version
            .checked_add(1)
            .ok_or(UserError::StaleVersion { user_info_id, expected_version })?;

        let mut changes = user_info::ActiveModel {
            version: Set(next_version),
            updated_at: Set(Utc::now().timestamp()),
            ..Default::default()
        };
        request.profile.apply_to(&mut changes);

        let txn = self.db.begin().await.map_err(InternalError::transaction_begin)?;

        let result = user_info::Entity::update_many()
            .set(changes)
            .filter(user_info::Column::Id.eq(user_info_id))
            .filter(user_info::Column::Version.eq(expected_version))
            .exec(&txn)
            .await
            .map_err(|e| InternalError::database("update_user_info", e))?;

        let current = user_info::Entity::find_by_id(user_info_id)
            .one(&txn)
            .await
            .map_err(|e| InternalError::database("update_user_info", e))?;

        let updated = match (result.rows_affected, current) {
            (_, None) => return Err(UserError::UserInfoNotFound { user_info_id }.into()),
            (0, Some(_)) => return Err(UserError::StaleVersion { user_info_id, expected_version }.into()),
            (_, Some(updated)) => updated,
        };

        if let Some(flat_ids) = &request.flat_ids {
            ResidenceStore::replace_flats(&txn, user_info_id, flat_ids).await?;
        }
        if let Some(parking_ids) = &request.parking_ids {
            ResidenceStore::replace_parkings(&txn, user_info_id, parking_ids).await?;
        }

        txn.commit().await.map_err(InternalError::transaction_commit)?;
        Ok(updated)
    }

    /// Case-insensitive substring search over names and email addresses
    ///
    /// Only authorised users are returned. A blank query matches nothing.
    /// `%` and `_` in the query match themselves.
    pub async fn search_user_info(
        &self,
        query: &str,
    ) -> Result<Vec<(user::Model, user_info::Model)>, InternalError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let pattern = format!("%{}%", escape_like(query));
        let matches_text = [
            user_info::Column::PrimFirstName,
            user_info::Column::PrimMiddleName,
            user_info::Column::PrimLastName,
            user_info::Column::SecFirstName,
            user_info::Column::SecMiddleName,
            user_info::Column::SecLastName,
            user_info::Column::EmailId,
            user_info::Column::AlterEmailId,
        ]
        .into_iter()
        .fold(Condition::any(), |cond, column| {
            cond.add(
                Expr::col((user_info::Entity, column))
                    .like(LikeExpr::new(pattern.clone()).escape(LIKE_ESCAPE)),
            )
        });

        let rows = user_info::Entity::find()
            .find_also_related(user::Entity)
            .filter(matches_text)
            .filter(user::Column::IsAuthorised.eq(true))
            .order_by_asc(user_info::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("search_user_info", e))?;

        Ok(rows
            .into_iter()
            .filter_map(|(info, u)| u.map(|u| (u, info)))
            .collect())
    }

    /// True only for an existing account that may log on
    pub async fn authorised_user_exists(&self, user_id: i32) -> Result<bool, InternalError> {
        let count = user::Entity::find_by_id(user_id)
            .filter(user::Column::IsAuthorised.eq(true))
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("authorised_user_exists", e))?;

        Ok(count > 0)
    }
}

const LIKE_ESCAPE: char = '\\';

/// Escape LIKE metacharacters so the text matches literally
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}
