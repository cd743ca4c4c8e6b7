use thiserror::Error;

#[derive(Error, Debug)]
pub enum UserError {
    #[error("User ID not found: {user_id}")]
    UserIdNotFound { user_id: i32 },

    #[error("User info not found: {user_info_id}")]
    UserInfoNotFound { user_info_id: i32 },

    #[error("User info {user_info_id} was modified concurrently (expected version {expected_version})")]
    StaleVersion {
        user_info_id: i32,
        expected_version: i32,
    },
}
