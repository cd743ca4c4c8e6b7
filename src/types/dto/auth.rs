use std::collections::HashMap;

use chrono::{DateTime, Utc};
use poem_openapi::Object;

/// Response model for a successful authentication
#[derive(Object, Debug)]
#[oai(rename_all = "camelCase")]
pub struct AuthenticatedUserDto {
    pub username: String,

    /// Granted roles; every present key maps to `true`
    pub roles: HashMap<String, bool>,

    /// Signed bearer token (JWT)
    pub token: String,

    pub user_id: i32,

    /// Previous recorded logon, if any
    pub last_logon: Option<DateTime<Utc>>,

    pub first_name: String,
    pub last_name: String,
    pub user_info_id: i32,
}
