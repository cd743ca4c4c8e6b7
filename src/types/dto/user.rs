use chrono::{DateTime, Utc};
use poem_openapi::Object;
use sea_orm::Set;

use crate::types::db::{user, user_info};
use crate::types::dto::residence::{FlatDto, ParkingDto};
use crate::types::internal::residence::Residence;
use crate::types::timestamp_to_datetime;

/// Editable profile attributes shared by create, update and read models
#[derive(Object, Debug, Clone, PartialEq)]
#[oai(rename_all = "camelCase")]
pub struct UserProfileFields {
    #[oai(validator(min_length = 1, max_length = 100))]
    pub prim_first_name: String,
    pub prim_middle_name: Option<String>,
    #[oai(validator(min_length = 1, max_length = 100))]
    pub prim_last_name: String,

    /// Co-owner name
    pub sec_first_name: Option<String>,
    pub sec_middle_name: Option<String>,
    pub sec_last_name: Option<String>,

    pub email_id: Option<String>,
    pub alter_email_id: Option<String>,
    pub primary_mobile: Option<String>,
    pub secondary_mobile: Option<String>,
    pub correspondence_address: Option<String>,

    #[oai(default)]
    pub is_board_member: bool,
    #[oai(default)]
    pub is_secondary_owner: bool,
}

/// Full profile of an authorised user
#[derive(Object, Debug, Clone, PartialEq)]
#[oai(rename_all = "camelCase")]
pub struct UserInfoDto {
    pub user_info_id: i32,
    pub user_id: i32,
    pub username: String,
    #[oai(flatten)]
    pub profile: UserProfileFields,
    pub flats: Vec<FlatDto>,
    pub parkings: Vec<ParkingDto>,
    /// Optimistic concurrency token; send back unchanged on update
    pub version: i32,
    pub last_logon: Option<DateTime<Utc>>,
}

/// Directory entry for an authorised user
#[derive(Object, Debug, Clone, PartialEq)]
#[oai(rename_all = "camelCase")]
pub struct UserSummaryDto {
    pub user_id: i32,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub last_logon: Option<DateTime<Utc>>,
}

/// Request model for registering a user
#[derive(Object, Debug)]
#[oai(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[oai(validator(min_length = 3, max_length = 50))]
    pub username: String,

    #[oai(validator(min_length = 8, max_length = 128))]
    pub password: String,

    #[oai(flatten)]
    pub profile: UserProfileFields,
}

/// Request model for updating a profile
#[derive(Object, Debug)]
#[oai(rename_all = "camelCase")]
pub struct UpdateUserInfoRequest {
    pub user_info_id: i32,

    /// Version read together with the profile
    pub version: i32,

    #[oai(flatten)]
    pub profile: UserProfileFields,

    /// Replaces the held flats when present; omitted leaves them unchanged
    pub flat_ids: Option<Vec<i32>>,

    /// Replaces the held parking slots when present
    pub parking_ids: Option<Vec<i32>>,
}

impl UserProfileFields {
    /// Copy every editable field onto a profile active model
    pub fn apply_to(&self, am: &mut user_info::ActiveModel) {
        am.prim_first_name = Set(self.prim_first_name.clone());
        am.prim_middle_name = Set(self.prim_middle_name.clone());
        am.prim_last_name = Set(self.prim_last_name.clone());
        am.sec_first_name = Set(self.sec_first_name.clone());
        am.sec_middle_name = Set(self.sec_middle_name.clone());
        am.sec_last_name = Set(self.sec_last_name.clone());
        am.email_id = Set(self.email_id.clone());
        am.alter_email_id = Set(self.alter_email_id.clone());
        am.primary_mobile = Set(self.primary_mobile.clone());
        am.secondary_mobile = Set(self.secondary_mobile.clone());
        am.correspondence_address = Set(self.correspondence_address.clone());
        am.is_board_member = Set(self.is_board_member);
        am.is_secondary_owner = Set(self.is_secondary_owner);
    }
}

impl From<&user_info::Model> for UserProfileFields {
    fn from(e: &user_info::Model) -> Self {
        Self {
            prim_first_name: e.prim_first_name.clone(),
            prim_middle_name: e.prim_middle_name.clone(),
            prim_last_name: e.prim_last_name.clone(),
            sec_first_name: e.sec_first_name.clone(),
            sec_middle_name: e.sec_middle_name.clone(),
            sec_last_name: e.sec_last_name.clone(),
            email_id: e.email_id.clone(),
            alter_email_id: e.alter_email_id.clone(),
            primary_mobile: e.primary_mobile.clone(),
            secondary_mobile: e.secondary_mobile.clone(),
            correspondence_address: e.correspondence_address.clone(),
            is_board_member: e.is_board_member,
            is_secondary_owner: e.is_secondary_owner,
        }
    }
}

impl From<(user::Model, user_info::Model, Residence)> for UserInfoDto {
    fn from((u, info, residence): (user::Model, user_info::Model, Residence)) -> Self {
        Self {
            user_info_id: info.id,
            user_id: u.id,
            username: u.username,
            profile: UserProfileFields::from(&info),
            flats: residence.flats.into_iter().map(FlatDto::from).collect(),
            parkings: residence.parkings.into_iter().map(ParkingDto::from).collect(),
            version: info.version,
            last_logon: u.last_logon.map(timestamp_to_datetime),
        }
    }
}

impl From<(user::Model, user_info::Model)> for UserSummaryDto {
    fn from((u, info): (user::Model, user_info::Model)) -> Self {
        Self {
            user_id: u.id,
            username: u.username,
            first_name: info.prim_first_name,
            last_name: info.prim_last_name,
            last_logon: u.last_logon.map(timestamp_to_datetime),
        }
    }
}
