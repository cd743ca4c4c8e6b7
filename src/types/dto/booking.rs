use chrono::{DateTime, Utc};
use poem_openapi::Object;

use crate::types::db::{amenity, amenity_booking};
use crate::types::timestamp_to_datetime;

/// Request model for reserving an amenity
#[derive(Object, Debug)]
#[oai(rename_all = "camelCase")]
pub struct BookingRequest {
    pub user_id: i32,
    pub amenity_id: i32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[oai(validator(max_length = 500))]
    pub purpose: Option<String>,
}

/// A booking as shown in the owner's request list
#[derive(Object, Debug, Clone, PartialEq)]
#[oai(rename_all = "camelCase")]
pub struct UserBookingDto {
    pub booking_id: i32,
    pub amenity_id: i32,
    pub amenity_name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub purpose: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Object, Debug, Clone, PartialEq)]
#[oai(rename_all = "camelCase")]
pub struct AmenityDto {
    pub amenity_id: i32,
    pub name: String,
    pub description: Option<String>,
}

impl From<(amenity_booking::Model, amenity::Model)> for UserBookingDto {
    fn from((booking, amenity): (amenity_booking::Model, amenity::Model)) -> Self {
        Self {
            booking_id: booking.id,
            amenity_id: amenity.id,
            amenity_name: amenity.name,
            start_time: timestamp_to_datetime(booking.start_time),
            end_time: timestamp_to_datetime(booking.end_time),
            purpose: booking.purpose,
            status: booking.status,
            created_at: timestamp_to_datetime(booking.created_at),
        }
    }
}

impl From<amenity::Model> for AmenityDto {
    fn from(e: amenity::Model) -> Self {
        Self {
            amenity_id: e.id,
            name: e.name,
            description: e.description,
        }
    }
}
