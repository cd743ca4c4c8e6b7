use poem_openapi::Object;

use crate::types::db::{flat, parking};

#[derive(Object, Debug, Clone, PartialEq)]
#[oai(rename_all = "camelCase")]
pub struct FlatDto {
    pub flat_id: i32,
    pub flat_number: String,
    pub wing: Option<String>,
}

#[derive(Object, Debug, Clone, PartialEq)]
#[oai(rename_all = "camelCase")]
pub struct ParkingDto {
    pub parking_id: i32,
    pub slot_number: String,
}

impl From<flat::Model> for FlatDto {
    fn from(e: flat::Model) -> Self {
        Self {
            flat_id: e.id,
            flat_number: e.flat_number,
            wing: e.wing,
        }
    }
}

impl From<parking::Model> for ParkingDto {
    fn from(e: parking::Model) -> Self {
        Self {
            parking_id: e.id,
            slot_number: e.slot_number,
        }
    }
}
