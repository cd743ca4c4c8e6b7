use crate::types::db::{flat, parking};

/// Flats and parking slots held by one profile
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Residence {
    pub flats: Vec<flat::Model>,
    pub parkings: Vec<parking::Model>,
}
