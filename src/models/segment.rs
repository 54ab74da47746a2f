use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Customer role; a customer registered under several roles takes the first
/// in declaration order.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    strum::Display,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum CustomerType {
    #[sea_orm(string_value = "Doctor")]
    Doctor,
    #[sea_orm(string_value = "Hospital")]
    Hospital,
    #[sea_orm(string_value = "Pharmacy")]
    Pharmacy,
    #[sea_orm(string_value = "Other")]
    Other,
}
