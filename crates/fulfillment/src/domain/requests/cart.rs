use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct AddRacketCartRequest {
    #[validate(range(min = 1))]
    #[serde(rename = "user_id")]
    pub user_id: i32,

    #[validate(range(min = 1))]
    #[serde(rename = "racket_id")]
    pub racket_id: i32,

    #[validate(range(min = 1))]
    pub quantity: i32,
}

/// `quantity` is a signed delta applied to the line, not a replacement
/// value, so it intentionally carries no range constraint.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct UpdateRacketCartRequest {
    #[validate(range(min = 1))]
    #[serde(rename = "user_id")]
    pub user_id: i32,

    #[validate(range(min = 1))]
    #[serde(rename = "racket_id")]
    pub racket_id: i32,

    pub quantity: i32,
}

#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct RemoveRacketCartRequest {
    #[validate(range(min = 1))]
    #[serde(rename = "user_id")]
    pub user_id: i32,

    #[validate(range(min = 1))]
    #[serde(rename = "racket_id")]
    pub racket_id: i32,
}

#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct AddCartLineRecordRequest {
    #[validate(range(min = 1))]
    #[serde(rename = "user_id")]
    pub user_id: i32,

    #[validate(range(min = 1))]
    #[serde(rename = "racket_id")]
    pub racket_id: i32,

    #[validate(range(min = 1))]
    pub quantity: i32,

    #[validate(range(min = 0))]
    pub price: i64,

    #[serde(rename = "cart_version")]
    pub cart_version: i32,
}

/// `quantity` here is the new absolute line quantity; a value of zero or
/// less deletes the line instead of updating it.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct UpdateCartLineRecordRequest {
    #[validate(range(min = 1))]
    #[serde(rename = "user_id")]
    pub user_id: i32,

    #[validate(range(min = 1))]
    #[serde(rename = "racket_id")]
    pub racket_id: i32,

    pub quantity: i32,

    #[serde(rename = "cart_version")]
    pub cart_version: i32,
}

#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct RemoveCartLineRecordRequest {
    #[validate(range(min = 1))]
    #[serde(rename = "user_id")]
    pub user_id: i32,

    #[validate(range(min = 1))]
    #[serde(rename = "racket_id")]
    pub racket_id: i32,

    #[serde(rename = "cart_version")]
    pub cart_version: i32,
}
