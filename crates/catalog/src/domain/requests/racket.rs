use serde::{Deserialize, Serialize};
use shared::pagination::Pagination;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, Clone, Default)]
pub struct FindAllRackets {
    pub pagination: Pagination,
}

#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct CreateRacketRequest {
    #[validate(length(min = 1))]
    pub brand: String,

    #[validate(range(min = 0.0))]
    pub weight: f32,

    #[validate(range(min = 0.0))]
    pub balance: f32,

    #[validate(range(min = 0.0))]
    #[serde(rename = "head_size")]
    pub head_size: f32,

    #[validate(range(min = 0))]
    pub price: i64,

    #[validate(range(min = 0))]
    pub quantity: i32,

    pub available: bool,
}

#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct UpdateRacketQuantityRequest {
    #[validate(range(min = 1))]
    #[serde(rename = "racket_id")]
    pub racket_id: i32,

    #[validate(range(min = 0))]
    pub quantity: i32,
}
