use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// `available` is a display flag set by the shop admin; it is not derived
/// from `quantity`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Racket {
    pub racket_id: i32,
    pub brand: String,
    pub weight: f32,
    pub balance: f32,
    pub head_size: f32,
    pub price: i64,
    pub quantity: i32,
    pub available: bool,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}
