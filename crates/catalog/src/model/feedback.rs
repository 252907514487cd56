use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Feedback {
    pub racket_id: i32,
    pub user_id: i32,
    pub feedback: String,
    pub rating: i32,
    pub date: NaiveDateTime,
}
