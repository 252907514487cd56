use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct CreateFeedbackRequest {
    #[validate(range(min = 1))]
    #[serde(rename = "racket_id")]
    pub racket_id: i32,

    #[validate(range(min = 1))]
    #[serde(rename = "user_id")]
    pub user_id: i32,

    #[validate(length(min = 1))]
    pub feedback: String,

    #[validate(range(min = 1, max = 5))]
    pub rating: i32,
}

#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct DeleteFeedbackRequest {
    #[validate(range(min = 1))]
    #[serde(rename = "racket_id")]
    pub racket_id: i32,

    #[validate(range(min = 1))]
    #[serde(rename = "user_id")]
    pub user_id: i32,
}
