use crate::model::order::OrderStatus;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use shared::pagination::Pagination;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, Clone, Default)]
pub struct FindAllOrders {
    pub pagination: Pagination,
}

#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct CreateOrderRequest {
    #[validate(range(min = 1))]
    #[serde(rename = "user_id")]
    pub user_id: i32,

    #[serde(rename = "delivery_date")]
    pub delivery_date: NaiveDateTime,

    #[validate(length(min = 1))]
    pub address: String,

    #[validate(length(min = 1))]
    #[serde(rename = "recipient_name")]
    pub recipient_name: String,
}

#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct UpdateOrderStatusRequest {
    #[validate(range(min = 1))]
    #[serde(rename = "order_id")]
    pub order_id: i32,

    pub status: OrderStatus,
}

#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct CreateOrderRecordRequest {
    #[validate(range(min = 1))]
    #[serde(rename = "user_id")]
    pub user_id: i32,

    #[validate(range(min = 0))]
    #[serde(rename = "total_price")]
    pub total_price: i64,

    #[serde(rename = "delivery_date")]
    pub delivery_date: NaiveDateTime,

    #[validate(length(min = 1))]
    pub address: String,

    #[validate(length(min = 1))]
    #[serde(rename = "recipient_name")]
    pub recipient_name: String,

    #[validate(length(min = 1))]
    pub lines: Vec<CreateOrderLineRecordRequest>,
}

#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct CreateOrderLineRecordRequest {
    #[validate(range(min = 1))]
    #[serde(rename = "racket_id")]
    pub racket_id: i32,

    #[validate(range(min = 1))]
    pub quantity: i32,
}
