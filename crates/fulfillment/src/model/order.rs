use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

/// Mirrors the `order_status` Postgres enum. Every order starts in
/// `InProgress`; `Done` marks it fulfilled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "order_status")]
pub enum OrderStatus {
    InProgress,
    Done,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::InProgress => write!(f, "InProgress"),
            OrderStatus::Done => write!(f, "Done"),
        }
    }
}

/// `total_price` is frozen at checkout from the cart's snapshot prices and
/// never recomputed from the catalog afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub order_id: i32,
    pub user_id: i32,
    pub status: OrderStatus,
    pub total_price: i64,
    pub creation_date: NaiveDateTime,
    pub delivery_date: NaiveDateTime,
    pub address: String,
    pub recipient_name: String,
    #[sqlx(skip)]
    pub lines: Vec<OrderLine>,
}

/// Order lines carry no price of their own; the order total already fixed
/// what the customer pays.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderLine {
    pub racket_id: i32,
    pub quantity: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    // The wire names double as the Postgres enum labels, so a rename here
    // breaks stored rows.
    #[test]
    fn order_status_keeps_storage_names() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::InProgress).unwrap(),
            "\"InProgress\""
        );
        assert_eq!(serde_json::to_string(&OrderStatus::Done).unwrap(), "\"Done\"");

        let status: OrderStatus = serde_json::from_str("\"Done\"").unwrap();
        assert_eq!(status, OrderStatus::Done);
        assert_eq!(OrderStatus::InProgress.to_string(), "InProgress");
    }
}
