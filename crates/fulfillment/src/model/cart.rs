use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One cart per user, keyed by `user_id`. Totals are denormalized from the
/// lines and rewritten together with every line change; `version` bumps on
/// each write so concurrent editors of the same cart cannot silently clobber
/// one another.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Cart {
    pub user_id: i32,
    pub total_price: i64,
    pub total_quantity: i32,
    pub version: i32,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
    #[sqlx(skip)]
    pub lines: Vec<CartLine>,
}

/// `price` is the unit price captured when the racket first entered the cart.
/// Later catalog price changes do not touch it; checkout charges the snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CartLine {
    pub racket_id: i32,
    pub quantity: i32,
    pub price: i64,
}
