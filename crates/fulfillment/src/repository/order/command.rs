use crate::{
    abstract_trait::order::repository::OrderCommandRepositoryTrait,
    domain::requests::order::{CreateOrderRecordRequest, UpdateOrderStatusRequest},
    model::order::{Order as OrderModel, OrderLine},
};
use shared::{config::ConnectionPool, errors::RepositoryError};

use async_trait::async_trait;
use tracing::{error, info};

pub struct OrderCommandRepository {
    db: ConnectionPool,
}

impl OrderCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderCommandRepositoryTrait for OrderCommandRepository {
    async fn create_order(
        &self,
        req: &CreateOrderRecordRequest,
    ) -> Result<OrderModel, RepositoryError> {
        let mut tx = self.db.begin().await.map_err(RepositoryError::from)?;

        for line in &req.lines {
            // The guard keeps the decrement from ever driving stock below
            // zero; zero rows touched means the guard said no.
            let reserved = sqlx::query(
                r#"
            UPDATE rackets
            SET quantity   = quantity - $2,
                updated_at = current_timestamp
            WHERE racket_id = $1 AND quantity >= $2
            "#,
            )
            .bind(line.racket_id)
            .bind(line.quantity)
            .execute(&mut *tx)
            .await
            .map_err(|err| {
                error!(
                    "❌ Failed to reserve stock for racket ID {}: {:?}",
                    line.racket_id, err
                );
                RepositoryError::from(err)
            })?;

            if reserved.rows_affected() == 0 {
                let available: Option<i32> =
                    sqlx::query_scalar("SELECT quantity FROM rackets WHERE racket_id = $1")
                        .bind(line.racket_id)
                        .fetch_optional(&mut *tx)
                        .await
                        .map_err(RepositoryError::from)?;

                // Dropping the transaction rolls back any decrements made
                // for earlier lines.
                return Err(match available {
                    Some(available) => {
                        error!(
                            "❌ Insufficient stock for racket ID {}: requested {}, available {}",
                            line.racket_id, line.quantity, available
                        );
                        RepositoryError::InsufficientStock {
                            racket_id: line.racket_id,
                            requested: line.quantity,
                            available,
                        }
                    }
                    None => {
                        error!("❌ Racket ID {} no longer exists", line.racket_id);
                        RepositoryError::NotFound
                    }
                });
            }
        }

        let mut order = sqlx::query_as::<_, OrderModel>(
            r#"
        INSERT INTO orders (user_id, total_price, delivery_date, address, recipient_name)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING order_id, user_id, status, total_price, creation_date, delivery_date, address, recipient_name
        "#,
        )
        .bind(req.user_id)
        .bind(req.total_price)
        .bind(req.delivery_date)
        .bind(&req.address)
        .bind(&req.recipient_name)
        .fetch_one(&mut *tx)
        .await
        .map_err(|err| {
            error!("❌ Failed to create order for user ID {}: {:?}", req.user_id, err);
            RepositoryError::from(err)
        })?;

        for line in &req.lines {
            sqlx::query(
                r#"
            INSERT INTO order_lines (order_id, racket_id, quantity)
            VALUES ($1, $2, $3)
            "#,
            )
            .bind(order.order_id)
            .bind(line.racket_id)
            .bind(line.quantity)
            .execute(&mut *tx)
            .await
            .map_err(|err| {
                error!(
                    "❌ Failed to add racket ID {} to order ID {}: {:?}",
                    line.racket_id, order.order_id, err
                );
                RepositoryError::from(err)
            })?;

            order.lines.push(OrderLine {
                racket_id: line.racket_id,
                quantity: line.quantity,
            });
        }

        // The cart is spent the moment the order exists; clearing it in the
        // same transaction keeps failure from leaving both alive.
        sqlx::query("DELETE FROM carts WHERE user_id = $1")
            .bind(req.user_id)
            .execute(&mut *tx)
            .await
            .map_err(|err| {
                error!(
                    "❌ Failed to clear cart of user ID {}: {:?}",
                    req.user_id, err
                );
                RepositoryError::from(err)
            })?;

        tx.commit().await.map_err(RepositoryError::from)?;

        info!(
            "✅ Created order ID {} for user ID {} ({} lines, total {})",
            order.order_id,
            order.user_id,
            order.lines.len(),
            order.total_price
        );
        Ok(order)
    }

    async fn update_status(
        &self,
        req: &UpdateOrderStatusRequest,
    ) -> Result<OrderModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let mut order = sqlx::query_as::<_, OrderModel>(
            r#"
        UPDATE orders
        SET status = $2
        WHERE order_id = $1
        RETURNING order_id, user_id, status, total_price, creation_date, delivery_date, address, recipient_name
        "#,
        )
        .bind(req.order_id)
        .bind(req.status)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|err| {
            error!(
                "❌ Failed to update status of order ID {}: {:?}",
                req.order_id, err
            );
            RepositoryError::from(err)
        })?
        .ok_or(RepositoryError::NotFound)?;

        order.lines = sqlx::query_as::<_, OrderLine>(
            r#"
        SELECT racket_id, quantity
        FROM order_lines
        WHERE order_id = $1
        ORDER BY racket_id
        "#,
        )
        .bind(req.order_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|err| {
            error!(
                "❌ Failed to fetch lines of order ID {}: {:?}",
                req.order_id, err
            );
            RepositoryError::from(err)
        })?;

        info!(
            "🔄 Updated order ID {} status to {}",
            order.order_id, order.status
        );
        Ok(order)
    }
}
