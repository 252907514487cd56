use crate::{
    abstract_trait::order::repository::OrderQueryRepositoryTrait,
    domain::requests::order::FindAllOrders,
    model::order::{Order as OrderModel, OrderLine},
};
use shared::{config::ConnectionPool, errors::RepositoryError};

use async_trait::async_trait;
use sqlx::PgConnection;
use tracing::{error, info};

pub struct OrderQueryRepository {
    db: ConnectionPool,
}

impl OrderQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }

    async fn load_order(
        conn: &mut PgConnection,
        order_id: i32,
    ) -> Result<Option<OrderModel>, RepositoryError> {
        let order = sqlx::query_as::<_, OrderModel>(
            r#"
        SELECT order_id, user_id, status, total_price, creation_date, delivery_date, address, recipient_name
        FROM orders
        WHERE order_id = $1
        "#,
        )
        .bind(order_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to fetch order ID {order_id}: {:?}", err);
            RepositoryError::from(err)
        })?;

        let mut order = match order {
            Some(order) => order,
            None => return Ok(None),
        };

        order.lines = sqlx::query_as::<_, OrderLine>(
            r#"
        SELECT racket_id, quantity
        FROM order_lines
        WHERE order_id = $1
        ORDER BY racket_id
        "#,
        )
        .bind(order_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to fetch lines of order ID {order_id}: {:?}", err);
            RepositoryError::from(err)
        })?;

        Ok(Some(order))
    }
}

#[async_trait]
impl OrderQueryRepositoryTrait for OrderQueryRepository {
    async fn find_all(&self, req: &FindAllOrders) -> Result<Vec<OrderModel>, RepositoryError> {
        info!(
            "🔍 Fetching all orders sorted by {}",
            req.pagination.sort.format()
        );

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        // Sort columns come from the caller unchecked; an unknown column
        // fails here as a query error.
        let sql = format!(
            "SELECT order_id FROM orders {}",
            req.pagination.order_by_clause()
        );

        let order_ids: Vec<i32> = sqlx::query_scalar(&sql)
            .fetch_all(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to list orders: {:?}", err);
                RepositoryError::from(err)
            })?;

        let mut orders = Vec::with_capacity(order_ids.len());

        for order_id in order_ids {
            let order = Self::load_order(&mut conn, order_id)
                .await?
                .ok_or(RepositoryError::NotFound)?;
            orders.push(order);
        }

        info!("✅ Retrieved {} orders", orders.len());
        Ok(orders)
    }

    async fn find_by_user_id(&self, user_id: i32) -> Result<Vec<OrderModel>, RepositoryError> {
        info!("🔍 Fetching orders of user ID {user_id}");

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let order_ids: Vec<i32> =
            sqlx::query_scalar("SELECT order_id FROM orders WHERE user_id = $1")
                .bind(user_id)
                .fetch_all(&mut *conn)
                .await
                .map_err(|err| {
                    error!("❌ Failed to list orders of user ID {user_id}: {:?}", err);
                    RepositoryError::from(err)
                })?;

        let mut orders = Vec::with_capacity(order_ids.len());

        for order_id in order_ids {
            let order = Self::load_order(&mut conn, order_id)
                .await?
                .ok_or(RepositoryError::NotFound)?;
            orders.push(order);
        }

        info!("✅ Retrieved {} orders for user ID {user_id}", orders.len());
        Ok(orders)
    }

    async fn find_by_id(&self, order_id: i32) -> Result<Option<OrderModel>, RepositoryError> {
        info!("🆔 Fetching order ID {order_id}");

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        Self::load_order(&mut conn, order_id).await
    }
}
