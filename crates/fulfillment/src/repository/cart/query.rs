use crate::{
    abstract_trait::cart::repository::CartQueryRepositoryTrait,
    model::cart::{Cart as CartModel, CartLine},
};
use shared::{config::ConnectionPool, errors::RepositoryError};

use async_trait::async_trait;
use tracing::{error, info};

pub struct CartQueryRepository {
    db: ConnectionPool,
}

impl CartQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CartQueryRepositoryTrait for CartQueryRepository {
    async fn find_by_user_id(&self, user_id: i32) -> Result<Option<CartModel>, RepositoryError> {
        info!("🔍 Fetching cart for user ID {user_id}");

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let cart = sqlx::query_as::<_, CartModel>(
            r#"
        SELECT user_id, total_price, total_quantity, version, created_at, updated_at
        FROM carts
        WHERE user_id = $1
        "#,
        )
        .bind(user_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to fetch cart for user ID {user_id}: {:?}", err);
            RepositoryError::from(err)
        })?;

        let mut cart = match cart {
            Some(cart) => cart,
            None => return Ok(None),
        };

        cart.lines = sqlx::query_as::<_, CartLine>(
            r#"
        SELECT racket_id, quantity, price
        FROM cart_lines
        WHERE user_id = $1
        ORDER BY racket_id
        "#,
        )
        .bind(user_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|err| {
            error!(
                "❌ Failed to fetch cart lines for user ID {user_id}: {:?}",
                err
            );
            RepositoryError::from(err)
        })?;

        info!(
            "✅ Fetched cart for user ID {user_id} ({} lines)",
            cart.lines.len()
        );
        Ok(Some(cart))
    }
}
