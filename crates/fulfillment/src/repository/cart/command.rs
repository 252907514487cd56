use crate::{
    abstract_trait::cart::repository::CartCommandRepositoryTrait,
    domain::requests::cart::{
        AddCartLineRecordRequest, RemoveCartLineRecordRequest, UpdateCartLineRecordRequest,
    },
    model::cart::Cart as CartModel,
};
use shared::{config::ConnectionPool, errors::RepositoryError};

use async_trait::async_trait;
use sqlx::{Postgres, Transaction};
use tracing::{error, info};

pub struct CartCommandRepository {
    db: ConnectionPool,
}

impl CartCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CartCommandRepositoryTrait for CartCommandRepository {
    async fn create(&self, user_id: i32) -> Result<CartModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        // Two callers racing on the same first cart must both end up with the
        // one row, so the insert tolerates a loser.
        let created = sqlx::query_as::<_, CartModel>(
            r#"
        INSERT INTO carts (user_id)
        VALUES ($1)
        ON CONFLICT (user_id) DO NOTHING
        RETURNING user_id, total_price, total_quantity, version, created_at, updated_at
        "#,
        )
        .bind(user_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to create cart for user ID {user_id}: {:?}", err);
            RepositoryError::from(err)
        })?;

        if let Some(cart) = created {
            info!("🏗️ Created cart for user ID {user_id}");
            return Ok(cart);
        }

        let cart = sqlx::query_as::<_, CartModel>(
            r#"
        SELECT user_id, total_price, total_quantity, version, created_at, updated_at
        FROM carts
        WHERE user_id = $1
        "#,
        )
        .bind(user_id)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!(
                "❌ Failed to fetch existing cart for user ID {user_id}: {:?}",
                err
            );
            RepositoryError::from(err)
        })?;

        Ok(cart)
    }

    async fn add_line(&self, req: &AddCartLineRecordRequest) -> Result<(), RepositoryError> {
        let mut tx = self.db.begin().await.map_err(RepositoryError::from)?;

        sqlx::query(
            r#"
        INSERT INTO cart_lines (user_id, racket_id, quantity, price)
        VALUES ($1, $2, $3, $4)
        "#,
        )
        .bind(req.user_id)
        .bind(req.racket_id)
        .bind(req.quantity)
        .bind(req.price)
        .execute(&mut *tx)
        .await
        .map_err(|err| {
            error!(
                "❌ Failed to add racket ID {} to cart of user ID {}: {:?}",
                req.racket_id, req.user_id, err
            );
            RepositoryError::from(err)
        })?;

        refresh_cart_totals(&mut tx, req.user_id, req.cart_version).await?;

        tx.commit().await.map_err(RepositoryError::from)?;

        info!(
            "✅ Added racket ID {} x{} to cart of user ID {}",
            req.racket_id, req.quantity, req.user_id
        );
        Ok(())
    }

    async fn update_line(&self, req: &UpdateCartLineRecordRequest) -> Result<(), RepositoryError> {
        let mut tx = self.db.begin().await.map_err(RepositoryError::from)?;

        // Quantity at or below zero means the line leaves the cart. The
        // snapshot price is never touched on the update path.
        let result = if req.quantity > 0 {
            sqlx::query(
                r#"
            UPDATE cart_lines
            SET quantity = $3
            WHERE user_id = $1 AND racket_id = $2
            "#,
            )
            .bind(req.user_id)
            .bind(req.racket_id)
            .bind(req.quantity)
            .execute(&mut *tx)
            .await
        } else {
            sqlx::query(
                r#"
            DELETE FROM cart_lines
            WHERE user_id = $1 AND racket_id = $2
            "#,
            )
            .bind(req.user_id)
            .bind(req.racket_id)
            .execute(&mut *tx)
            .await
        }
        .map_err(|err| {
            error!(
                "❌ Failed to update racket ID {} in cart of user ID {}: {:?}",
                req.racket_id, req.user_id, err
            );
            RepositoryError::from(err)
        })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        refresh_cart_totals(&mut tx, req.user_id, req.cart_version).await?;

        tx.commit().await.map_err(RepositoryError::from)?;

        if req.quantity > 0 {
            info!(
                "✏️ Set racket ID {} to x{} in cart of user ID {}",
                req.racket_id, req.quantity, req.user_id
            );
        } else {
            info!(
                "🗑️ Dropped racket ID {} from cart of user ID {} (quantity reached zero)",
                req.racket_id, req.user_id
            );
        }
        Ok(())
    }

    async fn remove_line(&self, req: &RemoveCartLineRecordRequest) -> Result<(), RepositoryError> {
        let mut tx = self.db.begin().await.map_err(RepositoryError::from)?;

        let result = sqlx::query(
            r#"
        DELETE FROM cart_lines
        WHERE user_id = $1 AND racket_id = $2
        "#,
        )
        .bind(req.user_id)
        .bind(req.racket_id)
        .execute(&mut *tx)
        .await
        .map_err(|err| {
            error!(
                "❌ Failed to remove racket ID {} from cart of user ID {}: {:?}",
                req.racket_id, req.user_id, err
            );
            RepositoryError::from(err)
        })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        refresh_cart_totals(&mut tx, req.user_id, req.cart_version).await?;

        tx.commit().await.map_err(RepositoryError::from)?;

        info!(
            "🗑️ Removed racket ID {} from cart of user ID {}",
            req.racket_id, req.user_id
        );
        Ok(())
    }

    async fn delete(&self, user_id: i32) -> Result<(), RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query("DELETE FROM carts WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to delete cart of user ID {user_id}: {:?}", err);
                RepositoryError::from(err)
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        info!("🗑️ Deleted cart of user ID {user_id}");
        Ok(())
    }
}

/// Rewrites the denormalized totals from whatever lines remain and bumps the
/// cart version, guarded by the version the caller read. Zero rows touched
/// means another writer committed in between.
async fn refresh_cart_totals(
    tx: &mut Transaction<'_, Postgres>,
    user_id: i32,
    expected_version: i32,
) -> Result<(), RepositoryError> {
    let result = sqlx::query(
        r#"
    UPDATE carts c
    SET total_price = COALESCE(
            (SELECT SUM(l.price * l.quantity) FROM cart_lines l WHERE l.user_id = c.user_id), 0),
        total_quantity = COALESCE(
            (SELECT SUM(l.quantity) FROM cart_lines l WHERE l.user_id = c.user_id), 0),
        version    = c.version + 1,
        updated_at = current_timestamp
    WHERE c.user_id = $1 AND c.version = $2
    "#,
    )
    .bind(user_id)
    .bind(expected_version)
    .execute(&mut **tx)
    .await
    .map_err(|err| {
        error!(
            "❌ Failed to refresh totals for cart of user ID {user_id}: {:?}",
            err
        );
        RepositoryError::from(err)
    })?;

    if result.rows_affected() == 0 {
        return Err(RepositoryError::VersionConflict(format!(
            "cart of user {user_id} is no longer at version {expected_version}"
        )));
    }

    Ok(())
}
