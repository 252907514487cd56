use crate::{
    domain::requests::cart::{
        AddCartLineRecordRequest, RemoveCartLineRecordRequest, UpdateCartLineRecordRequest,
    },
    model::cart::Cart as CartModel,
};
use async_trait::async_trait;
use mockall::automock;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynCartCommandRepository = Arc<dyn CartCommandRepositoryTrait + Send + Sync>;

/// Line writes rewrite the cart totals from the remaining lines and bump the
/// cart version in the same transaction. Each of them checks the caller's
/// `cart_version` and fails with `VersionConflict` when another writer got
/// there first.
#[automock]
#[async_trait]
pub trait CartCommandRepositoryTrait {
    /// Idempotent: a user who already owns a cart gets that cart back.
    async fn create(&self, user_id: i32) -> Result<CartModel, RepositoryError>;
    async fn add_line(&self, req: &AddCartLineRecordRequest) -> Result<(), RepositoryError>;
    async fn update_line(&self, req: &UpdateCartLineRecordRequest) -> Result<(), RepositoryError>;
    async fn remove_line(&self, req: &RemoveCartLineRecordRequest) -> Result<(), RepositoryError>;
    async fn delete(&self, user_id: i32) -> Result<(), RepositoryError>;
}
