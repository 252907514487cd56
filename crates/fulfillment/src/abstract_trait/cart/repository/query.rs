use crate::model::cart::Cart as CartModel;
use async_trait::async_trait;
use mockall::automock;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynCartQueryRepository = Arc<dyn CartQueryRepositoryTrait + Send + Sync>;

#[automock]
#[async_trait]
pub trait CartQueryRepositoryTrait {
    async fn find_by_user_id(&self, user_id: i32) -> Result<Option<CartModel>, RepositoryError>;
}
