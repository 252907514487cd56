use crate::{domain::requests::order::FindAllOrders, model::order::Order as OrderModel};
use async_trait::async_trait;
use mockall::automock;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynOrderQueryRepository = Arc<dyn OrderQueryRepositoryTrait + Send + Sync>;

#[automock]
#[async_trait]
pub trait OrderQueryRepositoryTrait {
    async fn find_all(&self, req: &FindAllOrders) -> Result<Vec<OrderModel>, RepositoryError>;
    async fn find_by_user_id(&self, user_id: i32) -> Result<Vec<OrderModel>, RepositoryError>;
    async fn find_by_id(&self, order_id: i32) -> Result<Option<OrderModel>, RepositoryError>;
}
