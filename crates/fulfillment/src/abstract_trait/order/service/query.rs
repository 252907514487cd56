use crate::{domain::requests::order::FindAllOrders, model::order::Order as OrderModel};
use async_trait::async_trait;
use mockall::automock;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynOrderQueryService = Arc<dyn OrderQueryServiceTrait + Send + Sync>;

#[automock]
#[async_trait]
pub trait OrderQueryServiceTrait {
    async fn find_all(&self, req: &FindAllOrders) -> Result<Vec<OrderModel>, ServiceError>;
    async fn find_my_orders(&self, user_id: i32) -> Result<Vec<OrderModel>, ServiceError>;
    async fn find_by_id(&self, order_id: i32) -> Result<OrderModel, ServiceError>;
}
