use crate::{
    domain::requests::order::{CreateOrderRequest, UpdateOrderStatusRequest},
    model::order::Order as OrderModel,
};
use async_trait::async_trait;
use mockall::automock;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynOrderCommandService = Arc<dyn OrderCommandServiceTrait + Send + Sync>;

#[automock]
#[async_trait]
pub trait OrderCommandServiceTrait {
    async fn create_order(&self, req: &CreateOrderRequest) -> Result<OrderModel, ServiceError>;
    async fn update_order_status(
        &self,
        req: &UpdateOrderStatusRequest,
    ) -> Result<OrderModel, ServiceError>;
}
