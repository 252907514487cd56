use crate::{
    domain::requests::order::{CreateOrderRecordRequest, UpdateOrderStatusRequest},
    model::order::Order as OrderModel,
};
use async_trait::async_trait;
use mockall::automock;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynOrderCommandRepository = Arc<dyn OrderCommandRepositoryTrait + Send + Sync>;

#[automock]
#[async_trait]
pub trait OrderCommandRepositoryTrait {
    /// Runs the whole checkout write in one transaction: decrement stock for
    /// every line, insert the order and its lines, drop the user's cart. Any
    /// failure rolls the lot back; a line without enough stock surfaces as
    /// `InsufficientStock` with nothing persisted.
    async fn create_order(
        &self,
        req: &CreateOrderRecordRequest,
    ) -> Result<OrderModel, RepositoryError>;
    async fn update_status(
        &self,
        req: &UpdateOrderStatusRequest,
    ) -> Result<OrderModel, RepositoryError>;
}
