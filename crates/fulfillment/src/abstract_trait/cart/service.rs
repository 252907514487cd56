use crate::{
    domain::requests::cart::{
        AddRacketCartRequest, RemoveRacketCartRequest, UpdateRacketCartRequest,
    },
    model::cart::Cart as CartModel,
};
use async_trait::async_trait;
use mockall::automock;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynCartService = Arc<dyn CartServiceTrait + Send + Sync>;

/// Every call returns the cart in its post-operation state, lines included.
#[automock]
#[async_trait]
pub trait CartServiceTrait {
    async fn get_cart(&self, user_id: i32) -> Result<CartModel, ServiceError>;
    async fn add_racket(&self, req: &AddRacketCartRequest) -> Result<CartModel, ServiceError>;
    async fn update_racket(&self, req: &UpdateRacketCartRequest)
    -> Result<CartModel, ServiceError>;
    async fn remove_racket(&self, req: &RemoveRacketCartRequest)
    -> Result<CartModel, ServiceError>;
}
