use crate::{
    abstract_trait::{
        cart::repository::DynCartQueryRepository,
        order::{
            repository::{DynOrderCommandRepository, DynOrderQueryRepository},
            service::OrderCommandServiceTrait,
        },
    },
    domain::requests::order::{
        CreateOrderLineRecordRequest, CreateOrderRecordRequest, CreateOrderRequest,
        UpdateOrderStatusRequest,
    },
    model::order::Order as OrderModel,
};
use anyhow::Result;
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use shared::{
    errors::{RepositoryError, ServiceError},
    utils::{Method, Metrics, Status, format_validation_errors},
};
use tokio::time::Instant;
use tracing::{error, info};
use validator::Validate;

#[derive(Clone)]
pub struct OrderCommandService {
    cart_query: DynCartQueryRepository,
    query: DynOrderQueryRepository,
    command: DynOrderCommandRepository,
    metrics: Metrics,
}

impl OrderCommandService {
    pub fn new(
        cart_query: DynCartQueryRepository,
        query: DynOrderQueryRepository,
        command: DynOrderCommandRepository,
        registry: &mut Registry,
    ) -> Result<Self> {
        let metrics = Metrics::new();

        registry.register(
            "order_command_service_request_counter",
            "Total number of requests to the OrderCommandService",
            metrics.request_counter.clone(),
        );
        registry.register(
            "order_command_service_request_duration",
            "Histogram of request durations for the OrderCommandService",
            metrics.request_duration.clone(),
        );

        Ok(Self {
            cart_query,
            query,
            command,
            metrics,
        })
    }
}

#[async_trait]
impl OrderCommandServiceTrait for OrderCommandService {
    async fn create_order(&self, req: &CreateOrderRequest) -> Result<OrderModel, ServiceError> {
        info!("🏗️ Creating order for user ID {}", req.user_id);

        let started = Instant::now();
        let method = Method::Post;

        if let Err(errors) = req.validate() {
            let messages = format_validation_errors(&errors);
            error!("❌ Order validation failed: {:?}", messages);
            self.metrics
                .record(method, Status::Error, started.elapsed().as_secs_f64());
            return Err(ServiceError::Validation(messages));
        }

        let cart = match self.cart_query.find_by_user_id(req.user_id).await {
            Ok(Some(cart)) => cart,
            Ok(None) => {
                error!("❌ No cart found for user ID {}", req.user_id);
                self.metrics
                    .record(method, Status::Error, started.elapsed().as_secs_f64());
                return Err(ServiceError::NotFound(format!(
                    "cart for user {} not found",
                    req.user_id
                )));
            }
            Err(e) => {
                error!("❌ Failed to fetch cart of user ID {}: {e:?}", req.user_id);
                self.metrics
                    .record(method, Status::Error, started.elapsed().as_secs_f64());
                return Err(ServiceError::Repo(e));
            }
        };

        if cart.lines.is_empty() {
            error!("❌ Cart of user ID {} is empty", req.user_id);
            self.metrics
                .record(method, Status::Error, started.elapsed().as_secs_f64());
            return Err(ServiceError::Validation(vec!["cart is empty".to_string()]));
        }

        // The cart's totals and snapshot prices become the order's; nothing
        // is re-read from the catalog at this point.
        let record = CreateOrderRecordRequest {
            user_id: req.user_id,
            total_price: cart.total_price,
            delivery_date: req.delivery_date,
            address: req.address.clone(),
            recipient_name: req.recipient_name.clone(),
            lines: cart
                .lines
                .iter()
                .map(|line| CreateOrderLineRecordRequest {
                    racket_id: line.racket_id,
                    quantity: line.quantity,
                })
                .collect(),
        };

        match self.command.create_order(&record).await {
            Ok(order) => {
                info!(
                    "✅ Order ID {} created for user ID {} totalling {}",
                    order.order_id, order.user_id, order.total_price
                );
                self.metrics
                    .record(method, Status::Success, started.elapsed().as_secs_f64());
                Ok(order)
            }
            Err(e @ RepositoryError::InsufficientStock { .. }) => {
                error!("❌ Order for user ID {} rejected: {e}", req.user_id);
                self.metrics
                    .record(method, Status::Error, started.elapsed().as_secs_f64());
                Err(ServiceError::InsufficientStock(e.to_string()))
            }
            Err(RepositoryError::NotFound) => {
                error!(
                    "❌ A racket in the cart of user ID {} no longer exists",
                    req.user_id
                );
                self.metrics
                    .record(method, Status::Error, started.elapsed().as_secs_f64());
                Err(ServiceError::NotFound(format!(
                    "racket in cart of user {} not found",
                    req.user_id
                )))
            }
            Err(e) => {
                error!("❌ Failed to create order for user ID {}: {e:?}", req.user_id);
                self.metrics
                    .record(method, Status::Error, started.elapsed().as_secs_f64());
                Err(ServiceError::Repo(e))
            }
        }
    }

    async fn update_order_status(
        &self,
        req: &UpdateOrderStatusRequest,
    ) -> Result<OrderModel, ServiceError> {
        info!(
            "✏️ Updating order ID {} status to {}",
            req.order_id, req.status
        );

        let started = Instant::now();
        let method = Method::Put;

        if let Err(errors) = req.validate() {
            let messages = format_validation_errors(&errors);
            error!("❌ Order status validation failed: {:?}", messages);
            self.metrics
                .record(method, Status::Error, started.elapsed().as_secs_f64());
            return Err(ServiceError::Validation(messages));
        }

        match self.query.find_by_id(req.order_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                error!("❌ Order not found with ID {}", req.order_id);
                self.metrics
                    .record(method, Status::Error, started.elapsed().as_secs_f64());
                return Err(ServiceError::NotFound(format!(
                    "order {} not found",
                    req.order_id
                )));
            }
            Err(e) => {
                error!("❌ Failed to fetch order ID {}: {e:?}", req.order_id);
                self.metrics
                    .record(method, Status::Error, started.elapsed().as_secs_f64());
                return Err(ServiceError::Repo(e));
            }
        }

        // Any state can be written over any other, including writing the
        // current state again.
        match self.command.update_status(req).await {
            Ok(order) => {
                info!(
                    "✅ Order ID {} status now {}",
                    order.order_id, order.status
                );
                self.metrics
                    .record(method, Status::Success, started.elapsed().as_secs_f64());
                Ok(order)
            }
            Err(RepositoryError::NotFound) => {
                error!("❌ Order not found with ID {}", req.order_id);
                self.metrics
                    .record(method, Status::Error, started.elapsed().as_secs_f64());
                Err(ServiceError::NotFound(format!(
                    "order {} not found",
                    req.order_id
                )))
            }
            Err(e) => {
                error!(
                    "❌ Failed to update status of order ID {}: {e:?}",
                    req.order_id
                );
                self.metrics
                    .record(method, Status::Error, started.elapsed().as_secs_f64());
                Err(ServiceError::Repo(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        abstract_trait::{
            cart::repository::MockCartQueryRepositoryTrait,
            order::repository::{MockOrderCommandRepositoryTrait, MockOrderQueryRepositoryTrait},
        },
        model::{
            cart::{Cart as CartModel, CartLine},
            order::{OrderLine, OrderStatus},
        },
    };
    use chrono::{NaiveDate, NaiveDateTime};
    use std::sync::Arc;

    fn delivery() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 14)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn line(racket_id: i32, quantity: i32, price: i64) -> CartLine {
        CartLine {
            racket_id,
            quantity,
            price,
        }
    }

    fn cart(user_id: i32, version: i32, lines: Vec<CartLine>) -> CartModel {
        let total_price = lines.iter().map(|l| l.price * l.quantity as i64).sum();
        let total_quantity = lines.iter().map(|l| l.quantity).sum();

        CartModel {
            user_id,
            total_price,
            total_quantity,
            version,
            created_at: None,
            updated_at: None,
            lines,
        }
    }

    fn order(
        order_id: i32,
        user_id: i32,
        status: OrderStatus,
        total_price: i64,
        lines: Vec<OrderLine>,
    ) -> OrderModel {
        OrderModel {
            order_id,
            user_id,
            status,
            total_price,
            creation_date: delivery(),
            delivery_date: delivery(),
            address: "1 Baseline Rd".to_string(),
            recipient_name: "R. Nadal".to_string(),
            lines,
        }
    }

    fn create_req(user_id: i32) -> CreateOrderRequest {
        CreateOrderRequest {
            user_id,
            delivery_date: delivery(),
            address: "1 Baseline Rd".to_string(),
            recipient_name: "R. Nadal".to_string(),
        }
    }

    fn service(
        cart_query: MockCartQueryRepositoryTrait,
        query: MockOrderQueryRepositoryTrait,
        command: MockOrderCommandRepositoryTrait,
    ) -> OrderCommandService {
        let mut registry = Registry::default();
        OrderCommandService::new(
            Arc::new(cart_query),
            Arc::new(query),
            Arc::new(command),
            &mut registry,
        )
        .expect("service construction")
    }

    #[tokio::test]
    async fn create_order_fails_without_cart() {
        let mut cart_query = MockCartQueryRepositoryTrait::new();
        cart_query.expect_find_by_user_id().returning(|_| Ok(None));

        let query = MockOrderQueryRepositoryTrait::new();
        let mut command = MockOrderCommandRepositoryTrait::new();
        command.expect_create_order().never();

        let svc = service(cart_query, query, command);

        let err = svc.create_order(&create_req(1)).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn create_order_rejects_empty_cart() {
        let mut cart_query = MockCartQueryRepositoryTrait::new();
        let empty = cart(1, 2, vec![]);
        cart_query
            .expect_find_by_user_id()
            .returning(move |_| Ok(Some(empty.clone())));

        let query = MockOrderQueryRepositoryTrait::new();
        let mut command = MockOrderCommandRepositoryTrait::new();
        command.expect_create_order().never();

        let svc = service(cart_query, query, command);

        let err = svc.create_order(&create_req(1)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn create_order_freezes_cart_totals() {
        let mut cart_query = MockCartQueryRepositoryTrait::new();
        let full = cart(1, 3, vec![line(1, 2, 100), line(2, 1, 300)]);
        cart_query
            .expect_find_by_user_id()
            .returning(move |_| Ok(Some(full.clone())));

        let query = MockOrderQueryRepositoryTrait::new();

        let mut command = MockOrderCommandRepositoryTrait::new();
        command
            .expect_create_order()
            .withf(|req| {
                req.total_price == 500
                    && req.lines.len() == 2
                    && req.lines[0].racket_id == 1
                    && req.lines[0].quantity == 2
                    && req.lines[1].racket_id == 2
                    && req.lines[1].quantity == 1
            })
            .returning(|req| {
                Ok(order(
                    10,
                    req.user_id,
                    OrderStatus::InProgress,
                    req.total_price,
                    req.lines
                        .iter()
                        .map(|l| OrderLine {
                            racket_id: l.racket_id,
                            quantity: l.quantity,
                        })
                        .collect(),
                ))
            });

        let svc = service(cart_query, query, command);

        let created = svc
            .create_order(&create_req(1))
            .await
            .expect("create should pass");
        assert_eq!(created.order_id, 10);
        assert_eq!(created.total_price, 500);
        assert_eq!(created.status, OrderStatus::InProgress);
        assert_eq!(created.lines.len(), 2);
    }

    #[tokio::test]
    async fn create_order_surfaces_insufficient_stock() {
        let mut cart_query = MockCartQueryRepositoryTrait::new();
        let full = cart(1, 1, vec![line(1, 2, 100)]);
        cart_query
            .expect_find_by_user_id()
            .returning(move |_| Ok(Some(full.clone())));

        let query = MockOrderQueryRepositoryTrait::new();

        let mut command = MockOrderCommandRepositoryTrait::new();
        command.expect_create_order().returning(|_| {
            Err(RepositoryError::InsufficientStock {
                racket_id: 1,
                requested: 2,
                available: 1,
            })
        });

        let svc = service(cart_query, query, command);

        let err = svc.create_order(&create_req(1)).await.unwrap_err();
        assert!(matches!(err, ServiceError::InsufficientStock(_)));
    }

    #[tokio::test]
    async fn update_status_fails_for_missing_order() {
        let cart_query = MockCartQueryRepositoryTrait::new();

        let mut query = MockOrderQueryRepositoryTrait::new();
        query.expect_find_by_id().returning(|_| Ok(None));

        let mut command = MockOrderCommandRepositoryTrait::new();
        command.expect_update_status().never();

        let svc = service(cart_query, query, command);

        let req = UpdateOrderStatusRequest {
            order_id: 42,
            status: OrderStatus::Done,
        };

        let err = svc.update_order_status(&req).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_status_done_is_idempotent() {
        let cart_query = MockCartQueryRepositoryTrait::new();

        let mut query = MockOrderQueryRepositoryTrait::new();
        query.expect_find_by_id().returning(|order_id| {
            Ok(Some(order(
                order_id,
                1,
                OrderStatus::Done,
                100,
                vec![OrderLine {
                    racket_id: 1,
                    quantity: 1,
                }],
            )))
        });

        let mut command = MockOrderCommandRepositoryTrait::new();
        command
            .expect_update_status()
            .withf(|req| req.status == OrderStatus::Done)
            .returning(|req| {
                Ok(order(
                    req.order_id,
                    1,
                    req.status,
                    100,
                    vec![OrderLine {
                        racket_id: 1,
                        quantity: 1,
                    }],
                ))
            });

        let svc = service(cart_query, query, command);

        let req = UpdateOrderStatusRequest {
            order_id: 7,
            status: OrderStatus::Done,
        };

        let updated = svc
            .update_order_status(&req)
            .await
            .expect("update should pass");
        assert_eq!(updated.status, OrderStatus::Done);
    }
}
