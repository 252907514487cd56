use crate::{
    abstract_trait::cart::{
        CartServiceTrait,
        repository::{DynCartCommandRepository, DynCartQueryRepository},
    },
    domain::requests::cart::{
        AddCartLineRecordRequest, AddRacketCartRequest, RemoveCartLineRecordRequest,
        RemoveRacketCartRequest, UpdateCartLineRecordRequest, UpdateRacketCartRequest,
    },
    model::cart::Cart as CartModel,
};
use anyhow::Result;
use async_trait::async_trait;
use catalog::abstract_trait::racket::repository::DynRacketQueryRepository;
use prometheus_client::registry::Registry;
use shared::{
    errors::{RepositoryError, ServiceError},
    utils::{Method, Metrics, Status, format_validation_errors},
};
use tokio::time::Instant;
use tracing::{error, info};
use validator::Validate;

#[derive(Clone)]
pub struct CartService {
    query: DynCartQueryRepository,
    command: DynCartCommandRepository,
    racket_query: DynRacketQueryRepository,
    metrics: Metrics,
}

impl CartService {
    pub fn new(
        query: DynCartQueryRepository,
        command: DynCartCommandRepository,
        racket_query: DynRacketQueryRepository,
        registry: &mut Registry,
    ) -> Result<Self> {
        let metrics = Metrics::new();

        registry.register(
            "cart_service_request_counter",
            "Total number of requests to the CartService",
            metrics.request_counter.clone(),
        );
        registry.register(
            "cart_service_request_duration",
            "Histogram of request durations for the CartService",
            metrics.request_duration.clone(),
        );

        Ok(Self {
            query,
            command,
            racket_query,
            metrics,
        })
    }

    async fn resolve_cart(&self, user_id: i32) -> Result<CartModel, RepositoryError> {
        match self.query.find_by_user_id(user_id).await? {
            Some(cart) => Ok(cart),
            None => self.command.create(user_id).await,
        }
    }

    async fn reload_cart(&self, user_id: i32) -> Result<CartModel, RepositoryError> {
        self.query
            .find_by_user_id(user_id)
            .await?
            .ok_or(RepositoryError::NotFound)
    }
}

#[async_trait]
impl CartServiceTrait for CartService {
    async fn get_cart(&self, user_id: i32) -> Result<CartModel, ServiceError> {
        info!("🔍 Fetching cart of user ID {user_id}");

        let started = Instant::now();
        let method = Method::Get;

        match self.resolve_cart(user_id).await {
            Ok(cart) => {
                info!(
                    "✅ Cart of user ID {user_id}: {} items totalling {}",
                    cart.total_quantity, cart.total_price
                );
                self.metrics
                    .record(method, Status::Success, started.elapsed().as_secs_f64());
                Ok(cart)
            }
            Err(e) => {
                error!("❌ Failed to resolve cart of user ID {user_id}: {e:?}");
                self.metrics
                    .record(method, Status::Error, started.elapsed().as_secs_f64());
                Err(ServiceError::Repo(e))
            }
        }
    }

    async fn add_racket(&self, req: &AddRacketCartRequest) -> Result<CartModel, ServiceError> {
        info!(
            "🏗️ Adding racket ID {} x{} to cart of user ID {}",
            req.racket_id, req.quantity, req.user_id
        );

        let started = Instant::now();
        let method = Method::Post;

        if let Err(errors) = req.validate() {
            let messages = format_validation_errors(&errors);
            error!("❌ Cart add validation failed: {:?}", messages);
            self.metrics
                .record(method, Status::Error, started.elapsed().as_secs_f64());
            return Err(ServiceError::Validation(messages));
        }

        let cart = match self.resolve_cart(req.user_id).await {
            Ok(cart) => cart,
            Err(e) => {
                error!("❌ Failed to resolve cart of user ID {}: {e:?}", req.user_id);
                self.metrics
                    .record(method, Status::Error, started.elapsed().as_secs_f64());
                return Err(ServiceError::Repo(e));
            }
        };

        let racket = match self.racket_query.find_by_id(req.racket_id).await {
            Ok(Some(racket)) => racket,
            Ok(None) => {
                error!("❌ Racket not found with ID {}", req.racket_id);
                self.metrics
                    .record(method, Status::Error, started.elapsed().as_secs_f64());
                return Err(ServiceError::NotFound(format!(
                    "racket {} not found",
                    req.racket_id
                )));
            }
            Err(e) => {
                error!("❌ Failed to fetch racket ID {}: {e:?}", req.racket_id);
                self.metrics
                    .record(method, Status::Error, started.elapsed().as_secs_f64());
                return Err(ServiceError::Repo(e));
            }
        };

        // A repeated add merges into the existing line and keeps the price
        // snapshot from the first add; the current catalog price only matters
        // for brand-new lines.
        let existing = cart
            .lines
            .iter()
            .find(|line| line.racket_id == req.racket_id);

        let write = match existing {
            Some(line) => {
                self.command
                    .update_line(&UpdateCartLineRecordRequest {
                        user_id: req.user_id,
                        racket_id: req.racket_id,
                        quantity: line.quantity + req.quantity,
                        cart_version: cart.version,
                    })
                    .await
            }
            None => {
                self.command
                    .add_line(&AddCartLineRecordRequest {
                        user_id: req.user_id,
                        racket_id: req.racket_id,
                        quantity: req.quantity,
                        price: racket.price,
                        cart_version: cart.version,
                    })
                    .await
            }
        };

        if let Err(e) = write {
            error!(
                "❌ Failed to add racket ID {} to cart of user ID {}: {e:?}",
                req.racket_id, req.user_id
            );
            self.metrics
                .record(method, Status::Error, started.elapsed().as_secs_f64());
            return Err(match e {
                RepositoryError::VersionConflict(msg) => ServiceError::Conflict(msg),
                other => ServiceError::Repo(other),
            });
        }

        match self.reload_cart(req.user_id).await {
            Ok(cart) => {
                info!(
                    "✅ Cart of user ID {} now has {} items totalling {}",
                    cart.user_id, cart.total_quantity, cart.total_price
                );
                self.metrics
                    .record(method, Status::Success, started.elapsed().as_secs_f64());
                Ok(cart)
            }
            Err(e) => {
                error!(
                    "❌ Failed to reload cart of user ID {}: {e:?}",
                    req.user_id
                );
                self.metrics
                    .record(method, Status::Error, started.elapsed().as_secs_f64());
                Err(ServiceError::Repo(e))
            }
        }
    }

    async fn update_racket(
        &self,
        req: &UpdateRacketCartRequest,
    ) -> Result<CartModel, ServiceError> {
        info!(
            "✏️ Adjusting racket ID {} by {} in cart of user ID {}",
            req.racket_id, req.quantity, req.user_id
        );

        let started = Instant::now();
        let method = Method::Put;

        if let Err(errors) = req.validate() {
            let messages = format_validation_errors(&errors);
            error!("❌ Cart update validation failed: {:?}", messages);
            self.metrics
                .record(method, Status::Error, started.elapsed().as_secs_f64());
            return Err(ServiceError::Validation(messages));
        }

        let cart = match self.resolve_cart(req.user_id).await {
            Ok(cart) => cart,
            Err(e) => {
                error!("❌ Failed to resolve cart of user ID {}: {e:?}", req.user_id);
                self.metrics
                    .record(method, Status::Error, started.elapsed().as_secs_f64());
                return Err(ServiceError::Repo(e));
            }
        };

        match self.racket_query.find_by_id(req.racket_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                error!("❌ Racket not found with ID {}", req.racket_id);
                self.metrics
                    .record(method, Status::Error, started.elapsed().as_secs_f64());
                return Err(ServiceError::NotFound(format!(
                    "racket {} not found",
                    req.racket_id
                )));
            }
            Err(e) => {
                error!("❌ Failed to fetch racket ID {}: {e:?}", req.racket_id);
                self.metrics
                    .record(method, Status::Error, started.elapsed().as_secs_f64());
                return Err(ServiceError::Repo(e));
            }
        }

        let line = match cart
            .lines
            .iter()
            .find(|line| line.racket_id == req.racket_id)
        {
            Some(line) => line,
            None => {
                // Nothing to adjust; the cart comes back unchanged.
                info!(
                    "✅ Racket ID {} not in cart of user ID {}; cart unchanged",
                    req.racket_id, req.user_id
                );
                self.metrics
                    .record(method, Status::Success, started.elapsed().as_secs_f64());
                return Ok(cart);
            }
        };

        let record = UpdateCartLineRecordRequest {
            user_id: req.user_id,
            racket_id: req.racket_id,
            quantity: line.quantity + req.quantity,
            cart_version: cart.version,
        };

        if let Err(e) = self.command.update_line(&record).await {
            error!(
                "❌ Failed to adjust racket ID {} in cart of user ID {}: {e:?}",
                req.racket_id, req.user_id
            );
            self.metrics
                .record(method, Status::Error, started.elapsed().as_secs_f64());
            return Err(match e {
                RepositoryError::VersionConflict(msg) => ServiceError::Conflict(msg),
                other => ServiceError::Repo(other),
            });
        }

        match self.reload_cart(req.user_id).await {
            Ok(cart) => {
                info!(
                    "✅ Cart of user ID {} now has {} items totalling {}",
                    cart.user_id, cart.total_quantity, cart.total_price
                );
                self.metrics
                    .record(method, Status::Success, started.elapsed().as_secs_f64());
                Ok(cart)
            }
            Err(e) => {
                error!(
                    "❌ Failed to reload cart of user ID {}: {e:?}",
                    req.user_id
                );
                self.metrics
                    .record(method, Status::Error, started.elapsed().as_secs_f64());
                Err(ServiceError::Repo(e))
            }
        }
    }

    async fn remove_racket(
        &self,
        req: &RemoveRacketCartRequest,
    ) -> Result<CartModel, ServiceError> {
        info!(
            "🗑️ Removing racket ID {} from cart of user ID {}",
            req.racket_id, req.user_id
        );

        let started = Instant::now();
        let method = Method::Delete;

        if let Err(errors) = req.validate() {
            let messages = format_validation_errors(&errors);
            error!("❌ Cart remove validation failed: {:?}", messages);
            self.metrics
                .record(method, Status::Error, started.elapsed().as_secs_f64());
            return Err(ServiceError::Validation(messages));
        }

        let cart = match self.resolve_cart(req.user_id).await {
            Ok(cart) => cart,
            Err(e) => {
                error!("❌ Failed to resolve cart of user ID {}: {e:?}", req.user_id);
                self.metrics
                    .record(method, Status::Error, started.elapsed().as_secs_f64());
                return Err(ServiceError::Repo(e));
            }
        };

        match self.racket_query.find_by_id(req.racket_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                error!("❌ Racket not found with ID {}", req.racket_id);
                self.metrics
                    .record(method, Status::Error, started.elapsed().as_secs_f64());
                return Err(ServiceError::NotFound(format!(
                    "racket {} not found",
                    req.racket_id
                )));
            }
            Err(e) => {
                error!("❌ Failed to fetch racket ID {}: {e:?}", req.racket_id);
                self.metrics
                    .record(method, Status::Error, started.elapsed().as_secs_f64());
                return Err(ServiceError::Repo(e));
            }
        }

        if !cart
            .lines
            .iter()
            .any(|line| line.racket_id == req.racket_id)
        {
            // Removing a line that was never there succeeds with the cart
            // as it stands.
            info!(
                "✅ Racket ID {} not in cart of user ID {}; cart unchanged",
                req.racket_id, req.user_id
            );
            self.metrics
                .record(method, Status::Success, started.elapsed().as_secs_f64());
            return Ok(cart);
        }

        let record = RemoveCartLineRecordRequest {
            user_id: req.user_id,
            racket_id: req.racket_id,
            cart_version: cart.version,
        };

        if let Err(e) = self.command.remove_line(&record).await {
            error!(
                "❌ Failed to remove racket ID {} from cart of user ID {}: {e:?}",
                req.racket_id, req.user_id
            );
            self.metrics
                .record(method, Status::Error, started.elapsed().as_secs_f64());
            return Err(match e {
                RepositoryError::VersionConflict(msg) => ServiceError::Conflict(msg),
                other => ServiceError::Repo(other),
            });
        }

        match self.reload_cart(req.user_id).await {
            Ok(cart) => {
                info!(
                    "✅ Cart of user ID {} now has {} items totalling {}",
                    cart.user_id, cart.total_quantity, cart.total_price
                );
                self.metrics
                    .record(method, Status::Success, started.elapsed().as_secs_f64());
                Ok(cart)
            }
            Err(e) => {
                error!(
                    "❌ Failed to reload cart of user ID {}: {e:?}",
                    req.user_id
                );
                self.metrics
                    .record(method, Status::Error, started.elapsed().as_secs_f64());
                Err(ServiceError::Repo(e))
            }
        }
    }
}
