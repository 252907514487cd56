use crate::di::{DependenciesInject, DependenciesInjectDeps};
use anyhow::{Context, Result};
use prometheus_client::registry::Registry;
use shared::config::ConnectionPool;
use std::{fmt, sync::Arc};

#[derive(Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub registry: Arc<Registry>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("deps", &self.di_container)
            .field("registry", &"Registry")
            .finish()
    }
}

impl AppState {
    pub fn new(pool: ConnectionPool) -> Result<Self> {
        let mut registry = Registry::default();

        let deps = DependenciesInjectDeps { pool };

        let di_container = DependenciesInject::new(deps, &mut registry)
            .context("Failed to initialize dependency injection container")?;

        Ok(Self {
            di_container,
            registry: Arc::new(registry),
        })
    }
}
