//! Latency-simulating repository wrapper.
//!
//! Local stores answer instantly, which makes the wizard's submitting
//! state invisible. Wrapping the store in [`SimulatedLatency`] restores
//! a network-like pause so the submit flow can actually be seen (and
//! tested) in the CLI. Zero delay is a passthrough.

use std::time::Duration;

use rentora_core::repository::property::{ListingFilter, PropertyRepository};
use rentora_types::error::RepositoryError;
use rentora_types::property::{Property, PropertyId};

/// Wraps any repository and sleeps a fixed delay before delegating.
#[derive(Clone)]
pub struct SimulatedLatency<R> {
    inner: R,
    delay: Duration,
}

impl<R> SimulatedLatency<R> {
    pub fn new(inner: R, delay: Duration) -> Self {
        Self { inner, delay }
    }

    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

impl<R: PropertyRepository> PropertyRepository for SimulatedLatency<R> {
    async fn create(&self, property: &Property) -> Result<Property, RepositoryError> {
        self.pause().await;
        self.inner.create(property).await
    }

    async fn get_by_id(&self, id: &PropertyId) -> Result<Option<Property>, RepositoryError> {
        self.pause().await;
        self.inner.get_by_id(id).await
    }

    async fn list(
        &self,
        filter: Option<ListingFilter>,
    ) -> Result<Vec<Property>, RepositoryError> {
        self.pause().await;
        self.inner.list(filter).await
    }

    async fn update(&self, property: &Property) -> Result<Property, RepositoryError> {
        self.pause().await;
        self.inner.update(property).await
    }

    async fn delete(&self, id: &PropertyId) -> Result<(), RepositoryError> {
        self.pause().await;
        self.inner.delete(id).await
    }
}
