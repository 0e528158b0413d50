//! Cart coordination: merge-by-id policy and serialized read-modify-write.
//!
//! Every mutation is a read-full-cart → transform → write-full-cart cycle
//! against a store with no merge semantics of its own. Two such cycles
//! interleaving would silently drop the first writer's change, so all
//! mutations in this process go through one async mutex. After a write the
//! cart is re-read and the fresh state returned; the locally transformed
//! array is never handed back to the caller.

use std::sync::Arc;

use clients::CartClient;
use common::CartItem;
use tokio::sync::{Mutex, MutexGuard};

use crate::error::{OrchestrationError, Result};

/// Merges one incoming line item into a cart, keeping one line item per id.
fn merge_item(items: &mut Vec<CartItem>, incoming: CartItem) {
    match items.iter_mut().find(|item| item.id == incoming.id) {
        Some(existing) => existing.quantity += incoming.quantity,
        None => items.push(incoming),
    }
}

/// Collapses duplicate ids in a full-cart payload, preserving first-seen
/// order and summing quantities.
fn normalize(items: Vec<CartItem>) -> Vec<CartItem> {
    let mut merged: Vec<CartItem> = Vec::with_capacity(items.len());
    for item in items {
        merge_item(&mut merged, item);
    }
    merged
}

/// Serializes all cart mutations and enforces the merge-by-id invariant.
#[derive(Debug, Clone)]
pub struct CartCoordinator<C: CartClient> {
    client: C,
    write_lock: Arc<Mutex<()>>,
}

impl<C: CartClient> CartCoordinator<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Current cart contents, straight from the cart service.
    #[tracing::instrument(skip(self))]
    pub async fn current(&self) -> Result<Vec<CartItem>> {
        Ok(self.client.fetch().await?)
    }

    /// Adds a single line item, merging with an existing line item by id.
    ///
    /// Returns the authoritative post-write cart from a fresh read.
    #[tracing::instrument(skip(self, item), fields(item_id = item.id))]
    pub async fn add_item(&self, item: CartItem) -> Result<Vec<CartItem>> {
        if item.quantity < 1 {
            return Err(OrchestrationError::InvalidQuantity { id: item.id });
        }

        let _guard = self.write_lock.lock().await;
        let mut items = self.client.fetch().await?;
        merge_item(&mut items, item);
        self.client.replace(&items).await?;
        Ok(self.client.fetch().await?)
    }

    /// Replaces the whole cart. Duplicate ids in the payload are merged
    /// before the write; any quantity below 1 rejects the whole request.
    #[tracing::instrument(skip(self, items))]
    pub async fn replace(&self, items: Vec<CartItem>) -> Result<Vec<CartItem>> {
        if let Some(bad) = items.iter().find(|item| item.quantity < 1) {
            return Err(OrchestrationError::InvalidQuantity { id: bad.id });
        }
        let items = normalize(items);

        let _guard = self.write_lock.lock().await;
        self.client.replace(&items).await?;
        Ok(self.client.fetch().await?)
    }

    /// Sets the quantity of one line item via read-modify-write.
    ///
    /// Quantities below 1 are rejected before any downstream call.
    #[tracing::instrument(skip(self))]
    pub async fn update_quantity(&self, id: i64, quantity: u32) -> Result<Vec<CartItem>> {
        if quantity < 1 {
            return Err(OrchestrationError::InvalidQuantity { id });
        }

        let _guard = self.write_lock.lock().await;
        let mut items = self.client.fetch().await?;
        let target = items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(OrchestrationError::ItemNotFound { id })?;
        target.quantity = quantity;
        self.client.replace(&items).await?;
        Ok(self.client.fetch().await?)
    }

    /// Empties the cart. A non-success downstream status is reported to the
    /// caller, never swallowed.
    #[tracing::instrument(skip(self))]
    pub async fn clear(&self) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        Ok(self.client.clear().await?)
    }

    /// Takes the cart write lock. Held by checkout across its whole
    /// sequence so no cart mutation can interleave.
    pub(crate) async fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }

    pub(crate) fn client(&self) -> &C {
        &self.client
    }
}
