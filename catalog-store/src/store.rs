use crate::{RemoteFailure, StoreError, config::StoreConfig, ranking};
use catalog_core::{
    models::{
        FieldValue, MediaKind, MediaUpload, Map, NewProduct, Product, ProductEdit, ProductField,
        ProductId,
    },
    ports::{MediaStore, RemoteCatalog},
};
use rustc_hash::FxHashSet;
use std::{
    future::Future,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};
use time::OffsetDateTime;
use tokio::sync::watch;
use tracing::{Level, event};

/// An immutable, ranked view of the store's collection.
///
/// A new snapshot is published after every change; `revision` increases by one
/// each time.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// A counter identifying this version of the collection
    pub revision: u64,
    /// The products, in display order
    pub products: Arc<[Product]>,
}

struct State {
    /// The working copy, kept in display order at all times
    products: Map<ProductId, Product>,
    /// Ids with an operation in flight
    pending: FxHashSet<ProductId>,
    revision: u64,
}

impl State {
    fn rerank(&mut self) {
        self.products.sort_by(|_, a, _, b| ranking::compare(a, b));
    }
}

/// Releases a product id from the in-flight set when dropped.
struct Claim<'a> {
    state: &'a Mutex<State>,
    id: ProductId,
}

impl Drop for Claim<'_> {
    fn drop(&mut self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.pending.remove(&self.id);
    }
}

/// An observable, ranked, in-memory product collection backed by a [`RemoteCatalog`].
///
/// The store exclusively owns the working copy of the catalog. Callers read
/// ranked snapshots and request changes through the methods below; they never
/// mutate products directly. All methods take `&self`, so several operations can
/// be interleaved on a single task, but at most one operation per product id is
/// ever in flight.
pub struct ProductRankingStore<R> {
    remote: R,
    config: StoreConfig,
    state: Mutex<State>,
    sender: watch::Sender<Snapshot>,
}

impl<R: RemoteCatalog> ProductRankingStore<R> {
    /// Create an empty store. Call [`load`](Self::load) to populate it.
    pub fn new(remote: R, config: StoreConfig) -> Self {
        let (sender, _) = watch::channel(Snapshot {
            revision: 0,
            products: Arc::from(Vec::new()),
        });
        Self {
            remote,
            config,
            state: Mutex::new(State {
                products: Map::default(),
                pending: FxHashSet::default(),
                revision: 0,
            }),
            sender,
        }
    }

    /// The remote collaborator backing this store
    pub fn remote(&self) -> &R {
        &self.remote
    }

    /// Subscribe to ranked snapshots, starting with the current one.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.sender.subscribe()
    }

    /// The current ranked snapshot
    pub fn snapshot(&self) -> Snapshot {
        self.sender.borrow().clone()
    }

    /// All products, in display order
    pub fn products(&self) -> Vec<Product> {
        self.lock().products.values().cloned().collect()
    }

    /// A single product, if the store holds it
    pub fn get(&self, product_id: &ProductId) -> Option<Product> {
        self.lock().products.get(product_id).cloned()
    }

    /// The products marked as favorites, in display order
    pub fn favorites(&self) -> Vec<Product> {
        self.lock()
            .products
            .values()
            .filter(|product| product.is_favorite)
            .cloned()
            .collect()
    }

    /// The products on a deal as of the given instant, in display order
    pub fn deals(&self, as_of: OffsetDateTime) -> Vec<Product> {
        self.lock()
            .products
            .values()
            .filter(|product| product.is_on_deal(as_of))
            .cloned()
            .collect()
    }

    /// The number of products held
    pub fn len(&self) -> usize {
        self.lock().products.len()
    }

    /// Whether the store holds no products
    pub fn is_empty(&self) -> bool {
        self.lock().products.is_empty()
    }

    /// Replace the local collection with a full fetch from the remote catalog.
    ///
    /// The fetched order becomes the tie-breaking order. On failure the
    /// previous collection is kept as-is; there is no retry.
    ///
    /// # Returns
    ///
    /// The number of products loaded.
    pub async fn load(&self) -> Result<usize, StoreError> {
        let fetched = self
            .call_remote(self.remote.fetch_all())
            .await
            .map_err(|error| {
                event!(Level::WARN, %error, "catalog fetch failed, keeping previous collection");
                StoreError::FetchFailed(error)
            })?;

        let mut state = self.lock();
        state.products = fetched
            .into_iter()
            .map(|product| (product.id.clone(), product))
            .collect();
        state.rerank();
        let count = state.products.len();
        self.publish(&mut state);
        event!(Level::DEBUG, count, "catalog loaded");
        Ok(count)
    }

    /// Flip the favorite flag of a product.
    ///
    /// The flip is visible immediately; if the remote write fails it is undone
    /// and `FieldUpdateFailed` is returned.
    pub async fn toggle_favorite(&self, product_id: &ProductId) -> Result<bool, StoreError> {
        self.toggle(product_id, ProductField::IsFavorite, |product| {
            product.is_favorite
        })
        .await
    }

    /// Flip the pin flag of a product.
    ///
    /// Same consistency policy as [`toggle_favorite`](Self::toggle_favorite).
    pub async fn toggle_pin(&self, product_id: &ProductId) -> Result<bool, StoreError> {
        self.toggle(product_id, ProductField::IsPinned, |product| product.is_pinned)
            .await
    }

    /// Set the stock of a product, keeping `is_available` equal to `stock > 0`.
    ///
    /// Both fields are written remotely in one batch and rolled back together
    /// on failure.
    pub async fn update_stock(&self, product_id: &ProductId, stock: u32) -> Result<(), StoreError> {
        self.apply_optimistic(
            product_id,
            vec![
                (ProductField::Stock, FieldValue::Count(stock)),
                (ProductField::IsAvailable, FieldValue::Bool(stock > 0)),
            ],
        )
        .await
    }

    /// Drop every product that is not on a deal as of the given instant.
    ///
    /// This is local only: nothing is deleted remotely, and the products come
    /// back on the next [`load`](Self::load). Calling it again with the same
    /// instant removes nothing further.
    ///
    /// # Returns
    ///
    /// The ids of the removed products, in their former display order.
    pub fn refresh_deals(&self, as_of: OffsetDateTime) -> Vec<ProductId> {
        let mut state = self.lock();
        let mut removed = Vec::new();
        state.products.retain(|id, product| {
            let keep = product.is_on_deal(as_of);
            if !keep {
                removed.push(id.clone());
            }
            keep
        });
        if !removed.is_empty() {
            self.publish(&mut state);
            event!(Level::DEBUG, removed = removed.len(), "expired deals removed");
        }
        removed
    }

    /// Delete a product remotely, then locally.
    ///
    /// The product stays visible until the remote catalog confirms the delete;
    /// on failure it remains and `DeleteFailed` is returned.
    pub async fn delete_product(&self, product_id: &ProductId) -> Result<(), StoreError> {
        let _claim = self.claim(product_id)?;

        if let Err(source) = self.call_remote(self.remote.delete(product_id)).await {
            event!(Level::WARN, %product_id, error = %source, "remote delete failed");
            return Err(StoreError::DeleteFailed {
                id: product_id.clone(),
                source,
            });
        }

        let mut state = self.lock();
        // a concurrent load or deal refresh may already have dropped it
        if state.products.shift_remove(product_id).is_some() {
            self.publish(&mut state);
        }
        event!(Level::DEBUG, %product_id, "product deleted");
        Ok(())
    }

    /// Create a product remotely and add it to the collection.
    ///
    /// The input is validated before any remote call.
    ///
    /// # Returns
    ///
    /// The id assigned by the remote catalog.
    pub async fn create_product(
        &self,
        product: NewProduct,
        as_of: OffsetDateTime,
    ) -> Result<ProductId, StoreError> {
        product.validate()?;

        let created = self
            .call_remote(self.remote.create(product, as_of))
            .await
            .map_err(|error| {
                event!(Level::WARN, %error, "remote create failed");
                StoreError::CreateFailed(error)
            })?;

        let product_id = created.id.clone();
        let mut state = self.lock();
        state.products.insert(product_id.clone(), created);
        state.rerank();
        self.publish(&mut state);
        event!(Level::DEBUG, %product_id, "product created");
        Ok(product_id)
    }

    /// Apply a set of edits to a product.
    ///
    /// The edits are written remotely in one batch and applied locally only once
    /// the remote catalog confirms them.
    pub async fn edit_product(
        &self,
        product_id: &ProductId,
        edit: ProductEdit,
    ) -> Result<(), StoreError> {
        edit.validate()?;
        let _claim = self.claim(product_id)?;

        let changes = edit.changes();
        let Some(&(first, _)) = changes.first() else {
            return Ok(());
        };

        if let Err(source) = self.write_fields(product_id, &changes).await {
            event!(Level::WARN, %product_id, error = %source, "remote edit failed");
            return Err(StoreError::FieldUpdateFailed {
                id: product_id.clone(),
                field: first,
                source,
            });
        }

        // the remote copy is already changed, so a local failure is only logged
        let mut state = self.lock();
        if let Some(product) = state.products.get_mut(product_id) {
            for (field, value) in changes {
                if let Err(error) = product.set_field(field, value) {
                    event!(
                        Level::ERROR,
                        %product_id,
                        %field,
                        %error,
                        "confirmed edit not applied locally"
                    );
                }
            }
            state.rerank();
            self.publish(&mut state);
        }
        event!(Level::DEBUG, %product_id, "product edited");
        Ok(())
    }

    async fn toggle(
        &self,
        product_id: &ProductId,
        field: ProductField,
        current: impl Fn(&Product) -> bool,
    ) -> Result<bool, StoreError> {
        let flipped = {
            let state = self.lock();
            let product = state
                .products
                .get(product_id)
                .ok_or_else(|| StoreError::NotFound(product_id.clone()))?;
            !current(product)
        };
        self.apply_optimistic(product_id, vec![(field, FieldValue::Bool(flipped))])
            .await?;
        Ok(flipped)
    }

    /// Apply changes locally, write them remotely, and roll back on failure.
    async fn apply_optimistic(
        &self,
        product_id: &ProductId,
        changes: Vec<(ProductField, FieldValue)>,
    ) -> Result<(), StoreError> {
        let _claim = self.claim(product_id)?;

        let previous = {
            let mut state = self.lock();
            let product = state
                .products
                .get_mut(product_id)
                .ok_or_else(|| StoreError::NotFound(product_id.clone()))?;

            let previous: Vec<_> = changes
                .iter()
                .map(|&(field, _)| (field, product.field_value(field)))
                .collect();

            let mut updated = product.clone();
            for (field, value) in changes.iter().cloned() {
                updated.set_field(field, value)?;
            }
            *product = updated;
            state.rerank();
            self.publish(&mut state);
            previous
        };

        let Err(source) = self.write_fields(product_id, &changes).await else {
            return Ok(());
        };

        let field = changes[0].0;
        event!(
            Level::WARN,
            %product_id,
            %field,
            error = %source,
            "remote write failed, rolling back"
        );

        let mut state = self.lock();
        if let Some(product) = state.products.get_mut(product_id) {
            for (field, value) in previous {
                if let Err(error) = product.set_field(field, value) {
                    event!(Level::ERROR, %product_id, %field, %error, "rollback failed");
                }
            }
            state.rerank();
            self.publish(&mut state);
        }

        Err(StoreError::FieldUpdateFailed {
            id: product_id.clone(),
            field,
            source,
        })
    }

    async fn write_fields(
        &self,
        product_id: &ProductId,
        changes: &[(ProductField, FieldValue)],
    ) -> Result<(), RemoteFailure> {
        if let [(field, value)] = changes {
            self.call_remote(self.remote.update_field(product_id, *field, value.clone()))
                .await
        } else {
            self.call_remote(self.remote.update_fields(product_id, changes.to_vec()))
                .await
        }
    }

    /// Mark an id as in flight, failing if it is unknown or already claimed.
    fn claim(&self, product_id: &ProductId) -> Result<Claim<'_>, StoreError> {
        let mut state = self.lock();
        if !state.products.contains_key(product_id) {
            return Err(StoreError::NotFound(product_id.clone()));
        }
        if !state.pending.insert(product_id.clone()) {
            event!(Level::DEBUG, %product_id, "rejecting concurrent operation");
            return Err(StoreError::Busy(product_id.clone()));
        }
        Ok(Claim {
            state: &self.state,
            id: product_id.clone(),
        })
    }

    async fn call_remote<T, E>(
        &self,
        call: impl Future<Output = Result<T, E>>,
    ) -> Result<T, RemoteFailure>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        match self.config.remote_timeout {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(result) => result.map_err(RemoteFailure::backend),
                Err(_) => Err(RemoteFailure::TimedOut(limit)),
            },
            None => call.await.map_err(RemoteFailure::backend),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, state: &mut State) {
        state.revision += 1;
        self.sender.send_replace(Snapshot {
            revision: state.revision,
            products: state.products.values().cloned().collect(),
        });
    }
}

impl<R: RemoteCatalog + MediaStore> ProductRankingStore<R> {
    /// Upload media, then create a product referencing it.
    ///
    /// Images are appended to `image_urls` in the order given; a video replaces
    /// `video_url`. The input is validated before anything is uploaded, and a
    /// failed upload aborts the creation.
    pub async fn add_product(
        &self,
        mut product: NewProduct,
        media: Vec<MediaUpload>,
        as_of: OffsetDateTime,
    ) -> Result<ProductId, StoreError> {
        product.validate()?;

        for upload in media {
            let kind = upload.kind;
            let url = self
                .call_remote(self.remote.upload_media(upload))
                .await
                .map_err(|error| {
                    event!(Level::WARN, %error, "media upload failed");
                    StoreError::MediaUploadFailed(error)
                })?;
            match kind {
                MediaKind::Image => product.image_urls.push(url),
                MediaKind::Video => product.video_url = Some(url),
            }
        }

        self.create_product(product, as_of).await
    }
}
