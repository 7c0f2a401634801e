use crate::models::{FieldValue, NewProduct, Product, ProductField, ProductId};
use std::future::Future;
use time::OffsetDateTime;

/// Repository interface for the durable copy of the catalog.
///
/// This trait stands in for a hosted document store: one document per product,
/// keyed by the product id. Every method is asynchronous and may fail
/// independently of the others; no method retries on its own.
///
/// The ranking store keeps the working copy in memory and synchronizes with an
/// implementation of this trait one field update (or one batch of field updates)
/// at a time, never by rewriting whole documents.
pub trait RemoteCatalog: Send + Sync {
    /// The error type for underlying operations
    type Error: std::error::Error + Send + Sync + 'static;

    /// Retrieve every product in the catalog, in no particular order.
    fn fetch_all(&self) -> impl Future<Output = Result<Vec<Product>, Self::Error>> + Send;

    /// Create a new product document.
    ///
    /// The implementation assigns the id and records `as_of` as the creation time.
    ///
    /// # Returns
    ///
    /// The product exactly as it was persisted.
    fn create(
        &self,
        product: NewProduct,
        as_of: OffsetDateTime,
    ) -> impl Future<Output = Result<Product, Self::Error>> + Send;

    /// Overwrite a single field of an existing product document.
    ///
    /// Updating a product that does not exist is an error.
    fn update_field(
        &self,
        product_id: &ProductId,
        field: ProductField,
        value: FieldValue,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Overwrite several fields of an existing product document.
    ///
    /// The default implementation issues one `update_field` per entry, in order,
    /// stopping at the first failure; earlier writes are not undone. Implementations
    /// that can apply the batch atomically should override it.
    fn update_fields(
        &self,
        product_id: &ProductId,
        fields: Vec<(ProductField, FieldValue)>,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send {
        async move {
            for (field, value) in fields {
                self.update_field(product_id, field, value).await?;
            }
            Ok(())
        }
    }

    /// Remove a product document.
    ///
    /// Deleting a product that does not exist is an error.
    fn delete(&self, product_id: &ProductId) -> impl Future<Output = Result<(), Self::Error>> + Send;
}
