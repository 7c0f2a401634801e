use catalog_core::models::{InvalidProduct, ProductField, ProductId};
use std::time::Duration;

/// Why a call to a remote collaborator did not succeed
#[derive(Debug, thiserror::Error)]
pub enum RemoteFailure {
    /// The call did not complete within the configured timeout
    #[error("remote call timed out after {0:?}")]
    TimedOut(Duration),
    /// The collaborator reported an error
    #[error("remote backend error")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl RemoteFailure {
    pub(crate) fn backend(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Box::new(error))
    }
}

/// Errors surfaced by the ranking store.
///
/// Every variant leaves the local collection in a consistent state: a failed
/// fetch keeps the previous collection, a failed field update has been rolled
/// back, and a failed delete keeps the product visible.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The full reload did not complete; the previous collection is retained
    #[error("failed to fetch the catalog")]
    FetchFailed(#[source] RemoteFailure),
    /// A remote field write did not complete; the local change was rolled back
    #[error("failed to update field {field} of product {id}")]
    FieldUpdateFailed {
        /// The product whose write failed
        id: ProductId,
        /// The (first) field that was being written
        field: ProductField,
        /// The underlying failure
        #[source]
        source: RemoteFailure,
    },
    /// The remote delete was rejected or unreachable; the product remains
    #[error("failed to delete product {id}")]
    DeleteFailed {
        /// The product that could not be deleted
        id: ProductId,
        /// The underlying failure
        #[source]
        source: RemoteFailure,
    },
    /// The remote document could not be created
    #[error("failed to create product")]
    CreateFailed(#[source] RemoteFailure),
    /// An attached image or video could not be uploaded; nothing was created
    #[error("failed to upload product media")]
    MediaUploadFailed(#[source] RemoteFailure),
    /// The input was rejected before any remote call was attempted
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidProduct),
    /// No product with this id is held by the store
    #[error("product {0} not found")]
    NotFound(ProductId),
    /// Another operation on this product is still in flight
    #[error("an operation on product {0} is already in flight")]
    Busy(ProductId),
}
