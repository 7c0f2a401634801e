use crate::models::MediaUpload;
use std::future::Future;

/// Blob storage for product images and videos.
///
/// Only the product-creation flow uses this trait; the ranking logic never
/// touches media.
pub trait MediaStore: Send + Sync {
    /// The error type for underlying operations
    type Error: std::error::Error + Send + Sync + 'static;

    /// Store the bytes under a freshly generated name.
    ///
    /// # Returns
    ///
    /// A URL from which the media can later be retrieved.
    fn upload_media(
        &self,
        media: MediaUpload,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send;
}
