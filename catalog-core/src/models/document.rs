use crate::models::{InvalidProduct, Product, ProductId};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// The wire representation of a product inside a remote document store.
///
/// The document key is the product id, so the id is not part of the body.
/// Decoding is strict: `name`, `description`, `price` and `createdAt` are
/// required, and a document missing any of them is rejected rather than
/// silently defaulted. The remaining fields fall back to explicit defaults:
///
/// | key           | default        |
/// |---------------|----------------|
/// | `category`    | `""`           |
/// | `stock`       | `0`            |
/// | `rating`      | `0`            |
/// | `discount`    | `0`            |
/// | `isFeatured`  | `false`        |
/// | `isPinned`    | `false`        |
/// | `isFavorite`  | `false`        |
/// | `isAvailable` | `stock > 0`    |
/// | `dealEndTime` | none           |
/// | `imageUrls`   | `[]`           |
/// | `videoUrl`    | none           |
///
/// Unknown keys (seller details, delivery info, rating breakdowns and the like)
/// are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDocument {
    /// Display name
    pub name: String,
    /// Free-form description
    pub description: String,
    /// Category label
    #[serde(default)]
    pub category: String,
    /// Unit price
    pub price: f64,
    /// Units in stock
    #[serde(default)]
    pub stock: u32,
    /// Average rating
    #[serde(default)]
    pub rating: f64,
    /// Discount percentage
    #[serde(default)]
    pub discount: f64,
    /// Promotion flag
    #[serde(default)]
    pub is_featured: bool,
    /// Pin flag
    #[serde(default)]
    pub is_pinned: bool,
    /// Availability flag; derived from the stock when absent
    #[serde(default)]
    pub is_available: Option<bool>,
    /// Favorite flag
    #[serde(default)]
    pub is_favorite: bool,
    /// Creation time
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// End of the current deal
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub deal_end_time: Option<OffsetDateTime>,
    /// Image URLs
    #[serde(default)]
    pub image_urls: Vec<String>,
    /// Video URL
    #[serde(default)]
    pub video_url: Option<String>,
}

impl ProductDocument {
    /// Decode a JSON document stored under `id` into a product.
    pub fn decode(id: ProductId, json: &str) -> Result<Product, DecodeError> {
        match serde_json::from_str::<Self>(json) {
            Ok(document) => document.into_product(id),
            Err(source) => Err(DecodeError::Malformed { id, source }),
        }
    }

    /// Attach the id and check the range invariants of the decoded values.
    pub fn into_product(self, id: ProductId) -> Result<Product, DecodeError> {
        let product = Product {
            name: self.name,
            description: self.description,
            category: self.category,
            price: self.price,
            stock: self.stock,
            rating: self.rating,
            discount: self.discount,
            is_featured: self.is_featured,
            is_pinned: self.is_pinned,
            is_available: self.is_available.unwrap_or(self.stock > 0),
            is_favorite: self.is_favorite,
            created_at: self.created_at,
            deal_end_time: self.deal_end_time,
            image_urls: self.image_urls,
            video_url: self.video_url,
            id,
        };
        match product.validate() {
            Ok(()) => Ok(product),
            Err(source) => Err(DecodeError::Invalid {
                id: product.id,
                source,
            }),
        }
    }

    /// Encode the document as a JSON string
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl From<&Product> for ProductDocument {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            category: product.category.clone(),
            price: product.price,
            stock: product.stock,
            rating: product.rating,
            discount: product.discount,
            is_featured: product.is_featured,
            is_pinned: product.is_pinned,
            is_available: Some(product.is_available),
            is_favorite: product.is_favorite,
            created_at: product.created_at,
            deal_end_time: product.deal_end_time,
            image_urls: product.image_urls.clone(),
            video_url: product.video_url.clone(),
        }
    }
}

/// Errors that can occur when decoding a product document
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The document is not valid JSON, lacks a required key, or has a value of the wrong type
    #[error("malformed document for product {id}: {source}")]
    Malformed {
        /// The document key
        id: ProductId,
        /// The underlying parse failure
        #[source]
        source: serde_json::Error,
    },
    /// The document parsed, but a value is out of range
    #[error("invalid document for product {id}: {source}")]
    Invalid {
        /// The document key
        id: ProductId,
        /// The violated invariant
        #[source]
        source: InvalidProduct,
    },
}
