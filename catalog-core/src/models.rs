mod document;
mod field;
mod id;
mod map;
mod media;
mod product;

pub use document::{DecodeError, ProductDocument};
pub use field::{FieldValue, ProductField};
pub use id::ProductId;
pub use map::Map;
pub use media::{MediaKind, MediaUpload};
pub use product::{InvalidProduct, NewProduct, Product, ProductEdit};
