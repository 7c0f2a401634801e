use crate::models::{FieldValue, ProductField, ProductId};
use time::OffsetDateTime;

/// A product in the catalog.
///
/// The ranking flags (`is_pinned`, `is_featured`, `is_available`), the `rating`
/// and `created_at` determine the display order; see the `catalog-store` crate.
/// Fields are public for reading and construction, but a product held by a
/// ranking store must only be mutated through the store.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier, assigned by the remote catalog
    pub id: ProductId,
    /// Display name
    pub name: String,
    /// Free-form description
    pub description: String,
    /// Category label (may be empty)
    pub category: String,
    /// Non-negative, finite unit price
    pub price: f64,
    /// Units in stock
    pub stock: u32,
    /// Average rating in [0, 5]
    pub rating: f64,
    /// Discount percentage in [0, 100], where 0 means no discount
    pub discount: f64,
    /// Whether the product is promoted by the catalog owner
    pub is_featured: bool,
    /// Whether the user pinned the product to the top of the list
    pub is_pinned: bool,
    /// Whether the product can currently be purchased
    pub is_available: bool,
    /// Whether the user marked the product as a favorite
    pub is_favorite: bool,
    /// When the product was created
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// When the current deal ends, if the product is on a deal
    #[serde(with = "time::serde::rfc3339::option")]
    pub deal_end_time: Option<OffsetDateTime>,
    /// Uploaded image URLs, in display order
    pub image_urls: Vec<String>,
    /// Uploaded video URL
    pub video_url: Option<String>,
}

impl Product {
    /// The remaining deal time as of the given instant.
    ///
    /// Returns `None` if the product has no deal or the deal has ended; the
    /// returned duration is always strictly positive.
    pub fn time_left(&self, as_of: OffsetDateTime) -> Option<time::Duration> {
        let remaining = self.deal_end_time? - as_of;
        remaining.is_positive().then_some(remaining)
    }

    /// Whether the product is on a deal as of the given instant
    pub fn is_on_deal(&self, as_of: OffsetDateTime) -> bool {
        self.time_left(as_of).is_some()
    }

    /// The price after applying the discount
    pub fn discounted_price(&self) -> f64 {
        self.price * (1.0 - self.discount / 100.0)
    }

    /// Read the current value of a single field.
    pub fn field_value(&self, field: ProductField) -> FieldValue {
        match field {
            ProductField::Name => FieldValue::Text(self.name.clone()),
            ProductField::Description => FieldValue::Text(self.description.clone()),
            ProductField::Category => FieldValue::Text(self.category.clone()),
            ProductField::Price => FieldValue::Decimal(self.price),
            ProductField::Stock => FieldValue::Count(self.stock),
            ProductField::Rating => FieldValue::Decimal(self.rating),
            ProductField::Discount => FieldValue::Decimal(self.discount),
            ProductField::IsFeatured => FieldValue::Bool(self.is_featured),
            ProductField::IsPinned => FieldValue::Bool(self.is_pinned),
            ProductField::IsAvailable => FieldValue::Bool(self.is_available),
            ProductField::IsFavorite => FieldValue::Bool(self.is_favorite),
            ProductField::DealEndTime => self
                .deal_end_time
                .map_or(FieldValue::Null, FieldValue::Timestamp),
            ProductField::ImageUrls => FieldValue::TextList(self.image_urls.clone()),
            ProductField::VideoUrl => self
                .video_url
                .clone()
                .map_or(FieldValue::Null, FieldValue::Text),
        }
    }

    /// Overwrite a single field.
    ///
    /// The value must have the type the field expects and must respect the
    /// field's range; otherwise the product is left untouched.
    pub fn set_field(&mut self, field: ProductField, value: FieldValue) -> Result<(), InvalidProduct> {
        let mismatch = || InvalidProduct::FieldType(field);
        match (field, value) {
            (ProductField::Name, FieldValue::Text(name)) => {
                check_name(&name)?;
                self.name = name;
            }
            (ProductField::Description, FieldValue::Text(text)) => self.description = text,
            (ProductField::Category, FieldValue::Text(text)) => self.category = text,
            (ProductField::Price, FieldValue::Decimal(price)) => {
                check_price(price)?;
                self.price = price;
            }
            (ProductField::Stock, FieldValue::Count(stock)) => self.stock = stock,
            (ProductField::Rating, FieldValue::Decimal(rating)) => {
                check_rating(rating)?;
                self.rating = rating;
            }
            (ProductField::Discount, FieldValue::Decimal(discount)) => {
                check_discount(discount)?;
                self.discount = discount;
            }
            (ProductField::IsFeatured, FieldValue::Bool(flag)) => self.is_featured = flag,
            (ProductField::IsPinned, FieldValue::Bool(flag)) => self.is_pinned = flag,
            (ProductField::IsAvailable, FieldValue::Bool(flag)) => self.is_available = flag,
            (ProductField::IsFavorite, FieldValue::Bool(flag)) => self.is_favorite = flag,
            (ProductField::DealEndTime, FieldValue::Timestamp(at)) => self.deal_end_time = Some(at),
            (ProductField::DealEndTime, FieldValue::Null) => self.deal_end_time = None,
            (ProductField::ImageUrls, FieldValue::TextList(urls)) => self.image_urls = urls,
            (ProductField::VideoUrl, FieldValue::Text(url)) => self.video_url = Some(url),
            (ProductField::VideoUrl, FieldValue::Null) => self.video_url = None,
            _ => return Err(mismatch()),
        }
        Ok(())
    }

    /// Check the range invariants of the numeric fields and the name.
    pub fn validate(&self) -> Result<(), InvalidProduct> {
        check_name(&self.name)?;
        check_price(self.price)?;
        check_rating(self.rating)?;
        check_discount(self.discount)
    }
}

/// The data needed to create a product.
///
/// The remote catalog assigns the id and creation time; new products are never
/// favorites, and availability follows the initial stock.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewProduct {
    /// Display name (must not be blank)
    pub name: String,
    /// Free-form description
    pub description: String,
    /// Category label
    pub category: String,
    /// Non-negative, finite unit price
    pub price: f64,
    /// Initial units in stock
    pub stock: u32,
    /// Initial rating in [0, 5]
    pub rating: f64,
    /// Discount percentage in [0, 100]
    pub discount: f64,
    /// Whether the product is promoted
    pub is_featured: bool,
    /// Whether the product starts pinned
    pub is_pinned: bool,
    /// When the deal ends, if any
    pub deal_end_time: Option<OffsetDateTime>,
    /// Already-uploaded image URLs
    pub image_urls: Vec<String>,
    /// Already-uploaded video URL
    pub video_url: Option<String>,
}

impl NewProduct {
    /// Reject inputs that would violate a product invariant.
    pub fn validate(&self) -> Result<(), InvalidProduct> {
        check_name(&self.name)?;
        check_price(self.price)?;
        check_rating(self.rating)?;
        check_discount(self.discount)
    }

    /// Materialize the product once the remote catalog has assigned an id.
    pub fn into_product(self, id: ProductId, created_at: OffsetDateTime) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            category: self.category,
            price: self.price,
            stock: self.stock,
            rating: self.rating,
            discount: self.discount,
            is_featured: self.is_featured,
            is_pinned: self.is_pinned,
            is_available: self.stock > 0,
            is_favorite: false,
            created_at,
            deal_end_time: self.deal_end_time,
            image_urls: self.image_urls,
            video_url: self.video_url,
        }
    }
}

/// A set of edits to an existing product.
///
/// Fields left as `None` are unchanged. `deal_end_time: Some(None)` clears the deal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductEdit {
    /// Replacement name
    pub name: Option<String>,
    /// Replacement description
    pub description: Option<String>,
    /// Replacement category
    pub category: Option<String>,
    /// Replacement price
    pub price: Option<f64>,
    /// Replacement discount
    pub discount: Option<f64>,
    /// Replacement (or removal) of the deal end time
    pub deal_end_time: Option<Option<OffsetDateTime>>,
    /// Replacement image URLs
    pub image_urls: Option<Vec<String>>,
}

impl ProductEdit {
    /// Reject edits that would violate a product invariant.
    pub fn validate(&self) -> Result<(), InvalidProduct> {
        if let Some(name) = &self.name {
            check_name(name)?;
        }
        if let Some(price) = self.price {
            check_price(price)?;
        }
        if let Some(discount) = self.discount {
            check_discount(discount)?;
        }
        Ok(())
    }

    /// Whether the edit changes nothing
    pub fn is_empty(&self) -> bool {
        self.changes().is_empty()
    }

    /// The edit as a list of field updates, in a fixed order.
    pub fn changes(&self) -> Vec<(ProductField, FieldValue)> {
        let mut changes = Vec::new();
        if let Some(name) = &self.name {
            changes.push((ProductField::Name, FieldValue::Text(name.clone())));
        }
        if let Some(description) = &self.description {
            changes.push((ProductField::Description, FieldValue::Text(description.clone())));
        }
        if let Some(category) = &self.category {
            changes.push((ProductField::Category, FieldValue::Text(category.clone())));
        }
        if let Some(price) = self.price {
            changes.push((ProductField::Price, FieldValue::Decimal(price)));
        }
        if let Some(discount) = self.discount {
            changes.push((ProductField::Discount, FieldValue::Decimal(discount)));
        }
        if let Some(deal_end_time) = self.deal_end_time {
            changes.push((
                ProductField::DealEndTime,
                deal_end_time.map_or(FieldValue::Null, FieldValue::Timestamp),
            ));
        }
        if let Some(urls) = &self.image_urls {
            changes.push((ProductField::ImageUrls, FieldValue::TextList(urls.clone())));
        }
        changes
    }
}

/// Errors that can occur when validating product data
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidProduct {
    /// The name is empty or only whitespace
    #[error("product name cannot be blank")]
    BlankName,
    /// The price is negative, NaN or infinite
    #[error("price must be a non-negative, finite number (got {0})")]
    Price(f64),
    /// The rating lies outside [0, 5]
    #[error("rating must lie within [0, 5] (got {0})")]
    Rating(f64),
    /// The discount lies outside [0, 100]
    #[error("discount must be a percentage within [0, 100] (got {0})")]
    Discount(f64),
    /// A value of the wrong type was supplied for a field
    #[error("value has the wrong type for field {0}")]
    FieldType(ProductField),
}

fn check_name(name: &str) -> Result<(), InvalidProduct> {
    if name.trim().is_empty() {
        Err(InvalidProduct::BlankName)
    } else {
        Ok(())
    }
}

fn check_price(price: f64) -> Result<(), InvalidProduct> {
    if price.is_finite() && price >= 0.0 {
        Ok(())
    } else {
        Err(InvalidProduct::Price(price))
    }
}

fn check_rating(rating: f64) -> Result<(), InvalidProduct> {
    if (0.0..=5.0).contains(&rating) {
        Ok(())
    } else {
        Err(InvalidProduct::Rating(rating))
    }
}

fn check_discount(discount: f64) -> Result<(), InvalidProduct> {
    if (0.0..=100.0).contains(&discount) {
        Ok(())
    } else {
        Err(InvalidProduct::Discount(discount))
    }
}
