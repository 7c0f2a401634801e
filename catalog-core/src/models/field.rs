use time::OffsetDateTime;

/// A single persisted product field, addressable by a remote field update.
///
/// The `id` and `createdAt` fields are deliberately absent: they are assigned on
/// creation and never rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductField {
    /// `name`
    Name,
    /// `description`
    Description,
    /// `category`
    Category,
    /// `price`
    Price,
    /// `stock`
    Stock,
    /// `rating`
    Rating,
    /// `discount`
    Discount,
    /// `isFeatured`
    IsFeatured,
    /// `isPinned`
    IsPinned,
    /// `isAvailable`
    IsAvailable,
    /// `isFavorite`
    IsFavorite,
    /// `dealEndTime`
    DealEndTime,
    /// `imageUrls`
    ImageUrls,
    /// `videoUrl`
    VideoUrl,
}

impl ProductField {
    /// The key of the field in a product document
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductField::Name => "name",
            ProductField::Description => "description",
            ProductField::Category => "category",
            ProductField::Price => "price",
            ProductField::Stock => "stock",
            ProductField::Rating => "rating",
            ProductField::Discount => "discount",
            ProductField::IsFeatured => "isFeatured",
            ProductField::IsPinned => "isPinned",
            ProductField::IsAvailable => "isAvailable",
            ProductField::IsFavorite => "isFavorite",
            ProductField::DealEndTime => "dealEndTime",
            ProductField::ImageUrls => "imageUrls",
            ProductField::VideoUrl => "videoUrl",
        }
    }
}

impl std::fmt::Display for ProductField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed value written to a single product field.
///
/// Serializes to the JSON representation used inside product documents, with
/// timestamps rendered as RFC3339 strings and `Null` clearing optional fields.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// A boolean flag
    Bool(bool),
    /// A non-negative count
    Count(u32),
    /// A decimal number
    Decimal(f64),
    /// A text value
    Text(String),
    /// A list of text values
    TextList(Vec<String>),
    /// A point in time
    Timestamp(#[serde(with = "time::serde::rfc3339")] OffsetDateTime),
    /// The absence of a value
    Null,
}

impl FieldValue {
    /// Render the value as a JSON value, as stored inside a product document
    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}
