#![allow(dead_code)]

use catalog_core::models::NewProduct;
use catalog_sqlite::{Db, config::SqliteConfig};
use time::{OffsetDateTime, macros::datetime};

pub const CREATED_AT: OffsetDateTime = datetime!(2025-03-01 09:00 UTC);

pub async fn open() -> anyhow::Result<Db> {
    Ok(Db::open(&SqliteConfig::default()).await?)
}

pub fn lamp() -> NewProduct {
    NewProduct {
        name: "Desk lamp".into(),
        description: "Adjustable arm, warm white".into(),
        category: "Lighting".into(),
        price: 39.5,
        stock: 12,
        rating: 4.2,
        ..Default::default()
    }
}
