#![allow(dead_code)]

use catalog_core::{
    models::{FieldValue, MediaUpload, NewProduct, Product, ProductField, ProductId},
    ports::{MediaStore, RemoteCatalog},
};
use std::{
    sync::{
        Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    time::Duration,
};
use time::OffsetDateTime;

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct MemoryError(pub String);

/// A remote catalog kept in memory, with switches to make calls fail or stall.
#[derive(Default)]
pub struct MemoryCatalog {
    pub documents: Mutex<Vec<Product>>,
    pub calls: Mutex<Vec<String>>,
    pub fail_fetch: AtomicBool,
    pub fail_writes: AtomicBool,
    pub fail_uploads: AtomicBool,
    pub latency: Mutex<Option<Duration>>,
    next_id: AtomicUsize,
}

impl MemoryCatalog {
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let catalog = Self::default();
        *catalog.documents.lock().unwrap() = products.into_iter().collect();
        catalog
    }

    pub fn set_latency(&self, latency: Duration) {
        *self.latency.lock().unwrap() = Some(latency);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn document(&self, id: &str) -> Option<Product> {
        self.documents
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id.as_str() == id)
            .cloned()
    }

    async fn enter(&self, call: String, fail: &AtomicBool) -> Result<(), MemoryError> {
        self.calls.lock().unwrap().push(call.clone());
        let latency = *self.latency.lock().unwrap();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        if fail.load(Ordering::SeqCst) {
            Err(MemoryError(format!("{call} rejected")))
        } else {
            Ok(())
        }
    }
}

impl RemoteCatalog for MemoryCatalog {
    type Error = MemoryError;

    async fn fetch_all(&self) -> Result<Vec<Product>, Self::Error> {
        self.enter("fetch_all".into(), &self.fail_fetch).await?;
        Ok(self.documents.lock().unwrap().clone())
    }

    async fn create(
        &self,
        product: NewProduct,
        as_of: OffsetDateTime,
    ) -> Result<Product, Self::Error> {
        self.enter("create".into(), &self.fail_writes).await?;
        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        let product = product.into_product(format!("remote-{n}").into(), as_of);
        self.documents.lock().unwrap().push(product.clone());
        Ok(product)
    }

    async fn update_field(
        &self,
        product_id: &ProductId,
        field: ProductField,
        value: FieldValue,
    ) -> Result<(), Self::Error> {
        self.enter(format!("update {product_id} {field}"), &self.fail_writes)
            .await?;
        let mut documents = self.documents.lock().unwrap();
        let document = documents
            .iter_mut()
            .find(|p| &p.id == product_id)
            .ok_or_else(|| MemoryError(format!("no document {product_id}")))?;
        document
            .set_field(field, value)
            .map_err(|e| MemoryError(e.to_string()))
    }

    async fn delete(&self, product_id: &ProductId) -> Result<(), Self::Error> {
        self.enter(format!("delete {product_id}"), &self.fail_writes)
            .await?;
        let mut documents = self.documents.lock().unwrap();
        let before = documents.len();
        documents.retain(|p| &p.id != product_id);
        if documents.len() == before {
            Err(MemoryError(format!("no document {product_id}")))
        } else {
            Ok(())
        }
    }
}

impl MediaStore for MemoryCatalog {
    type Error = MemoryError;

    async fn upload_media(&self, media: MediaUpload) -> Result<String, Self::Error> {
        self.enter("upload".into(), &self.fail_uploads).await?;
        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        Ok(format!(
            "memory://{}/{n}.{}",
            media.kind.folder(),
            media.kind.extension()
        ))
    }
}

pub fn product(
    id: &str,
    pinned: bool,
    featured: bool,
    stock: u32,
    rating: f64,
    created_at: OffsetDateTime,
) -> Product {
    NewProduct {
        name: id.to_uppercase(),
        description: format!("{id} description"),
        price: 5.0,
        stock,
        rating,
        is_featured: featured,
        is_pinned: pinned,
        ..Default::default()
    }
    .into_product(id.into(), created_at)
}

pub fn ids(products: &[Product]) -> Vec<String> {
    products.iter().map(|p| p.id.to_string()).collect()
}
