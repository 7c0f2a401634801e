mod common;

use catalog_core::{
    models::{FieldValue, MediaUpload, ProductField, ProductId},
    ports::{MediaStore as _, RemoteCatalog as _},
};
use catalog_sqlite::SqliteError;
use common::{CREATED_AT, lamp, open};
use time::macros::datetime;

#[tokio::test]
async fn test_create_then_fetch() -> anyhow::Result<()> {
    let db = open().await?;

    let first = db.create(lamp(), CREATED_AT).await?;
    let mut shelf = lamp();
    shelf.name = "Shelf".into();
    shelf.stock = 0;
    let second = db.create(shelf, CREATED_AT).await?;

    assert!(first.is_available);
    assert!(!second.is_available);
    assert_ne!(first.id, second.id);

    let fetched = db.fetch_all().await?;
    assert_eq!(fetched, vec![first, second]);
    Ok(())
}

#[tokio::test]
async fn test_update_field_touches_only_that_key() -> anyhow::Result<()> {
    let db = open().await?;
    let created = db.create(lamp(), CREATED_AT).await?;
    let deal_end = datetime!(2025-04-01 00:00 UTC);

    db.update_field(&created.id, ProductField::IsFavorite, FieldValue::Bool(true))
        .await?;
    db.update_field(
        &created.id,
        ProductField::DealEndTime,
        FieldValue::Timestamp(deal_end),
    )
    .await?;
    db.update_field(
        &created.id,
        ProductField::Name,
        FieldValue::Text("Floor lamp".into()),
    )
    .await?;

    db.update_field(
        &created.id,
        ProductField::ImageUrls,
        FieldValue::TextList(vec!["product_images/a.jpg".into(), "product_images/b.jpg".into()]),
    )
    .await?;
    db.update_field(&created.id, ProductField::Price, FieldValue::Decimal(42.25))
        .await?;

    let fetched = db.fetch_all().await?.remove(0);
    let mut expected = created;
    expected.is_favorite = true;
    expected.deal_end_time = Some(deal_end);
    expected.name = "Floor lamp".into();
    expected.image_urls = vec!["product_images/a.jpg".into(), "product_images/b.jpg".into()];
    expected.price = 42.25;
    assert_eq!(fetched, expected);

    db.update_field(&expected.id, ProductField::DealEndTime, FieldValue::Null)
        .await?;
    let fetched = db.fetch_all().await?.remove(0);
    assert_eq!(fetched.deal_end_time, None);
    Ok(())
}

#[tokio::test]
async fn test_update_fields_writes_the_batch() -> anyhow::Result<()> {
    let db = open().await?;
    let created = db.create(lamp(), CREATED_AT).await?;

    db.update_fields(
        &created.id,
        vec![
            (ProductField::Stock, FieldValue::Count(0)),
            (ProductField::IsAvailable, FieldValue::Bool(false)),
        ],
    )
    .await?;
    let fetched = db.fetch_all().await?.remove(0);
    assert_eq!(fetched.stock, 0);
    assert!(!fetched.is_available);

    let missing = ProductId::from("missing");
    let result = db
        .update_fields(
            &missing,
            vec![(ProductField::Stock, FieldValue::Count(7))],
        )
        .await;
    assert!(matches!(result, Err(SqliteError::NotFound(_))));
    Ok(())
}

#[tokio::test]
async fn test_missing_ids_are_not_found() -> anyhow::Result<()> {
    let db = open().await?;
    let missing = ProductId::from("missing");

    let result = db
        .update_field(&missing, ProductField::IsPinned, FieldValue::Bool(true))
        .await;
    assert!(matches!(result, Err(SqliteError::NotFound(_))));

    let result = db.delete(&missing).await;
    assert!(matches!(result, Err(SqliteError::NotFound(_))));
    Ok(())
}

#[tokio::test]
async fn test_delete() -> anyhow::Result<()> {
    let db = open().await?;
    let created = db.create(lamp(), CREATED_AT).await?;

    db.delete(&created.id).await?;
    assert!(db.fetch_all().await?.is_empty());
    assert!(matches!(
        db.delete(&created.id).await,
        Err(SqliteError::NotFound(_))
    ));
    Ok(())
}

#[tokio::test]
async fn test_stored_documents_use_defaults() -> anyhow::Result<()> {
    let db = open().await?;
    sqlx::query("insert into product (id, doc) values ($1, $2)")
        .bind("legacy")
        .bind(
            r#"{"name":"Kettle","description":"1.7l","price":25,"stock":2,
                "createdAt":"2024-12-24T08:00:00Z","sellerName":"ignored"}"#,
        )
        .execute(&db.writer)
        .await?;

    let fetched = db.fetch_all().await?.remove(0);
    assert_eq!(fetched.id.as_str(), "legacy");
    assert!(fetched.is_available);
    assert!(!fetched.is_favorite);
    assert!(fetched.image_urls.is_empty());
    assert_eq!(fetched.rating, 0.0);
    Ok(())
}

#[tokio::test]
async fn test_malformed_document_fails_fetch() -> anyhow::Result<()> {
    let db = open().await?;
    db.create(lamp(), CREATED_AT).await?;
    sqlx::query("insert into product (id, doc) values ($1, $2)")
        .bind("broken")
        .bind(r#"{"name":"No price","description":"","createdAt":"2024-12-24T08:00:00Z"}"#)
        .execute(&db.writer)
        .await?;

    let result = db.fetch_all().await;
    assert!(matches!(result, Err(SqliteError::Decode(_))));
    Ok(())
}

#[tokio::test]
async fn test_upload_media() -> anyhow::Result<()> {
    let db = open().await?;

    let image = db.upload_media(MediaUpload::image(vec![0xff, 0xd8, 0xff])).await?;
    let video = db.upload_media(MediaUpload::video(vec![0, 0, 0, 0x18])).await?;

    assert!(image.starts_with("product_images/") && image.ends_with(".jpg"));
    assert!(video.starts_with("videos/") && video.ends_with(".mp4"));

    let (content_type, bytes) = db.get_media(&image).await?.expect("image stored");
    assert_eq!(content_type, "image/jpeg");
    assert_eq!(bytes, vec![0xff, 0xd8, 0xff]);
    assert!(db.get_media("videos/none.mp4").await?.is_none());
    Ok(())
}
