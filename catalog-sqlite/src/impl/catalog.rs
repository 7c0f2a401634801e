use crate::{Db, SqliteError};
use catalog_core::{
    models::{FieldValue, NewProduct, Product, ProductDocument, ProductField, ProductId},
    ports::RemoteCatalog,
};
use time::OffsetDateTime;
use tracing::{Level, event};

/// The JSON path of a field inside a stored document
fn path(field: ProductField) -> String {
    format!("$.{}", field.as_str())
}

impl Db {
    async fn set_field<'e, E>(
        executor: E,
        product_id: &ProductId,
        field: ProductField,
        value: &FieldValue,
    ) -> Result<(), SqliteError>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let value = sqlx::types::Json(value.to_json()?);
        let result = sqlx::query(
            r#"
            update
                product
            set
                doc = json_set(doc, $1, json($2))
            where
                id = $3
            "#,
        )
        .bind(path(field))
        .bind(value)
        .bind(product_id.as_str())
        .execute(executor)
        .await?;

        if result.rows_affected() == 0 {
            Err(SqliteError::NotFound(product_id.clone()))
        } else {
            Ok(())
        }
    }
}

impl RemoteCatalog for Db {
    type Error = SqliteError;

    async fn fetch_all(&self) -> Result<Vec<Product>, Self::Error> {
        let rows = sqlx::query_as::<_, (String, String)>(
            r#"
            select
                id, doc
            from
                product
            order by
                rowid
            "#,
        )
        .fetch_all(&self.reader)
        .await?;

        let products = rows
            .into_iter()
            .map(|(id, doc)| ProductDocument::decode(id.into(), &doc))
            .collect::<Result<Vec<_>, _>>()
            .inspect_err(|error| event!(Level::WARN, %error, "stored document rejected"))?;

        Ok(products)
    }

    async fn create(
        &self,
        product: NewProduct,
        as_of: OffsetDateTime,
    ) -> Result<Product, Self::Error> {
        let product_id = ProductId::from(uuid::Uuid::new_v4().to_string());
        let product = product.into_product(product_id, as_of);
        let doc = ProductDocument::from(&product).encode()?;

        sqlx::query(
            r#"
            insert into
                product (id, doc)
            values
                ($1, $2)
            "#,
        )
        .bind(product.id.as_str())
        .bind(doc)
        .execute(&self.writer)
        .await?;

        event!(Level::DEBUG, product_id = %product.id, "document created");
        Ok(product)
    }

    async fn update_field(
        &self,
        product_id: &ProductId,
        field: ProductField,
        value: FieldValue,
    ) -> Result<(), Self::Error> {
        Self::set_field(&self.writer, product_id, field, &value).await
    }

    /// Applies every field in a single transaction, so a failure leaves the
    /// document untouched.
    async fn update_fields(
        &self,
        product_id: &ProductId,
        fields: Vec<(ProductField, FieldValue)>,
    ) -> Result<(), Self::Error> {
        let mut tx = self.writer.begin().await?;
        for (field, value) in &fields {
            Self::set_field(&mut *tx, product_id, *field, value).await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn delete(&self, product_id: &ProductId) -> Result<(), Self::Error> {
        let result = sqlx::query(
            r#"
            delete from
                product
            where
                id = $1
            "#,
        )
        .bind(product_id.as_str())
        .execute(&self.writer)
        .await?;

        if result.rows_affected() == 0 {
            return Err(SqliteError::NotFound(product_id.clone()));
        }
        event!(Level::DEBUG, %product_id, "document deleted");
        Ok(())
    }
}
