use crate::{Db, SqliteError};
use catalog_core::{models::MediaUpload, ports::MediaStore};

impl MediaStore for Db {
    type Error = SqliteError;

    async fn upload_media(&self, media: MediaUpload) -> Result<String, Self::Error> {
        let path = format!(
            "{}/{}.{}",
            media.kind.folder(),
            uuid::Uuid::new_v4(),
            media.kind.extension()
        );

        sqlx::query(
            r#"
            insert into
                media (path, content_type, bytes)
            values
                ($1, $2, $3)
            "#,
        )
        .bind(&path)
        .bind(media.kind.content_type())
        .bind(media.bytes)
        .execute(&self.writer)
        .await?;

        Ok(path)
    }
}

impl Db {
    /// Retrieve an uploaded file by the path returned from `upload_media`.
    ///
    /// # Returns
    ///
    /// The content type and the raw bytes, or `None` if nothing is stored there.
    pub async fn get_media(&self, path: &str) -> Result<Option<(String, Vec<u8>)>, SqliteError> {
        let media = sqlx::query_as::<_, (String, Vec<u8>)>(
            r#"
            select
                content_type, bytes
            from
                media
            where
                path = $1
            "#,
        )
        .bind(path)
        .fetch_optional(&self.reader)
        .await?;

        Ok(media)
    }
}
