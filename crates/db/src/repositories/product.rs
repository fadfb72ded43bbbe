//! Product repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::products;

/// Input for creating a product.
#[derive(Debug, Clone)]
pub struct CreateProductInput {
    /// Product name.
    pub name: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Batch number printed on the product.
    pub batch_no: String,
    /// URL of the product PDF.
    pub pdf_url: Option<String>,
}

/// Input for updating a product. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateProductInput {
    /// Product name.
    pub name: Option<String>,
    /// Description; `Some(None)` clears it.
    pub description: Option<Option<String>>,
    /// Batch number.
    pub batch_no: Option<String>,
    /// PDF URL; `Some(None)` clears it.
    pub pdf_url: Option<Option<String>>,
}

/// Product repository for CRUD operations.
#[derive(Debug, Clone, Copy)]
pub struct ProductRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ProductRepository<'a> {
    /// Creates a product repository over a borrowed connection.
    #[must_use]
    pub const fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists all products, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<products::Model>, DbErr> {
        products::Entity::find()
            .order_by_desc(products::Column::CreatedAt)
            .all(self.db)
            .await
    }

    /// Finds a product by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<products::Model>, DbErr> {
        products::Entity::find_by_id(id).one(self.db).await
    }

    /// Finds the newest product carrying a batch number.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_batch_no(&self, batch_no: &str) -> Result<Option<products::Model>, DbErr> {
        products::Entity::find()
            .filter(products::Column::BatchNo.eq(batch_no))
            .order_by_desc(products::Column::CreatedAt)
            .one(self.db)
            .await
    }

    /// Creates a new product.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, input: CreateProductInput) -> Result<products::Model, DbErr> {
        let now = chrono::Utc::now().into();

        let product = products::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(input.name),
            description: Set(input.description),
            batch_no: Set(input.batch_no),
            pdf_url: Set(input.pdf_url),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let product = product.insert(self.db).await?;
        tracing::debug!(product_id = %product.id, batch_no = %product.batch_no, "Product created");
        Ok(product)
    }

    /// Applies a partial update. Returns `None` if the product does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateProductInput,
    ) -> Result<Option<products::Model>, DbErr> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut product = existing.into_active_model();
        if let Some(name) = input.name {
            product.name = Set(name);
        }
        if let Some(description) = input.description {
            product.description = Set(description);
        }
        if let Some(batch_no) = input.batch_no {
            product.batch_no = Set(batch_no);
        }
        if let Some(pdf_url) = input.pdf_url {
            product.pdf_url = Set(pdf_url);
        }
        product.updated_at = Set(chrono::Utc::now().into());

        product.update(self.db).await.map(Some)
    }

    /// Deletes a product. Returns `false` if nothing was deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete(&self, id: Uuid) -> Result<bool, DbErr> {
        let result = products::Entity::delete_by_id(id).exec(self.db).await?;
        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn product(name: &str, batch_no: &str) -> products::Model {
        let now = chrono::Utc::now().into();
        products::Model {
            id: Uuid::now_v7(),
            name: name.to_string(),
            description: Some("Cold-pressed oil".to_string()),
            batch_no: batch_no.to_string(),
            pdf_url: Some("https://cdn.example.com/a.pdf".to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_list_returns_rows() {
        let rows = vec![product("Newer", "B-2"), product("Older", "B-1")];
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([rows.clone()])
            .into_connection();

        let listed = ProductRepository::new(&db).list().await.unwrap();
        assert_eq!(listed, rows);
    }

    #[tokio::test]
    async fn test_list_orders_newest_first() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<products::Model>::new()])
            .into_connection();
        let repo = ProductRepository::new(&db);
        repo.list().await.unwrap();

        let log = db.into_transaction_log();
        let sql = &log[0].statements()[0].sql;
        assert!(sql.contains(r#"ORDER BY "products"."created_at" DESC"#));
    }

    #[tokio::test]
    async fn test_find_by_batch_no_missing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<products::Model>::new()])
            .into_connection();

        let found = ProductRepository::new(&db)
            .find_by_batch_no("NOPE")
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_create_returns_inserted_row() {
        let inserted = product("Mustard Oil", "B-7");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![inserted.clone()]])
            .into_connection();

        let created = ProductRepository::new(&db)
            .create(CreateProductInput {
                name: "Mustard Oil".to_string(),
                description: None,
                batch_no: "B-7".to_string(),
                pdf_url: None,
            })
            .await
            .unwrap();
        assert_eq!(created.batch_no, "B-7");
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<products::Model>::new()])
            .into_connection();

        let updated = ProductRepository::new(&db)
            .update(Uuid::now_v7(), UpdateProductInput::default())
            .await
            .unwrap();
        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn test_update_clears_optional_field() {
        let existing = product("Oil", "B-1");
        let mut cleared = existing.clone();
        cleared.pdf_url = None;
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![existing.clone()], vec![cleared.clone()]])
            .into_connection();

        let updated = ProductRepository::new(&db)
            .update(
                existing.id,
                UpdateProductInput {
                    pdf_url: Some(None),
                    ..UpdateProductInput::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert!(updated.pdf_url.is_none());
    }

    #[tokio::test]
    async fn test_delete_reports_rows_affected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .into_connection();
        let repo = ProductRepository::new(&db);

        assert!(repo.delete(Uuid::now_v7()).await.unwrap());
        assert!(!repo.delete(Uuid::now_v7()).await.unwrap());
    }
}
