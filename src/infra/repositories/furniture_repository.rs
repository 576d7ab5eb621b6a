//! Furniture repository.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set};

use super::entities::furniture::{self, Entity as FurnitureEntity};
use super::sea_order;
use crate::domain::{Furniture, FurnitureChanges, FurnitureSortField, NewFurniture, ObjectId};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::types::{Page, PageRequest};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Furniture repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait FurnitureRepository: Send + Sync {
    async fn find_by_id(&self, id: ObjectId) -> AppResult<Option<Furniture>>;

    async fn list(&self, request: PageRequest<FurnitureSortField>) -> AppResult<Page<Furniture>>;

    async fn create(&self, item: NewFurniture) -> AppResult<Furniture>;

    async fn update(&self, id: ObjectId, changes: FurnitureChanges) -> AppResult<Furniture>;

    async fn delete(&self, id: ObjectId) -> AppResult<()>;
}

/// SeaORM-backed implementation of FurnitureRepository
pub struct FurnitureStore {
    db: DatabaseConnection,
}

impl FurnitureStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn sort_column(field: FurnitureSortField) -> furniture::Column {
    match field {
        FurnitureSortField::Name => furniture::Column::Name,
        FurnitureSortField::Category => furniture::Column::Category,
        FurnitureSortField::Cost => furniture::Column::Cost,
        FurnitureSortField::Stock => furniture::Column::Stock,
        FurnitureSortField::CreatedAt => furniture::Column::CreatedAt,
    }
}

#[async_trait]
impl FurnitureRepository for FurnitureStore {
    async fn find_by_id(&self, id: ObjectId) -> AppResult<Option<Furniture>> {
        FurnitureEntity::find_by_id(id.to_hex())
            .one(&self.db)
            .await?
            .map(Furniture::try_from)
            .transpose()
    }

    async fn list(&self, request: PageRequest<FurnitureSortField>) -> AppResult<Page<Furniture>> {
        let mut query = FurnitureEntity::find();
        if let Some(sort) = request.sort {
            query = query.order_by(sort_column(sort.field), sea_order(sort.order));
        }
        let query = query.order_by_asc(furniture::Column::Id);

        let paginator = query.paginate(&self.db, request.size);
        let total = paginator.num_items().await?;
        let items = paginator
            .fetch_page(request.page_index())
            .await?
            .into_iter()
            .map(Furniture::try_from)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Page::new(items, &request, total))
    }

    async fn create(&self, item: NewFurniture) -> AppResult<Furniture> {
        let now = Utc::now();
        let model = furniture::ActiveModel {
            id: Set(ObjectId::new().to_hex()),
            name: Set(item.name),
            description: Set(item.description),
            category: Set(item.category),
            cost: Set(item.cost),
            stock: Set(item.stock),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        Furniture::try_from(model)
    }

    async fn update(&self, id: ObjectId, changes: FurnitureChanges) -> AppResult<Furniture> {
        let mut active: furniture::ActiveModel = FurnitureEntity::find_by_id(id.to_hex())
            .one(&self.db)
            .await?
            .ok_or_not_found("Furniture", id)?
            .into();

        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(description) = changes.description {
            active.description = Set(Some(description));
        }
        if let Some(category) = changes.category {
            active.category = Set(category);
        }
        if let Some(cost) = changes.cost {
            active.cost = Set(cost);
        }
        if let Some(stock) = changes.stock {
            active.stock = Set(stock);
        }
        active.updated_at = Set(Utc::now());

        Furniture::try_from(active.update(&self.db).await?)
    }

    async fn delete(&self, id: ObjectId) -> AppResult<()> {
        let result = FurnitureEntity::delete_by_id(id.to_hex())
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("Furniture", id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use sea_orm::sea_query::Values;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Statement, Transaction, Value};
    use std::collections::BTreeMap;

    use crate::types::PaginationParams;

    fn row(id: ObjectId, name: &str) -> furniture::Model {
        furniture::Model {
            id: id.to_hex(),
            name: name.to_string(),
            description: None,
            category: "seating".to_string(),
            cost: Decimal::new(12_50, 2),
            stock: 3,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn find_by_id_maps_row() {
        let id = ObjectId::new();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(id, "Stool")]])
            .into_connection();

        let item = FurnitureStore::new(db).find_by_id(id).await.unwrap().unwrap();
        assert_eq!(item.id, id);
        assert_eq!(item.cost, Decimal::new(12_50, 2));
    }

    #[tokio::test]
    async fn list_reports_totals() {
        let count = BTreeMap::from([("num_items", Value::BigInt(Some(3)))]);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![count]])
            .append_query_results([vec![
                row(ObjectId::new(), "Armchair"),
                row(ObjectId::new(), "Bench"),
            ]])
            .into_connection();

        let params = PaginationParams {
            page: 1,
            size: 2,
            sort_by: Some("-cost".to_string()),
        };
        let request = params.into_request::<FurnitureSortField>().unwrap();
        let page = FurnitureStore::new(db).list(request).await.unwrap();

        assert_eq!(page.items.len(), 2);
        assert_eq!(page.meta.total, 3);
        assert_eq!(page.meta.total_pages, 2);
    }

    fn page_statement(log: &[Transaction]) -> &Statement {
        log.iter()
            .flat_map(|txn| txn.statements())
            .find(|stmt| stmt.sql.contains("LIMIT"))
            .expect("page query was not logged")
    }

    async fn run_list(sort_by: Option<&str>, page: u64) -> Vec<Transaction> {
        let count = BTreeMap::from([("num_items", Value::BigInt(Some(3)))]);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![count]])
            .append_query_results([vec![row(ObjectId::new(), "Bench")]])
            .into_connection();

        let params = PaginationParams {
            page,
            size: 2,
            sort_by: sort_by.map(String::from),
        };
        let request = params.into_request::<FurnitureSortField>().unwrap();
        FurnitureStore::new(db.clone()).list(request).await.unwrap();

        db.into_transaction_log()
    }

    #[tokio::test]
    async fn list_sorts_descending_then_by_id() {
        let log = run_list(Some("-cost"), 2).await;
        let stmt = page_statement(&log);

        assert!(
            stmt.sql
                .contains(r#"ORDER BY "furniture"."cost" DESC, "furniture"."id" ASC LIMIT $1 OFFSET $2"#),
            "{}",
            stmt.sql
        );
        assert_eq!(
            stmt.values,
            Some(Values(vec![Value::BigUnsigned(Some(2)), Value::BigUnsigned(Some(2))]))
        );
    }

    #[tokio::test]
    async fn list_without_sort_orders_by_id_only() {
        let log = run_list(None, 1).await;
        let stmt = page_statement(&log);

        assert!(
            stmt.sql.contains(r#"ORDER BY "furniture"."id" ASC LIMIT"#),
            "{}",
            stmt.sql
        );

        let log = run_list(Some("name"), 1).await;
        assert!(page_statement(&log)
            .sql
            .contains(r#"ORDER BY "furniture"."name" ASC, "furniture"."id" ASC"#));
    }

    #[tokio::test]
    async fn deleting_missing_item_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let id = ObjectId::new();
        let err = FurnitureStore::new(db).delete(id).await.unwrap_err();
        assert!(matches!(err, AppError::IdNotFound { resource: "Furniture", .. }));
    }

    #[tokio::test]
    async fn updating_missing_item_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<furniture::Model>::new()])
            .into_connection();

        let changes = FurnitureChanges {
            stock: Some(0),
            ..Default::default()
        };
        let err = FurnitureStore::new(db)
            .update(ObjectId::new(), changes)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::IdNotFound { .. }));
    }
}
