//! Furniture service - catalogue use cases.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Furniture, FurnitureChanges, FurnitureSortField, NewFurniture, ObjectId};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::Repositories;
use crate::types::{Page, PageRequest};

#[async_trait]
pub trait FurnitureService: Send + Sync {
    async fn get_furniture(&self, id: ObjectId) -> AppResult<Furniture>;

    async fn list_furniture(
        &self,
        request: PageRequest<FurnitureSortField>,
    ) -> AppResult<Page<Furniture>>;

    async fn create_furniture(&self, item: NewFurniture) -> AppResult<Furniture>;

    async fn update_furniture(&self, id: ObjectId, changes: FurnitureChanges) -> AppResult<Furniture>;

    async fn delete_furniture(&self, id: ObjectId) -> AppResult<()>;
}

pub struct FurnitureCatalog<R: Repositories> {
    repos: Arc<R>,
}

impl<R: Repositories> FurnitureCatalog<R> {
    pub fn new(repos: Arc<R>) -> Self {
        Self { repos }
    }
}

#[async_trait]
impl<R: Repositories> FurnitureService for FurnitureCatalog<R> {
    async fn get_furniture(&self, id: ObjectId) -> AppResult<Furniture> {
        self.repos
            .furniture()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Furniture", id)
    }

    async fn list_furniture(
        &self,
        request: PageRequest<FurnitureSortField>,
    ) -> AppResult<Page<Furniture>> {
        self.repos.furniture().list(request).await
    }

    async fn create_furniture(&self, item: NewFurniture) -> AppResult<Furniture> {
        item.validate()?;

        let created = self.repos.furniture().create(item).await?;
        tracing::info!(furniture_id = %created.id, "Furniture created");
        Ok(created)
    }

    async fn update_furniture(&self, id: ObjectId, changes: FurnitureChanges) -> AppResult<Furniture> {
        if changes.is_empty() {
            return Err(AppError::validation("No fields to update"));
        }
        changes.validate()?;

        let updated = self.repos.furniture().update(id, changes).await?;
        tracing::info!(furniture_id = %updated.id, "Furniture updated");
        Ok(updated)
    }

    async fn delete_furniture(&self, id: ObjectId) -> AppResult<()> {
        self.repos.furniture().delete(id).await?;
        tracing::info!(furniture_id = %id, "Furniture deleted");
        Ok(())
    }
}
