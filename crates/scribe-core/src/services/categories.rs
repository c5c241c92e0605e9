use std::sync::Arc;

use crate::domain::{Category, Id};
use crate::error::{DomainError, DomainResult};
use crate::ports::CategoryRepository;

/// Category administration.
#[derive(Clone)]
pub struct CategoryService {
    categories: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    pub fn new(categories: Arc<dyn CategoryRepository>) -> Self {
        Self { categories }
    }

    pub async fn create_category(&self, name: String) -> DomainResult<Category> {
        if self.categories.find_by_name(&name).await?.is_some() {
            return Err(DomainError::CategoryAlreadyExists);
        }
        let category = self.categories.save(Category::new(name)).await?;
        tracing::info!(category_id = category.id, "category created");
        Ok(category)
    }

    /// Unconditional: posts filed under the category simply lose it.
    pub async fn delete_category(&self, category_id: Id) -> DomainResult<()> {
        self.categories
            .find_by_id(category_id)
            .await?
            .ok_or(DomainError::CategoryNotFound)?;
        self.categories.delete(category_id).await?;
        tracing::info!(category_id, "category deleted");
        Ok(())
    }

    pub async fn list_categories(&self) -> DomainResult<Vec<Category>> {
        Ok(self.categories.find_all().await?)
    }
}
