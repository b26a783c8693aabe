//! Catalog queries and seeding.

use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::{Item, NewItem};
use crate::repositories::ItemRepository;

#[derive(Clone)]
pub struct ItemService {
    repo: Arc<dyn ItemRepository>,
}

impl ItemService {
    pub fn new(repo: Arc<dyn ItemRepository>) -> Self {
        Self { repo }
    }

    pub async fn create_item(&self, new_item: NewItem) -> AppResult<Item> {
        self.repo.create(new_item).await
    }

    /// Inserts catalog entries, skipping names that already exist.
    ///
    /// # Returns
    /// How many entries were inserted
    pub async fn seed(&self, items: Vec<NewItem>) -> AppResult<usize> {
        let mut inserted = 0;
        for item in items {
            if !self.repo.find_by_name(&item.name).await?.is_empty() {
                tracing::debug!(name = %item.name, "Catalog item already present");
                continue;
            }
            self.repo.create(item).await?;
            inserted += 1;
        }
        Ok(inserted)
    }

    pub async fn list_items(&self) -> AppResult<Vec<Item>> {
        self.repo.list_all().await
    }

    /// Gets an item by its ID, or `NotFound`.
    pub async fn get_item(&self, id: i64) -> AppResult<Item> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::item_not_found("id", id))
    }

    /// Items with exactly this name; `NotFound` when there are none.
    pub async fn find_by_name(&self, name: &str) -> AppResult<Vec<Item>> {
        let items = self.repo.find_by_name(name).await?;
        if items.is_empty() {
            return Err(AppError::item_not_found("name", name));
        }
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{seed_item, services};
    use bigdecimal::BigDecimal;
    use std::str::FromStr;

    fn new_item(name: &str, price: &str) -> NewItem {
        NewItem {
            name: name.to_string(),
            price: BigDecimal::from_str(price).unwrap(),
            description: String::new(),
        }
    }

    #[tokio::test]
    async fn test_seed_skips_existing_names() {
        let services = services();
        let catalog = vec![new_item("Round Widget", "2.99"), new_item("Square Widget", "1.99")];

        assert_eq!(services.items.seed(catalog.clone()).await.unwrap(), 2);
        assert_eq!(services.items.seed(catalog).await.unwrap(), 0);
        assert_eq!(services.items.list_items().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_get_item() {
        let services = services();
        let item = seed_item(&services, "Round Widget", "2.99").await;

        assert_eq!(services.items.get_item(item.id).await.unwrap(), item);
        assert!(matches!(
            services.items.get_item(999).await,
            Err(AppError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_find_by_name_empty_is_not_found() {
        let services = services();
        seed_item(&services, "Round Widget", "2.99").await;

        assert_eq!(services.items.find_by_name("Round Widget").await.unwrap().len(), 1);
        assert!(matches!(
            services.items.find_by_name("Triangle").await,
            Err(AppError::NotFound { .. })
        ));
    }
}
