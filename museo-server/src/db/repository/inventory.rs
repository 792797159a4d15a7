//! Inventory Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{InventoryProduct, InventoryProductCreate, InventoryProductUpdate};
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

const TABLE: &str = "inventory_product";

#[derive(Clone)]
pub struct InventoryRepository {
    base: BaseRepository,
}

impl InventoryRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all products ordered by name
    pub async fn find_all(&self) -> RepoResult<Vec<InventoryProduct>> {
        let products: Vec<InventoryProduct> = self
            .base
            .db()
            .query("SELECT * FROM inventory_product ORDER BY name")
            .await?
            .take(0)?;
        Ok(products)
    }

    /// Products with available stock greater than zero
    pub async fn find_available(&self) -> RepoResult<Vec<InventoryProduct>> {
        let products: Vec<InventoryProduct> = self
            .base
            .db()
            .query("SELECT * FROM inventory_product WHERE stock_available > 0 ORDER BY name")
            .await?
            .take(0)?;
        Ok(products)
    }

    /// Find product by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<InventoryProduct>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let product: Option<InventoryProduct> = self.base.db().select(thing).await?;
        Ok(product)
    }

    /// Create a new product; available stock defaults to the total
    pub async fn create(&self, data: InventoryProductCreate) -> RepoResult<InventoryProduct> {
        let stock_available = data.stock_available.unwrap_or(data.stock_total);
        if stock_available > data.stock_total {
            return Err(RepoError::Validation(
                "Available stock cannot exceed total stock".to_string(),
            ));
        }

        let product = InventoryProduct {
            id: None,
            name: data.name,
            category: data.category,
            stock_total: data.stock_total,
            stock_available,
        };

        let created: Option<InventoryProduct> =
            self.base.db().create(TABLE).content(product).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create inventory product".to_string()))
    }

    /// Update a product
    pub async fn update(&self, id: &str, data: InventoryProductUpdate) -> RepoResult<InventoryProduct> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Inventory product {} not found", id)))?;

        let name = data.name.unwrap_or(existing.name);
        let category = data.category.or(existing.category);
        let stock_total = data.stock_total.unwrap_or(existing.stock_total);
        let stock_available = data.stock_available.unwrap_or(existing.stock_available);

        if stock_available < 0 || stock_total < 0 {
            return Err(RepoError::Validation(
                "Stock counters must not be negative".to_string(),
            ));
        }
        if stock_available > stock_total {
            return Err(RepoError::Validation(
                "Available stock cannot exceed total stock".to_string(),
            ));
        }

        self.base
            .db()
            .query(
                "UPDATE $thing SET name = $name, category = $category, \
                 stock_total = $stock_total, stock_available = $stock_available",
            )
            .bind(("thing", thing))
            .bind(("name", name))
            .bind(("category", category))
            .bind(("stock_total", stock_total))
            .bind(("stock_available", stock_available))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Inventory product {} not found", id)))
    }

    /// Hard delete a product
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }
}
