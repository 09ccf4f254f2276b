//! Catalog item repository.

use shop_core::{Item, NewItem};
use sqlx::SqlitePool;

#[derive(Debug, sqlx::FromRow)]
struct ItemRow {
    id: i64,
    name: String,
    description: String,
    image_path: String,
    cost: String,
    price_id: String,
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Item {
            id: row.id,
            name: row.name,
            description: row.description,
            image_path: row.image_path,
            cost: row.cost,
            price_id: row.price_id,
        }
    }
}

/// Repository for catalog item operations
pub struct ItemRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ItemRepository<'a> {
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// All catalog items, oldest first
    pub async fn list_all(&self) -> Result<Vec<Item>, sqlx::Error> {
        let rows = sqlx::query_as::<_, ItemRow>(
            "SELECT id, name, description, image_path, cost, price_id FROM items ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Item::from).collect())
    }

    /// Look up a single item
    pub async fn get(&self, id: i64) -> Result<Option<Item>, sqlx::Error> {
        let row = sqlx::query_as::<_, ItemRow>(
            "SELECT id, name, description, image_path, cost, price_id FROM items WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Item::from))
    }

    /// Insert a new item and return it with its assigned id
    pub async fn insert(&self, item: &NewItem) -> Result<Item, sqlx::Error> {
        let row = sqlx::query_as::<_, ItemRow>(
            r#"
            INSERT INTO items (name, description, image_path, cost, price_id)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, name, description, image_path, cost, price_id
            "#,
        )
        .bind(&item.name)
        .bind(&item.description)
        .bind(&item.image_path)
        .bind(&item.cost)
        .bind(&item.price_id)
        .fetch_one(self.pool)
        .await?;

        Ok(Item::from(row))
    }
}
