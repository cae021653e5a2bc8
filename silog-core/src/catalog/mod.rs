//! Menu Catalog
//!
//! Read-only lookup of menu items by id and by name. Rows are validated once
//! when a [`Catalog`] is built; everything downstream works with concrete,
//! trusted [`MenuItem`] values.

use crate::db::{RepoError, RepoResult, Store};
use crate::order_money::MAX_PRICE;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_URL_LEN, validate_optional_text, validate_price,
    validate_required_text,
};
use crate::utils::AppError;
use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use std::collections::HashMap;

/// Menu lookup consumed by the cart and budget code
pub trait MenuCatalog {
    /// All items, in catalog order
    fn items(&self) -> &[MenuItem];
    fn by_id(&self, id: i64) -> Option<&MenuItem>;
    /// First item whose display name matches exactly
    fn by_name(&self, name: &str) -> Option<&MenuItem>;
}

/// In-memory, validated catalog
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<MenuItem>,
    by_id: HashMap<i64, usize>,
}

impl Catalog {
    /// Build from raw rows, skipping (with a warning) any row that fails validation
    pub fn from_rows(rows: impl IntoIterator<Item = MenuItem>) -> Self {
        let mut catalog = Catalog::default();
        for row in rows {
            if let Err(e) = validate_row(&row.name, row.price, &row.image, &row.description) {
                tracing::warn!(item_id = row.id, name = %row.name, error = %e, "Skipping invalid menu row");
                continue;
            }
            if catalog.by_id.contains_key(&row.id) {
                tracing::warn!(item_id = row.id, "Skipping duplicate menu id");
                continue;
            }
            catalog.by_id.insert(row.id, catalog.items.len());
            catalog.items.push(row);
        }
        catalog
    }

    /// Load the current menu from the store
    pub async fn load(store: &dyn Store) -> RepoResult<Self> {
        let rows = store.list_menu_items().await?;
        let catalog = Self::from_rows(rows);
        tracing::debug!(items = catalog.len(), "Menu catalog loaded");
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl MenuCatalog for Catalog {
    fn items(&self) -> &[MenuItem] {
        &self.items
    }

    fn by_id(&self, id: i64) -> Option<&MenuItem> {
        self.by_id.get(&id).map(|&idx| &self.items[idx])
    }

    fn by_name(&self, name: &str) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.name == name)
    }
}

fn validate_row(
    name: &str,
    price: f64,
    image: &Option<String>,
    description: &Option<String>,
) -> Result<(), AppError> {
    validate_required_text(name, "name", MAX_NAME_LEN)?;
    validate_price(price, MAX_PRICE)?;
    validate_optional_text(image, "image", MAX_URL_LEN)?;
    validate_optional_text(description, "description", MAX_NOTE_LEN)?;
    Ok(())
}

/// The house menu
pub fn default_menu() -> Vec<MenuItemCreate> {
    [
        ("Tapsilog", 120.0, "tapsilog.jpg"),
        ("Longsilog", 100.0, "longsilog.jpg"),
        ("Tocilog", 100.0, "tocilog.jpg"),
        ("Hotsilog", 90.0, "hotsilog.jpg"),
        ("Bangsilog", 110.0, "bangsilog.jpg"),
        ("Burger Combo", 150.0, "burger_combo.jpg"),
        ("Spaghetti Combo", 140.0, "spaghetti_combo.jpg"),
        ("Chicken with Rice", 130.0, "chicken_rice.jpg"),
        ("Burger Steak with Rice", 135.0, "burger_steak.jpg"),
    ]
    .into_iter()
    .map(|(name, price, image)| MenuItemCreate {
        name: name.to_string(),
        price,
        image: Some(format!("images/{image}")),
        description: None,
    })
    .collect()
}

/// Insert the house menu when the store has no items. Returns how many were created.
pub async fn seed_menu_if_empty(store: &dyn Store) -> RepoResult<usize> {
    if !store.list_menu_items().await?.is_empty() {
        return Ok(0);
    }
    let menu = default_menu();
    let count = menu.len();
    for item in menu {
        store.create_menu_item(item).await?;
    }
    tracing::info!(count, "Seeded default menu");
    Ok(count)
}

/// Validate, then create a menu item
pub async fn create_menu_item(store: &dyn Store, data: MenuItemCreate) -> RepoResult<MenuItem> {
    validate_row(&data.name, data.price, &data.image, &data.description)
        .map_err(|e| RepoError::Validation(e.message))?;
    let item = store.create_menu_item(data).await?;
    tracing::info!(item_id = item.id, name = %item.name, price = item.price, "Menu item created");
    Ok(item)
}

/// Validate the provided fields, then update a menu item
pub async fn update_menu_item(
    store: &dyn Store,
    id: i64,
    data: MenuItemUpdate,
) -> RepoResult<MenuItem> {
    let check = || -> Result<(), AppError> {
        if let Some(name) = &data.name {
            validate_required_text(name, "name", MAX_NAME_LEN)?;
        }
        if let Some(price) = data.price {
            validate_price(price, MAX_PRICE)?;
        }
        validate_optional_text(&data.image, "image", MAX_URL_LEN)?;
        validate_optional_text(&data.description, "description", MAX_NOTE_LEN)?;
        Ok(())
    };
    check().map_err(|e| RepoError::Validation(e.message))?;
    let item = store.update_menu_item(id, data).await?;
    tracing::info!(item_id = id, "Menu item updated");
    Ok(item)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    fn row(id: i64, name: &str, price: f64) -> MenuItem {
        MenuItem {
            id,
            name: name.to_string(),
            price,
            image: None,
            description: None,
        }
    }

    #[test]
    fn test_invalid_rows_are_skipped() {
        let catalog = Catalog::from_rows(vec![
            row(1, "Tapsilog", 120.0),
            row(2, "", 50.0),
            row(3, "Free Water", -1.0),
            row(4, "Mystery", f64::NAN),
            row(1, "Duplicate", 10.0),
            row(5, "Hotsilog", 90.0),
        ]);
        let names: Vec<&str> = catalog.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Tapsilog", "Hotsilog"]);
    }

    #[test]
    fn test_lookup_by_id_and_name() {
        let catalog = Catalog::from_rows(vec![row(1, "Tapsilog", 120.0), row(7, "Tocilog", 100.0)]);
        assert_eq!(catalog.by_id(7).map(|i| i.price), Some(100.0));
        assert_eq!(catalog.by_name("Tapsilog").map(|i| i.id), Some(1));
        assert!(catalog.by_id(2).is_none());
        assert!(catalog.by_name("tapsilog").is_none());
    }

    #[test]
    fn test_default_menu_is_valid() {
        let menu = default_menu();
        assert_eq!(menu.len(), 9);
        assert!(
            menu.iter()
                .all(|m| validate_row(&m.name, m.price, &m.image, &m.description).is_ok())
        );
        assert_eq!(menu[0].name, "Tapsilog");
        assert_eq!(menu[0].price, 120.0);
    }

    #[tokio::test]
    async fn test_seed_menu_only_when_empty() {
        let store = MemoryStore::new();
        assert_eq!(seed_menu_if_empty(&store).await.unwrap(), 9);
        assert_eq!(seed_menu_if_empty(&store).await.unwrap(), 0);
        let catalog = Catalog::load(&store).await.unwrap();
        assert_eq!(catalog.len(), 9);
    }

    #[tokio::test]
    async fn test_create_menu_item_validates() {
        let store = MemoryStore::new();
        let bad = MenuItemCreate {
            name: "Lechon".into(),
            price: -5.0,
            image: None,
            description: None,
        };
        assert!(matches!(
            create_menu_item(&store, bad).await,
            Err(RepoError::Validation(_))
        ));

        let item = create_menu_item(
            &store,
            MenuItemCreate {
                name: "Lechon".into(),
                price: 250.0,
                image: None,
                description: Some("Roast pork".into()),
            },
        )
        .await
        .unwrap();
        let updated = update_menu_item(
            &store,
            item.id,
            MenuItemUpdate {
                price: Some(260.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.price, 260.0);
        assert_eq!(updated.description.as_deref(), Some("Roast pork"));
    }
}
