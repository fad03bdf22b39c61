//! Product business logic - Handles all catalog-related operations.
//!
//! This module provides functions for creating, retrieving, and managing products
//! within the catalog. Only `single_item` and `variation_item` products carry stock
//! of their own; `kit` and `variation_group` products derive their availability from
//! child items and are excluded from stock queries. All functions are async and
//! return Result types for proper error handling throughout the system.

use crate::{
    entities::{Product, product},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// A standalone product with its own stock records.
pub const TYPE_SINGLE_ITEM: &str = "single_item";
/// One concrete variant of a variation group, with its own stock records.
pub const TYPE_VARIATION_ITEM: &str = "variation_item";
/// A bundle of other products; its availability derives from the children.
pub const TYPE_KIT: &str = "kit";
/// The parent of a set of variation items; carries no stock directly.
pub const TYPE_VARIATION_GROUP: &str = "variation_group";

/// Product types that carry stock records of their own.
pub const STOCKABLE_TYPES: [&str; 2] = [TYPE_SINGLE_ITEM, TYPE_VARIATION_ITEM];

/// All recognized product type strings.
pub const ALL_TYPES: [&str; 4] = [
    TYPE_SINGLE_ITEM,
    TYPE_VARIATION_ITEM,
    TYPE_KIT,
    TYPE_VARIATION_GROUP,
];

/// Retrieves all active (non-deleted) products, ordered alphabetically by name.
///
/// This function is commonly used to display the complete catalog to users,
/// such as in product pickers or list views.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_all_active_products(db: &DatabaseConnection) -> Result<Vec<product::Model>> {
    Product::find()
        .filter(product::Column::IsDeleted.eq(false))
        .order_by_asc(product::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a specific product by its SKU, returning None if not found or deleted.
///
/// SKUs are the stable references users type into commands and imports, so
/// deleted products must not be resolvable through them.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_product_by_sku(
    db: &DatabaseConnection,
    sku: &str,
) -> Result<Option<product::Model>> {
    Product::find()
        .filter(product::Column::Sku.eq(sku))
        .filter(product::Column::IsDeleted.eq(false))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific product by its unique ID.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_product_by_id(
    db: &DatabaseConnection,
    product_id: i64,
) -> Result<Option<product::Model>> {
    Product::find_by_id(product_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new product with the specified parameters, performing input validation.
///
/// Validates that the name and SKU are non-empty after trimming, that the cost is
/// finite and non-negative, and that the product type is one of the recognized
/// strings. Timestamps are initialized to the current time.
///
/// # Errors
/// Returns an error if:
/// - The name or SKU is empty or whitespace-only
/// - The cost is negative or not finite (NaN, infinity)
/// - The product type is not recognized
/// - The database insert operation fails
pub async fn create_product(
    db: &DatabaseConnection,
    name: String,
    sku: String,
    product_type: String,
    cost: f64,
    sell_price: Option<f64>,
    images: Vec<String>,
    owner_id: Option<String>,
) -> Result<product::Model> {
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Product name cannot be empty".to_string(),
        });
    }

    if sku.trim().is_empty() {
        return Err(Error::Config {
            message: "Product SKU cannot be empty".to_string(),
        });
    }

    if !cost.is_finite() || cost < 0.0 {
        return Err(Error::Config {
            message: format!("Product cost must be a non-negative number, got {cost}"),
        });
    }

    if !ALL_TYPES.contains(&product_type.as_str()) {
        return Err(Error::UnknownProductType { product_type });
    }

    let now = chrono::Utc::now().naive_utc();
    let product = product::ActiveModel {
        name: Set(name.trim().to_string()),
        sku: Set(sku.trim().to_string()),
        product_type: Set(product_type),
        cost: Set(cost),
        sell_price: Set(sell_price),
        images: Set(product::ImageList(images)),
        owner_id: Set(owner_id),
        is_deleted: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let result = product.insert(db).await?;
    Ok(result)
}

/// Soft-deletes a product so it disappears from listings while history survives.
///
/// # Errors
/// Returns [`Error::ProductNotFound`] if no product with the given id exists.
pub async fn soft_delete_product(
    db: &DatabaseConnection,
    product_id: i64,
) -> Result<product::Model> {
    let product = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::ProductNotFound {
            name: product_id.to_string(),
        })?;

    let mut active: product::ActiveModel = product.into();
    active.is_deleted = Set(true);
    active.updated_at = Set(chrono::Utc::now().naive_utc());

    active.update(db).await.map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_product_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        // Empty name
        let result = create_product(
            &db,
            String::new(),
            "SKU-1".to_string(),
            TYPE_SINGLE_ITEM.to_string(),
            10.0,
            None,
            Vec::new(),
            None,
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));

        // Whitespace-only SKU
        let result = create_product(
            &db,
            "Tote Bag".to_string(),
            "   ".to_string(),
            TYPE_SINGLE_ITEM.to_string(),
            10.0,
            None,
            Vec::new(),
            None,
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));

        // Negative cost
        let result = create_product(
            &db,
            "Tote Bag".to_string(),
            "SKU-1".to_string(),
            TYPE_SINGLE_ITEM.to_string(),
            -5.0,
            None,
            Vec::new(),
            None,
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));

        // Non-finite cost
        let result = create_product(
            &db,
            "Tote Bag".to_string(),
            "SKU-1".to_string(),
            TYPE_SINGLE_ITEM.to_string(),
            f64::NAN,
            None,
            Vec::new(),
            None,
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));

        // Unknown product type
        let result = create_product(
            &db,
            "Tote Bag".to_string(),
            "SKU-1".to_string(),
            "mystery".to_string(),
            10.0,
            None,
            Vec::new(),
            None,
        )
        .await;
        assert!(matches!(
            result.unwrap_err(),
            Error::UnknownProductType { product_type: _ }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_integration() -> Result<()> {
        let db = setup_test_db().await?;

        let product = create_test_product(&db, "Tote Bag", "SKU-1").await?;

        assert_eq!(product.name, "Tote Bag");
        assert_eq!(product.sku, "SKU-1");
        assert_eq!(product.product_type, TYPE_SINGLE_ITEM);
        assert_eq!(product.cost, 10.0);
        assert!(product.sell_price.is_none());
        assert!(product.images.0.is_empty());
        assert!(!product.is_deleted);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_trims_fields() -> Result<()> {
        let db = setup_test_db().await?;

        let product = create_product(
            &db,
            "  Tote Bag  ".to_string(),
            " SKU-1 ".to_string(),
            TYPE_SINGLE_ITEM.to_string(),
            10.0,
            Some(19.9),
            vec!["https://img.example/1.jpg".to_string()],
            Some("user-1".to_string()),
        )
        .await?;

        assert_eq!(product.name, "Tote Bag");
        assert_eq!(product.sku, "SKU-1");
        assert_eq!(product.sell_price, Some(19.9));
        assert_eq!(product.images.0.len(), 1);
        assert_eq!(product.owner_id.as_deref(), Some("user-1"));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_product_by_sku_integration() -> Result<()> {
        let db = setup_test_db().await?;

        let created = create_test_product(&db, "Tote Bag", "SKU-1").await?;

        let found = get_product_by_sku(&db, "SKU-1").await?;
        assert!(found.is_some());
        assert_eq!(found.unwrap().id, created.id);

        let not_found = get_product_by_sku(&db, "SKU-404").await?;
        assert!(not_found.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_get_all_active_products_ordered() -> Result<()> {
        let db = setup_test_db().await?;

        let mug = create_test_product(&db, "Mug", "SKU-2").await?;
        let apron = create_test_product(&db, "Apron", "SKU-1").await?;

        let products = get_all_active_products(&db).await?;
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id, apron.id);
        assert_eq!(products[1].id, mug.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_soft_delete_filtering() -> Result<()> {
        let db = setup_test_db().await?;

        let product = create_test_product(&db, "Tote Bag", "SKU-1").await?;
        soft_delete_product(&db, product.id).await?;

        // Deleted product is not found by SKU
        let not_found = get_product_by_sku(&db, "SKU-1").await?;
        assert!(not_found.is_none());

        // Only active products are listed
        let active = create_test_product(&db, "Mug", "SKU-2").await?;
        let products = get_all_active_products(&db).await?;
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, active.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_soft_delete_missing_product() -> Result<()> {
        let db = setup_test_db().await?;

        let result = soft_delete_product(&db, 999).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::ProductNotFound { name: _ }
        ));

        Ok(())
    }
}
