//! Brands, attached to a sub-category.

pub mod model;

use bazaar_db::{ChangePublisher, Db};
use chrono::Utc;
use model::{Brand, BrandInput};

use crate::error::{BazaarError, BazaarResult};
use crate::product::model::Product;
use crate::write::{self, fetch, new_id, not_blank, required};

const LABEL: &str = "Brand";

/// All brands, ordered by sub-category.
pub async fn list_brands(db: &Db) -> BazaarResult<Vec<Brand>> {
    let mut brands: Vec<Brand> = db.list().await?;
    brands.sort_by(|a, b| a.subcategory_id.cmp(&b.subcategory_id));
    Ok(brands)
}

pub async fn get_brand(db: &Db, id: &str) -> BazaarResult<Brand> {
    fetch(db, id, LABEL).await
}

pub async fn create_brand(
    db: &Db,
    events: &dyn ChangePublisher,
    input: BrandInput,
) -> BazaarResult<Brand> {
    const MISSING: &str = "Name and subcategory ID are required.";
    let name = required(input.name, MISSING)?;
    let subcategory_id = required(input.subcategory_id, MISSING)?;

    let now = Utc::now();
    let brand = Brand {
        id: new_id(),
        name,
        subcategory_id,
        created_at: now,
        updated_at: now,
    };
    write::insert_and_publish(db, events, &brand).await?;
    Ok(brand)
}

pub async fn update_brand(
    db: &Db,
    events: &dyn ChangePublisher,
    id: &str,
    input: BrandInput,
) -> BazaarResult<Brand> {
    let mut brand: Brand = fetch(db, id, LABEL).await?;

    if let Some(name) = not_blank(input.name, "Name cannot be empty.")? {
        brand.name = name;
    }
    if let Some(sub_id) = not_blank(input.subcategory_id, "Subcategory ID cannot be empty.")? {
        brand.subcategory_id = sub_id;
    }
    brand.updated_at = Utc::now();

    write::replace_and_publish(db, events, &brand, LABEL).await?;
    Ok(brand)
}

/// Delete a brand, refused while any product references it.
pub async fn delete_brand(db: &Db, events: &dyn ChangePublisher, id: &str) -> BazaarResult<()> {
    let products = db
        .count_where(|p: &Product| p.pro_brand_id.as_deref() == Some(id))
        .await?;
    if products > 0 {
        return Err(BazaarError::conflict(
            "Cannot delete brand. Products are referencing it.",
        ));
    }

    write::remove_and_publish::<Brand>(db, events, id, LABEL).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::{create_product, model::ProductInput};
    use bazaar_db::RecordingPublisher;

    fn input(name: &str, sub: &str) -> BrandInput {
        BrandInput {
            name: Some(name.to_string()),
            subcategory_id: Some(sub.to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_requires_both_fields() {
        let db = Db::in_memory();
        let events = RecordingPublisher::new();

        let err = create_brand(
            &db,
            &events,
            BrandInput {
                name: Some("Acme".into()),
                subcategory_id: None,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "Name and subcategory ID are required.");
    }

    #[tokio::test]
    async fn test_delete_refused_while_product_references() {
        let db = Db::in_memory();
        let events = RecordingPublisher::new();
        let brand = create_brand(&db, &events, input("Acme", "s1")).await.unwrap();
        create_product(
            &db,
            &events,
            ProductInput {
                name: Some("Rake".into()),
                quantity: Some(3),
                price: Some(9.5),
                pro_category_id: Some("c1".into()),
                pro_sub_category_id: Some("s1".into()),
                pro_brand_id: Some(brand.id.clone()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let err = delete_brand(&db, &events, &brand.id).await.unwrap_err();
        assert!(matches!(err, BazaarError::Conflict(_)));
        assert!(get_brand(&db, &brand.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_unreferenced() {
        let db = Db::in_memory();
        let events = RecordingPublisher::new();
        let brand = create_brand(&db, &events, input("Acme", "s1")).await.unwrap();

        delete_brand(&db, &events, &brand.id).await.unwrap();
        assert!(matches!(
            get_brand(&db, &brand.id).await,
            Err(BazaarError::NotFound(_))
        ));
    }
}
