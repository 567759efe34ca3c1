//! Products.

pub mod model;

use bazaar_db::{ChangePublisher, Db};
use chrono::Utc;
use model::{Product, ProductImage, ProductInput, SharedProduct, IMAGE_SLOTS};

use crate::error::{BazaarError, BazaarResult};
use crate::write::{self, fetch, new_id, not_blank, required};

const LABEL: &str = "Product";
const MISSING: &str = "Required fields are missing.";

pub async fn list_products(db: &Db) -> BazaarResult<Vec<Product>> {
    Ok(db.list().await?)
}

/// Fetch a product and attach `{public_url}/product/{id}`.
pub async fn get_product(db: &Db, id: &str, public_url: &str) -> BazaarResult<SharedProduct> {
    let product: Product = fetch(db, id, LABEL).await?;
    let shareable_link = format!("{}/product/{}", public_url.trim_end_matches('/'), product.id);
    Ok(SharedProduct {
        product,
        shareable_link,
    })
}

fn check_price(value: Option<f64>, field: &str) -> BazaarResult<Option<f64>> {
    match value {
        Some(p) if !p.is_finite() || p < 0.0 => Err(BazaarError::validation(format!(
            "{} must be a non-negative number.",
            field
        ))),
        other => Ok(other),
    }
}

fn check_images(images: &[ProductImage]) -> BazaarResult<()> {
    if let Some(bad) = images
        .iter()
        .find(|i| i.image == 0 || i.image > IMAGE_SLOTS)
    {
        return Err(BazaarError::validation(format!(
            "Image slot {} is out of range (1-{}).",
            bad.image, IMAGE_SLOTS
        )));
    }
    Ok(())
}

pub async fn create_product(
    db: &Db,
    events: &dyn ChangePublisher,
    input: ProductInput,
) -> BazaarResult<Product> {
    let name = required(input.name, MISSING)?;
    let quantity = input.quantity.ok_or_else(|| BazaarError::validation(MISSING))?;
    let price = check_price(input.price, "Price")?.ok_or_else(|| BazaarError::validation(MISSING))?;
    let offer_price = check_price(input.offer_price, "Offer price")?;
    let pro_category_id = required(input.pro_category_id, MISSING)?;
    let pro_sub_category_id = required(input.pro_sub_category_id, MISSING)?;

    let now = Utc::now();
    let mut product = Product {
        id: new_id(),
        name,
        description: input.description,
        quantity,
        price,
        offer_price,
        pro_category_id,
        pro_sub_category_id,
        pro_brand_id: input.pro_brand_id,
        pro_variant_type_id: input.pro_variant_type_id,
        pro_variant_id: input.pro_variant_id.unwrap_or_default(),
        images: Vec::new(),
        created_at: now,
        updated_at: now,
    };
    if let Some(images) = input.images {
        check_images(&images)?;
        for image in images {
            product.set_image(image);
        }
    }

    write::insert_and_publish(db, events, &product).await?;
    Ok(product)
}

/// Merge the provided fields into the stored product.
///
/// Images are merged by slot: a new URL for an existing slot replaces it,
/// other slots are kept.
pub async fn update_product(
    db: &Db,
    events: &dyn ChangePublisher,
    id: &str,
    input: ProductInput,
) -> BazaarResult<Product> {
    let mut product: Product = fetch(db, id, LABEL).await?;

    if let Some(name) = not_blank(input.name, "Name cannot be empty.")? {
        product.name = name;
    }
    if input.description.is_some() {
        product.description = input.description;
    }
    if let Some(quantity) = input.quantity {
        product.quantity = quantity;
    }
    if let Some(price) = check_price(input.price, "Price")? {
        product.price = price;
    }
    if let Some(offer) = check_price(input.offer_price, "Offer price")? {
        product.offer_price = Some(offer);
    }
    if let Some(cat) = not_blank(input.pro_category_id, "Category ID cannot be empty.")? {
        product.pro_category_id = cat;
    }
    if let Some(sub) = not_blank(input.pro_sub_category_id, "Sub-category ID cannot be empty.")? {
        product.pro_sub_category_id = sub;
    }
    if input.pro_brand_id.is_some() {
        product.pro_brand_id = input.pro_brand_id;
    }
    if input.pro_variant_type_id.is_some() {
        product.pro_variant_type_id = input.pro_variant_type_id;
    }
    if let Some(variants) = input.pro_variant_id {
        product.pro_variant_id = variants;
    }
    if let Some(images) = input.images {
        check_images(&images)?;
        for image in images {
            product.set_image(image);
        }
    }
    product.updated_at = Utc::now();

    write::replace_and_publish(db, events, &product, LABEL).await?;
    Ok(product)
}

pub async fn delete_product(db: &Db, events: &dyn ChangePublisher, id: &str) -> BazaarResult<()> {
    write::remove_and_publish::<Product>(db, events, id, LABEL).await?;
    Ok(())
}
