//! Variants. A name is unique within its variant type.

pub mod model;

use bazaar_db::{ChangePublisher, Db};
use chrono::Utc;
use model::{Variant, VariantInput};

use crate::error::{BazaarError, BazaarResult};
use crate::product::model::Product;
use crate::write::{self, fetch, new_id, not_blank, required};

const LABEL: &str = "Variant";

/// All variants, ordered by variant type.
pub async fn list_variants(db: &Db) -> BazaarResult<Vec<Variant>> {
    let mut variants: Vec<Variant> = db.list().await?;
    variants.sort_by(|a, b| a.variant_type_id.cmp(&b.variant_type_id));
    Ok(variants)
}

pub async fn get_variant(db: &Db, id: &str) -> BazaarResult<Variant> {
    fetch(db, id, LABEL).await
}

async fn ensure_unique(
    db: &Db,
    name: &str,
    variant_type_id: &str,
    except: Option<&str>,
) -> BazaarResult<()> {
    let taken = db
        .find(|v: &Variant| {
            v.name == name && v.variant_type_id == variant_type_id && Some(v.id.as_str()) != except
        })
        .await?;
    if taken.is_some() {
        return Err(BazaarError::conflict(
            "Variant with this name already exists in this Variant Type.",
        ));
    }
    Ok(())
}

pub async fn create_variant(
    db: &Db,
    events: &dyn ChangePublisher,
    input: VariantInput,
) -> BazaarResult<Variant> {
    const MISSING: &str = "Name and VariantType ID are required.";
    let name = required(input.name, MISSING)?;
    let variant_type_id = required(input.variant_type_id, MISSING)?;
    ensure_unique(db, &name, &variant_type_id, None).await?;

    let now = Utc::now();
    let variant = Variant {
        id: new_id(),
        name,
        variant_type_id,
        created_at: now,
        updated_at: now,
    };
    write::insert_and_publish(db, events, &variant).await?;
    Ok(variant)
}

pub async fn update_variant(
    db: &Db,
    events: &dyn ChangePublisher,
    id: &str,
    input: VariantInput,
) -> BazaarResult<Variant> {
    let mut variant: Variant = fetch(db, id, LABEL).await?;
    let name = not_blank(input.name, "Name cannot be empty.")?;
    let type_id = not_blank(input.variant_type_id, "VariantType ID cannot be empty.")?;

    if name.is_some() || type_id.is_some() {
        let next_name = name.unwrap_or_else(|| variant.name.clone());
        let next_type = type_id.unwrap_or_else(|| variant.variant_type_id.clone());
        if next_name != variant.name || next_type != variant.variant_type_id {
            ensure_unique(db, &next_name, &next_type, Some(id)).await?;
        }
        variant.name = next_name;
        variant.variant_type_id = next_type;
    }
    variant.updated_at = Utc::now();

    write::replace_and_publish(db, events, &variant, LABEL).await?;
    Ok(variant)
}

/// Delete a variant, refused while any product lists it.
pub async fn delete_variant(db: &Db, events: &dyn ChangePublisher, id: &str) -> BazaarResult<()> {
    let products = db
        .count_where(|p: &Product| p.pro_variant_id.iter().any(|v| v == id))
        .await?;
    if products > 0 {
        return Err(BazaarError::conflict(
            "Cannot delete. Products are referencing this Variant.",
        ));
    }

    write::remove_and_publish::<Variant>(db, events, id, LABEL).await?;
    Ok(())
}
