//! Variant types. Names are unique.

pub mod model;

use bazaar_db::{ChangePublisher, Db};
use chrono::Utc;
use model::{VariantType, VariantTypeInput};

use crate::error::{BazaarError, BazaarResult};
use crate::product::model::Product;
use crate::variant::model::Variant;
use crate::write::{self, fetch, new_id, not_blank, required};

const LABEL: &str = "VariantType";

pub async fn list_variant_types(db: &Db) -> BazaarResult<Vec<VariantType>> {
    Ok(db.list().await?)
}

pub async fn get_variant_type(db: &Db, id: &str) -> BazaarResult<VariantType> {
    fetch(db, id, LABEL).await
}

async fn ensure_name_free(db: &Db, name: &str, except: Option<&str>) -> BazaarResult<()> {
    let taken = db
        .find(|vt: &VariantType| vt.name == name && Some(vt.id.as_str()) != except)
        .await?;
    if taken.is_some() {
        return Err(BazaarError::conflict(
            "VariantType with this name already exists.",
        ));
    }
    Ok(())
}

pub async fn create_variant_type(
    db: &Db,
    events: &dyn ChangePublisher,
    input: VariantTypeInput,
) -> BazaarResult<VariantType> {
    let name = required(input.name, "Name is required.")?;
    ensure_name_free(db, &name, None).await?;

    let now = Utc::now();
    let variant_type = VariantType {
        id: new_id(),
        name,
        kind: input.kind,
        created_at: now,
        updated_at: now,
    };
    write::insert_and_publish(db, events, &variant_type).await?;
    Ok(variant_type)
}

pub async fn update_variant_type(
    db: &Db,
    events: &dyn ChangePublisher,
    id: &str,
    input: VariantTypeInput,
) -> BazaarResult<VariantType> {
    let mut variant_type: VariantType = fetch(db, id, LABEL).await?;

    if let Some(name) = not_blank(input.name, "Name cannot be empty.")? {
        if name != variant_type.name {
            ensure_name_free(db, &name, Some(id)).await?;
        }
        variant_type.name = name;
    }
    if input.kind.is_some() {
        variant_type.kind = input.kind;
    }
    variant_type.updated_at = Utc::now();

    write::replace_and_publish(db, events, &variant_type, LABEL).await?;
    Ok(variant_type)
}

/// Delete a variant type, refused while variants or products reference it.
pub async fn delete_variant_type(
    db: &Db,
    events: &dyn ChangePublisher,
    id: &str,
) -> BazaarResult<()> {
    let variants = db.count_where(|v: &Variant| v.variant_type_id == id).await?;
    if variants > 0 {
        return Err(BazaarError::conflict(
            "Cannot delete variant type. It is associated with one or more variants.",
        ));
    }

    let products = db
        .count_where(|p: &Product| p.pro_variant_type_id.as_deref() == Some(id))
        .await?;
    if products > 0 {
        return Err(BazaarError::conflict(
            "Cannot delete variant type. Products are referencing it.",
        ));
    }

    write::remove_and_publish::<VariantType>(db, events, id, "Variant type").await?;
    Ok(())
}
