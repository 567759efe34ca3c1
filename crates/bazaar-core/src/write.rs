//! Shared steps of every write: validate, persist once, publish.

use bazaar_db::{ChangeEvent, ChangePublisher, Db, Document};
use tracing::debug;
use uuid::Uuid;

use crate::error::{BazaarError, BazaarResult};

pub(crate) fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Required text field: present and not blank. Returns it trimmed.
pub(crate) fn required(value: Option<String>, message: &str) -> BazaarResult<String> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(BazaarError::validation(message)),
    }
}

/// Optional text field on update: absent is fine, blank is not.
pub(crate) fn not_blank(value: Option<String>, message: &str) -> BazaarResult<Option<String>> {
    match value {
        None => Ok(None),
        Some(v) => required(Some(v), message).map(Some),
    }
}

pub(crate) async fn fetch<T: Document>(db: &Db, id: &str, label: &str) -> BazaarResult<T> {
    db.get::<T>(id)
        .await?
        .ok_or_else(|| BazaarError::not_found(format!("{} not found.", label)))
}

pub(crate) async fn insert_and_publish<T: Document>(
    db: &Db,
    events: &dyn ChangePublisher,
    doc: &T,
) -> BazaarResult<()> {
    db.insert(doc).await?;
    debug!(entity = %T::ENTITY, id = %doc.id(), "Record created");
    events.publish(ChangeEvent::created(T::ENTITY, doc));
    Ok(())
}

/// Persist a merged record. The record may have been deleted since it was read.
pub(crate) async fn replace_and_publish<T: Document>(
    db: &Db,
    events: &dyn ChangePublisher,
    doc: &T,
    label: &str,
) -> BazaarResult<()> {
    if !db.replace(doc).await? {
        return Err(BazaarError::not_found(format!("{} not found.", label)));
    }
    debug!(entity = %T::ENTITY, id = %doc.id(), "Record updated");
    events.publish(ChangeEvent::updated(T::ENTITY, doc));
    Ok(())
}

pub(crate) async fn remove_and_publish<T: Document>(
    db: &Db,
    events: &dyn ChangePublisher,
    id: &str,
    label: &str,
) -> BazaarResult<T> {
    let removed = db
        .remove::<T>(id)
        .await?
        .ok_or_else(|| BazaarError::not_found(format!("{} not found.", label)))?;
    debug!(entity = %T::ENTITY, id = %id, "Record deleted");
    events.publish(ChangeEvent::deleted(T::ENTITY, id));
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_trims_and_rejects_blank() {
        assert_eq!(required(Some("  Shoes ".into()), "x").unwrap(), "Shoes");
        assert!(matches!(
            required(Some("   ".into()), "Name is required."),
            Err(BazaarError::Validation(m)) if m == "Name is required."
        ));
        assert!(required(None, "x").is_err());
    }

    #[test]
    fn test_not_blank() {
        assert_eq!(not_blank(None, "x").unwrap(), None);
        assert_eq!(not_blank(Some("a".into()), "x").unwrap(), Some("a".into()));
        assert!(not_blank(Some("".into()), "x").is_err());
    }
}
