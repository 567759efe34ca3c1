//! Catalog categories.

pub mod model;

use bazaar_db::{ChangePublisher, Db};
use chrono::Utc;
use model::{Category, CategoryInput, NO_IMAGE};

use crate::error::BazaarResult;
use crate::write::{self, fetch, new_id, not_blank, required};

const LABEL: &str = "Category";

pub async fn list_categories(db: &Db) -> BazaarResult<Vec<Category>> {
    Ok(db.list().await?)
}

pub async fn get_category(db: &Db, id: &str) -> BazaarResult<Category> {
    fetch(db, id, LABEL).await
}

/// Create a category. The image defaults to a placeholder.
pub async fn create_category(
    db: &Db,
    events: &dyn ChangePublisher,
    input: CategoryInput,
) -> BazaarResult<Category> {
    let name = required(input.name, "Name is required.")?;
    let image = input
        .image
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| NO_IMAGE.to_string());

    let now = Utc::now();
    let category = Category {
        id: new_id(),
        name,
        image,
        created_at: now,
        updated_at: now,
    };
    write::insert_and_publish(db, events, &category).await?;
    Ok(category)
}

pub async fn update_category(
    db: &Db,
    events: &dyn ChangePublisher,
    id: &str,
    input: CategoryInput,
) -> BazaarResult<Category> {
    let mut category: Category = fetch(db, id, LABEL).await?;

    if let Some(name) = not_blank(input.name, "Name cannot be empty.")? {
        category.name = name;
    }
    if let Some(image) = not_blank(input.image, "Image cannot be empty.")? {
        category.image = image;
    }
    category.updated_at = Utc::now();

    write::replace_and_publish(db, events, &category, LABEL).await?;
    Ok(category)
}

/// Delete a category. Categories carry no delete guard.
pub async fn delete_category(db: &Db, events: &dyn ChangePublisher, id: &str) -> BazaarResult<()> {
    write::remove_and_publish::<Category>(db, events, id, LABEL).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazaar_db::{ChangeAction, EntityType, RecordingPublisher};

    fn input(name: Option<&str>, image: Option<&str>) -> CategoryInput {
        CategoryInput {
            name: name.map(str::to_string),
            image: image.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_create_defaults_image_and_publishes() {
        let db = Db::in_memory();
        let events = RecordingPublisher::new();

        let cat = create_category(&db, &events, input(Some("Seeds"), None))
            .await
            .unwrap();
        assert_eq!(cat.image, NO_IMAGE);

        let published = events.events();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].entity(), EntityType::Category);
        assert_eq!(published[0].action(), ChangeAction::Created);
        assert_eq!(published[0].data()["name"], "Seeds");
    }

    #[tokio::test]
    async fn test_create_requires_name() {
        let db = Db::in_memory();
        let events = RecordingPublisher::new();

        let err = create_category(&db, &events, input(None, Some("http://img")))
            .await
            .unwrap_err();
        assert!(matches!(err, crate::BazaarError::Validation(_)));
        assert!(events.events().is_empty());
        assert!(list_categories(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_keeps_unspecified_fields() {
        let db = Db::in_memory();
        let events = RecordingPublisher::new();
        let cat = create_category(&db, &events, input(Some("Seeds"), Some("http://a")))
            .await
            .unwrap();

        let updated = update_category(&db, &events, &cat.id, input(Some("Tools"), None))
            .await
            .unwrap();
        assert_eq!(updated.name, "Tools");
        assert_eq!(updated.image, "http://a");
        assert_eq!(events.events()[1].action(), ChangeAction::Updated);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing() {
        let db = Db::in_memory();
        let events = RecordingPublisher::new();

        let err = update_category(&db, &events, "nope", input(Some("x"), None))
            .await
            .unwrap_err();
        assert!(matches!(err, crate::BazaarError::NotFound(_)));

        let err = delete_category(&db, &events, "nope").await.unwrap_err();
        assert!(matches!(err, crate::BazaarError::NotFound(_)));
        assert!(events.events().is_empty());
    }
}
