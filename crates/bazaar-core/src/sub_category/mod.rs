//! Sub-categories, grouped under a category.

pub mod model;

use bazaar_db::{ChangePublisher, Db};
use chrono::Utc;
use model::{SubCategory, SubCategoryInput};

use crate::brand::model::Brand;
use crate::error::{BazaarError, BazaarResult};
use crate::product::model::Product;
use crate::write::{self, fetch, new_id, not_blank, required};

const LABEL: &str = "Sub-category";

/// All sub-categories, ordered by parent category.
pub async fn list_sub_categories(db: &Db) -> BazaarResult<Vec<SubCategory>> {
    let mut subs: Vec<SubCategory> = db.list().await?;
    subs.sort_by(|a, b| a.category_id.cmp(&b.category_id));
    Ok(subs)
}

pub async fn get_sub_category(db: &Db, id: &str) -> BazaarResult<SubCategory> {
    fetch(db, id, LABEL).await
}

/// Create a sub-category.
///
/// The parent category is not looked up; a dangling `categoryId` is stored
/// as given.
pub async fn create_sub_category(
    db: &Db,
    events: &dyn ChangePublisher,
    input: SubCategoryInput,
) -> BazaarResult<SubCategory> {
    const MISSING: &str = "Name and category ID are required.";
    let name = required(input.name, MISSING)?;
    let category_id = required(input.category_id, MISSING)?;

    let now = Utc::now();
    let sub = SubCategory {
        id: new_id(),
        name,
        category_id,
        created_at: now,
        updated_at: now,
    };
    write::insert_and_publish(db, events, &sub).await?;
    Ok(sub)
}

pub async fn update_sub_category(
    db: &Db,
    events: &dyn ChangePublisher,
    id: &str,
    input: SubCategoryInput,
) -> BazaarResult<SubCategory> {
    let mut sub: SubCategory = fetch(db, id, LABEL).await?;

    if let Some(name) = not_blank(input.name, "Name cannot be empty.")? {
        sub.name = name;
    }
    if let Some(category_id) = not_blank(input.category_id, "Category ID cannot be empty.")? {
        sub.category_id = category_id;
    }
    sub.updated_at = Utc::now();

    write::replace_and_publish(db, events, &sub, LABEL).await?;
    Ok(sub)
}

/// Delete a sub-category, refused while brands or products reference it.
pub async fn delete_sub_category(
    db: &Db,
    events: &dyn ChangePublisher,
    id: &str,
) -> BazaarResult<()> {
    let brands = db.count_where(|b: &Brand| b.subcategory_id == id).await?;
    if brands > 0 {
        return Err(BazaarError::conflict(
            "Cannot delete sub-category. It is associated with one or more brands.",
        ));
    }

    let products = db
        .count_where(|p: &Product| p.pro_sub_category_id == id)
        .await?;
    if products > 0 {
        return Err(BazaarError::conflict(
            "Cannot delete sub-category. Products are referencing it.",
        ));
    }

    write::remove_and_publish::<SubCategory>(db, events, id, LABEL).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brand::{create_brand, model::BrandInput};
    use bazaar_db::{ChangeAction, RecordingPublisher};

    fn input(name: &str, category_id: &str) -> SubCategoryInput {
        SubCategoryInput {
            name: Some(name.to_string()),
            category_id: Some(category_id.to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_under_unknown_category() {
        let db = Db::in_memory();
        let events = RecordingPublisher::new();

        let sub = create_sub_category(&db, &events, input("Hybrid", "no-such-category"))
            .await
            .unwrap();
        assert_eq!(sub.category_id, "no-such-category");
        assert_eq!(events.events().len(), 1);
    }

    #[tokio::test]
    async fn test_list_sorted_by_category() {
        let db = Db::in_memory();
        let events = RecordingPublisher::new();
        create_sub_category(&db, &events, input("b", "cat-2")).await.unwrap();
        create_sub_category(&db, &events, input("a", "cat-1")).await.unwrap();

        let subs = list_sub_categories(&db).await.unwrap();
        assert_eq!(subs[0].category_id, "cat-1");
        assert_eq!(subs[1].category_id, "cat-2");
    }

    #[tokio::test]
    async fn test_delete_refused_while_brand_references() {
        let db = Db::in_memory();
        let events = RecordingPublisher::new();
        let sub = create_sub_category(&db, &events, input("Hybrid", "c1")).await.unwrap();
        create_brand(
            &db,
            &events,
            BrandInput {
                name: Some("Acme".into()),
                subcategory_id: Some(sub.id.clone()),
            },
        )
        .await
        .unwrap();
        events.clear();

        let err = delete_sub_category(&db, &events, &sub.id).await.unwrap_err();
        assert!(matches!(err, BazaarError::Conflict(_)));
        assert!(get_sub_category(&db, &sub.id).await.is_ok());
        assert!(events.events().is_empty());
    }

    #[tokio::test]
    async fn test_delete_publishes_id() {
        let db = Db::in_memory();
        let events = RecordingPublisher::new();
        let sub = create_sub_category(&db, &events, input("Hybrid", "c1")).await.unwrap();

        delete_sub_category(&db, &events, &sub.id).await.unwrap();

        let last = events.events().pop().unwrap();
        assert_eq!(last.action(), ChangeAction::Deleted);
        assert_eq!(last.data()["id"], sub.id.as_str());
    }
}
