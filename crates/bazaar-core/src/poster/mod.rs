//! Promotional posters.

pub mod model;

use bazaar_db::{ChangePublisher, Db};
use chrono::Utc;
use model::{Poster, PosterInput};

use crate::category::model::NO_IMAGE;
use crate::error::BazaarResult;
use crate::write::{self, fetch, new_id, not_blank, required};

const LABEL: &str = "Poster";

pub async fn list_posters(db: &Db) -> BazaarResult<Vec<Poster>> {
    Ok(db.list().await?)
}

pub async fn get_poster(db: &Db, id: &str) -> BazaarResult<Poster> {
    fetch(db, id, LABEL).await
}

pub async fn create_poster(
    db: &Db,
    events: &dyn ChangePublisher,
    input: PosterInput,
) -> BazaarResult<Poster> {
    let poster_name = required(input.poster_name, "Name is required.")?;
    let image_url = input
        .image_url
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| NO_IMAGE.to_string());

    let now = Utc::now();
    let poster = Poster {
        id: new_id(),
        poster_name,
        image_url,
        created_at: now,
        updated_at: now,
    };
    write::insert_and_publish(db, events, &poster).await?;
    Ok(poster)
}

pub async fn update_poster(
    db: &Db,
    events: &dyn ChangePublisher,
    id: &str,
    input: PosterInput,
) -> BazaarResult<Poster> {
    let mut poster: Poster = fetch(db, id, LABEL).await?;
    if let Some(name) = not_blank(input.poster_name, "Name cannot be empty.")? {
        poster.poster_name = name;
    }
    if let Some(url) = not_blank(input.image_url, "Image cannot be empty.")? {
        poster.image_url = url;
    }
    poster.updated_at = Utc::now();

    write::replace_and_publish(db, events, &poster, LABEL).await?;
    Ok(poster)
}

pub async fn delete_poster(db: &Db, events: &dyn ChangePublisher, id: &str) -> BazaarResult<()> {
    write::remove_and_publish::<Poster>(db, events, id, LABEL).await?;
    Ok(())
}
