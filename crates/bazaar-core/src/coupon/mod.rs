//! Coupon codes and their applicability rules.

pub mod model;

use bazaar_db::{ChangePublisher, Db};
use chrono::Utc;
use model::{Coupon, CouponCheck, CouponInput, CouponStatus, CouponVerdict};

use crate::error::{BazaarError, BazaarResult};
use crate::product::model::Product;
use crate::write::{self, fetch, new_id, not_blank, required};

const LABEL: &str = "Coupon";
const MISSING: &str = "Required fields are missing.";

pub async fn list_coupons(db: &Db) -> BazaarResult<Vec<Coupon>> {
    Ok(db.list().await?)
}

pub async fn get_coupon(db: &Db, id: &str) -> BazaarResult<Coupon> {
    fetch(db, id, LABEL).await
}

async fn ensure_code_free(db: &Db, code: &str, except: Option<&str>) -> BazaarResult<()> {
    let taken = db
        .find(|c: &Coupon| c.coupon_code == code && Some(c.id.as_str()) != except)
        .await?;
    if taken.is_some() {
        return Err(BazaarError::conflict("Coupon code already exists."));
    }
    Ok(())
}

fn check_amount(value: Option<f64>, field: &str) -> BazaarResult<Option<f64>> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => Err(BazaarError::validation(format!(
            "{} must be a non-negative number.",
            field
        ))),
        other => Ok(other),
    }
}

pub async fn create_coupon(
    db: &Db,
    events: &dyn ChangePublisher,
    input: CouponInput,
) -> BazaarResult<Coupon> {
    let coupon_code = required(input.coupon_code, MISSING)?;
    let discount_type = input.discount_type.ok_or_else(|| BazaarError::validation(MISSING))?;
    let discount_amount = check_amount(input.discount_amount, "Discount amount")?
        .ok_or_else(|| BazaarError::validation(MISSING))?;
    let minimum_purchase_amount =
        check_amount(input.minimum_purchase_amount, "Minimum purchase amount")?;
    let end_date = input.end_date.ok_or_else(|| BazaarError::validation(MISSING))?;
    let status = input.status.ok_or_else(|| BazaarError::validation(MISSING))?;
    ensure_code_free(db, &coupon_code, None).await?;

    let now = Utc::now();
    let coupon = Coupon {
        id: new_id(),
        coupon_code,
        discount_type,
        discount_amount,
        minimum_purchase_amount,
        end_date,
        status,
        applicable_category: input.applicable_category,
        applicable_sub_category: input.applicable_sub_category,
        applicable_product: input.applicable_product,
        created_at: now,
        updated_at: now,
    };
    write::insert_and_publish(db, events, &coupon).await?;
    Ok(coupon)
}

pub async fn update_coupon(
    db: &Db,
    events: &dyn ChangePublisher,
    id: &str,
    input: CouponInput,
) -> BazaarResult<Coupon> {
    let mut coupon: Coupon = fetch(db, id, LABEL).await?;

    if let Some(code) = not_blank(input.coupon_code, "Coupon code cannot be empty.")? {
        if code != coupon.coupon_code {
            ensure_code_free(db, &code, Some(id)).await?;
        }
        coupon.coupon_code = code;
    }
    if let Some(kind) = input.discount_type {
        coupon.discount_type = kind;
    }
    if let Some(amount) = check_amount(input.discount_amount, "Discount amount")? {
        coupon.discount_amount = amount;
    }
    if let Some(min) = check_amount(input.minimum_purchase_amount, "Minimum purchase amount")? {
        coupon.minimum_purchase_amount = Some(min);
    }
    if let Some(end) = input.end_date {
        coupon.end_date = end;
    }
    if let Some(status) = input.status {
        coupon.status = status;
    }
    if input.applicable_category.is_some() {
        coupon.applicable_category = input.applicable_category;
    }
    if input.applicable_sub_category.is_some() {
        coupon.applicable_sub_category = input.applicable_sub_category;
    }
    if input.applicable_product.is_some() {
        coupon.applicable_product = input.applicable_product;
    }
    coupon.updated_at = Utc::now();

    write::replace_and_publish(db, events, &coupon, LABEL).await?;
    Ok(coupon)
}

pub async fn delete_coupon(db: &Db, events: &dyn ChangePublisher, id: &str) -> BazaarResult<()> {
    write::remove_and_publish::<Coupon>(db, events, id, LABEL).await?;
    Ok(())
}

fn matches_product(coupon: &Coupon, product: &Product) -> bool {
    if let Some(cat) = &coupon.applicable_category {
        if *cat != product.pro_category_id {
            return false;
        }
    }
    if let Some(sub) = &coupon.applicable_sub_category {
        if *sub != product.pro_sub_category_id {
            return false;
        }
    }
    if let Some(pid) = &coupon.applicable_product {
        if *pid != product.id {
            return false;
        }
    }
    true
}

/// Decide whether a coupon code applies to a cart. Read-only.
///
/// Checks run in order: existence, expiry, status, minimum purchase, then
/// the category/sub-category/product restrictions against every listed
/// product. Unknown product ids are ignored. A missing code is not found.
pub async fn check_coupon(db: &Db, check: CouponCheck) -> BazaarResult<CouponVerdict> {
    let code = check.coupon_code.map(|c| c.trim().to_string()).unwrap_or_default();
    let coupon = if code.is_empty() {
        None
    } else {
        db.find(|c: &Coupon| c.coupon_code == code).await?
    };
    let Some(coupon) = coupon else {
        return Ok(CouponVerdict::rejected("Coupon not found."));
    };

    if coupon.end_date < Utc::now() {
        return Ok(CouponVerdict::rejected("Coupon is expired."));
    }
    if coupon.status != CouponStatus::Active {
        return Ok(CouponVerdict::rejected("Coupon is inactive."));
    }
    if let Some(min) = coupon.minimum_purchase_amount {
        if check.purchase_amount < min {
            return Ok(CouponVerdict::rejected("Minimum purchase amount not met."));
        }
    }
    if coupon.is_unrestricted() {
        return Ok(CouponVerdict::accepted(
            "Coupon is applicable for all orders.",
            coupon,
        ));
    }

    let products: Vec<Product> = db.list().await?;
    let valid = products
        .iter()
        .filter(|p| check.product_ids.contains(&p.id))
        .all(|p| matches_product(&coupon, p));

    if valid {
        Ok(CouponVerdict::accepted(
            "Coupon is applicable for the provided products.",
            coupon,
        ))
    } else {
        Ok(CouponVerdict::rejected(
            "Coupon is not applicable for the provided products.",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::{create_product, model::ProductInput};
    use bazaar_db::RecordingPublisher;
    use chrono::Duration;
    use model::DiscountType;

    fn coupon_input(code: &str) -> CouponInput {
        CouponInput {
            coupon_code: Some(code.to_string()),
            discount_type: Some(DiscountType::Percentage),
            discount_amount: Some(10.0),
            minimum_purchase_amount: Some(50.0),
            end_date: Some(Utc::now() + Duration::days(7)),
            status: Some(CouponStatus::Active),
            ..Default::default()
        }
    }

    fn check(code: &str, products: &[&str], amount: f64) -> CouponCheck {
        CouponCheck {
            coupon_code: Some(code.to_string()),
            product_ids: products.iter().map(|s| s.to_string()).collect(),
            purchase_amount: amount,
        }
    }

    async fn product_in(db: &Db, events: &RecordingPublisher, cat: &str) -> Product {
        create_product(
            db,
            events,
            ProductInput {
                name: Some("Hoe".into()),
                quantity: Some(1),
                price: Some(60.0),
                pro_category_id: Some(cat.into()),
                pro_sub_category_id: Some("s".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_duplicate_code_rejected() {
        let db = Db::in_memory();
        let events = RecordingPublisher::new();
        create_coupon(&db, &events, coupon_input("SAVE10")).await.unwrap();

        let err = create_coupon(&db, &events, coupon_input("SAVE10"))
            .await
            .unwrap_err();
        assert!(matches!(err, BazaarError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_check_rejections() {
        let db = Db::in_memory();
        let events = RecordingPublisher::new();

        let verdict = check_coupon(&db, check("NOPE", &[], 100.0)).await.unwrap();
        assert_eq!(verdict.message, "Coupon not found.");

        let mut missing = check("", &[], 100.0);
        missing.coupon_code = None;
        let verdict = check_coupon(&db, missing).await.unwrap();
        assert!(!verdict.applicable);
        assert_eq!(verdict.message, "Coupon not found.");

        let mut expired = coupon_input("OLD");
        expired.end_date = Some(Utc::now() - Duration::days(1));
        create_coupon(&db, &events, expired).await.unwrap();
        let verdict = check_coupon(&db, check("OLD", &[], 100.0)).await.unwrap();
        assert_eq!(verdict.message, "Coupon is expired.");

        let mut inactive = coupon_input("OFF");
        inactive.status = Some(CouponStatus::Inactive);
        create_coupon(&db, &events, inactive).await.unwrap();
        let verdict = check_coupon(&db, check("OFF", &[], 100.0)).await.unwrap();
        assert_eq!(verdict.message, "Coupon is inactive.");

        create_coupon(&db, &events, coupon_input("MIN")).await.unwrap();
        let verdict = check_coupon(&db, check("MIN", &[], 20.0)).await.unwrap();
        assert!(!verdict.applicable);
        assert_eq!(verdict.message, "Minimum purchase amount not met.");
    }

    #[tokio::test]
    async fn test_unrestricted_coupon_applies() {
        let db = Db::in_memory();
        let events = RecordingPublisher::new();
        create_coupon(&db, &events, coupon_input("ALL")).await.unwrap();

        let verdict = check_coupon(&db, check("ALL", &[], 80.0)).await.unwrap();
        assert!(verdict.applicable);
        assert_eq!(verdict.coupon.unwrap().coupon_code, "ALL");
    }

    #[tokio::test]
    async fn test_category_restriction() {
        let db = Db::in_memory();
        let events = RecordingPublisher::new();
        let seeds = product_in(&db, &events, "seeds").await;
        let tools = product_in(&db, &events, "tools").await;

        let mut input = coupon_input("SEEDS");
        input.applicable_category = Some("seeds".into());
        create_coupon(&db, &events, input).await.unwrap();

        let ok = check_coupon(&db, check("SEEDS", &[&seeds.id], 80.0)).await.unwrap();
        assert!(ok.applicable);

        let mixed = check_coupon(&db, check("SEEDS", &[&seeds.id, &tools.id], 80.0))
            .await
            .unwrap();
        assert!(!mixed.applicable);
    }

    #[tokio::test]
    async fn test_check_does_not_publish() {
        let db = Db::in_memory();
        let events = RecordingPublisher::new();
        create_coupon(&db, &events, coupon_input("ALL")).await.unwrap();
        events.clear();

        check_coupon(&db, check("ALL", &[], 80.0)).await.unwrap();
        assert!(events.events().is_empty());
    }
}
