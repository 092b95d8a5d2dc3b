//! Filter and update documents built from domain filters and patches.

use bson::{Document, doc};

use crate::domain::{ClockInFilter, ClockInPatch, ItemFilter, ItemPatch};

/// Conjunctive filter: exact `email`, `$gte` on both dates and `quantity`.
pub fn item_filter(filter: &ItemFilter) -> Document {
    let mut query = Document::new();
    if let Some(email) = &filter.email {
        query.insert("email", email.as_str());
    }
    if let Some(bound) = filter.expiry_lower_bound() {
        query.insert("expiry_date", doc! { "$gte": bson::DateTime::from_chrono(bound) });
    }
    if let Some(bound) = filter.insert_lower_bound() {
        query.insert("insert_date", doc! { "$gte": bson::DateTime::from_chrono(bound) });
    }
    if let Some(quantity) = filter.quantity {
        query.insert("quantity", doc! { "$gte": quantity });
    }
    query
}

/// `$set` body for the fields present in `patch`; `insert_date` is never
/// written.
pub fn item_update(patch: &ItemPatch) -> Document {
    let mut fields = Document::new();
    if let Some(name) = &patch.name {
        fields.insert("name", name.as_str());
    }
    if let Some(email) = &patch.email {
        fields.insert("email", email.as_str());
    }
    if let Some(item_name) = &patch.item_name {
        fields.insert("item_name", item_name.as_str());
    }
    if let Some(quantity) = patch.quantity {
        fields.insert("quantity", quantity);
    }
    if let Some(expiry) = patch.expiry_timestamp() {
        fields.insert("expiry_date", bson::DateTime::from_chrono(expiry));
    }
    doc! { "$set": fields }
}

/// Conjunctive filter: exact `email` and `location`, `$gte` on the time.
pub fn clock_in_filter(filter: &ClockInFilter) -> Document {
    let mut query = Document::new();
    if let Some(email) = &filter.email {
        query.insert("email", email.as_str());
    }
    if let Some(location) = &filter.location {
        query.insert("location", location.as_str());
    }
    if let Some(bound) = filter.insert_datetime {
        query.insert(
            "insert_datetime",
            doc! { "$gte": bson::DateTime::from_chrono(bound) },
        );
    }
    query
}

/// `$set` body for the fields present in `patch`.
pub fn clock_in_update(patch: &ClockInPatch) -> Document {
    let mut fields = Document::new();
    if let Some(email) = &patch.email {
        fields.insert("email", email.as_str());
    }
    if let Some(location) = &patch.location {
        fields.insert("location", location.as_str());
    }
    doc! { "$set": fields }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};
    use rstest::rstest;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn millis(y: i32, m: u32, d: u32) -> bson::DateTime {
        bson::DateTime::from_chrono(
            Utc.with_ymd_and_hms(y, m, d, 0, 0, 0)
                .single()
                .expect("valid"),
        )
    }

    #[rstest]
    fn empty_item_filter_matches_everything() {
        assert!(item_filter(&ItemFilter::default()).is_empty());
    }

    #[rstest]
    fn item_filter_uses_gte_on_midnight_bounds() {
        let filter = ItemFilter {
            email: Some("ada@example.com".to_owned()),
            expiry_date: Some(date(2025, 3, 10)),
            insert_date: Some(date(2025, 1, 1)),
            quantity: Some(3),
        };

        assert_eq!(
            item_filter(&filter),
            doc! {
                "email": "ada@example.com",
                "expiry_date": { "$gte": millis(2025, 3, 10) },
                "insert_date": { "$gte": millis(2025, 1, 1) },
                "quantity": { "$gte": 3_i64 },
            }
        );
    }

    #[rstest]
    fn item_update_sets_only_supplied_fields() {
        let patch = ItemPatch {
            quantity: Some(9),
            expiry_date: Some(date(2025, 6, 1)),
            ..ItemPatch::default()
        };

        assert_eq!(
            item_update(&patch),
            doc! { "$set": { "quantity": 9_i64, "expiry_date": millis(2025, 6, 1) } }
        );
    }

    #[rstest]
    fn clock_in_filter_matches_location_exactly() {
        let bound = Utc
            .with_ymd_and_hms(2025, 1, 2, 3, 4, 5)
            .single()
            .expect("valid");
        let filter = ClockInFilter {
            location: Some("north-gate".to_owned()),
            insert_datetime: Some(bound),
            ..ClockInFilter::default()
        };

        assert_eq!(
            clock_in_filter(&filter),
            doc! {
                "location": "north-gate",
                "insert_datetime": { "$gte": bson::DateTime::from_chrono(bound) },
            }
        );
    }

    #[rstest]
    fn clock_in_update_wraps_fields_in_set() {
        let patch = ClockInPatch {
            email: Some("grace@example.com".to_owned()),
            location: None,
        };
        assert_eq!(
            clock_in_update(&patch),
            doc! { "$set": { "email": "grace@example.com" } }
        );
    }
}
