//! Aggregation pipeline computing per-owner inventory statistics inside
//! MongoDB.
//!
//! Mirrors `domain::aggregate_by_owner`: group by `email`, count and sum
//! quantities, round the mean to two decimals, classify expiries against a
//! fixed `now`, then order by total quantity descending.

use bson::{Document, doc};
use chrono::{DateTime, Utc};

use crate::domain::expiring_soon_until;

/// Build the owner statistics pipeline for a fixed `now`.
pub fn owner_statistics_pipeline(now: DateTime<Utc>) -> Vec<Document> {
    let now_date = bson::DateTime::from_chrono(now);
    let soon_date = bson::DateTime::from_chrono(expiring_soon_until(now));

    vec![
        doc! {
            "$group": {
                "_id": "$email",
                "total_items": { "$sum": 1 },
                "total_quantity": { "$sum": "$quantity" },
                "avg_quantity": { "$avg": "$quantity" },
                "min_expiry_date": { "$min": "$expiry_date" },
                "max_expiry_date": { "$max": "$expiry_date" },
                "items": {
                    "$push": {
                        "id": "$_id",
                        "name": "$name",
                        "quantity": "$quantity",
                        "expiry_date": "$expiry_date",
                        "insert_date": "$insert_date",
                    }
                },
            }
        },
        doc! {
            "$project": {
                "_id": 0,
                "email": "$_id",
                "total_items": 1,
                "total_quantity": 1,
                "avg_quantity": { "$round": ["$avg_quantity", 2] },
                "min_expiry_date": 1,
                "max_expiry_date": 1,
                "items": 1,
                "expiring_soon": {
                    "$size": {
                        "$filter": {
                            "input": "$items",
                            "as": "item",
                            "cond": {
                                "$and": [
                                    { "$gte": ["$$item.expiry_date", now_date] },
                                    { "$lte": ["$$item.expiry_date", soon_date] },
                                ]
                            },
                        }
                    }
                },
                "expired": {
                    "$size": {
                        "$filter": {
                            "input": "$items",
                            "as": "item",
                            "cond": { "$lt": ["$$item.expiry_date", now_date] },
                        }
                    }
                },
            }
        },
        doc! { "$sort": { "total_quantity": -1 } },
    ]
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, TimeZone};
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0)
            .single()
            .expect("valid")
    }

    fn stage_names(pipeline: &[Document]) -> Vec<&str> {
        pipeline
            .iter()
            .filter_map(|stage| stage.keys().next().map(String::as_str))
            .collect()
    }

    #[rstest]
    fn stages_group_project_then_sort(now: DateTime<Utc>) {
        let pipeline = owner_statistics_pipeline(now);
        assert_eq!(stage_names(&pipeline), vec!["$group", "$project", "$sort"]);
        assert_eq!(pipeline[2], doc! { "$sort": { "total_quantity": -1 } });
    }

    #[rstest]
    fn groups_by_owner_email(now: DateTime<Utc>) {
        let pipeline = owner_statistics_pipeline(now);
        let group = pipeline[0].get_document("$group").expect("group stage");
        assert_eq!(group.get_str("_id").expect("group key"), "$email");
    }

    #[rstest]
    fn expiry_window_spans_seven_days_from_now(now: DateTime<Utc>) {
        let pipeline = owner_statistics_pipeline(now);
        let project = pipeline[1].get_document("$project").expect("project stage");
        let condition = project
            .get_document("expiring_soon")
            .and_then(|soon| soon.get_document("$size"))
            .and_then(|size| size.get_document("$filter"))
            .and_then(|filter| filter.get_document("cond"))
            .expect("expiring_soon condition");

        let expected_upper = bson::DateTime::from_chrono(now + TimeDelta::days(7));
        let expected = doc! {
            "$and": [
                { "$gte": ["$$item.expiry_date", bson::DateTime::from_chrono(now)] },
                { "$lte": ["$$item.expiry_date", expected_upper] },
            ]
        };
        assert_eq!(*condition, expected);
    }

    #[rstest]
    fn mean_is_rounded_to_two_places(now: DateTime<Utc>) {
        let pipeline = owner_statistics_pipeline(now);
        let project = pipeline[1].get_document("$project").expect("project stage");
        assert_eq!(
            project.get_document("avg_quantity").expect("avg"),
            &doc! { "$round": ["$avg_quantity", 2] }
        );
    }
}
