//! Integration tests for the MongoDB repositories.
//!
//! The suite runs against the server named by `PANTRY_TEST_MONGODB_URI`. Each
//! context writes to its own throwaway database, dropped again on teardown.
//! When the variable is unset every test prints a skip marker and returns.

use chrono::{DateTime, NaiveDate, TimeDelta, TimeZone, Utc};
use pantry::domain::ports::{ClockInRepository, ItemRepository, UpdateOutcome};
use pantry::domain::{
    AggregatedItem, ClockIn, ClockInDraft, ClockInFilter, ClockInPatch, Item, ItemDraft,
    ItemFilter, ItemPatch, RecordId, aggregate_by_owner, start_of_day,
};
use pantry::outbound::persistence::{
    MongoClockInRepository, MongoItemRepository, MongoStore, StoreConfig,
};
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;
use uuid::Uuid;

const MONGODB_URI_ENV: &str = "PANTRY_TEST_MONGODB_URI";

struct TestContext {
    runtime: Runtime,
    store: MongoStore,
    items: MongoItemRepository,
    clock_ins: MongoClockInRepository,
}

impl Drop for TestContext {
    fn drop(&mut self) {
        let store = self.store.clone();
        self.runtime.block_on(async {
            if let Err(err) = store.items().drop().await {
                eprintln!("failed to drop items collection: {err}");
            }
            if let Err(err) = store.clock_ins().drop().await {
                eprintln!("failed to drop clock-in collection: {err}");
            }
            store.close().await;
        });
    }
}

fn setup_context(uri: &str) -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let database = format!("pantry_test_{}", Uuid::new_v4().simple());
    let store = runtime
        .block_on(MongoStore::connect(
            StoreConfig::new(uri).with_database_name(database),
        ))
        .map_err(|err| err.to_string())?;
    let items = MongoItemRepository::new(&store);
    let clock_ins = MongoClockInRepository::new(&store);

    Ok(TestContext {
        runtime,
        store,
        items,
        clock_ins,
    })
}

#[fixture]
fn repo_context() -> Option<TestContext> {
    let Ok(uri) = std::env::var(MONGODB_URI_ENV) else {
        eprintln!("SKIP-TEST-MONGODB: {MONGODB_URI_ENV} is not set");
        return None;
    };
    match setup_context(&uri) {
        Ok(context) => Some(context),
        Err(reason) => panic!("MongoDB setup failed: {reason}. Unset {MONGODB_URI_ENV} to skip."),
    }
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn item_draft(email: &str, quantity: i64, expiry_date: DateTime<Utc>) -> ItemDraft {
    ItemDraft {
        name: "Ada".to_owned(),
        email: email.to_owned(),
        item_name: "Milk".to_owned(),
        quantity,
        expiry_date,
        insert_date: now(),
    }
}

impl TestContext {
    fn insert_items(&self, drafts: &[ItemDraft]) -> Vec<RecordId> {
        self.runtime.block_on(async {
            let mut ids = Vec::with_capacity(drafts.len());
            for draft in drafts {
                ids.push(self.items.insert(draft).await.expect("insert item"));
            }
            ids
        })
    }

    fn find_items(&self, filter: ItemFilter) -> Vec<Item> {
        self.runtime
            .block_on(self.items.find(&filter))
            .expect("find items")
    }
}

fn by_detail_id(mut groups: Vec<AggregatedItem>) -> Vec<AggregatedItem> {
    for group in &mut groups {
        group
            .items
            .sort_by(|a, b| a.id.to_string().cmp(&b.id.to_string()));
    }
    groups
}

#[rstest]
fn item_insert_then_read_back(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-MONGODB: item_insert_then_read_back skipped");
        return;
    };

    let draft = item_draft("ada@example.com", 2, start_of_day(date(2025, 7, 1)));
    let ids = context.insert_items(std::slice::from_ref(&draft));

    let found = context
        .runtime
        .block_on(context.items.find_by_id(&ids[0]))
        .expect("find inserted item")
        .expect("inserted item exists");
    assert_eq!(
        found,
        Item {
            id: ids[0].clone(),
            name: draft.name,
            email: draft.email,
            item_name: draft.item_name,
            quantity: draft.quantity,
            expiry_date: draft.expiry_date,
            insert_date: draft.insert_date,
        }
    );

    let missing = RecordId::new("65f1c0ffee0000000000abcd").expect("valid id");
    let absent = context
        .runtime
        .block_on(context.items.find_by_id(&missing))
        .expect("lookup of unknown id succeeds");
    assert!(absent.is_none());
}

#[rstest]
fn item_filters_are_inclusive_lower_bounds(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-MONGODB: item_filters_are_inclusive_lower_bounds skipped");
        return;
    };

    context.insert_items(&[
        item_draft("ada@example.com", 2, start_of_day(date(2025, 3, 1))),
        item_draft("ada@example.com", 8, start_of_day(date(2025, 3, 10))),
        item_draft("grace@example.com", 5, start_of_day(date(2025, 4, 1))),
    ]);

    let cases = [
        (ItemFilter::default(), 3),
        (
            ItemFilter {
                quantity: Some(5),
                ..ItemFilter::default()
            },
            2,
        ),
        (
            ItemFilter {
                expiry_date: Some(date(2025, 3, 10)),
                ..ItemFilter::default()
            },
            2,
        ),
        (
            ItemFilter {
                email: Some("ada@example.com".to_owned()),
                quantity: Some(5),
                ..ItemFilter::default()
            },
            1,
        ),
        (
            ItemFilter {
                insert_date: Some(now().date_naive()),
                ..ItemFilter::default()
            },
            3,
        ),
        (
            ItemFilter {
                insert_date: Some(date(2025, 6, 16)),
                ..ItemFilter::default()
            },
            0,
        ),
    ];
    for (filter, expected) in cases {
        let found = context.find_items(filter.clone());
        assert_eq!(found.len(), expected, "filter {filter:?}");
        assert!(found.iter().all(|item| filter.matches(item)));
    }
}

#[rstest]
fn identical_update_matches_without_modifying(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-MONGODB: identical_update_matches_without_modifying skipped");
        return;
    };

    let ids = context.insert_items(&[item_draft(
        "ada@example.com",
        2,
        start_of_day(date(2025, 7, 1)),
    )]);
    let id = &ids[0];
    let same = ItemPatch {
        quantity: Some(2),
        ..ItemPatch::default()
    };
    let changed = ItemPatch {
        quantity: Some(7),
        expiry_date: Some(date(2025, 8, 1)),
        ..ItemPatch::default()
    };
    let missing = RecordId::new("65f1c0ffee0000000000abcd").expect("valid id");

    let (unchanged, modified, absent) = context.runtime.block_on(async {
        (
            context.items.update(id, &same).await.expect("identical update"),
            context.items.update(id, &changed).await.expect("real update"),
            context.items.update(&missing, &same).await.expect("update of unknown id"),
        )
    });
    assert_eq!(
        unchanged,
        UpdateOutcome {
            matched: 1,
            modified: 0
        }
    );
    assert_eq!(
        modified,
        UpdateOutcome {
            matched: 1,
            modified: 1
        }
    );
    assert_eq!(absent, UpdateOutcome::NOT_FOUND);

    let stored = context
        .runtime
        .block_on(context.items.find_by_id(id))
        .expect("find updated item")
        .expect("updated item exists");
    assert_eq!(stored.quantity, 7);
    assert_eq!(stored.expiry_date, start_of_day(date(2025, 8, 1)));
    assert_eq!(stored.name, "Ada");
}

#[rstest]
fn deleting_twice_reports_absence(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-MONGODB: deleting_twice_reports_absence skipped");
        return;
    };

    let ids = context.insert_items(&[item_draft(
        "ada@example.com",
        2,
        start_of_day(date(2025, 7, 1)),
    )]);

    let (first, second) = context.runtime.block_on(async {
        (
            context.items.delete(&ids[0]).await.expect("first delete"),
            context.items.delete(&ids[0]).await.expect("second delete"),
        )
    });
    assert!(first);
    assert!(!second);
    assert!(context.find_items(ItemFilter::default()).is_empty());
}

#[rstest]
fn aggregation_pipeline_agrees_with_reference(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-MONGODB: aggregation_pipeline_agrees_with_reference skipped");
        return;
    };

    let now = now();
    let far = now + TimeDelta::days(60);
    context.insert_items(&[
        item_draft("pair@example.com", 2, far),
        item_draft("pair@example.com", 8, far),
        item_draft("mixed@example.com", 1, now + TimeDelta::days(3)),
        item_draft("mixed@example.com", 1, now + TimeDelta::days(10)),
        item_draft("mixed@example.com", 2, now - TimeDelta::days(1)),
        item_draft("edge@example.com", 1, now + TimeDelta::days(7)),
        item_draft("edge@example.com", 2, now),
    ]);

    let stored = context.find_items(ItemFilter::default());
    let expected = by_detail_id(aggregate_by_owner(&stored, now));
    let actual = by_detail_id(
        context
            .runtime
            .block_on(context.items.aggregate_by_owner(now))
            .expect("aggregate items"),
    );

    assert_eq!(actual, expected);

    let pair = &actual[0];
    assert_eq!(pair.email, "pair@example.com");
    assert_eq!(pair.total_items, 2);
    assert_eq!(pair.total_quantity, 10);
    assert_eq!(pair.avg_quantity, 5.0);

    let mixed = &actual[1];
    assert_eq!(mixed.email, "mixed@example.com");
    assert_eq!(mixed.avg_quantity, 1.33);
    assert_eq!(mixed.expiring_soon, 1);
    assert_eq!(mixed.expired, 1);

    let edge = &actual[2];
    assert_eq!(edge.email, "edge@example.com");
    assert_eq!(edge.expiring_soon, 2);
    assert_eq!(edge.expired, 0);
}

#[rstest]
fn clock_in_round_trip(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-MONGODB: clock_in_round_trip skipped");
        return;
    };

    let at = |hour| {
        Utc.with_ymd_and_hms(2025, 1, 2, hour, 0, 0)
            .single()
            .expect("valid timestamp")
    };
    let drafts = [
        ("grace@example.com", "north-gate", at(8)),
        ("grace@example.com", "south-gate", at(9)),
        ("alan@example.com", "north-gate", at(10)),
    ];

    let ids = context.runtime.block_on(async {
        let mut ids = Vec::new();
        for (email, location, insert_datetime) in drafts {
            let draft = ClockInDraft {
                email: email.to_owned(),
                location: location.to_owned(),
                insert_datetime,
            };
            ids.push(context.clock_ins.insert(&draft).await.expect("insert clock-in"));
        }
        ids
    });

    let found = context
        .runtime
        .block_on(context.clock_ins.find_by_id(&ids[0]))
        .expect("find clock-in")
        .expect("clock-in exists");
    assert_eq!(
        found,
        ClockIn {
            id: ids[0].clone(),
            email: "grace@example.com".to_owned(),
            location: "north-gate".to_owned(),
            insert_datetime: at(8),
        }
    );

    let filtered = context
        .runtime
        .block_on(context.clock_ins.find(&ClockInFilter {
            location: Some("north-gate".to_owned()),
            insert_datetime: Some(at(10)),
            ..ClockInFilter::default()
        }))
        .expect("filter clock-ins");
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].email, "alan@example.com");

    let patch = ClockInPatch {
        location: Some("north-gate".to_owned()),
        ..ClockInPatch::default()
    };
    let (outcome, first_delete, second_delete) = context.runtime.block_on(async {
        (
            context.clock_ins.update(&ids[0], &patch).await.expect("update clock-in"),
            context.clock_ins.delete(&ids[0]).await.expect("first delete"),
            context.clock_ins.delete(&ids[0]).await.expect("second delete"),
        )
    });
    assert_eq!(
        outcome,
        UpdateOutcome {
            matched: 1,
            modified: 0
        }
    );
    assert!(first_delete);
    assert!(!second_delete);
}
