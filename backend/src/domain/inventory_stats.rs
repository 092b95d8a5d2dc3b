//! Per-owner inventory statistics.
//!
//! Items are grouped by owner `email`. Each group reports its size, quantity
//! total and mean, the expiry range, and how many items are already expired
//! or will expire within [`EXPIRING_SOON_DAYS`] days of "now". Groups are
//! ordered by total quantity, largest first.
//!
//! The MongoDB adapter computes the same figures inside the store with an
//! aggregation pipeline; [`aggregate_by_owner`] is the in-process
//! equivalent used by the in-memory store and as the reference for tests.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeDelta, Utc};

use super::{Item, RecordId};

/// Width of the "expiring soon" window, in days.
pub const EXPIRING_SOON_DAYS: i64 = 7;

/// Summary of one item inside an [`AggregatedItem`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatedItemDetail {
    pub id: RecordId,
    pub name: String,
    pub quantity: i64,
    pub expiry_date: Option<DateTime<Utc>>,
    pub insert_date: Option<DateTime<Utc>>,
}

/// Statistics for every item owned by one `email`.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedItem {
    pub email: String,
    pub total_items: i64,
    pub total_quantity: i64,
    /// Mean quantity rounded to two decimals.
    pub avg_quantity: f64,
    pub min_expiry_date: Option<DateTime<Utc>>,
    pub max_expiry_date: Option<DateTime<Utc>>,
    pub expiring_soon: i64,
    pub expired: i64,
    pub items: Vec<AggregatedItemDetail>,
}

/// Upper edge of the expiring-soon window relative to `now`.
pub fn expiring_soon_until(now: DateTime<Utc>) -> DateTime<Utc> {
    now + TimeDelta::days(EXPIRING_SOON_DAYS)
}

/// Expiry within `[now, now + 7 days]`, both ends inclusive.
pub fn is_expiring_soon(expiry: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    expiry >= now && expiry <= expiring_soon_until(now)
}

/// Expiry strictly before `now`.
pub fn is_expired(expiry: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    expiry < now
}

/// Round to two decimals, halves to even, matching MongoDB `$round`.
///
/// # Examples
/// ```
/// use pantry::domain::round_to_hundredths;
///
/// assert_eq!(round_to_hundredths(10.0 / 3.0), 3.33);
/// assert_eq!(round_to_hundredths(5.0), 5.0);
/// ```
pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Count items expiring soon and already expired among `items`.
pub fn expiry_counts<'a>(
    expiries: impl IntoIterator<Item = &'a Option<DateTime<Utc>>>,
    now: DateTime<Utc>,
) -> (i64, i64) {
    expiries
        .into_iter()
        .flatten()
        .fold((0, 0), |(soon, expired), expiry| {
            (
                soon + i64::from(is_expiring_soon(*expiry, now)),
                expired + i64::from(is_expired(*expiry, now)),
            )
        })
}

/// Sort groups by `total_quantity`, largest first.
pub fn sort_by_total_quantity(groups: &mut [AggregatedItem]) {
    groups.sort_by(|a, b| b.total_quantity.cmp(&a.total_quantity));
}

/// Group `items` by owner and compute statistics with a fixed `now`.
///
/// # Examples
/// ```
/// use chrono::{NaiveDate, Utc};
/// use pantry::domain::{Item, RecordId, aggregate_by_owner, start_of_day};
///
/// let expiry = start_of_day(NaiveDate::from_ymd_opt(2030, 1, 1).unwrap());
/// let item = |id: &str, quantity| Item {
///     id: RecordId::new(id).unwrap(),
///     name: "Ada".to_owned(),
///     email: "a@x.com".to_owned(),
///     item_name: "Milk".to_owned(),
///     quantity,
///     expiry_date: expiry,
///     insert_date: Utc::now(),
/// };
/// let stats = aggregate_by_owner(
///     &[item("000000000000000000000001", 2), item("000000000000000000000002", 8)],
///     Utc::now(),
/// );
/// assert_eq!(stats[0].total_items, 2);
/// assert_eq!(stats[0].total_quantity, 10);
/// assert_eq!(stats[0].avg_quantity, 5.0);
/// ```
pub fn aggregate_by_owner(items: &[Item], now: DateTime<Utc>) -> Vec<AggregatedItem> {
    let mut groups: BTreeMap<&str, Vec<&Item>> = BTreeMap::new();
    for item in items {
        groups.entry(item.email.as_str()).or_default().push(item);
    }

    let mut stats: Vec<AggregatedItem> = groups
        .into_iter()
        .map(|(email, members)| owner_stats(email, &members, now))
        .collect();
    sort_by_total_quantity(&mut stats);
    stats
}

fn owner_stats(email: &str, members: &[&Item], now: DateTime<Utc>) -> AggregatedItem {
    let total_items = i64::try_from(members.len()).unwrap_or(i64::MAX);
    let total_quantity = members
        .iter()
        .fold(0_i64, |total, item| total.saturating_add(item.quantity));
    let avg_quantity = if total_items == 0 {
        0.0
    } else {
        round_to_hundredths(total_quantity as f64 / total_items as f64)
    };

    let details: Vec<AggregatedItemDetail> = members
        .iter()
        .map(|item| AggregatedItemDetail {
            id: item.id.clone(),
            name: item.name.clone(),
            quantity: item.quantity,
            expiry_date: Some(item.expiry_date),
            insert_date: Some(item.insert_date),
        })
        .collect();
    let (expiring_soon, expired) = expiry_counts(details.iter().map(|d| &d.expiry_date), now);

    AggregatedItem {
        email: email.to_owned(),
        total_items,
        total_quantity,
        avg_quantity,
        min_expiry_date: members.iter().map(|item| item.expiry_date).min(),
        max_expiry_date: members.iter().map(|item| item.expiry_date).max(),
        expiring_soon,
        expired,
        items: details,
    }
}
