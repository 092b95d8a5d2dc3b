//! Inventory item records.
//!
//! An item belongs to the owner identified by `email`. Its expiry is a
//! calendar date, persisted as midnight UTC, and `insert_date` is stamped by
//! the service when the record is created and never rewritten afterwards.

use chrono::{DateTime, NaiveDate, Utc};

use super::{RecordId, start_of_day};

/// A stored item as returned by every read path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub item_name: String,
    pub quantity: i64,
    pub expiry_date: DateTime<Utc>,
    pub insert_date: DateTime<Utc>,
}

/// Client-supplied fields for a new item.
///
/// `insert_date` is absent: the service stamps it on creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub name: String,
    pub email: String,
    pub item_name: String,
    pub quantity: i64,
    pub expiry_date: NaiveDate,
}

/// Fully-populated item ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDraft {
    pub name: String,
    pub email: String,
    pub item_name: String,
    pub quantity: i64,
    pub expiry_date: DateTime<Utc>,
    pub insert_date: DateTime<Utc>,
}

impl NewItem {
    /// Normalise the expiry to midnight UTC and stamp the insertion time.
    ///
    /// # Examples
    /// ```
    /// use chrono::{NaiveDate, TimeZone, Utc};
    /// use pantry::domain::NewItem;
    ///
    /// let now = Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap();
    /// let draft = NewItem {
    ///     name: "Ada".to_owned(),
    ///     email: "ada@example.com".to_owned(),
    ///     item_name: "Milk".to_owned(),
    ///     quantity: 2,
    ///     expiry_date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
    /// }
    /// .into_draft(now);
    /// assert_eq!(draft.expiry_date, Utc.with_ymd_and_hms(2025, 3, 10, 0, 0, 0).unwrap());
    /// assert_eq!(draft.insert_date, now);
    /// ```
    pub fn into_draft(self, inserted_at: DateTime<Utc>) -> ItemDraft {
        ItemDraft {
            name: self.name,
            email: self.email,
            item_name: self.item_name,
            quantity: self.quantity,
            expiry_date: start_of_day(self.expiry_date),
            insert_date: inserted_at,
        }
    }
}

impl ItemDraft {
    /// Attach the identifier the store assigned.
    pub fn into_item(self, id: RecordId) -> Item {
        Item {
            id,
            name: self.name,
            email: self.email,
            item_name: self.item_name,
            quantity: self.quantity,
            expiry_date: self.expiry_date,
            insert_date: self.insert_date,
        }
    }
}

/// Partial update: only `Some` fields are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub item_name: Option<String>,
    pub quantity: Option<i64>,
    pub expiry_date: Option<NaiveDate>,
}

impl ItemPatch {
    /// True when the patch would not change any field.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.item_name.is_none()
            && self.quantity.is_none()
            && self.expiry_date.is_none()
    }

    /// Expiry normalised to midnight UTC, if the patch sets one.
    pub fn expiry_timestamp(&self) -> Option<DateTime<Utc>> {
        self.expiry_date.map(start_of_day)
    }

    /// Apply the patch to an in-memory record.
    pub fn apply_to(&self, item: &mut Item) {
        if let Some(name) = &self.name {
            item.name.clone_from(name);
        }
        if let Some(email) = &self.email {
            item.email.clone_from(email);
        }
        if let Some(item_name) = &self.item_name {
            item.item_name.clone_from(item_name);
        }
        if let Some(quantity) = self.quantity {
            item.quantity = quantity;
        }
        if let Some(expiry) = self.expiry_timestamp() {
            item.expiry_date = expiry;
        }
    }
}

/// Conjunctive filter for listing items. `None` means unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemFilter {
    /// Exact owner match.
    pub email: Option<String>,
    /// Expiry on or after midnight UTC of this date.
    pub expiry_date: Option<NaiveDate>,
    /// Inserted on or after midnight UTC of this date.
    pub insert_date: Option<NaiveDate>,
    /// Quantity at least this value.
    pub quantity: Option<i64>,
}

impl ItemFilter {
    /// Lower bound applied to `expiry_date`.
    pub fn expiry_lower_bound(&self) -> Option<DateTime<Utc>> {
        self.expiry_date.map(start_of_day)
    }

    /// Lower bound applied to `insert_date`.
    pub fn insert_lower_bound(&self) -> Option<DateTime<Utc>> {
        self.insert_date.map(start_of_day)
    }

    /// Evaluate the filter against a record.
    pub fn matches(&self, item: &Item) -> bool {
        self.email.as_deref().is_none_or(|email| item.email == email)
            && self
                .expiry_lower_bound()
                .is_none_or(|bound| item.expiry_date >= bound)
            && self
                .insert_lower_bound()
                .is_none_or(|bound| item.insert_date >= bound)
            && self.quantity.is_none_or(|min| item.quantity >= min)
    }
}
