//! BSON document shapes stored in the collections.
//!
//! These structs are internal to the persistence adapter. Identifiers are
//! native `ObjectId`s under `_id` and timestamps are BSON dates; conversion
//! to domain types happens here so repositories stay thin.

use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::domain::{
    AggregatedItem, AggregatedItemDetail, ClockIn, ClockInDraft, Item, ItemDraft, RecordId,
};

/// Failure converting between documents and domain records.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentError {
    /// A stored document has no `_id`.
    #[error("document is missing its _id")]
    MissingId,
    /// A domain identifier could not be expressed as an `ObjectId`.
    #[error("`{value}` is not an ObjectId: {message}")]
    InvalidObjectId { value: String, message: String },
}

/// Convert a domain identifier into the store's native identifier.
pub fn object_id(id: &RecordId) -> Result<ObjectId, DocumentError> {
    ObjectId::parse_str(id.as_str()).map_err(|err| DocumentError::InvalidObjectId {
        value: id.to_string(),
        message: err.to_string(),
    })
}

/// Convert a native identifier into the domain identifier.
pub fn record_id(oid: ObjectId) -> Result<RecordId, DocumentError> {
    RecordId::new(oid.to_hex()).map_err(|err| DocumentError::InvalidObjectId {
        value: oid.to_hex(),
        message: err.to_string(),
    })
}

/// Stored shape of an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    pub item_name: String,
    pub quantity: i64,
    pub expiry_date: bson::DateTime,
    pub insert_date: bson::DateTime,
}

impl From<&ItemDraft> for ItemDocument {
    fn from(draft: &ItemDraft) -> Self {
        Self {
            id: None,
            name: draft.name.clone(),
            email: draft.email.clone(),
            item_name: draft.item_name.clone(),
            quantity: draft.quantity,
            expiry_date: bson::DateTime::from_chrono(draft.expiry_date),
            insert_date: bson::DateTime::from_chrono(draft.insert_date),
        }
    }
}

impl TryFrom<ItemDocument> for Item {
    type Error = DocumentError;

    fn try_from(document: ItemDocument) -> Result<Self, Self::Error> {
        let ItemDocument {
            id,
            name,
            email,
            item_name,
            quantity,
            expiry_date,
            insert_date,
        } = document;
        Ok(Self {
            id: record_id(id.ok_or(DocumentError::MissingId)?)?,
            name,
            email,
            item_name,
            quantity,
            expiry_date: expiry_date.to_chrono(),
            insert_date: insert_date.to_chrono(),
        })
    }
}

/// Stored shape of a clock-in record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClockInDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    pub location: String,
    pub insert_datetime: bson::DateTime,
}

impl From<&ClockInDraft> for ClockInDocument {
    fn from(draft: &ClockInDraft) -> Self {
        Self {
            id: None,
            email: draft.email.clone(),
            location: draft.location.clone(),
            insert_datetime: bson::DateTime::from_chrono(draft.insert_datetime),
        }
    }
}

impl TryFrom<ClockInDocument> for ClockIn {
    type Error = DocumentError;

    fn try_from(document: ClockInDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            id: record_id(document.id.ok_or(DocumentError::MissingId)?)?,
            email: document.email,
            location: document.location,
            insert_datetime: document.insert_datetime.to_chrono(),
        })
    }
}

/// One element of the `items` array produced by the owner pipeline.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AggregatedItemDetailDocument {
    pub id: ObjectId,
    pub name: String,
    pub quantity: i64,
    #[serde(default)]
    pub expiry_date: Option<bson::DateTime>,
    #[serde(default)]
    pub insert_date: Option<bson::DateTime>,
}

/// One result document of the owner pipeline.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AggregatedItemDocument {
    pub email: String,
    pub total_items: i64,
    pub total_quantity: i64,
    pub avg_quantity: f64,
    #[serde(default)]
    pub min_expiry_date: Option<bson::DateTime>,
    #[serde(default)]
    pub max_expiry_date: Option<bson::DateTime>,
    pub expiring_soon: i64,
    pub expired: i64,
    pub items: Vec<AggregatedItemDetailDocument>,
}

impl TryFrom<AggregatedItemDetailDocument> for AggregatedItemDetail {
    type Error = DocumentError;

    fn try_from(document: AggregatedItemDetailDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            id: record_id(document.id)?,
            name: document.name,
            quantity: document.quantity,
            expiry_date: document.expiry_date.map(bson::DateTime::to_chrono),
            insert_date: document.insert_date.map(bson::DateTime::to_chrono),
        })
    }
}

impl TryFrom<AggregatedItemDocument> for AggregatedItem {
    type Error = DocumentError;

    fn try_from(document: AggregatedItemDocument) -> Result<Self, Self::Error> {
        let items = document
            .items
            .into_iter()
            .map(AggregatedItemDetail::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            email: document.email,
            total_items: document.total_items,
            total_quantity: document.total_quantity,
            avg_quantity: document.avg_quantity,
            min_expiry_date: document.min_expiry_date.map(bson::DateTime::to_chrono),
            max_expiry_date: document.max_expiry_date.map(bson::DateTime::to_chrono),
            expiring_soon: document.expiring_soon,
            expired: document.expired,
            items,
        })
    }
}
