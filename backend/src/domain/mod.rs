//! Domain primitives, aggregates, services and ports.
//!
//! Purpose: define the item and clock-in records, the per-owner inventory
//! statistics, and the services that implement the driving ports. Nothing
//! here knows about HTTP or MongoDB; adapters live under `inbound` and
//! `outbound`.
//!
//! Public surface:
//! - `Error` / `ErrorCode`: transport-agnostic failure payload.
//! - `RecordId`: 24-hex-character store identifier.
//! - `Item`, `ClockIn` and their draft, patch and filter companions.
//! - `AggregatedItem` and `aggregate_by_owner`: per-owner statistics.
//! - `ItemService`, `ClockInService`: driving port implementations.

pub mod clock_in;
mod clock_in_service;
pub mod error;
pub mod inventory_stats;
pub mod item;
mod item_service;
pub mod ports;
pub mod record_id;
pub mod timestamps;
pub mod trace_id;

pub use self::clock_in::{ClockIn, ClockInDraft, ClockInFilter, ClockInPatch, NewClockIn};
pub use self::clock_in_service::ClockInService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::inventory_stats::{
    AggregatedItem, AggregatedItemDetail, EXPIRING_SOON_DAYS, aggregate_by_owner, expiry_counts,
    expiring_soon_until, is_expired, is_expiring_soon, round_to_hundredths,
    sort_by_total_quantity,
};
pub use self::item::{Item, ItemDraft, ItemFilter, ItemPatch, NewItem};
pub use self::item_service::ItemService;
pub use self::record_id::{RecordId, RecordIdValidationError};
pub use self::timestamps::{
    CLOCK_IN_TIMESTAMP_FORMAT, DATE_FORMAT, TimestampError, format_timestamp,
    parse_clock_in_timestamp, parse_date, start_of_day,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
