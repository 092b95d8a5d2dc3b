//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: MongoDB-backed repositories for items and clock-ins.
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod persistence;
