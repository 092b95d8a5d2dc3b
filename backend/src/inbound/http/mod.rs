//! HTTP inbound adapter exposing REST endpoints.

pub mod clock_in;
pub mod error;
pub mod health;
pub mod items;
pub mod schemas;
pub mod state;
pub mod validation;

pub use error::ApiResult;
