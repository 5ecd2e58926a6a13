//! Common types used across the application.

pub mod id;
pub mod pagination;
pub mod rounding;

pub use id::*;
pub use pagination::{PageRequest, PageResponse};
pub use rounding::{round2, round_percent};
