//! jsondoc-util - Utility functions for jsondoc
//!
//! JSON values in jsondoc carry one numeric type, a double. These helpers keep
//! `serde_json::Value` consistent with that: numbers are canonicalized on the
//! way in and compared as doubles.

pub mod json_equal;
pub mod json_number;

pub use json_equal::deep_equal;
pub use json_number::{canonical_number, normalize, normalize_in_place};
