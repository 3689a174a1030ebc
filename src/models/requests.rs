//! Request DTOs for the HTTP API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

/// Request body for PUT /cache/capacity
///
/// # Fields
/// - `max_items`: New capacity ceiling for the view cache
#[derive(Debug, Clone, Deserialize)]
pub struct CapacityRequest {
    pub max_items: usize,
}

impl CapacityRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.max_items == 0 {
            return Some("max_items must be greater than zero".to_string());
        }
        None
    }
}
