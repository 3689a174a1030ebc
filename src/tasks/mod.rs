//! Background Tasks Module
//!
//! Contains the background task that maintains the cache while it runs.
//!
//! # Tasks
//! - Sweeper: periodic expiry sweeps, reactive pressure eviction and the
//!   final flush on stop

mod sweeper;

pub use sweeper::spawn_sweeper;
