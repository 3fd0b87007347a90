//! Commands Layer
//!
//! Operations the view layer calls on [`crate::AppState`]. Each mutating
//! command flushes the affected store and bumps the revision; commands on an
//! unknown id do nothing and report it through their return value.

mod catalog_cmd;
mod item_cmd;
