//! Version constraint parsers
//!
//! This module turns the constraint strings found in a Poetry manifest into
//! explicit specifier sets:
//! - Caret shorthand expansion (`^0.10.0` → `>=0.10.0, <0.11.0`)
//! - Comma-separated specifier lists (`>=0.9.1, <=0.10.6`)

mod poetry;

pub use poetry::{expand_caret, parse_constraint, preprocess_specifier};
