//! Core types shared across kdelta facilities
//!
//! This crate provides the canonical schema constants used by the logging
//! facility and by anything that asserts on captured log events:
//!
//! - **Field keys**: component, op, event, duration and selector fields
//! - **Event names**: start / end / end_error

pub mod schema;
