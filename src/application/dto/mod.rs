//! # Data Transfer Objects

pub mod batch_report;
pub mod send_input;
