//! Unit test harness for rotating-table.
//!
//! This module organizes unit tests for each component of the library.

mod config_parsing;
mod config_validation;
mod step_table;
