//! Seed-and-report scenarios over throwaway SQLite databases.
//!
//! # Intention
//!
//! - Create a fresh database file from a declared schema.
//! - Load literal seed rows in foreign-key-safe order, in one transaction.
//! - Run canned read queries and print them as fixed-column text.
//!
//! # Architectural Boundaries
//!
//! - [`sqlite`], [`schema`] and [`seed`] know nothing about any scenario.
//! - [`scenarios`] holds data and SQL only; [`runner`] wires them together.
//! - Reports are read-only. Nothing outside seeding writes to a database.

pub mod config;
pub mod error;
pub mod report;
pub mod runner;
pub mod scenarios;
pub mod schema;
pub mod seed;
pub mod sqlite;
pub mod value;

pub use error::{Error, Result};
pub use value::Value;
