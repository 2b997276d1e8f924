//! statquiz-core — Question-bank model, record store contract, and quiz
//! session engine.
//!
//! This crate defines the data model, the persistence contract, and the
//! session state machine that the rest of statquiz builds on. It contains no
//! storage backend and no user interface; those live in `statquiz-store` and
//! `statquiz-cli`.

pub mod bank;
pub mod error;
pub mod parser;
pub mod progress;
pub mod records;
pub mod session;
pub mod store;
