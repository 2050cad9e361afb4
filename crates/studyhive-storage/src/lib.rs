// SPDX-FileCopyrightText: 2026 Studyhive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for the Studyhive backend.
//!
//! Provides WAL-mode SQLite storage with embedded migrations, a single-writer
//! concurrency model via `tokio-rusqlite`, and typed CRUD operations for
//! study sessions, notifications, chat messages, friendships, and the
//! maintenance tables (streaks, daily reports, reminder log).

pub mod database;
pub mod migrations;
pub mod models;
pub mod queries;
pub mod writer;

mod adapter;

pub use adapter::SqliteStore;
pub use database::Database;
pub use models::*;
