// SPDX-FileCopyrightText: 2026 Studyhive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for the Studyhive workspace.
//!
//! Provides deterministic doubles for the seams defined in
//! `studyhive-core`: a [`MockStore`] with injectable fixtures and failure
//! toggles, a [`MockMailer`] that captures sends, and a [`ManualClock`]
//! that tests advance explicitly to simulate tick sequences.

pub mod manual_clock;
pub mod mock_mailer;
pub mod mock_store;

pub use manual_clock::ManualClock;
pub use mock_mailer::MockMailer;
pub use mock_store::{session_fixture, MockStore};
