// SPDX-FileCopyrightText: 2026 Studyhive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions for the seams between Studyhive components.

pub mod clock;
pub mod mailer;
pub mod store;

pub use clock::{Clock, SystemClock};
pub use mailer::Mailer;
pub use store::StudyStore;
