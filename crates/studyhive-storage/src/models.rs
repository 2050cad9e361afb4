// SPDX-FileCopyrightText: 2026 Studyhive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain model types for storage entities.
//!
//! The canonical types are defined in `studyhive-core::types` for use across
//! the trait boundaries. This module re-exports them for convenience within
//! the storage crate.

pub use studyhive_core::types::{
    ChatMessage, Friend, GroupMessage, NewChatMessage, NewGroupMessage, NewNotification,
    Notification, NotificationKind, ReminderLead, SessionStatus, StudySession,
};
