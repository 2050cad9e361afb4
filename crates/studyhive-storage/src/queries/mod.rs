// SPDX-FileCopyrightText: 2026 Studyhive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query modules for CRUD operations on storage entities.

pub mod maintenance;
pub mod messages;
pub mod notifications;
pub mod sessions;
pub mod social;
