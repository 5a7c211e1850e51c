//! Data access layer for all stored documents.
//!
//! This module contains repository structs that perform the MongoDB operations
//! (CRUD) for each document kind. Every flight and mission query is owner
//! scoped: the filter always conjoins `_id` with `user_id`, so an id that
//! belongs to another user behaves exactly like an id that does not exist.
//! Conversion between wire DTOs and stored documents happens at this boundary.

pub mod flight;
pub mod mission;
pub mod user;
