//! Storage documents and wire DTOs.
//!
//! Each domain module defines two representations with conversions between them:
//!
//! - **Documents** — the stored shape: snake_case BSON keys, `ObjectId`
//!   identifiers, BSON datetimes. These are what the repositories read and
//!   write.
//! - **DTOs** — the wire shape: camelCase JSON keys, identifiers rendered as
//!   lowercase hex strings, RFC 3339 timestamps. These are what the
//!   controllers decode and emit.
//!
//! Conversions live next to the types so the mapping between the two shapes is
//! reviewable in one place. Server-assigned fields (id, owner, timestamps) are
//! never taken from incoming DTOs.

pub mod api;
pub mod flight;
pub mod mission;
pub mod timezone;
pub mod user;
