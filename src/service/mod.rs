//! Business logic layer between controllers and repositories.
//!
//! Services validate incoming payloads before anything is persisted, call the
//! repositories, and convert stored documents to wire DTOs. All validation is
//! synchronous and runs ahead of the first database operation, so a rejected
//! request never leaves a partial write behind.

pub mod auth;
pub mod flight;
pub mod mission;
pub mod timezone;

use bson::oid::ObjectId;

use crate::error::AppError;

/// Parses a path id into an `ObjectId`, mapping malformed input to a
/// BadRequest with the given message.
pub(crate) fn parse_document_id(id: &str, message: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| AppError::BadRequest(message.to_string()))
}
