use bson::{oid::ObjectId, serde_helpers::chrono_datetime_as_bson_datetime};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stored user account record in the `users` collection.
///
/// The password is only ever persisted as a bcrypt hash; the hash never leaves
/// the data layer through a DTO.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub email: String,
    pub password_hash: String,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

/// Wire representation of a user account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<UserDocument> for UserDto {
    fn from(doc: UserDocument) -> Self {
        Self {
            id: doc.id.to_hex(),
            email: doc.email,
            created_at: doc.created_at,
        }
    }
}

/// Signup/signin request body.
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialsDto {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Response body for successful signup and signin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionDto {
    pub user: UserDto,
    pub token: String,
}
