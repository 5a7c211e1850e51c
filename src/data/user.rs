use bson::{doc, oid::ObjectId};
use chrono::Utc;
use mongodb::{Collection, Database};

use crate::{error::AppError, model::user::UserDocument};

const COLLECTION: &str = "users";

/// Repository providing database operations for user accounts.
pub struct UserRepository {
    collection: Collection<UserDocument>,
}

impl UserRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION),
        }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserDocument>, AppError> {
        let document = self.collection.find_one(doc! { "email": email }).await?;

        Ok(document)
    }

    /// Inserts a new user account with an already-hashed password.
    pub async fn create(
        &self,
        email: String,
        password_hash: String,
    ) -> Result<UserDocument, AppError> {
        let document = UserDocument {
            id: ObjectId::new(),
            email,
            password_hash,
            created_at: Utc::now(),
        };

        self.collection.insert_one(&document).await?;

        Ok(document)
    }
}
