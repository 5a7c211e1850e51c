use bson::{doc, oid::ObjectId};
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::{options::ReturnDocument, Collection, Database};

use crate::{
    error::AppError,
    model::mission::{
        timeline_from_dtos, CreateMissionDto, GlobalMissionSettings, MissionDocument,
        MissionMetadata, UpdateMissionDto,
    },
};

const COLLECTION: &str = "missions";

/// Repository providing database operations for missions.
pub struct MissionRepository {
    collection: Collection<MissionDocument>,
}

impl MissionRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION),
        }
    }

    /// Inserts a new mission for `owner`.
    ///
    /// Assigns a fresh id, forces the owner, and stamps date and both
    /// timestamps with the current time. Timeline elements without an id or
    /// order get a fresh hex id and their append index.
    ///
    /// # Returns
    /// - `Ok(MissionDocument)`: The stored mission
    /// - `Err(AppError)`: Database or serialization error
    pub async fn create(
        &self,
        owner: &str,
        dto: CreateMissionDto,
    ) -> Result<MissionDocument, AppError> {
        let document = MissionDocument::from_create(owner, dto, Utc::now())?;

        self.collection.insert_one(&document).await?;

        Ok(document)
    }

    /// Finds a single mission by id, scoped to `owner`.
    pub async fn get_by_id(
        &self,
        owner: &str,
        id: ObjectId,
    ) -> Result<Option<MissionDocument>, AppError> {
        let document = self
            .collection
            .find_one(doc! { "_id": id, "user_id": owner })
            .await?;

        Ok(document)
    }

    /// Returns all of `owner`'s missions, most recent date first.
    pub async fn get_all(&self, owner: &str) -> Result<Vec<MissionDocument>, AppError> {
        let documents = self
            .collection
            .find(doc! { "user_id": owner })
            .sort(doc! { "date": -1 })
            .await?
            .try_collect()
            .await?;

        Ok(documents)
    }

    /// Replaces the updatable fields of an owner-scoped mission and refreshes
    /// `updated_at`.
    ///
    /// # Returns
    /// - `Ok(Some(MissionDocument))`: The mission after the update
    /// - `Ok(None)`: No mission with this id belongs to `owner`
    /// - `Err(AppError)`: Database or serialization error
    pub async fn update(
        &self,
        owner: &str,
        id: ObjectId,
        dto: UpdateMissionDto,
    ) -> Result<Option<MissionDocument>, AppError> {
        let timeline_elements = timeline_from_dtos(dto.timeline_elements)?;
        let global_settings: GlobalMissionSettings = dto.global_settings.into();
        let metadata: MissionMetadata = dto.metadata.into();

        let update = doc! {
            "$set": {
                "name": dto.name,
                "timeline_elements": bson::to_bson(&timeline_elements)?,
                "global_settings": bson::to_bson(&global_settings)?,
                "metadata": bson::to_bson(&metadata)?,
                "updated_at": bson::DateTime::from_chrono(Utc::now()),
            }
        };

        let document = self
            .collection
            .find_one_and_update(doc! { "_id": id, "user_id": owner }, update)
            .return_document(ReturnDocument::After)
            .await?;

        Ok(document)
    }

    /// Deletes an owner-scoped mission.
    ///
    /// # Returns
    /// - `Ok(true)`: The mission was deleted
    /// - `Ok(false)`: No mission with this id belongs to `owner`
    /// - `Err(AppError)`: Database error
    pub async fn delete(&self, owner: &str, id: ObjectId) -> Result<bool, AppError> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id, "user_id": owner })
            .await?;

        Ok(result.deleted_count == 1)
    }
}
