use bson::{doc, oid::ObjectId};
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::{options::ReturnDocument, Collection, Database};

use crate::{
    error::AppError,
    model::flight::{
        CreateFlightDto, FlightDocument, FlightMetadata, SegmentSpeed, UpdateFlightDto, Waypoint,
    },
};

const COLLECTION: &str = "flights";

/// Repository providing database operations for flight plans.
pub struct FlightRepository {
    collection: Collection<FlightDocument>,
}

impl FlightRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION),
        }
    }

    /// Inserts a new flight for `owner`.
    ///
    /// Assigns a fresh id, forces the owner, and stamps both timestamps with
    /// the current time. A client-supplied date is kept; otherwise the
    /// creation time is used.
    ///
    /// # Returns
    /// - `Ok(FlightDocument)`: The stored flight
    /// - `Err(AppError)`: Database error
    pub async fn create(
        &self,
        owner: &str,
        dto: CreateFlightDto,
    ) -> Result<FlightDocument, AppError> {
        let document = FlightDocument::from_create(owner, dto, Utc::now());

        self.collection.insert_one(&document).await?;

        Ok(document)
    }

    /// Finds a single flight by id, scoped to `owner`.
    ///
    /// # Returns
    /// - `Ok(Some(FlightDocument))`: The flight
    /// - `Ok(None)`: No flight with this id belongs to `owner`
    /// - `Err(AppError)`: Database error
    pub async fn get_by_id(
        &self,
        owner: &str,
        id: ObjectId,
    ) -> Result<Option<FlightDocument>, AppError> {
        let document = self
            .collection
            .find_one(doc! { "_id": id, "user_id": owner })
            .await?;

        Ok(document)
    }

    /// Returns all of `owner`'s flights, most recent date first.
    pub async fn get_all(&self, owner: &str) -> Result<Vec<FlightDocument>, AppError> {
        let documents = self
            .collection
            .find(doc! { "user_id": owner })
            .sort(doc! { "date": -1 })
            .await?
            .try_collect()
            .await?;

        Ok(documents)
    }

    /// Replaces the updatable fields of an owner-scoped flight and refreshes
    /// `updated_at`.
    ///
    /// # Returns
    /// - `Ok(Some(FlightDocument))`: The flight after the update
    /// - `Ok(None)`: No flight with this id belongs to `owner`
    /// - `Err(AppError)`: Database or serialization error
    pub async fn update(
        &self,
        owner: &str,
        id: ObjectId,
        dto: UpdateFlightDto,
    ) -> Result<Option<FlightDocument>, AppError> {
        let waypoints: Vec<Waypoint> = dto.waypoints.into_iter().map(Into::into).collect();
        let segment_speeds: Vec<SegmentSpeed> =
            dto.segment_speeds.into_iter().map(Into::into).collect();
        let metadata: FlightMetadata = dto.metadata.into();

        let update = doc! {
            "$set": {
                "name": dto.name,
                "waypoints": bson::to_bson(&waypoints)?,
                "segment_speeds": bson::to_bson(&segment_speeds)?,
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

    /// Deletes an owner-scoped flight.
    ///
    /// # Returns
    /// - `Ok(true)`: The flight was deleted
    /// - `Ok(false)`: No flight with this id belongs to `owner`
    /// - `Err(AppError)`: Database error
    pub async fn delete(&self, owner: &str, id: ObjectId) -> Result<bool, AppError> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id, "user_id": owner })
            .await?;

        Ok(result.deleted_count == 1)
    }
}
