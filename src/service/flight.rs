use mongodb::Database;

use crate::{
    data::flight::FlightRepository,
    error::AppError,
    model::flight::{CreateFlightDto, FlightDto, UpdateFlightDto, WaypointDto},
    service::parse_document_id,
};


pub struct FlightService<'a> {
    db: &'a Database,
}

impl<'a> FlightService<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Creates a new flight plan for `owner`.
    ///
    /// # Returns
    /// - `Ok(FlightDto)`: The stored flight
    /// - `Err(AppError)`: Validation or database error
    pub async fn create(&self, owner: &str, dto: CreateFlightDto) -> Result<FlightDto, AppError> {
        Self::validate(&dto.name, &dto.waypoints)?;

        let flight = FlightRepository::new(self.db).create(owner, dto).await?;

        tracing::info!("Created flight {} for user {}", flight.id.to_hex(), owner);

        Ok(flight.into())
    }

    /// Gets one of `owner`'s flights by id.
    ///
    /// # Returns
    /// - `Ok(FlightDto)`: The flight
    /// - `Err(AppError)`: BadRequest for a malformed id, NotFound when no
    ///   flight matches the id for this owner, or a database error
    pub async fn get(&self, owner: &str, id: &str) -> Result<FlightDto, AppError> {
        let id = parse_document_id(id, "Invalid flight ID")?;

        let flight = FlightRepository::new(self.db)
            .get_by_id(owner, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Flight not found".to_string()))?;

        Ok(flight.into())
    }

    /// Lists all of `owner`'s flights, most recent date first.
    pub async fn list(&self, owner: &str) -> Result<Vec<FlightDto>, AppError> {
        let flights = FlightRepository::new(self.db).get_all(owner).await?;

        Ok(flights.into_iter().map(Into::into).collect())
    }

    /// Updates one of `owner`'s flights.
    ///
    /// Re-applies the create validations, then replaces only the updatable
    /// fields. An id that exists but belongs to another user is reported as
    /// NotFound, exactly like a nonexistent id.
    pub async fn update(
        &self,
        owner: &str,
        id: &str,
        dto: UpdateFlightDto,
    ) -> Result<FlightDto, AppError> {
        let id = parse_document_id(id, "Invalid flight ID")?;

        Self::validate(&dto.name, &dto.waypoints)?;

        let flight = FlightRepository::new(self.db)
            .update(owner, id, dto)
            .await?
            .ok_or_else(|| AppError::NotFound("Flight not found".to_string()))?;

        Ok(flight.into())
    }

    /// Deletes one of `owner`'s flights.
    pub async fn delete(&self, owner: &str, id: &str) -> Result<(), AppError> {
        let id = parse_document_id(id, "Invalid flight ID")?;

        let deleted = FlightRepository::new(self.db).delete(owner, id).await?;
        if !deleted {
            return Err(AppError::NotFound("Flight not found".to_string()));
        }

        tracing::info!("Deleted flight {} for user {}", id.to_hex(), owner);

        Ok(())
    }

    /// Field-level validation shared by create and update.
    ///
    /// A waypoint at exactly (0, 0) means the client never set the
    /// coordinate, so it is rejected rather than stored as a position off the
    /// coast of West Africa.
    pub(crate) fn validate(name: &str, waypoints: &[WaypointDto]) -> Result<(), AppError> {
        if name.is_empty() {
            return Err(AppError::BadRequest("Flight name is required".to_string()));
        }

        if waypoints.len() < 2 {
            return Err(AppError::BadRequest(
                "At least 2 waypoints are required".to_string(),
            ));
        }

        for (index, waypoint) in waypoints.iter().enumerate() {
            if waypoint.coordinate.is_unset() {
                return Err(AppError::BadRequest(format!(
                    "Invalid coordinates for waypoint {index}"
                )));
            }
        }

        Ok(())
    }
}
