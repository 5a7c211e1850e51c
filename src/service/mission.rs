use mongodb::Database;

use crate::{
    data::mission::MissionRepository,
    error::AppError,
    model::mission::{
        CreateMissionDto, ElementPayloadDto, MissionDto, TimelineElementDto, UpdateMissionDto,
    },
    service::parse_document_id,
};

#[cfg(test)]
mod test;

pub struct MissionService<'a> {
    db: &'a Database,
}

impl<'a> MissionService<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Creates a new mission for `owner`.
    ///
    /// # Returns
    /// - `Ok(MissionDto)`: The stored mission
    /// - `Err(AppError)`: Validation or database error
    pub async fn create(&self, owner: &str, dto: CreateMissionDto) -> Result<MissionDto, AppError> {
        Self::validate(&dto.name, &dto.timeline_elements)?;

        let mission = MissionRepository::new(self.db).create(owner, dto).await?;

        tracing::info!("Created mission {} for user {}", mission.id.to_hex(), owner);

        Ok(mission.into())
    }

    /// Gets one of `owner`'s missions by id.
    pub async fn get(&self, owner: &str, id: &str) -> Result<MissionDto, AppError> {
        let id = parse_document_id(id, "Invalid mission ID")?;

        let mission = MissionRepository::new(self.db)
            .get_by_id(owner, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Mission not found".to_string()))?;

        Ok(mission.into())
    }

    /// Lists all of `owner`'s missions, most recent date first.
    pub async fn list(&self, owner: &str) -> Result<Vec<MissionDto>, AppError> {
        let missions = MissionRepository::new(self.db).get_all(owner).await?;

        Ok(missions.into_iter().map(Into::into).collect())
    }

    /// Updates one of `owner`'s missions.
    ///
    /// Re-applies the create validations, then replaces only the updatable
    /// fields. An id match without an owner match is NotFound.
    pub async fn update(
        &self,
        owner: &str,
        id: &str,
        dto: UpdateMissionDto,
    ) -> Result<MissionDto, AppError> {
        let id = parse_document_id(id, "Invalid mission ID")?;

        Self::validate(&dto.name, &dto.timeline_elements)?;

        let mission = MissionRepository::new(self.db)
            .update(owner, id, dto)
            .await?
            .ok_or_else(|| AppError::NotFound("Mission not found".to_string()))?;

        Ok(mission.into())
    }

    /// Deletes one of `owner`'s missions.
    pub async fn delete(&self, owner: &str, id: &str) -> Result<(), AppError> {
        let id = parse_document_id(id, "Invalid mission ID")?;

        let deleted = MissionRepository::new(self.db).delete(owner, id).await?;
        if !deleted {
            return Err(AppError::NotFound("Mission not found".to_string()));
        }

        tracing::info!("Deleted mission {} for user {}", id.to_hex(), owner);

        Ok(())
    }

    /// Field-level validation shared by create and update.
    ///
    /// The timeline must carry at least one element, every waypoint-mission
    /// element needs at least 2 waypoints, and a mission without any
    /// waypoint-mission element has no flight leg at all and is rejected.
    pub(crate) fn validate(
        name: &str,
        timeline_elements: &[TimelineElementDto],
    ) -> Result<(), AppError> {
        if name.is_empty() {
            return Err(AppError::BadRequest("Mission name is required".to_string()));
        }

        if timeline_elements.is_empty() {
            return Err(AppError::BadRequest(
                "At least one timeline element is required".to_string(),
            ));
        }

        let mut has_waypoint_mission = false;
        for element in timeline_elements {
            if let ElementPayloadDto::WaypointMission(config) = &element.payload {
                has_waypoint_mission = true;

                if config.waypoints.len() < 2 {
                    return Err(AppError::BadRequest(
                        "Waypoint mission must have at least 2 waypoints".to_string(),
                    ));
                }
            }
        }

        if !has_waypoint_mission {
            return Err(AppError::BadRequest(
                "At least one waypoint mission is required".to_string(),
            ));
        }

        Ok(())
    }
}
