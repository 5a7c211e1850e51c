//! Flight plan documents and DTOs.
//!
//! A flight is an ordered waypoint path plus per-segment speed overrides and a
//! block of mission configuration captured at save time. The aggregate
//! `metadata` block is computed by the client and stored as-is; this backend
//! never recomputes it.

use bson::{oid::ObjectId, serde_helpers::chrono_datetime_as_bson_datetime};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};


/// A 2D position. Field names are identical in the stored and wire shapes.
///
/// The zero value (latitude and longitude both exactly 0.0) marks an unset
/// coordinate, not a valid position on the equator/prime meridian, and is
/// rejected by validation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn is_unset(&self) -> bool {
        self.latitude == 0.0 && self.longitude == 0.0
    }
}

/// A point of interest the drone camera tracks. Same shape stored and on the
/// wire.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Target {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lng: f64,
}

// ---------------------------------------------------------------------------
// Stored documents
// ---------------------------------------------------------------------------

/// Stored flight plan in the `flights` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub user_id: String,
    pub name: String,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub date: DateTime<Utc>,
    pub waypoints: Vec<Waypoint>,
    pub segment_speeds: Vec<SegmentSpeed>,
    pub metadata: FlightMetadata,
    pub mission_type: String,
    pub max_flight_speed: f64,
    pub auto_flight_speed: f64,
    pub finished_action: String,
    pub heading_home: String,
    pub flightpath_mode: String,
    pub repeat_times: i32,
    pub turn_mode: String,
    pub actions: Vec<WaypointAction>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

/// A stored point in a flight path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub coordinate: Coordinate,
    pub altitude: f64,
    pub heading: f64,
    pub gimbal_pitch: f64,
    pub speed: f64,
    pub corner_radius: f64,
    pub turn_mode: String,
    #[serde(default)]
    pub targets: Vec<Target>,
    #[serde(default)]
    pub actions: Vec<WaypointAction>,
}

/// A stored action attached to a waypoint or to the flight as a whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaypointAction {
    pub action_type: String,
    pub action_param: f64,
}

/// Stored speed settings for the segment between two waypoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentSpeed {
    pub from_id: i64,
    pub to_id: i64,
    pub speed: f64,
    pub interpolate_heading: bool,
    pub is_curved: bool,
    pub curve_tightness: i32,
}

/// Stored aggregate flight statistics, computed by the client.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FlightMetadata {
    pub total_waypoints: i32,
    pub total_distance: f64,
    pub estimated_duration: f64,
}

impl FlightDocument {
    /// Builds the stored form of a new flight.
    ///
    /// The id is freshly generated, the owner comes from the authenticated
    /// caller (never the payload), and both timestamps are set to `now`. A
    /// client-supplied date is kept; otherwise `now` is used.
    pub fn from_create(owner: &str, dto: CreateFlightDto, now: DateTime<Utc>) -> Self {
        Self {
            id: ObjectId::new(),
            user_id: owner.to_string(),
            name: dto.name,
            date: dto.date.unwrap_or(now),
            waypoints: dto.waypoints.into_iter().map(Into::into).collect(),
            segment_speeds: dto.segment_speeds.into_iter().map(Into::into).collect(),
            metadata: dto.metadata.into(),
            mission_type: dto.mission_type,
            max_flight_speed: dto.max_flight_speed,
            auto_flight_speed: dto.auto_flight_speed,
            finished_action: dto.finished_action,
            heading_home: dto.heading_home,
            flightpath_mode: dto.flightpath_mode,
            repeat_times: dto.repeat_times,
            turn_mode: dto.turn_mode,
            actions: dto.actions.into_iter().map(Into::into).collect(),
            created_at: now,
            updated_at: now,
        }
    }
}

// ---------------------------------------------------------------------------
// Wire DTOs
// ---------------------------------------------------------------------------

/// Wire representation of a stored flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightDto {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub date: DateTime<Utc>,
    pub waypoints: Vec<WaypointDto>,
    pub segment_speeds: Vec<SegmentSpeedDto>,
    pub metadata: FlightMetadataDto,
    pub mission_type: String,
    pub max_flight_speed: f64,
    pub auto_flight_speed: f64,
    pub finished_action: String,
    pub heading_home: String,
    pub flightpath_mode: String,
    pub repeat_times: i32,
    pub turn_mode: String,
    pub actions: Vec<WaypointActionDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Flight creation payload.
///
/// Client-supplied `id`, `userId`, `createdAt` and `updatedAt` keys are
/// ignored; those fields are always server-assigned. Absent fields take their
/// zero values, matching what a saved-from-scratch plan carries.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFlightDto {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub waypoints: Vec<WaypointDto>,
    #[serde(default)]
    pub segment_speeds: Vec<SegmentSpeedDto>,
    #[serde(default)]
    pub metadata: FlightMetadataDto,
    #[serde(default)]
    pub mission_type: String,
    #[serde(default)]
    pub max_flight_speed: f64,
    #[serde(default)]
    pub auto_flight_speed: f64,
    #[serde(default)]
    pub finished_action: String,
    #[serde(default)]
    pub heading_home: String,
    #[serde(default)]
    pub flightpath_mode: String,
    #[serde(default)]
    pub repeat_times: i32,
    #[serde(default)]
    pub turn_mode: String,
    #[serde(default)]
    pub actions: Vec<WaypointActionDto>,
}

/// Flight update payload. Only these fields are replaceable after creation;
/// the mission configuration block is fixed at save time.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFlightDto {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub waypoints: Vec<WaypointDto>,
    #[serde(default)]
    pub segment_speeds: Vec<SegmentSpeedDto>,
    #[serde(default)]
    pub metadata: FlightMetadataDto,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaypointDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub coordinate: Coordinate,
    #[serde(default)]
    pub altitude: f64,
    #[serde(default)]
    pub heading: f64,
    #[serde(default)]
    pub gimbal_pitch: f64,
    #[serde(default)]
    pub speed: f64,
    #[serde(default)]
    pub corner_radius: f64,
    #[serde(default)]
    pub turn_mode: String,
    #[serde(default)]
    pub targets: Vec<Target>,
    #[serde(default)]
    pub actions: Vec<WaypointActionDto>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaypointActionDto {
    #[serde(default)]
    pub action_type: String,
    #[serde(default)]
    pub action_param: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentSpeedDto {
    #[serde(default)]
    pub from_id: i64,
    #[serde(default)]
    pub to_id: i64,
    #[serde(default)]
    pub speed: f64,
    #[serde(default)]
    pub interpolate_heading: bool,
    #[serde(default)]
    pub is_curved: bool,
    #[serde(default)]
    pub curve_tightness: i32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightMetadataDto {
    #[serde(default)]
    pub total_waypoints: i32,
    #[serde(default)]
    pub total_distance: f64,
    #[serde(default)]
    pub estimated_duration: f64,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

impl From<FlightDocument> for FlightDto {
    fn from(doc: FlightDocument) -> Self {
        Self {
            id: doc.id.to_hex(),
            user_id: doc.user_id,
            name: doc.name,
            date: doc.date,
            waypoints: doc.waypoints.into_iter().map(Into::into).collect(),
            segment_speeds: doc.segment_speeds.into_iter().map(Into::into).collect(),
            metadata: doc.metadata.into(),
            mission_type: doc.mission_type,
            max_flight_speed: doc.max_flight_speed,
            auto_flight_speed: doc.auto_flight_speed,
            finished_action: doc.finished_action,
            heading_home: doc.heading_home,
            flightpath_mode: doc.flightpath_mode,
            repeat_times: doc.repeat_times,
            turn_mode: doc.turn_mode,
            actions: doc.actions.into_iter().map(Into::into).collect(),
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}

impl From<WaypointDto> for Waypoint {
    fn from(dto: WaypointDto) -> Self {
        Self {
            id: dto.id,
            coordinate: dto.coordinate,
            altitude: dto.altitude,
            heading: dto.heading,
            gimbal_pitch: dto.gimbal_pitch,
            speed: dto.speed,
            corner_radius: dto.corner_radius,
            turn_mode: dto.turn_mode,
            targets: dto.targets,
            actions: dto.actions.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<Waypoint> for WaypointDto {
    fn from(wp: Waypoint) -> Self {
        Self {
            id: wp.id,
            coordinate: wp.coordinate,
            altitude: wp.altitude,
            heading: wp.heading,
            gimbal_pitch: wp.gimbal_pitch,
            speed: wp.speed,
            corner_radius: wp.corner_radius,
            turn_mode: wp.turn_mode,
            targets: wp.targets,
            actions: wp.actions.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<WaypointActionDto> for WaypointAction {
    fn from(dto: WaypointActionDto) -> Self {
        Self {
            action_type: dto.action_type,
            action_param: dto.action_param,
        }
    }
}

impl From<WaypointAction> for WaypointActionDto {
    fn from(action: WaypointAction) -> Self {
        Self {
            action_type: action.action_type,
            action_param: action.action_param,
        }
    }
}

impl From<SegmentSpeedDto> for SegmentSpeed {
    fn from(dto: SegmentSpeedDto) -> Self {
        Self {
            from_id: dto.from_id,
            to_id: dto.to_id,
            speed: dto.speed,
            interpolate_heading: dto.interpolate_heading,
            is_curved: dto.is_curved,
            curve_tightness: dto.curve_tightness,
        }
    }
}

impl From<SegmentSpeed> for SegmentSpeedDto {
    fn from(speed: SegmentSpeed) -> Self {
        Self {
            from_id: speed.from_id,
            to_id: speed.to_id,
            speed: speed.speed,
            interpolate_heading: speed.interpolate_heading,
            is_curved: speed.is_curved,
            curve_tightness: speed.curve_tightness,
        }
    }
}

impl From<FlightMetadataDto> for FlightMetadata {
    fn from(dto: FlightMetadataDto) -> Self {
        Self {
            total_waypoints: dto.total_waypoints,
            total_distance: dto.total_distance,
            estimated_duration: dto.estimated_duration,
        }
    }
}

impl From<FlightMetadata> for FlightMetadataDto {
    fn from(metadata: FlightMetadata) -> Self {
        Self {
            total_waypoints: metadata.total_waypoints,
            total_distance: metadata.total_distance,
            estimated_duration: metadata.estimated_duration,
        }
    }
}
