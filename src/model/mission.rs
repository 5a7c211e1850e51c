//! Mission documents and DTOs.
//!
//! A mission is an ordered sequence of timeline elements: flight legs
//! (waypoint missions) interleaved with camera and heading actions. Each
//! element carries a type tag and a per-type configuration payload. The
//! payload is modelled as a tagged union decoded at the boundary, with an
//! opaque trailing variant so element types this server does not know about
//! pass through unchanged.

use bson::{oid::ObjectId, serde_helpers::chrono_datetime_as_bson_datetime};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::flight::{Target, Waypoint, WaypointDto};

#[cfg(test)]
mod test;

// ---------------------------------------------------------------------------
// Stored documents
// ---------------------------------------------------------------------------

/// Stored mission in the `missions` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub user_id: String,
    pub name: String,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub date: DateTime<Utc>,
    pub timeline_elements: Vec<TimelineElement>,
    pub global_settings: GlobalMissionSettings,
    pub metadata: MissionMetadata,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl MissionDocument {
    /// Builds the stored form of a new mission.
    ///
    /// The id is freshly generated, the owner comes from the authenticated
    /// caller, and date and both timestamps are set to `now`. Timeline
    /// elements without an id or order get a fresh hex id and their append
    /// index.
    pub fn from_create(
        owner: &str,
        dto: CreateMissionDto,
        now: DateTime<Utc>,
    ) -> Result<Self, bson::ser::Error> {
        Ok(Self {
            id: ObjectId::new(),
            user_id: owner.to_string(),
            name: dto.name,
            date: now,
            timeline_elements: timeline_from_dtos(dto.timeline_elements)?,
            global_settings: dto.global_settings.into(),
            metadata: dto.metadata.into(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Returns the first waypoint-mission element's configuration, if any.
    pub fn waypoint_mission(&self) -> Option<&WaypointMissionConfig> {
        self.timeline_elements
            .iter()
            .find_map(|element| match &element.payload {
                ElementPayload::WaypointMission(config) => Some(config),
                _ => None,
            })
    }

    pub fn has_waypoint_mission(&self) -> bool {
        self.waypoint_mission().is_some()
    }
}

/// One stored step in the mission timeline.
///
/// `order` is assigned as the append index at creation and is never
/// re-normalized when elements are removed, so gaps are expected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineElement {
    pub id: String,
    pub order: i32,
    #[serde(flatten)]
    pub payload: ElementPayload,
}

/// Stored element payload, keyed by the `type` tag with the per-type
/// configuration under `config`.
///
/// Unknown tags land in the `Opaque` variant, which keeps the raw tag and
/// configuration document so they round-trip through storage untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "config")]
pub enum ElementPayload {
    #[serde(rename = "waypoint-mission")]
    WaypointMission(WaypointMissionConfig),
    #[serde(rename = "record-video")]
    RecordVideo(RecordVideoConfig),
    #[serde(rename = "shoot-photo")]
    ShootPhoto(ShootPhotoConfig),
    #[serde(rename = "change-heading")]
    ChangeHeading(ChangeHeadingConfig),
    #[serde(untagged)]
    Opaque(OpaqueElement),
}

/// Stored element with a type tag this server has no schema for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpaqueElement {
    #[serde(rename = "type")]
    pub element_type: String,
    #[serde(default)]
    pub config: bson::Document,
}

/// Stored configuration of a waypoint-mission timeline element: the actual
/// flight leg, with its waypoints and flight behavior settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaypointMissionConfig {
    #[serde(default)]
    pub auto_flight_speed: f64,
    #[serde(default)]
    pub max_flight_speed: f64,
    #[serde(default)]
    pub finished_action: String,
    #[serde(default)]
    pub repeat_times: i32,
    #[serde(default)]
    pub global_turn_mode: String,
    #[serde(default)]
    pub gimbal_pitch_rotation_enabled: bool,
    #[serde(default)]
    pub heading_mode: String,
    #[serde(default)]
    pub flight_path_mode: String,
    #[serde(default)]
    pub targets: Vec<Target>,
    #[serde(default)]
    pub waypoints: Vec<Waypoint>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordVideoConfig {
    #[serde(default)]
    pub action_type: String,
    #[serde(default)]
    pub camera_index: i32,
}

/// Stored shoot-photo configuration; `photo_count` and `time_interval` only
/// apply to the "interval" photo type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShootPhotoConfig {
    #[serde(default)]
    pub photo_type: String,
    #[serde(default)]
    pub photo_count: Option<i32>,
    #[serde(default)]
    pub time_interval: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChangeHeadingConfig {
    #[serde(default)]
    pub angle: f64,
    #[serde(default)]
    pub angular_velocity: f64,
}

/// Stored settings that apply to the mission as a whole.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalMissionSettings {
    #[serde(default)]
    pub battery_action: String,
    #[serde(default)]
    pub battery_threshold: i32,
    #[serde(default)]
    pub signal_lost_action: String,
    #[serde(default)]
    pub home_lat: Option<f64>,
    #[serde(default)]
    pub home_lng: Option<f64>,
    #[serde(default)]
    pub drone_type: String,
}

/// Stored aggregate mission statistics, computed by the client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MissionMetadata {
    pub total_timeline_elements: i32,
    pub has_waypoint_mission: bool,
    pub total_waypoints: i32,
    pub total_distance: f64,
    pub estimated_duration: f64,
}

// ---------------------------------------------------------------------------
// Wire DTOs
// ---------------------------------------------------------------------------

/// Wire representation of a stored mission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionDto {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub date: DateTime<Utc>,
    pub timeline_elements: Vec<TimelineElementDto>,
    pub global_settings: GlobalMissionSettingsDto,
    pub metadata: MissionMetadataDto,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Mission creation payload. Server-assigned fields in the input are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMissionDto {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub timeline_elements: Vec<TimelineElementDto>,
    #[serde(default)]
    pub global_settings: GlobalMissionSettingsDto,
    #[serde(default)]
    pub metadata: MissionMetadataDto,
}

/// Mission update payload; the replaceable field whitelist.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMissionDto {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub timeline_elements: Vec<TimelineElementDto>,
    #[serde(default)]
    pub global_settings: GlobalMissionSettingsDto,
    #[serde(default)]
    pub metadata: MissionMetadataDto,
}

/// One timeline element on the wire.
///
/// `id` and `order` may be omitted on input; the server then assigns a fresh
/// hex id and the element's append index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineElementDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    #[serde(flatten)]
    pub payload: ElementPayloadDto,
}

/// Wire element payload, mirroring [`ElementPayload`] with camelCase
/// configuration keys and JSON opaque configs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "config")]
pub enum ElementPayloadDto {
    #[serde(rename = "waypoint-mission")]
    WaypointMission(WaypointMissionConfigDto),
    #[serde(rename = "record-video")]
    RecordVideo(RecordVideoConfigDto),
    #[serde(rename = "shoot-photo")]
    ShootPhoto(ShootPhotoConfigDto),
    #[serde(rename = "change-heading")]
    ChangeHeading(ChangeHeadingConfigDto),
    #[serde(untagged)]
    Opaque(OpaqueElementDto),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpaqueElementDto {
    #[serde(rename = "type")]
    pub element_type: String,
    #[serde(default)]
    pub config: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaypointMissionConfigDto {
    #[serde(default)]
    pub auto_flight_speed: f64,
    #[serde(default)]
    pub max_flight_speed: f64,
    #[serde(default)]
    pub finished_action: String,
    #[serde(default)]
    pub repeat_times: i32,
    #[serde(default)]
    pub global_turn_mode: String,
    #[serde(default)]
    pub gimbal_pitch_rotation_enabled: bool,
    #[serde(default)]
    pub heading_mode: String,
    #[serde(default)]
    pub flight_path_mode: String,
    #[serde(default)]
    pub targets: Vec<Target>,
    #[serde(default)]
    pub waypoints: Vec<WaypointDto>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordVideoConfigDto {
    #[serde(default)]
    pub action_type: String,
    #[serde(default)]
    pub camera_index: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShootPhotoConfigDto {
    #[serde(default)]
    pub photo_type: String,
    #[serde(default)]
    pub photo_count: Option<i32>,
    #[serde(default)]
    pub time_interval: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeHeadingConfigDto {
    #[serde(default)]
    pub angle: f64,
    #[serde(default)]
    pub angular_velocity: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalMissionSettingsDto {
    #[serde(default)]
    pub battery_action: String,
    #[serde(default)]
    pub battery_threshold: i32,
    #[serde(default)]
    pub signal_lost_action: String,
    #[serde(default)]
    pub home_lat: Option<f64>,
    #[serde(default)]
    pub home_lng: Option<f64>,
    #[serde(default)]
    pub drone_type: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionMetadataDto {
    #[serde(default)]
    pub total_timeline_elements: i32,
    #[serde(default)]
    pub has_waypoint_mission: bool,
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

/// Converts a submitted timeline into its stored form, assigning ids and
/// append-index orders where the client left them out.
pub(crate) fn timeline_from_dtos(
    elements: Vec<TimelineElementDto>,
) -> Result<Vec<TimelineElement>, bson::ser::Error> {
    elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| element.into_element(index))
        .collect()
}

impl TimelineElementDto {
    /// Converts a wire element into its stored form.
    ///
    /// `index` is the element's position in the submitted timeline; it becomes
    /// the `order` when the client did not supply one. A missing id is
    /// replaced with a fresh hex id.
    pub fn into_element(self, index: usize) -> Result<TimelineElement, bson::ser::Error> {
        Ok(TimelineElement {
            id: self.id.unwrap_or_else(|| ObjectId::new().to_hex()),
            order: self.order.unwrap_or(index as i32),
            payload: self.payload.try_into()?,
        })
    }
}

impl TryFrom<ElementPayloadDto> for ElementPayload {
    type Error = bson::ser::Error;

    fn try_from(dto: ElementPayloadDto) -> Result<Self, Self::Error> {
        Ok(match dto {
            ElementPayloadDto::WaypointMission(config) => {
                Self::WaypointMission(WaypointMissionConfig {
                    auto_flight_speed: config.auto_flight_speed,
                    max_flight_speed: config.max_flight_speed,
                    finished_action: config.finished_action,
                    repeat_times: config.repeat_times,
                    global_turn_mode: config.global_turn_mode,
                    gimbal_pitch_rotation_enabled: config.gimbal_pitch_rotation_enabled,
                    heading_mode: config.heading_mode,
                    flight_path_mode: config.flight_path_mode,
                    targets: config.targets,
                    waypoints: config.waypoints.into_iter().map(Into::into).collect(),
                })
            }
            ElementPayloadDto::RecordVideo(config) => Self::RecordVideo(RecordVideoConfig {
                action_type: config.action_type,
                camera_index: config.camera_index,
            }),
            ElementPayloadDto::ShootPhoto(config) => Self::ShootPhoto(ShootPhotoConfig {
                photo_type: config.photo_type,
                photo_count: config.photo_count,
                time_interval: config.time_interval,
            }),
            ElementPayloadDto::ChangeHeading(config) => Self::ChangeHeading(ChangeHeadingConfig {
                angle: config.angle,
                angular_velocity: config.angular_velocity,
            }),
            ElementPayloadDto::Opaque(element) => Self::Opaque(OpaqueElement {
                element_type: element.element_type,
                config: bson::to_document(&element.config)?,
            }),
        })
    }
}

impl From<TimelineElement> for TimelineElementDto {
    fn from(element: TimelineElement) -> Self {
        Self {
            id: Some(element.id),
            order: Some(element.order),
            payload: element.payload.into(),
        }
    }
}

impl From<ElementPayload> for ElementPayloadDto {
    fn from(payload: ElementPayload) -> Self {
        match payload {
            ElementPayload::WaypointMission(config) => {
                Self::WaypointMission(WaypointMissionConfigDto {
                    auto_flight_speed: config.auto_flight_speed,
                    max_flight_speed: config.max_flight_speed,
                    finished_action: config.finished_action,
                    repeat_times: config.repeat_times,
                    global_turn_mode: config.global_turn_mode,
                    gimbal_pitch_rotation_enabled: config.gimbal_pitch_rotation_enabled,
                    heading_mode: config.heading_mode,
                    flight_path_mode: config.flight_path_mode,
                    targets: config.targets,
                    waypoints: config.waypoints.into_iter().map(Into::into).collect(),
                })
            }
            ElementPayload::RecordVideo(config) => Self::RecordVideo(RecordVideoConfigDto {
                action_type: config.action_type,
                camera_index: config.camera_index,
            }),
            ElementPayload::ShootPhoto(config) => Self::ShootPhoto(ShootPhotoConfigDto {
                photo_type: config.photo_type,
                photo_count: config.photo_count,
                time_interval: config.time_interval,
            }),
            ElementPayload::ChangeHeading(config) => Self::ChangeHeading(ChangeHeadingConfigDto {
                angle: config.angle,
                angular_velocity: config.angular_velocity,
            }),
            ElementPayload::Opaque(element) => Self::Opaque(OpaqueElementDto {
                element_type: element.element_type,
                config: match serde_json::to_value(&element.config) {
                    Ok(serde_json::Value::Object(map)) => map,
                    _ => serde_json::Map::new(),
                },
            }),
        }
    }
}

impl From<MissionDocument> for MissionDto {
    fn from(doc: MissionDocument) -> Self {
        Self {
            id: doc.id.to_hex(),
            user_id: doc.user_id,
            name: doc.name,
            date: doc.date,
            timeline_elements: doc.timeline_elements.into_iter().map(Into::into).collect(),
            global_settings: doc.global_settings.into(),
            metadata: doc.metadata.into(),
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}

impl From<GlobalMissionSettingsDto> for GlobalMissionSettings {
    fn from(dto: GlobalMissionSettingsDto) -> Self {
        Self {
            battery_action: dto.battery_action,
            battery_threshold: dto.battery_threshold,
            signal_lost_action: dto.signal_lost_action,
            home_lat: dto.home_lat,
            home_lng: dto.home_lng,
            drone_type: dto.drone_type,
        }
    }
}

impl From<GlobalMissionSettings> for GlobalMissionSettingsDto {
    fn from(settings: GlobalMissionSettings) -> Self {
        Self {
            battery_action: settings.battery_action,
            battery_threshold: settings.battery_threshold,
            signal_lost_action: settings.signal_lost_action,
            home_lat: settings.home_lat,
            home_lng: settings.home_lng,
            drone_type: settings.drone_type,
        }
    }
}

impl From<MissionMetadataDto> for MissionMetadata {
    fn from(dto: MissionMetadataDto) -> Self {
        Self {
            total_timeline_elements: dto.total_timeline_elements,
            has_waypoint_mission: dto.has_waypoint_mission,
            total_waypoints: dto.total_waypoints,
            total_distance: dto.total_distance,
            estimated_duration: dto.estimated_duration,
        }
    }
}

impl From<MissionMetadata> for MissionMetadataDto {
    fn from(metadata: MissionMetadata) -> Self {
        Self {
            total_timeline_elements: metadata.total_timeline_elements,
            has_waypoint_mission: metadata.has_waypoint_mission,
            total_waypoints: metadata.total_waypoints,
            total_distance: metadata.total_distance,
            estimated_duration: metadata.estimated_duration,
        }
    }
}
