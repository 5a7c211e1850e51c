use super::*;
use crate::model::{
    flight::{Coordinate, WaypointDto},
    mission::{ShootPhotoConfigDto, WaypointMissionConfigDto},
};

fn waypoint(lat: f64, lng: f64) -> WaypointDto {
    WaypointDto {
        coordinate: Coordinate {
            latitude: lat,
            longitude: lng,
        },
        altitude: 30.0,
        speed: 5.0,
        ..WaypointDto::default()
    }
}

fn waypoint_mission(waypoints: Vec<WaypointDto>) -> TimelineElementDto {
    TimelineElementDto {
        id: None,
        order: None,
        payload: ElementPayloadDto::WaypointMission(WaypointMissionConfigDto {
            waypoints,
            ..WaypointMissionConfigDto::default()
        }),
    }
}

fn shoot_photo() -> TimelineElementDto {
    TimelineElementDto {
        id: None,
        order: None,
        payload: ElementPayloadDto::ShootPhoto(ShootPhotoConfigDto {
            photo_type: "single".to_string(),
            ..ShootPhotoConfigDto::default()
        }),
    }
}

/// Tests that a mission with one waypoint-mission element carrying two
/// waypoints passes validation.
///
/// Expected: Ok
#[test]
fn accepts_waypoint_mission_with_two_waypoints() {
    let elements = vec![waypoint_mission(vec![
        waypoint(40.7128, -74.0060),
        waypoint(40.7138, -74.0070),
    ])];

    assert!(MissionService::validate("Survey", &elements).is_ok());
}

/// Tests that an empty mission name is rejected.
///
/// Expected: Err with the name-specific message
#[test]
fn rejects_empty_name() {
    let elements = vec![waypoint_mission(vec![
        waypoint(40.7128, -74.0060),
        waypoint(40.7138, -74.0070),
    ])];

    let err = MissionService::validate("", &elements).unwrap_err();

    assert!(matches!(
        err,
        AppError::BadRequest(ref msg) if msg == "Mission name is required"
    ));
}

/// Tests that a mission with no timeline elements at all is rejected with its
/// own message, before the waypoint-mission scan runs.
///
/// Expected: Err with the empty-timeline message
#[test]
fn rejects_empty_timeline() {
    let err = MissionService::validate("Survey", &[]).unwrap_err();

    assert!(matches!(
        err,
        AppError::BadRequest(ref msg) if msg == "At least one timeline element is required"
    ));
}

/// Tests that a timeline made only of camera actions is rejected: a mission
/// with zero flight legs is not a valid mission.
///
/// Expected: Err with the missing-waypoint-mission message
#[test]
fn rejects_timeline_without_waypoint_mission() {
    let elements = vec![shoot_photo()];

    let err = MissionService::validate("Survey", &elements).unwrap_err();

    assert!(matches!(
        err,
        AppError::BadRequest(ref msg) if msg == "At least one waypoint mission is required"
    ));
}

/// Tests that adding a valid waypoint-mission element to a camera-only
/// timeline makes the mission acceptable.
///
/// Expected: Ok
#[test]
fn accepts_photo_element_alongside_waypoint_mission() {
    let elements = vec![
        shoot_photo(),
        waypoint_mission(vec![waypoint(40.7128, -74.0060), waypoint(40.7138, -74.0070)]),
    ];

    assert!(MissionService::validate("Survey", &elements).is_ok());
}

/// Tests that a waypoint-mission element with a single waypoint is rejected
/// with the waypoint-count-specific message, not a generic one.
///
/// Expected: Err naming the waypoint-mission constraint
#[test]
fn rejects_waypoint_mission_with_one_waypoint() {
    let elements = vec![waypoint_mission(vec![waypoint(40.7128, -74.0060)])];

    let err = MissionService::validate("Survey", &elements).unwrap_err();

    assert!(matches!(
        err,
        AppError::BadRequest(ref msg) if msg == "Waypoint mission must have at least 2 waypoints"
    ));
}

/// Tests that an empty waypoint list on a waypoint-mission element (the
/// decoded form of a missing or empty `waypoints` config key) is rejected
/// with the same waypoint-count message.
///
/// Expected: Err naming the waypoint-mission constraint
#[test]
fn rejects_waypoint_mission_with_no_waypoints() {
    let elements = vec![waypoint_mission(vec![])];

    let err = MissionService::validate("Survey", &elements).unwrap_err();

    assert!(matches!(
        err,
        AppError::BadRequest(ref msg) if msg == "Waypoint mission must have at least 2 waypoints"
    ));
}

/// Tests that every waypoint-mission element in the timeline is checked, not
/// just the first: a valid leg does not excuse an invalid one later.
///
/// Expected: Err naming the waypoint-mission constraint
#[test]
fn rejects_any_short_waypoint_mission() {
    let elements = vec![
        waypoint_mission(vec![waypoint(40.7128, -74.0060), waypoint(40.7138, -74.0070)]),
        waypoint_mission(vec![waypoint(40.7148, -74.0080)]),
    ];

    let err = MissionService::validate("Survey", &elements).unwrap_err();

    assert!(matches!(
        err,
        AppError::BadRequest(ref msg) if msg == "Waypoint mission must have at least 2 waypoints"
    ));
}

/// Tests that an element with an unknown type tag does not count as a
/// waypoint mission, even when its opaque config happens to carry a
/// `waypoints` key.
///
/// Expected: Err with the missing-waypoint-mission message
#[test]
fn opaque_elements_do_not_count_as_waypoint_missions() {
    let element: TimelineElementDto = serde_json::from_value(serde_json::json!({
        "type": "sky-scan",
        "config": { "waypoints": [{ "latitude": 1.0 }, { "latitude": 2.0 }] }
    }))
    .unwrap();

    let err = MissionService::validate("Survey", &[element]).unwrap_err();

    assert!(matches!(
        err,
        AppError::BadRequest(ref msg) if msg == "At least one waypoint mission is required"
    ));
}
