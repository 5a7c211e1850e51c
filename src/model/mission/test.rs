use super::*;
use chrono::TimeZone;
use serde_json::json;

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

fn waypoint_mission_element() -> serde_json::Value {
    json!({
        "type": "waypoint-mission",
        "config": {
            "autoFlightSpeed": 10.0,
            "maxFlightSpeed": 15.0,
            "finishedAction": "goHome",
            "repeatTimes": 1,
            "headingMode": "auto",
            "waypoints": [
                {
                    "coordinate": { "latitude": 40.7128, "longitude": -74.0060 },
                    "altitude": 30.0,
                    "gimbalPitch": -10.0,
                    "speed": 5.0
                },
                {
                    "coordinate": { "latitude": 40.7138, "longitude": -74.0070 },
                    "altitude": 35.0,
                    "speed": 6.0
                }
            ]
        }
    })
}

fn create_dto() -> CreateMissionDto {
    serde_json::from_value(json!({
        "name": "Bridge survey",
        "userId": "someone-else",
        "timelineElements": [
            waypoint_mission_element(),
            { "type": "shoot-photo", "config": { "photoType": "single" } }
        ],
        "globalSettings": {
            "batteryAction": "returnHome",
            "batteryThreshold": 20,
            "signalLostAction": "hover",
            "homeLat": 40.7128,
            "homeLng": -74.0060,
            "droneType": "mavic-3"
        },
        "metadata": {
            "totalTimelineElements": 2,
            "hasWaypointMission": true,
            "totalWaypoints": 2,
            "totalDistance": 130.5,
            "estimatedDuration": 26.1
        }
    }))
    .unwrap()
}

/// Tests that every known type tag decodes into its typed configuration
/// variant.
///
/// Expected: One matching variant per tag
#[test]
fn decodes_known_tags_to_typed_configs() {
    let element: TimelineElementDto = serde_json::from_value(waypoint_mission_element()).unwrap();
    let ElementPayloadDto::WaypointMission(config) = &element.payload else {
        panic!("expected waypoint-mission payload");
    };
    assert_eq!(config.auto_flight_speed, 10.0);
    assert_eq!(config.waypoints.len(), 2);
    assert_eq!(config.waypoints[0].gimbal_pitch, -10.0);

    let element: TimelineElementDto = serde_json::from_value(json!({
        "type": "record-video",
        "config": { "actionType": "RecordVideoAction", "cameraIndex": 1 }
    }))
    .unwrap();
    assert!(matches!(
        element.payload,
        ElementPayloadDto::RecordVideo(ref config) if config.camera_index == 1
    ));

    let element: TimelineElementDto = serde_json::from_value(json!({
        "type": "shoot-photo",
        "config": { "photoType": "interval", "photoCount": 5, "timeInterval": 3 }
    }))
    .unwrap();
    assert!(matches!(
        element.payload,
        ElementPayloadDto::ShootPhoto(ref config)
            if config.photo_type == "interval" && config.photo_count == Some(5)
    ));

    let element: TimelineElementDto = serde_json::from_value(json!({
        "type": "change-heading",
        "config": { "angle": -90.0, "angularVelocity": 30.0 }
    }))
    .unwrap();
    assert!(matches!(
        element.payload,
        ElementPayloadDto::ChangeHeading(ref config) if config.angle == -90.0
    ));
}

/// Tests that an element with an unknown type tag decodes to the opaque
/// variant, keeping the tag and the untouched config map.
///
/// Expected: Opaque variant with the original tag and config
#[test]
fn decodes_unknown_tag_to_opaque() {
    let input = json!({
        "id": "abc123",
        "order": 3,
        "type": "sky-scan",
        "config": { "sweepWidth": 120, "overlap": 0.3 }
    });

    let element: TimelineElementDto = serde_json::from_value(input.clone()).unwrap();

    let ElementPayloadDto::Opaque(opaque) = &element.payload else {
        panic!("expected opaque payload");
    };
    assert_eq!(opaque.element_type, "sky-scan");
    assert_eq!(opaque.config["sweepWidth"], json!(120));

    // Unknown elements must survive a decode/encode cycle unchanged.
    assert_eq!(serde_json::to_value(&element).unwrap(), input);
}

/// Tests the wire shape of a serialized element: exactly the four keys
/// `id`, `order`, `type`, and `config`.
///
/// Expected: No extra or missing keys
#[test]
fn serialized_element_carries_type_and_config() {
    let element: TimelineElementDto = serde_json::from_value(waypoint_mission_element()).unwrap();
    let element = element.into_element(0).unwrap();

    let emitted = serde_json::to_value(TimelineElementDto::from(element)).unwrap();
    let keys: Vec<&str> = emitted.as_object().unwrap().keys().map(String::as_str).collect();

    let mut sorted = keys.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, vec!["config", "id", "order", "type"]);
    assert_eq!(emitted["type"], json!("waypoint-mission"));
}

/// Tests server-side assignment of element ids and orders: a missing id gets
/// a fresh 24-char hex id and a missing order gets the append index, while
/// explicit values are preserved (gaps stay gaps).
///
/// Expected: Assigned where absent, preserved where present
#[test]
fn into_element_assigns_id_and_order() {
    let element: TimelineElementDto = serde_json::from_value(waypoint_mission_element()).unwrap();
    let stored = element.into_element(4).unwrap();

    assert_eq!(stored.order, 4);
    assert_eq!(stored.id.len(), 24);
    assert!(stored.id.chars().all(|c| c.is_ascii_hexdigit()));

    let element: TimelineElementDto = serde_json::from_value(json!({
        "id": "existing-id",
        "order": 7,
        "type": "shoot-photo",
        "config": { "photoType": "single" }
    }))
    .unwrap();
    let stored = element.into_element(0).unwrap();

    assert_eq!(stored.id, "existing-id");
    assert_eq!(stored.order, 7);
}

/// Tests that stored element configs use snake_case keys while the wire form
/// used camelCase: the stored and emitted shapes keep distinct key
/// conventions.
///
/// Expected: snake_case keys in the stored config
#[test]
fn stored_config_uses_snake_case_keys() {
    let element: TimelineElementDto = serde_json::from_value(waypoint_mission_element()).unwrap();
    let stored = bson::to_document(&element.into_element(0).unwrap()).unwrap();

    assert_eq!(stored.get_str("type").unwrap(), "waypoint-mission");

    let config = stored.get_document("config").unwrap();
    assert!(config.contains_key("auto_flight_speed"));
    assert!(config.contains_key("finished_action"));
    assert!(!config.contains_key("autoFlightSpeed"));

    let waypoint = config.get_array("waypoints").unwrap()[0]
        .as_document()
        .unwrap();
    assert!(waypoint.contains_key("gimbal_pitch"));
}

/// Tests that an opaque config survives the trip into a BSON document and
/// back out to JSON.
///
/// Expected: Identical config map after the storage round trip
#[test]
fn opaque_config_round_trips_through_storage() {
    let element: TimelineElementDto = serde_json::from_value(json!({
        "type": "sky-scan",
        "config": { "sweepWidth": 120, "label": "east bank", "nested": { "depth": 2 } }
    }))
    .unwrap();

    let stored = element.into_element(0).unwrap();
    let emitted = serde_json::to_value(TimelineElementDto::from(stored)).unwrap();

    assert_eq!(
        emitted["config"],
        json!({ "sweepWidth": 120, "label": "east bank", "nested": { "depth": 2 } })
    );
}

/// Tests that mission creation forces the server-assigned fields and stores
/// the client-computed metadata as-is.
///
/// Expected: Owner forced, date and timestamps set to now, metadata untouched
#[test]
fn from_create_forces_server_fields() {
    let now = fixed_now();

    let document =
        MissionDocument::from_create("6651f0a2c8d9e4b1a2c3d4e5", create_dto(), now).unwrap();

    assert_eq!(document.user_id, "6651f0a2c8d9e4b1a2c3d4e5");
    assert_eq!(document.date, now);
    assert_eq!(document.created_at, now);
    assert_eq!(document.updated_at, now);
    assert!(document.metadata.has_waypoint_mission);
    assert_eq!(document.metadata.total_timeline_elements, 2);
    assert_eq!(document.timeline_elements[0].order, 0);
    assert_eq!(document.timeline_elements[1].order, 1);
}

/// Tests the waypoint-mission lookup helpers on a stored mission.
///
/// Expected: The first waypoint-mission config is found
#[test]
fn finds_waypoint_mission_element() {
    let document =
        MissionDocument::from_create("6651f0a2c8d9e4b1a2c3d4e5", create_dto(), fixed_now())
            .unwrap();

    assert!(document.has_waypoint_mission());
    assert_eq!(document.waypoint_mission().unwrap().waypoints.len(), 2);
}

/// Tests that the emitted mission DTO uses camelCase keys and hex ids, with
/// timeline elements in their wire shape.
///
/// Expected: camelCase keys throughout
#[test]
fn dto_emits_camel_case() {
    let document =
        MissionDocument::from_create("6651f0a2c8d9e4b1a2c3d4e5", create_dto(), fixed_now())
            .unwrap();
    let expected_id = document.id.to_hex();

    let emitted = serde_json::to_value(MissionDto::from(document)).unwrap();

    assert_eq!(emitted["id"], json!(expected_id));
    assert_eq!(emitted["userId"], json!("6651f0a2c8d9e4b1a2c3d4e5"));
    assert!(emitted.get("timelineElements").is_some());
    assert!(emitted.get("globalSettings").is_some());
    assert_eq!(emitted["globalSettings"]["batteryAction"], json!("returnHome"));
    assert_eq!(emitted["metadata"]["hasWaypointMission"], json!(true));
    assert_eq!(
        emitted["timelineElements"][0]["config"]["autoFlightSpeed"],
        json!(10.0)
    );
}
