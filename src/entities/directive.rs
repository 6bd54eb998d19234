use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{Coordinates, LocateOptions, RouteControl, Waypoints};

/// Instructions the navigation page carries out in the browser.
///
/// A session answers every event with a (possibly empty) ordered list of
/// directives. The page keeps a single destination marker, so
/// `PlaceMarker` moves it rather than adding another one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum Directive {
    WatchPosition {
        subscription: Uuid,
        options: LocateOptions,
    },
    LocateOnce {
        subscription: Uuid,
        options: LocateOptions,
    },
    ClearWatch {
        subscription: Uuid,
    },
    PlaceMarker {
        coordinates: Coordinates,
        label: String,
    },
    CreateRouteControl {
        control: RouteControl,
    },
    SetWaypoints {
        control_id: Uuid,
        waypoints: Waypoints,
    },
    RemoveRouteControl {
        control_id: Uuid,
    },
    CancelSpeech,
    Speak {
        text: String,
    },
    Alert {
        message: String,
    },
}

#[test]
fn directives_serialize_with_a_name_tag() {
    let value = serde_json::to_value(Directive::Speak {
        text: "Turn left".into(),
    })
    .unwrap();
    assert_eq!(value, serde_json::json!({"name": "speak", "text": "Turn left"}));

    let value = serde_json::to_value(Directive::CancelSpeech).unwrap();
    assert_eq!(value, serde_json::json!({"name": "cancel_speech"}));
}
