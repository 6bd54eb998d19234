use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::Coordinates;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Waypoints {
    pub origin: Coordinates,
    pub destination: Coordinates,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingOptions {
    pub route_while_dragging: bool,
    pub add_waypoints: bool,
    pub show_alternatives: bool,
    pub fit_selected_routes: bool,
}

impl Default for RoutingOptions {
    fn default() -> Self {
        Self {
            route_while_dragging: false,
            add_waypoints: false,
            show_alternatives: false,
            fit_selected_routes: true,
        }
    }
}

/// Handle to the routing widget drawn on the guest's map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteControl {
    pub id: Uuid,
    pub waypoints: Waypoints,
    pub options: RoutingOptions,
}

impl RouteControl {
    pub fn new(waypoints: Waypoints) -> Self {
        Self {
            id: Uuid::new_v4(),
            waypoints,
            options: RoutingOptions::default(),
        }
    }

    pub fn set_waypoints(&mut self, waypoints: Waypoints) {
        self.waypoints = waypoints;
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Instruction {
    pub text: String,
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub time: f64,
}

/// One entry of a `routesfound` event.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RouteSummary {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub total_distance: Option<f64>,
    #[serde(default)]
    pub total_time: Option<f64>,
    #[serde(default)]
    pub instructions: Vec<Instruction>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RoutesOutcome<'a> {
    NoRoute,
    NoInstruction,
    Instruction(&'a str),
}

/// Only the first instruction of the first route is ever announced.
pub fn first_instruction(routes: &[RouteSummary]) -> RoutesOutcome<'_> {
    match routes.first() {
        None => RoutesOutcome::NoRoute,
        Some(route) => match route.instructions.first() {
            None => RoutesOutcome::NoInstruction,
            Some(instruction) => RoutesOutcome::Instruction(instruction.text.as_str()),
        },
    }
}

#[test]
fn first_instruction_of_first_route() {
    let route = |texts: &[&str]| RouteSummary {
        instructions: texts
            .iter()
            .map(|text| Instruction {
                text: (*text).into(),
                distance: 0.0,
                time: 0.0,
            })
            .collect(),
        ..Default::default()
    };

    assert_eq!(first_instruction(&[]), RoutesOutcome::NoRoute);
    assert_eq!(first_instruction(&[route(&[])]), RoutesOutcome::NoInstruction);
    assert_eq!(
        first_instruction(&[route(&["Head north", "Turn left"]), route(&["Head south"])]),
        RoutesOutcome::Instruction("Head north")
    );
}

#[test]
fn route_control_defaults() {
    let waypoints = Waypoints {
        origin: Coordinates { lat: 9.6, lng: 6.5 },
        destination: Coordinates {
            lat: 9.589305,
            lng: 6.541952,
        },
    };
    let mut control = RouteControl::new(waypoints);

    assert!(!control.options.route_while_dragging);
    assert!(!control.options.add_waypoints);
    assert!(!control.options.show_alternatives);
    assert!(control.options.fit_selected_routes);

    let moved = Waypoints {
        origin: Coordinates { lat: 9.61, lng: 6.51 },
        ..waypoints
    };
    let id = control.id;
    control.set_waypoints(moved);

    assert_eq!(control.id, id);
    assert_eq!(control.waypoints, moved);
}
