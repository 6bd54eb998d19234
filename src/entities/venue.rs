use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::entities::Coordinates;
use crate::error::{configuration_error, Error};

/// The fixed set of wedding venues, in the order guests are offered them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Venue {
    TraditionalMarriage,
    ChurchWedding,
    Reception,
    SaftecHotels,
    WhitehillsHotel,
}

impl Venue {
    pub const ALL: [Venue; 5] = [
        Venue::TraditionalMarriage,
        Venue::ChurchWedding,
        Venue::Reception,
        Venue::SaftecHotels,
        Venue::WhitehillsHotel,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::TraditionalMarriage => "Traditional Marriage",
            Self::ChurchWedding => "Church Wedding - LFC Gbaiko Minna",
            Self::Reception => "Reception - PSS Hall",
            Self::SaftecHotels => "SAFTEC Hotels",
            Self::WhitehillsHotel => "WhiteHills Luxery Hotel",
        }
    }

    pub fn coordinates(&self) -> Coordinates {
        let (lat, lng) = match self {
            Self::TraditionalMarriage => (9.636327, 6.513065),
            Self::ChurchWedding => (9.642587, 6.505967),
            Self::Reception => (9.635238, 6.512557),
            Self::SaftecHotels => (9.589305, 6.541952),
            Self::WhitehillsHotel => (9.590192, 6.541766),
        };

        Coordinates { lat, lng }
    }

    pub fn marker_label(&self) -> String {
        format!("Destination: {}", self.name())
    }
}

impl FromStr for Venue {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|venue| venue.name() == name)
            .copied()
            .ok_or_else(|| configuration_error(&format!("unknown venue `{}`", name)))
    }
}

pub fn select_venue(name: &str) -> Result<Coordinates, Error> {
    let venue: Venue = name.parse()?;

    Ok(venue.coordinates())
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VenueListing {
    pub id: Venue,
    pub name: String,
    pub coordinates: Coordinates,
}

impl From<Venue> for VenueListing {
    fn from(venue: Venue) -> Self {
        Self {
            id: venue,
            name: venue.name().into(),
            coordinates: venue.coordinates(),
        }
    }
}

#[test]
fn every_venue_resolves_to_its_coordinates() {
    for venue in Venue::ALL {
        assert_eq!(select_venue(venue.name()).unwrap(), venue.coordinates());
    }

    assert_eq!(
        select_venue("Traditional Marriage").unwrap(),
        Coordinates {
            lat: 9.636327,
            lng: 6.513065
        }
    );
}

#[test]
fn saftec_hotels_scenario() {
    let venue: Venue = "SAFTEC Hotels".parse().unwrap();

    assert_eq!(
        venue.coordinates(),
        Coordinates {
            lat: 9.589305,
            lng: 6.541952
        }
    );
    assert_eq!(venue.marker_label(), "Destination: SAFTEC Hotels");
}

#[test]
fn unknown_venue_is_a_configuration_error() {
    let err = select_venue("Town Hall").unwrap_err();
    assert_eq!(err.code, 102);

    // lookup is exact, not case-insensitive
    assert!(select_venue("saftec hotels").is_err());
}

#[test]
fn listing_preserves_table_order() {
    let names: Vec<&str> = Venue::ALL.iter().map(|v| v.name()).collect();

    assert_eq!(
        names,
        vec![
            "Traditional Marriage",
            "Church Wedding - LFC Gbaiko Minna",
            "Reception - PSS Hall",
            "SAFTEC Hotels",
            "WhiteHills Luxery Hotel",
        ]
    );
}
