use super::Engine;

use async_trait::async_trait;

use crate::{
    api::VenueAPI,
    entities::{select_venue, Coordinates, Venue, VenueListing},
    error::Error,
};

#[async_trait]
impl VenueAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn list_venues(&self) -> Result<Vec<VenueListing>, Error> {
        Ok(Venue::ALL.iter().copied().map(VenueListing::from).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn select_venue(&self, name: &str) -> Result<Coordinates, Error> {
        select_venue(name).map_err(|err| {
            tracing::error!("{}", err.message);
            err
        })
    }
}

#[test]
fn lists_and_selects_venues() {
    use tokio_test::block_on;

    let engine = super::test_engine();

    let venues = block_on(engine.list_venues()).unwrap();
    assert_eq!(venues.len(), 5);
    assert_eq!(venues[3].name, "SAFTEC Hotels");

    let coordinates = block_on(engine.select_venue("SAFTEC Hotels")).unwrap();
    assert_eq!(
        coordinates,
        Coordinates {
            lat: 9.589305,
            lng: 6.541952
        }
    );

    let err = block_on(engine.select_venue("Registry")).unwrap_err();
    assert_eq!(err.code, 102);
}
