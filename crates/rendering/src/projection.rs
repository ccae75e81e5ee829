//! Local planar projection between lon/lat and world space.
//!
//! The map origin sits at world `(0, 0, 0)`. East is `+X`, north is `-Z`
//! and `+Y` is up, in metres. An equirectangular approximation is accurate
//! to well under a metre across a campus.

use bevy::prelude::*;

use floorplan::config::{INITIAL_VIEW_LATITUDE, INITIAL_VIEW_LONGITUDE};
use floorplan::features::LngLat;

const METERS_PER_DEGREE_LAT: f64 = 110_540.0;
const METERS_PER_DEGREE_LNG_AT_EQUATOR: f64 = 111_320.0;

#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct MapProjection {
    origin: LngLat,
    meters_per_degree_lng: f64,
}

impl Default for MapProjection {
    fn default() -> Self {
        Self::centered_on(LngLat::new(INITIAL_VIEW_LONGITUDE, INITIAL_VIEW_LATITUDE))
    }
}

impl MapProjection {
    pub fn centered_on(origin: LngLat) -> Self {
        Self {
            origin,
            meters_per_degree_lng: METERS_PER_DEGREE_LNG_AT_EQUATOR * origin.lat.to_radians().cos(),
        }
    }

    pub fn origin(&self) -> LngLat {
        self.origin
    }

    /// Ground-plane position `(x, z)` of a coordinate.
    pub fn to_ground(&self, position: LngLat) -> Vec2 {
        let x = (position.lng - self.origin.lng) * self.meters_per_degree_lng;
        let z = -(position.lat - self.origin.lat) * METERS_PER_DEGREE_LAT;
        Vec2::new(x as f32, z as f32)
    }

    pub fn to_world(&self, position: LngLat, height: f32) -> Vec3 {
        let ground = self.to_ground(position);
        Vec3::new(ground.x, height, ground.y)
    }

    pub fn to_lnglat(&self, ground: Vec2) -> LngLat {
        LngLat::new(
            self.origin.lng + f64::from(ground.x) / self.meters_per_degree_lng,
            self.origin.lat - f64::from(ground.y) / METERS_PER_DEGREE_LAT,
        )
    }

    /// Convert a ground distance to degrees of latitude, for hit tolerances.
    pub fn meters_to_degrees(&self, meters: f32) -> f64 {
        f64::from(meters) / METERS_PER_DEGREE_LAT
    }
}
