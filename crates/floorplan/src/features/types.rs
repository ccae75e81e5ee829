use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::level::{parse_level, LevelSpan};

/// A geographic position. Serialized as a GeoJSON position, `[lng, lat]`;
/// any altitude component is dropped on read.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }
}

impl Serialize for LngLat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.lng, self.lat].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for LngLat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Vec::<f64>::deserialize(deserializer)?;
        match raw.as_slice() {
            [lng, lat, ..] => Ok(LngLat::new(*lng, *lat)),
            _ => Err(D::Error::custom(format!(
                "position needs at least 2 numbers, got {}",
                raw.len()
            ))),
        }
    }
}

/// Feature geometry, tagged the same way GeoJSON tags it:
/// `{"type": "Polygon", "coordinates": [...]}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    Point(LngLat),
    MultiPoint(Vec<LngLat>),
    LineString(Vec<LngLat>),
    MultiLineString(Vec<Vec<LngLat>>),
    /// Outer ring first, then holes.
    Polygon(Vec<Vec<LngLat>>),
    MultiPolygon(Vec<Vec<Vec<LngLat>>>),
}

impl Geometry {
    /// Human-readable GeoJSON type name.
    pub fn kind(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::MultiPoint(_) => "MultiPoint",
            Geometry::LineString(_) => "LineString",
            Geometry::MultiLineString(_) => "MultiLineString",
            Geometry::Polygon(_) => "Polygon",
            Geometry::MultiPolygon(_) => "MultiPolygon",
        }
    }

    pub fn is_areal(&self) -> bool {
        matches!(self, Geometry::Polygon(_) | Geometry::MultiPolygon(_))
    }

    pub fn is_linear(&self) -> bool {
        matches!(self, Geometry::LineString(_) | Geometry::MultiLineString(_))
    }
}

/// The tags the viewer understands, plus everything else it does not.
///
/// `level` only holds string values; a non-string `level` lands in `other`
/// and the feature resolves to no floors. Other known tags accept any
/// non-null value, stringified, so presence checks behave like a `has`
/// lookup on the raw property bag.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeatureTags {
    pub level: Option<String>,
    pub amenity: Option<String>,
    pub highway: Option<String>,
    pub utility: Option<String>,
    pub landuse: Option<String>,
    pub indoor: Option<String>,
    pub door: Option<String>,
    pub name: Option<String>,
    /// Properties with no dedicated field.
    pub other: BTreeMap<String, Value>,
}

impl FeatureTags {
    pub fn from_properties(properties: serde_json::Map<String, Value>) -> Self {
        let mut tags = FeatureTags::default();
        for (key, value) in properties {
            if key == "level" {
                match value {
                    Value::String(level) => tags.level = Some(level),
                    other => {
                        tags.other.insert(key, other);
                    }
                }
                continue;
            }

            let slot = match key.as_str() {
                "amenity" => Some(&mut tags.amenity),
                "highway" => Some(&mut tags.highway),
                "utility" => Some(&mut tags.utility),
                "landuse" => Some(&mut tags.landuse),
                "indoor" => Some(&mut tags.indoor),
                "door" => Some(&mut tags.door),
                "name" => Some(&mut tags.name),
                _ => None,
            };
            match slot {
                Some(slot) => *slot = tag_text(value),
                None => {
                    tags.other.insert(key, value);
                }
            }
        }
        tags
    }

    /// Stairways and elevators stay visible regardless of the service-path
    /// toggle and the amenity filter.
    pub fn is_stairs_or_elevator(&self) -> bool {
        self.is_stairs() || self.is_elevator()
    }

    pub fn is_stairs(&self) -> bool {
        self.highway.as_deref() == Some("steps")
    }

    pub fn is_elevator(&self) -> bool {
        self.highway.as_deref() == Some("elevator")
    }

    /// Restricted-access corridor drawn on the line pass.
    pub fn is_service_path(&self) -> bool {
        self.highway.as_deref() == Some("service")
    }

    pub fn is_corridor(&self) -> bool {
        self.indoor.as_deref() == Some("corridor")
    }

    pub fn is_bench(&self) -> bool {
        self.amenity.as_deref() == Some("bench")
    }

    pub fn has_utility(&self) -> bool {
        self.utility.is_some()
    }

    pub fn has_landuse(&self) -> bool {
        self.landuse.is_some()
    }

    pub fn has_door(&self) -> bool {
        self.door.is_some()
    }
}

fn tag_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    }
}

/// A single map element. Immutable once loaded; its floor span is resolved
/// on construction.
#[derive(Clone, Debug, PartialEq)]
pub struct Feature {
    pub geometry: Option<Geometry>,
    pub tags: FeatureTags,
    floors: LevelSpan,
}

impl Feature {
    pub fn new(geometry: Option<Geometry>, tags: FeatureTags) -> Self {
        let floors = tags
            .level
            .as_deref()
            .map_or(LevelSpan::EMPTY, parse_level);
        Self {
            geometry,
            tags,
            floors,
        }
    }

    pub fn floors(&self) -> LevelSpan {
        self.floors
    }

    pub fn is_on_floor(&self, floor: i32) -> bool {
        self.floors.contains(floor)
    }

    pub fn name(&self) -> Option<&str> {
        self.tags.name.as_deref()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Feature> {
        self.features.iter()
    }
}
