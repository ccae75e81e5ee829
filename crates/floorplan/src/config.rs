/// Floor selected before any data has loaded. Kept when the loaded data
/// contains it, otherwise replaced by the lowest available floor.
pub const DEFAULT_FLOOR: i32 = 1;

/// Longest floor range a `level` tag may span. Longer ranges are treated
/// as malformed.
pub const MAX_LEVEL_SPAN: i64 = 500;

/// Vertical distance between two consecutive floors, in world units (metres).
pub const FLOOR_HEIGHT: f32 = 5.0;

/// Extrusion height of an ordinary room or area above its floor base.
pub const DEFAULT_RELATIVE_HEIGHT: f32 = 3.0;

/// Extrusion height of benches.
pub const BENCH_RELATIVE_HEIGHT: f32 = 0.5;

/// Opacity applied to every extruded fill.
pub const FILL_OPACITY: f32 = 0.7;

/// Screen-space width of the service-path line pass.
pub const SERVICE_LINE_WIDTH: f32 = 8.0;

/// Where the feature collection is read from when no override is given.
pub const DEFAULT_DATA_PATH: &str = "assets/data/main.geojson";

/// Centre of the initial map view.
pub const INITIAL_VIEW_LATITUDE: f64 = 1.3067;
pub const INITIAL_VIEW_LONGITUDE: f64 = 103.7695;

/// Maximum number of events shown in the live feed.
pub const LIVE_FEED_LIMIT: usize = 4;
