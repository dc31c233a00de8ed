//! Geography map explainer.
//!
//! The response picks the viewport in order of preference: a valid bounding
//! box, then a center with zoom, then the world view. Points of interest
//! become markers; anything malformed is skipped and logged.

use std::f64::consts::PI;

use serde_json::Value;

use super::{
    decode,
    non_blank,
    panel::show_result_and_button,
    PanelView,
    RequestFeature,
    ResultPanel,
    Submission,
};
use crate::{
    api::{
        types::{
            BoundingBox,
            MapInfo,
            PointOfInterest,
            TopicRequest,
        },
        Endpoint,
        RequestBody,
    },
    core::StudyError,
    format::Block,
};

pub const INVALID_MAP_MESSAGE: &str = "Received invalid map data structure from the server.";
pub const DEFAULT_CENTER: LatLon = LatLon { lat: 20.0, lon: 0.0 };
pub const DEFAULT_ZOOM: f64 = 2.0;
pub const FALLBACK_ZOOM: f64 = 10.0;
pub const MIN_ZOOM: f64 = 1.0;
pub const MAX_ZOOM: f64 = 18.0;
pub const FIT_PADDING: f64 = 20.0;
const TILE_SIZE: f64 = 256.0;
const MAX_MERCATOR_LAT: f64 = 85.051_128_78;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Option<Self> {
        let valid = lat.is_finite()
            && lon.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lon);
        valid.then_some(Self { lat, lon })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south_west: LatLon,
    pub north_east: LatLon,
}

impl Bounds {
    pub fn from_response(bbox: &BoundingBox) -> Option<Self> {
        let south_west = LatLon::new(bbox.south_west_lat?, bbox.south_west_lon?)?;
        let north_east = LatLon::new(bbox.north_east_lat?, bbox.north_east_lon?)?;
        Some(Self { south_west, north_east })
    }

    pub fn center(&self) -> LatLon {
        LatLon {
            lat: (self.south_west.lat + self.north_east.lat) / 2.0,
            lon: (self.south_west.lon + self.north_east.lon) / 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Viewport {
    Center { center: LatLon, zoom: f64 },
    Fit(Bounds),
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport::Center { center: DEFAULT_CENTER, zoom: DEFAULT_ZOOM }
    }
}

impl Viewport {
    /// Center and zoom for a canvas of `width` x `height` pixels.
    pub fn resolve(&self, width: f64, height: f64) -> (LatLon, f64) {
        match self {
            Viewport::Center { center, zoom } => (*center, *zoom),
            Viewport::Fit(bounds) => (bounds.center(), fit_zoom(bounds, width, height, FIT_PADDING)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: LatLon,
    pub name: String,
    pub popup: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Layer {
    Marker(Marker),
    Rectangle(Bounds),
}

/// Web Mercator position in world pixels at `zoom`.
pub fn project(point: LatLon, zoom: f64) -> (f64, f64) {
    let scale = TILE_SIZE * 2f64.powf(zoom);
    let lat = point.lat.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT).to_radians();
    let x = (point.lon + 180.0) / 360.0 * scale;
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * scale;
    (x, y)
}

/// Largest zoom in `[MIN_ZOOM, MAX_ZOOM]` at which `bounds` fits inside the
/// padded canvas.
pub fn fit_zoom(bounds: &Bounds, width: f64, height: f64, padding: f64) -> f64 {
    let (x0, y0) = project(bounds.south_west, 0.0);
    let (x1, y1) = project(bounds.north_east, 0.0);
    let span_x = (x1 - x0).abs().max(f64::EPSILON);
    let span_y = (y1 - y0).abs().max(f64::EPSILON);
    let avail_x = (width - 2.0 * padding).max(1.0);
    let avail_y = (height - 2.0 * padding).max(1.0);
    let zoom = (avail_x / span_x).min(avail_y / span_y).log2().floor();
    zoom.clamp(MIN_ZOOM, MAX_ZOOM)
}

pub fn marker_from(point: &PointOfInterest) -> Option<Marker> {
    let position = LatLon::new(point.lat?, point.lon?)?;
    let name = non_blank(point.name.as_deref())?.to_string();
    let popup = non_blank(point.popup_info.as_deref()).map(str::to_string);
    Some(Marker { position, name, popup })
}

#[derive(Debug, Default)]
pub struct MapFeature<V: PanelView = ResultPanel> {
    pub topic: String,
    pub viewport: Viewport,
    pub layers: Vec<Layer>,
    queried_topic: String,
    pub view: V,
}

impl<V: PanelView> MapFeature<V> {
    fn apply_view(&mut self, info: &MapInfo) {
        if let Some(bounds) = info.bounding_box.as_ref().and_then(Bounds::from_response) {
            log::info!("[Map] Fitting view to bounds {:?}", bounds);
            self.viewport = Viewport::Fit(bounds);
            self.layers.push(Layer::Rectangle(bounds));
            return;
        }

        match (info.center_lat, info.center_lon) {
            (Some(lat), Some(lon)) if lat.is_finite() && lon.is_finite() => {
                let zoom = info
                    .zoom
                    .filter(|z| (MIN_ZOOM..=MAX_ZOOM).contains(z))
                    .unwrap_or(FALLBACK_ZOOM);
                self.viewport = Viewport::Center { center: LatLon { lat, lon }, zoom };
            }
            _ => {
                log::info!("[Map] No usable bounds or center, resetting view");
                self.viewport = Viewport::default();
            }
        }
    }

    fn add_points(&mut self, points: &[Value]) {
        for raw in points {
            let marker = serde_json::from_value::<PointOfInterest>(raw.clone())
                .ok()
                .as_ref()
                .and_then(marker_from);
            match marker {
                Some(marker) => self.layers.push(Layer::Marker(marker)),
                None => log::warn!("[Map] Skipping invalid point of interest: {}", raw),
            }
        }
    }
}

impl<V: PanelView> RequestFeature for MapFeature<V> {
    type View = V;

    fn name(&self) -> &'static str {
        "Map"
    }

    fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    fn prepare(&mut self) -> Result<Submission, StudyError> {
        let topic = non_blank(Some(&self.topic))
            .ok_or_else(|| StudyError::validation("Please enter a geographical topic."))?
            .to_string();
        let body = RequestBody::json(&TopicRequest { topic: &topic })?;
        log::info!("[Map] Clearing {} layers", self.layers.len());
        self.layers.clear();
        self.queried_topic = topic;
        Ok(Submission::new(Endpoint::MapInfo, body, "Generating map information..."))
    }

    fn render(&mut self, value: Value) -> Result<(), StudyError> {
        if !value.is_object() {
            return Err(StudyError::payload(INVALID_MAP_MESSAGE));
        }
        let info: MapInfo = decode(value, INVALID_MAP_MESSAGE)?;

        self.apply_view(&info);

        match non_blank(info.description.as_deref()) {
            Some(description) => show_result_and_button(
                &mut self.view,
                vec![
                    Block::Heading(format!("About: {}", self.queried_topic)),
                    Block::Paragraph(description.to_string()),
                ],
            ),
            None => {
                self.view.hide_loading();
                self.view.set_result_visible(false);
                self.view.set_read_aloud_visible(false);
            }
        }

        if let Some(points) = &info.points_of_interest {
            self.add_points(points);
        }
        Ok(())
    }
}
