use eframe::egui::{
    self,
    Color32,
    Pos2,
    Rect,
    Stroke,
};

use super::{
    generate_button,
    result_region,
};
use crate::{
    features::{
        map::{
            project,
            LatLon,
            Layer,
            MapFeature,
        },
        Tool,
    },
    gui::{
        actions::ActionQueue,
        theme::Theme,
    },
};

const MAP_HEIGHT: f32 = 360.0;
const GRID_STEP_DEGREES: i32 = 30;
const MARKER_RADIUS: f32 = 6.0;

pub fn show(ui: &mut egui::Ui, map: &mut MapFeature, theme: &Theme, actions: &mut ActionQueue) {
    ui.add(
        egui::TextEdit::singleline(&mut map.topic)
            .hint_text("e.g. The Silk Road")
            .desired_width(f32::INFINITY),
    );
    ui.add_space(4.0);
    generate_button(ui, "Show on Map", Tool::Map, actions);
    ui.add_space(6.0);

    draw_map(ui, map, theme);
    result_region(ui, &map.view, Tool::Map, theme, actions);
}

/// Screen transform for the current viewport: Web Mercator around the
/// resolved center.
struct Projection {
    rect: Rect,
    origin: (f64, f64),
    zoom: f64,
}

impl Projection {
    fn new(map: &MapFeature, rect: Rect) -> Self {
        let (center, zoom) = map.viewport.resolve(rect.width() as f64, rect.height() as f64);
        Self { rect, origin: project(center, zoom), zoom }
    }

    fn to_screen(&self, point: LatLon) -> Pos2 {
        let (x, y) = project(point, self.zoom);
        self.rect.center() + egui::vec2((x - self.origin.0) as f32, (y - self.origin.1) as f32)
    }
}

fn draw_map(ui: &mut egui::Ui, map: &MapFeature, theme: &Theme) {
    let size = egui::vec2(ui.available_width(), MAP_HEIGHT);
    let (rect, response) = ui.allocate_exact_size(size, egui::Sense::hover());
    let painter = ui.painter_at(rect);
    let projection = Projection::new(map, rect);

    painter.rect_filled(rect, 4.0, ui.visuals().extreme_bg_color);

    let grid = Stroke::new(0.5, theme.muted(ui));
    for lon in (-180..=180).step_by(GRID_STEP_DEGREES as usize) {
        let lon = lon as f64;
        painter.line_segment(
            [
                projection.to_screen(LatLon { lat: 85.0, lon }),
                projection.to_screen(LatLon { lat: -85.0, lon }),
            ],
            grid,
        );
    }
    for lat in (-60..=60).step_by(GRID_STEP_DEGREES as usize) {
        let lat = lat as f64;
        painter.line_segment(
            [
                projection.to_screen(LatLon { lat, lon: -180.0 }),
                projection.to_screen(LatLon { lat, lon: 180.0 }),
            ],
            grid,
        );
    }

    let hover = response.hover_pos();
    let mut hovered = None;

    for layer in &map.layers {
        match layer {
            Layer::Rectangle(bounds) => {
                let area = Rect::from_two_pos(
                    projection.to_screen(bounds.south_west),
                    projection.to_screen(bounds.north_east),
                );
                painter.rect_stroke(
                    area,
                    0.0,
                    Stroke::new(2.0, theme.warning(ui)),
                    egui::StrokeKind::Middle,
                );
            }
            Layer::Marker(marker) => {
                let pos = projection.to_screen(marker.position);
                let outline = Stroke::new(1.0, Color32::WHITE);
                painter.circle(pos, MARKER_RADIUS, theme.incorrect(ui), outline);
                painter.text(
                    pos + egui::vec2(MARKER_RADIUS + 2.0, 0.0),
                    egui::Align2::LEFT_CENTER,
                    &marker.name,
                    egui::FontId::proportional(12.0),
                    ui.visuals().text_color(),
                );
                if hover.is_some_and(|h| h.distance(pos) <= MARKER_RADIUS * 2.0) {
                    hovered = Some(marker);
                }
            }
        }
    }

    if let Some(marker) = hovered {
        response.on_hover_ui_at_pointer(|ui| {
            ui.strong(&marker.name);
            if let Some(popup) = &marker.popup {
                ui.label(popup);
            }
        });
    }
}
