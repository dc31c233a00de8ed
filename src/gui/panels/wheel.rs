use std::f64::consts::TAU;

use eframe::egui::{
    self,
    epaint::Hsva,
    Color32,
    Pos2,
    Shape,
    Stroke,
};

use super::{
    generate_button,
    result_region,
};
use crate::{
    features::{
        wheel::{
            segment_hue,
            Wheel,
            BATTLES,
        },
        Command,
        Tool,
        Workspace,
    },
    gui::{
        actions::ActionQueue,
        theme::Theme,
    },
};

const WHEEL_SIZE: f32 = 320.0;
const ARC_STEPS: usize = 12;

pub fn show(
    ui: &mut egui::Ui,
    workspace: &mut Workspace,
    theme: &Theme,
    actions: &mut ActionQueue,
) {
    let flow = &mut workspace.battle_flow;
    let wheel = &workspace.wheel;

    ui.horizontal_top(|ui| {
        ui.vertical(|ui| {
            ui.label("Battle");
            let selected = flow.battle.clone().unwrap_or_else(|| "Select a battle...".into());
            ui.add_enabled_ui(!flow.locked && !wheel.spinning, |ui| {
                egui::ComboBox::from_id_salt("battle_select")
                    .selected_text(selected)
                    .width(240.0)
                    .show_ui(ui, |ui| {
                        for battle in BATTLES {
                            let current = flow.battle.as_deref() == Some(battle);
                            if ui.selectable_label(current, battle).clicked() {
                                flow.choose(battle);
                            }
                        }
                    });
            });
            if flow.locked {
                ui.small("Picked by the wheel. Spin again to change it.");
            }
            ui.add_space(6.0);
            generate_button(ui, "Show Event Flow", Tool::BattleFlow, actions);
        });

        ui.add_space(24.0);

        ui.vertical(|ui| {
            draw_wheel(ui, wheel, theme);
            let spin = ui.add_enabled(!wheel.spinning, egui::Button::new("Spin the Wheel"));
            if spin.clicked() {
                actions.push(Command::SpinWheel { now: ui.input(|i| i.time) });
            }
        });
    });

    ui.add_space(8.0);
    result_region(ui, &flow.view, Tool::BattleFlow, theme, actions);
}

fn point_on(center: Pos2, radius: f32, angle: f64) -> Pos2 {
    center + radius * egui::vec2(angle.cos() as f32, angle.sin() as f32)
}

fn draw_wheel(ui: &mut egui::Ui, wheel: &Wheel, theme: &Theme) {
    let (rect, _) =
        ui.allocate_exact_size(egui::vec2(WHEEL_SIZE, WHEEL_SIZE), egui::Sense::hover());
    let painter = ui.painter_at(rect.expand(12.0));
    let center = rect.center();
    let radius = WHEEL_SIZE / 2.0 - 8.0;
    let count = wheel.segments.len();
    if count == 0 {
        return;
    }

    let slice = TAU / count as f64;
    let outline = Stroke::new(1.0, ui.visuals().window_stroke.color);

    for (index, label) in wheel.labels().into_iter().enumerate() {
        let start = wheel.rotation + index as f64 * slice;
        let mut points = vec![center];
        points.extend((0..=ARC_STEPS).map(|step| {
            point_on(center, radius, start + slice * step as f64 / ARC_STEPS as f64)
        }));

        let mut fill: Color32 = Hsva::new(segment_hue(index, count), 0.55, 0.85, 1.0).into();
        if wheel.selected == Some(index) && !wheel.spinning {
            fill = Hsva::new(segment_hue(index, count), 0.8, 1.0, 1.0).into();
        }
        painter.add(Shape::convex_polygon(points, fill, outline));

        painter.text(
            point_on(center, radius * 0.64, start + slice / 2.0),
            egui::Align2::CENTER_CENTER,
            label,
            egui::FontId::proportional(11.0),
            Color32::BLACK,
        );
    }

    painter.circle_filled(center, 10.0, ui.visuals().window_fill);
    painter.circle_stroke(center, radius, Stroke::new(2.0, theme.accent(ui)));

    // Pointer at the top, tip facing the rim.
    let top = Pos2::new(center.x, center.y - radius);
    painter.add(Shape::convex_polygon(
        vec![
            top + egui::vec2(-10.0, -14.0),
            top + egui::vec2(10.0, -14.0),
            top + egui::vec2(0.0, 6.0),
        ],
        theme.incorrect(ui),
        Stroke::NONE,
    ));
}
