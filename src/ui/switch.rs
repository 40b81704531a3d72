// src/ui/switch.rs

use egui::{self, Color32, Pos2, Response, Sense, Stroke, Ui, Widget};

const ON_COLOR: Color32 = Color32::from_rgb(0, 200, 0);
const OFF_COLOR: Color32 = Color32::from_rgb(200, 200, 200);
const ERROR_COLOR: Color32 = Color32::from_rgb(220, 60, 60);

/// An on/off switch bound to a boolean.
///
/// ## Example:
/// ```ignore
/// let mut enabled = true;
/// ui.add(ToggleSwitch::new(&mut enabled).with_error(false));
/// ```
pub struct ToggleSwitch<'a> {
    on: &'a mut bool,
    has_error: bool,
    busy: bool,
}

impl<'a> ToggleSwitch<'a> {
    pub fn new(on: &'a mut bool) -> Self {
        Self {
            on,
            has_error: false,
            busy: false,
        }
    }

    /// Outlines the switch in red.
    pub fn with_error(mut self, has_error: bool) -> Self {
        self.has_error = has_error;
        self
    }

    /// A busy switch ignores clicks and is drawn dimmed.
    pub fn busy(mut self, busy: bool) -> Self {
        self.busy = busy;
        self
    }
}

impl Widget for ToggleSwitch<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        let desired_size = ui.spacing().interact_size.y * egui::vec2(2.0, 1.0);
        let sense = if self.busy {
            Sense::hover()
        } else {
            Sense::click()
        };
        let (rect, mut response) = ui.allocate_exact_size(desired_size, sense);

        if response.clicked() {
            *self.on = !*self.on;
            response.mark_changed();
        }

        let on = *self.on;
        response.widget_info(|| {
            egui::WidgetInfo::selected(egui::WidgetType::Checkbox, ui.is_enabled(), on, "")
        });

        if ui.is_rect_visible(rect) {
            let how_on = ui.ctx().animate_bool(response.id, on);
            let radius = rect.height() / 2.0;

            let mut track_color = if on { ON_COLOR } else { OFF_COLOR };
            if self.busy {
                track_color = track_color.gamma_multiply(0.5);
            }
            ui.painter().rect_filled(rect, radius, track_color);
            if self.has_error {
                ui.painter()
                    .rect_stroke(rect, radius, Stroke::new(2.0, ERROR_COLOR));
            }

            let knob_x = egui::lerp((rect.left() + radius)..=(rect.right() - radius), how_on);
            let knob_center = Pos2::new(knob_x, rect.center().y);
            ui.painter()
                .circle_filled(knob_center, radius * 0.75, Color32::WHITE);
        }

        response
    }
}
