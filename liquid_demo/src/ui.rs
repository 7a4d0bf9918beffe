// ui.rs - egui front end for the liquid demo

use eframe::egui;
use egui::{Color32, Rect, Vec2};
use std::time::{Duration, Instant};

use cellgrid::{FULL, LiquidCell, LiquidVariant, PointerButton, Volume};

use crate::LiquidApp;

const BACKGROUND_COLOR: Color32 = Color32::WHITE;
const WALL_COLOR: Color32       = Color32::BLACK;
const CELL_FILL: Color32        = Color32::from_rgb(22, 109, 175);
const CELL_LIGHT: Color32       = Color32::from_rgb(100, 154, 239);
const CELL_DARK: Color32        = Color32::from_rgb(44, 117, 232);

fn shade(volume: Volume) -> Color32 {
    match volume {
        v if v < 80  => CELL_LIGHT,
        v if v > 120 => CELL_DARK,
        _            => CELL_FILL,
    }
}

/// Does the cell at `(x, y)` block or hold fluid (or lie off the grid).
fn is_solid_or_wet(cell: Option<&LiquidCell>) -> bool {
    cell.is_none_or(|cell| cell.wall || cell.volume > 0)
}

impl LiquidApp {
    /// Fill fraction for a resting surface cell: under-full, supported from
    /// below and open to the air above.
    fn surface_fraction(&self, x: usize, y: usize, volume: i32) -> Option<f32> {
        let supported = is_solid_or_wet(self.engine.cell_at(x, y + 1));
        let open_above = match y.checked_sub(1) {
            Some(above) => self.engine.cell_at(x, above).is_none_or(|cell| cell.wall || cell.volume <= 0),
            None => true,
        };
        (volume < FULL && supported && open_above).then(|| volume as f32 / FULL as f32)
    }

    fn handle_pointer(&mut self, ctx: &egui::Context, response: &egui::Response) {
        let origin = response.rect.min;
        let (hover, secondary) = ctx.input(|i| (i.pointer.hover_pos(), i.pointer.secondary_down()));

        match hover {
            Some(pos) if response.is_pointer_button_down_on() && response.rect.contains(pos) => {
                let canvas_pos = (pos.x - origin.x, pos.y - origin.y);
                if self.drag.is_dragging() {
                    self.drag.move_to(canvas_pos);
                } else {
                    let button = if secondary { PointerButton::Secondary } else { PointerButton::Primary };
                    self.drag.press(button, canvas_pos);
                }
            }
            _ => self.drag.release(),
        }

        if let Some((button, cell)) = self.drag.poll(Instant::now()) {
            self.paint(button, cell);
        }
    }
}

impl eframe::App for LiquidApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.is_running && self.last_update.elapsed() >= self.update_interval {
            self.engine.tick();
            self.last_update = Instant::now();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Liquid");

            ui.horizontal(|ui| {
                let button_text = if self.is_running { "⏸ Pause" } else { "▶ Start" };
                if ui.button(button_text).clicked() {
                    self.is_running = !self.is_running;
                    if self.is_running {
                        self.last_update = Instant::now();
                    }
                }

                if ui.button("⏹ Clear").clicked() {
                    self.engine.clear();
                }

                ui.separator();

                ui.label("Flow:");
                let mut variant = self.variant;
                egui::ComboBox::from_id_source("variant_selector")
                    .selected_text(variant.name())
                    .show_ui(ui, |ui| {
                        for candidate in LiquidVariant::ALL {
                            ui.selectable_value(&mut variant, candidate, candidate.name());
                        }
                    });
                self.set_variant(variant);

                ui.separator();

                ui.add(egui::Slider::new(&mut self.pour_amount, 10..=500).text("pour"));
            });

            ui.horizontal(|ui| {
                ui.label("Tick:");
                let mut millis = self.update_interval.as_millis() as u64;
                if ui.add(egui::Slider::new(&mut millis, 10..=500).suffix(" ms")).changed() {
                    self.update_interval = Duration::from_millis(millis);
                }
                ui.separator();
                ui.label(format!("Generation: {}", self.engine.generation()));
                ui.label(format!("Volume: {}", self.engine.total_volume()));
                ui.label(format!("Walls: {}", self.engine.wall_count()));
            });

            ui.label("Drag to pour liquid, right-drag to build walls.");

            ui.separator();

            let cell_size = self.config.cell_size;
            let (response, painter) = ui.allocate_painter(self.canvas_size(), egui::Sense::click_and_drag());
            self.handle_pointer(ctx, &response);

            let origin = response.rect.min;
            painter.rect_filled(response.rect, 0.0, BACKGROUND_COLOR);

            for &(x, y) in self.engine.all_coordinates() {
                let Some(cell) = self.engine.cell_at(x, y) else { continue };
                let left = origin.x + x as f32 * cell_size;
                let top = origin.y + y as f32 * cell_size;

                if cell.wall {
                    let rect = Rect::from_min_size(egui::pos2(left, top), Vec2::splat(cell_size));
                    painter.rect_filled(rect, 0.0, WALL_COLOR);
                    continue;
                }
                if cell.volume <= 0 {
                    continue;
                }

                let mut height = cell_size - 1.0;
                let mut y_offset = 1.0;
                if let Some(fraction) = self.surface_fraction(x, y, cell.volume) {
                    height *= fraction;
                    y_offset += cell_size - 1.0 - height;
                }

                let rect = Rect::from_min_size(
                    egui::pos2(left + 1.0, top + y_offset),
                    Vec2::new(cell_size - 1.0, height),
                );
                painter.rect_filled(rect, 0.0, shade(cell.volume));
            }
        });

        ctx.request_repaint_after(self.config.frame_interval());
    }
}
