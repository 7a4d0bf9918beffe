// ui.rs - egui front end for the life demo

use eframe::egui;
use egui::{Color32, Rect, Vec2};
use std::time::{Duration, Instant};

use cellgrid::PointerButton;
use cellgrid::patterns;

use crate::GameOfLife;

impl GameOfLife {
    /// Feeds the pointer into the drag painter and paints whatever it emits.
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

impl eframe::App for GameOfLife {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Auto-update if running
        if self.is_running && self.last_update.elapsed() >= self.update_interval {
            self.update_generation();
            self.last_update = Instant::now();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Conway's Game of Life");

            // Controls
            ui.horizontal(|ui| {
                let button_text = if self.is_running { "⏸ Pause" } else { "▶ Start" };
                if ui.button(button_text).clicked() {
                    self.is_running = !self.is_running;
                    if self.is_running {
                        self.last_update = Instant::now();
                    }
                }

                if ui.button("⏭ Step").clicked() {
                    self.is_running = false;
                    self.update_generation();
                }

                if ui.button("⏹ Clear").clicked() {
                    self.is_running = false;
                    self.clear_grid();
                }

                if ui.button("🎲 Random").clicked() {
                    self.apply_random_pattern();
                }

                ui.separator();

                // Pattern dropdown
                ui.label("Pattern:");
                egui::ComboBox::from_id_source("pattern_selector")
                    .selected_text(patterns::PATTERNS[self.selected_pattern].name)
                    .show_ui(ui, |ui| {
                        for (i, pattern) in patterns::PATTERNS.iter().enumerate() {
                            ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                        }
                    });

                if ui.button("Apply Pattern").clicked() {
                    self.is_running = false;
                    self.apply_selected_pattern();
                }

                ui.separator();

                ui.label(format!("Generation: {}", self.engine.generation()));
            });

            ui.separator();

            // Speed control
            ui.horizontal(|ui| {
                ui.label("Speed:");
                let mut speed = 1000.0 / self.update_interval.as_millis().max(1) as f32;
                if ui.add(egui::Slider::new(&mut speed, 0.5..=60.0).suffix(" gen/sec")).changed() {
                    self.update_interval = Duration::from_millis((1000.0 / speed) as u64);
                }

                ui.separator();

                ui.label("Live:");
                ui.color_edit_button_srgba(&mut self.live_color);
                ui.label("Background:");
                ui.color_edit_button_srgba(&mut self.dead_color);
            });

            ui.label("Drag to draw live cells, right-drag to erase.");

            ui.separator();

            let cell_size = self.config.cell_size;
            let (response, painter) = ui.allocate_painter(self.canvas_size(), egui::Sense::click_and_drag());
            self.handle_pointer(ctx, &response);

            let origin = response.rect.min;
            painter.rect_filled(response.rect, 0.0, self.dead_color);

            for &(x, y) in self.engine.all_coordinates() {
                if self.engine.cell_at(x, y).is_some_and(|cell| cell.is_alive()) {
                    let rect = Rect::from_min_size(
                        origin + Vec2::new(x as f32 * cell_size + 1.0, y as f32 * cell_size + 1.0),
                        Vec2::splat(cell_size - 1.0),
                    );
                    painter.rect_filled(rect, 0.0, self.live_color);
                }
            }

            ui.separator();

            // Statistics
            let total = self.engine.width() * self.engine.height();
            let live_cells = self.engine.population();
            ui.horizontal(|ui| {
                ui.label(format!("Live cells: {}", live_cells));
                ui.label(format!("Dead cells: {}", total - live_cells));
                ui.label(format!("Population: {:.1}%", (live_cells as f32 / total as f32) * 100.0));
                if !self.is_running {
                    ui.colored_label(Color32::GRAY, "paused");
                }
            });
        });

        ctx.request_repaint_after(self.config.frame_interval());
    }
}
