// main.rs - Conway's Game of Life on the cellgrid engine
// Usage: life_demo [config.ron]

use eframe::egui;
use egui::Color32;
use std::time::{Duration, Instant};

use cellgrid::patterns;
use cellgrid::{CycleDetector, DemoConfig, DragPainter, GridError, LifeRule, PointerButton, SimulationEngine};

mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => DemoConfig::load_or(path, DemoConfig::life()),
        None => DemoConfig::life(),
    };
    let app = GameOfLife::new(config)?;

    let canvas = app.canvas_size();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([canvas.x.max(760.0) + 20.0, canvas.y + 160.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(|_cc| Box::new(app)),
    )?;
    Ok(())
}

pub struct GameOfLife {
    engine: SimulationEngine<LifeRule>,
    config: DemoConfig,
    drag: DragPainter,
    cycles: CycleDetector,
    seed: u64,

    pub is_running: bool,
    pub last_update: Instant,
    pub update_interval: Duration,
    pub live_color: Color32,
    pub dead_color: Color32,
    pub selected_pattern: usize,
}

impl GameOfLife {
    pub fn new(config: DemoConfig) -> Result<Self, GridError> {
        let mut engine = SimulationEngine::life(config.width, config.height)?;
        let seed = config.life.seed.unwrap_or_else(rand::random);
        patterns::randomize(&mut engine, seed, config.life.density);
        log::info!("Seeded life board with seed {seed}");

        Ok(Self {
            drag: DragPainter::new(config.cell_size, config.width, config.height, config.paint_repeat()),
            update_interval: config.tick_interval(),
            engine,
            config,
            cycles: CycleDetector::new(),
            seed,
            is_running: true,
            last_update: Instant::now(),
            live_color: Color32::from_rgb(22, 109, 175),
            dead_color: Color32::from_rgba_unmultiplied(255, 255, 255, 128),
            selected_pattern: 0,
        })
    }

    pub fn canvas_size(&self) -> egui::Vec2 {
        egui::vec2(
            self.config.cell_size * self.engine.width() as f32,
            self.config.cell_size * self.engine.height() as f32,
        )
    }

    pub fn update_generation(&mut self) {
        self.engine.tick();
        if self.cycles.observe(self.engine.fingerprint()) {
            log::info!("Board repeats at generation {}, pausing", self.engine.generation());
            self.is_running = false;
        }
    }

    pub fn clear_grid(&mut self) {
        self.engine.clear();
        self.cycles.reset();
    }

    pub fn apply_selected_pattern(&mut self) {
        if let Some(pattern) = patterns::PATTERNS.get(self.selected_pattern) {
            patterns::apply_pattern(&mut self.engine, pattern);
            self.cycles.reset();
        }
    }

    pub fn apply_random_pattern(&mut self) {
        self.seed = self.seed.wrapping_add(1);
        patterns::randomize(&mut self.engine, self.seed, self.config.life.density);
        self.cycles.reset();
    }

    /// Primary button draws live cells, secondary erases.
    fn paint(&mut self, button: PointerButton, (x, y): (usize, usize)) {
        let alive = button == PointerButton::Primary;
        if self.engine.paint_set(x, y, alive) {
            self.cycles.reset();
        }
    }
}
