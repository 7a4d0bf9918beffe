// main.rs - Liquid flow demo on the cellgrid engine
// Usage: liquid_demo [config.ron]

use eframe::egui;
use std::time::{Duration, Instant};

use cellgrid::{
    DemoConfig, DragPainter, GridError, LiquidFlowRule, LiquidVariant, Paint, PaintOp,
    PointerButton, SimulationEngine, Volume,
};

mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => DemoConfig::load_or(path, DemoConfig::liquid()),
        None => DemoConfig::liquid(),
    };
    let app = LiquidApp::new(config)?;

    let canvas = app.canvas_size();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([canvas.x.max(640.0) + 20.0, canvas.y + 140.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Liquid",
        options,
        Box::new(|_cc| Box::new(app)),
    )?;
    Ok(())
}

pub struct LiquidApp {
    engine: SimulationEngine<LiquidFlowRule>,
    config: DemoConfig,
    drag: DragPainter,

    pub is_running: bool,
    pub last_update: Instant,
    pub update_interval: Duration,
    pub variant: LiquidVariant,
    pub pour_amount: Volume,
}

impl LiquidApp {
    pub fn new(config: DemoConfig) -> Result<Self, GridError> {
        let variant = config.liquid.variant;
        let engine = SimulationEngine::liquid(
            LiquidFlowRule::new(variant.constants()),
            config.width,
            config.height,
        )?;

        Ok(Self {
            drag: DragPainter::new(config.cell_size, config.width, config.height, config.paint_repeat()),
            update_interval: config.tick_interval(),
            pour_amount: config.liquid.pour_amount,
            engine,
            config,
            is_running: true,
            last_update: Instant::now(),
            variant,
        })
    }

    pub fn canvas_size(&self) -> egui::Vec2 {
        egui::vec2(
            self.config.cell_size * self.engine.width() as f32,
            self.config.cell_size * self.engine.height() as f32,
        )
    }

    pub fn set_variant(&mut self, variant: LiquidVariant) {
        if variant != self.variant {
            log::info!("Switching flow variant to {}", variant.name());
            self.variant = variant;
            self.engine.set_rule(LiquidFlowRule::new(variant.constants()));
        }
    }

    /// Primary button pours, secondary builds walls. While running, paints
    /// are queued so they land on the next tick boundary.
    fn paint(&mut self, button: PointerButton, (x, y): (usize, usize)) {
        let op = match button {
            PointerButton::Primary => PaintOp::AddVolume(self.pour_amount),
            PointerButton::Secondary => PaintOp::SetWall(true),
        };
        if self.is_running {
            self.engine.queue_paint(Paint::new(x, y, op));
        } else {
            self.engine.paint(x, y, op);
        }
    }
}
