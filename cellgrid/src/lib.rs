//! Grid simulation engine behind the life and liquid demos.
//!
//! A [`SimulationEngine`] owns a fixed-size [`Grid`] in two buffers and
//! advances it with a [`RuleSet`]: [`LifeRule`] for Conway's Game of Life,
//! [`LiquidFlowRule`] for a column-of-fluid flow model with walls.
//!
//! ```
//! use cellgrid::{LiquidFlowRule, SimulationEngine};
//!
//! let mut engine = SimulationEngine::liquid(LiquidFlowRule::default(), 4, 4).unwrap();
//! engine.paint_add_volume(0, 0, 400);
//! engine.tick();
//! assert_eq!(engine.cell_at(0, 1).unwrap().volume, 400);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod input;
pub mod life;
pub mod liquid;
pub mod neighbors;
pub mod paint;
pub mod patterns;
pub mod rule;

pub use config::{DemoConfig, LifeSettings, LiquidSettings};
pub use engine::{CycleDetector, SimulationEngine};
pub use error::{ConfigError, GridError};
pub use grid::{Coord, Grid};
pub use input::{DragPainter, PointerButton};
pub use life::{LifeCell, LifeRule};
pub use liquid::{FULL, FlowConstants, LiquidCell, LiquidFlowRule, LiquidVariant, Volume};
pub use neighbors::NeighborIndex;
pub use paint::{Paint, PaintOp, Paintable};
pub use rule::RuleSet;
