//! WikiAtomizer application layer: wires the pure core to the engine and renders the session.
pub mod cli;
pub mod controller;
pub mod effects;
pub mod logging;
pub mod render;

pub use controller::{Clock, Controller};
pub use effects::{map_event, EffectRunner, ExportOutcome};
pub use render::{render, render_exports, RenderOptions};
