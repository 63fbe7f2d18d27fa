//! G-code toolpath replay and its output bookkeeping

pub mod bounds;
pub mod replay;

pub use bounds::Bounds;
pub use replay::{MachineState, MotionReplay, ReplayOutput, ReplayStart, ReplayState};
