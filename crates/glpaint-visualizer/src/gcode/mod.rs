//! G-code input: normalized commands and the text interpreter that
//! produces them

pub mod command;
pub mod interpreter;

pub use command::{ArcMarker, PathCommand};
pub use interpreter::{DistanceMode, GcodeInterpreter};
