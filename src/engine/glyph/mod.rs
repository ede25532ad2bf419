pub mod outline;

pub use outline::{GlyphOutlineOp, OutlineSink, interpret, parse_outline, replay, write_program};
