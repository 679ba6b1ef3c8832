#![forbid(unsafe_code)]

mod logging;
mod output;

pub use logging::init_tracing;
pub use output::{BufferSurface, PngEncoder};
