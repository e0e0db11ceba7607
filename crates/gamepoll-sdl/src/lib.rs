mod runtime;
mod source;

pub use crate::runtime::{run, IntervalScheduler, FRAME_INTERVAL};
pub use crate::source::SdlSource;
