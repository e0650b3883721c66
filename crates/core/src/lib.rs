#![forbid(unsafe_code)]

mod display;
mod report;
mod summary;

pub use display::*;
pub use report::*;
pub use summary::*;
