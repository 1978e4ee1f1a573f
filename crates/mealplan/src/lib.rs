mod calendar;
mod grid;
mod workflow;

pub use calendar::*;
pub use grid::*;
pub use workflow::*;
