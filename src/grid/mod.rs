mod engine;
mod layout;

pub use engine::GridSlider;
pub use layout::{Grid, HistoryMove, Wrap};
