mod engine;

pub use engine::{HandlerKind, SlideSelector, Slider};
