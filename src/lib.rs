//! Headless content slider.
//!
//! A [`Slider`] keeps one slide of an ordered sequence active and moves to
//! another one through a two phase transition (start, then end on a later
//! [`Engine::update`]). A [`GridSlider`] lays the same slides out on a grid
//! and navigates them with up/down/left/right.
//!
//! ```
//! use slider::{Engine, Markup, OptionsPatch, Slider};
//!
//! let mut slider = Slider::new(Markup::new().anonymous_slides(2).build(), &OptionsPatch::default());
//! slider.next();
//! slider.update(1.0);
//! assert_eq!(slider.state().active_index, 1);
//! assert!(slider.next().is_ignored());
//! ```

pub mod commands;
pub mod config;
pub mod constants;
pub mod dom;
pub mod easing;
pub mod engine;
pub mod events;
pub mod grid;
pub mod linear;
pub mod state;

pub use commands::{SlideTarget, SliderCommand};
pub use config::{ConfigError, OptionsPatch, SliderOptions, parse_metadata};
pub use dom::{Document, GridCell, Markup, Node, NodeId, Selector};
pub use engine::Engine;
pub use events::SliderEvent;
pub use grid::{Grid, GridSlider};
pub use linear::{HandlerKind, SlideSelector, Slider};
pub use state::{GotoOutcome, Phase, SliderState, Transition};
