// Marker classes read by the presentation layer
pub const CLASS_CONTAINER: &str = "jqs-container";  // Container wrapping the slide list
pub const CLASS_LIST: &str = "jqs-list";            // Slide list, moved during a transition
pub const CLASS_LIST_BEFORE: &str = "jqs-list-before"; // Incoming slide sits before the current one
pub const CLASS_SLIDE: &str = "jqs-slide";          // Every managed slide
pub const CLASS_CURRENT: &str = "jqs-current";      // The active slide
pub const CLASS_NEXT: &str = "jqs-next";            // The slide being animated in
pub const CLASS_VERTICAL: &str = "jqs-vertical";    // Root element, vertical orientation
pub const CLASS_HANDLER: &str = "jqs-handler";      // Navigation affordance
pub const CLASS_HANDLER_NEXT: &str = "jqs-handler-next";
pub const CLASS_HANDLER_PREV: &str = "jqs-handler-prev";
pub const CLASS_INACTIVE: &str = "jqs-inactive";    // Affordance that cannot navigate

pub const OPTIONS_ATTRIBUTE: &str = "data-options"; // Per-element JSON options

// Option defaults
pub const DEFAULT_DURATION_MS: u64 = 500;
pub const DEFAULT_EASING: &str = "linear";
pub const DEFAULT_CONTAINER_SELECTOR: &str = ".jqs-container";
pub const DEFAULT_LIST_SELECTOR: &str = "ul";
pub const DEFAULT_SLIDE_TAG: &str = "li";

// Viewer
pub const RENDER_WIDTH: i32 = 1280;
pub const RENDER_HEIGHT: i32 = 720;
pub const FPS: u32 = 60;
pub const SLIDE_FILL: f32 = 0.9;                    // Share of the viewport an image may cover
