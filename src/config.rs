//! Slider options, merged from built-in defaults, caller options and the
//! `data-options` attribute of the slider element, in that order.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::constants::*;
use crate::easing::Easing;

/// Errors raised while parsing option overrides.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid options JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("options must be a JSON object")]
    NotAnObject,
}

/// Fully resolved options of a slider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SliderOptions {
    pub autoinit: bool,
    pub circular: bool,
    pub start_slide: usize,
    /// Transition duration in milliseconds.
    pub duration: u64,
    pub easing_function: String,
    pub container_selector: String,
    pub list_selector: String,
    pub slide_tag: String,
    /// Grid mode only: wrap when moving left/right.
    pub horizontal_circular: bool,
    /// Grid mode only: wrap when moving up/down.
    pub vertical_circular: bool,
    /// Grid mode only: slide keys, `grid[col][row]`. `null` leaves a hole.
    pub grid: Vec<Vec<Option<String>>>,
}

impl Default for SliderOptions {
    fn default() -> Self {
        Self {
            autoinit: true,
            circular: false,
            start_slide: 0,
            duration: DEFAULT_DURATION_MS,
            easing_function: DEFAULT_EASING.to_string(),
            container_selector: DEFAULT_CONTAINER_SELECTOR.to_string(),
            list_selector: DEFAULT_LIST_SELECTOR.to_string(),
            slide_tag: DEFAULT_SLIDE_TAG.to_string(),
            horizontal_circular: true,
            vertical_circular: false,
            grid: Vec::new(),
        }
    }
}

/// Partial options, every field optional. Used for caller options and for
/// the per-element metadata attribute.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autoinit: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub circular: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_slide: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub easing_function: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_selector: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_selector: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slide_tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal_circular: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_circular: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<Vec<Vec<Option<String>>>>,
}

/// Parses a `data-options` attribute. Single quotes are accepted in place of
/// double quotes so the JSON can live inside a double quoted attribute.
pub fn parse_metadata(raw: &str) -> Result<OptionsPatch, ConfigError> {
    let normalized = raw.replace('\'', "\"");
    let value: serde_json::Value = serde_json::from_str(&normalized)?;
    if !value.is_object() {
        return Err(ConfigError::NotAnObject);
    }
    Ok(serde_json::from_value(value)?)
}

macro_rules! apply_fields {
    ($target:expr, $patch:expr, $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = &$patch.$field {
                $target.$field = value.clone();
            }
        )+
    };
}

impl SliderOptions {
    /// Defaults, then `caller`, then the metadata attribute when present.
    /// Malformed metadata is logged and skipped.
    pub fn resolve(caller: &OptionsPatch, metadata: Option<&str>) -> Self {
        let mut options = SliderOptions::default();
        options.apply(caller);

        if let Some(raw) = metadata.filter(|raw| !raw.trim().is_empty()) {
            match parse_metadata(raw) {
                Ok(patch) => options.apply(&patch),
                Err(e) => warn!(error = %e, "ignoring malformed slider options attribute"),
            }
        }

        options
    }

    pub fn apply(&mut self, patch: &OptionsPatch) {
        apply_fields!(
            self,
            patch,
            autoinit,
            circular,
            start_slide,
            duration,
            easing_function,
            container_selector,
            list_selector,
            slide_tag,
            horizontal_circular,
            vertical_circular,
            grid,
        );
    }

    /// Resolved easing curve; unknown names fall back to linear.
    pub fn easing(&self) -> Easing {
        Easing::from_name(&self.easing_function).unwrap_or_else(|| {
            warn!(easing = %self.easing_function, "unknown easing function, using linear");
            Easing::Linear
        })
    }

    pub fn duration_secs(&self) -> f32 {
        self.duration as f32 / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = SliderOptions::default();
        assert!(options.autoinit);
        assert!(!options.circular);
        assert_eq!(options.duration, 500);
        assert_eq!(options.slide_tag, "li");
        assert!(options.horizontal_circular);
        assert!(!options.vertical_circular);
    }

    #[test]
    fn test_layers_override_in_order() {
        let caller = OptionsPatch {
            circular: Some(true),
            duration: Some(200),
            ..Default::default()
        };
        let options = SliderOptions::resolve(&caller, Some("{'duration': 900, 'startSlide': 2}"));

        assert!(options.circular);
        assert_eq!(options.duration, 900);
        assert_eq!(options.start_slide, 2);
        assert_eq!(options.easing_function, "linear");
    }

    #[test]
    fn test_malformed_metadata_is_ignored() {
        let caller = OptionsPatch { circular: Some(true), ..Default::default() };
        let options = SliderOptions::resolve(&caller, Some("{duration: oops"));
        assert!(options.circular);
        assert_eq!(options.duration, 500);

        assert!(matches!(parse_metadata("[1, 2]"), Err(ConfigError::NotAnObject)));
        assert!(matches!(parse_metadata("{"), Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_grid_metadata() {
        let patch = parse_metadata("{'grid': [['a', null], ['c', 'd']], 'verticalCircular': true}").unwrap();
        let grid = patch.grid.unwrap();
        assert_eq!(grid[0][1], None);
        assert_eq!(grid[1][1].as_deref(), Some("d"));
        assert_eq!(patch.vertical_circular, Some(true));
    }

    #[test]
    fn test_unknown_easing_falls_back() {
        let options = SliderOptions {
            easing_function: "elastic".to_string(),
            ..Default::default()
        };
        assert_eq!(options.easing(), Easing::Linear);
    }
}
