use serde::{Deserialize, Serialize};

/// A slide addressed either by position or by key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SlideTarget {
    Index(usize),
    Key(String),
}

impl From<usize> for SlideTarget {
    fn from(index: usize) -> Self {
        SlideTarget::Index(index)
    }
}

impl From<&str> for SlideTarget {
    fn from(key: &str) -> Self {
        SlideTarget::Key(key.to_string())
    }
}

impl From<String> for SlideTarget {
    fn from(key: String) -> Self {
        SlideTarget::Key(key)
    }
}

/// External navigation requests, tagged by their event name.
///
/// ```
/// use slider::SliderCommand;
///
/// let cmd: SliderCommand = serde_json::from_str(r#"{"event": "gotoid", "slideId": "intro"}"#).unwrap();
/// assert_eq!(cmd, SliderCommand::GotoId { slide_id: "intro".into() });
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum SliderCommand {
    Next,
    Prev,
    #[serde(rename_all = "camelCase")]
    GotoSlide {
        slide_number: usize,
        #[serde(default)]
        counterwise: bool,
        #[serde(default)]
        no_animation: bool,
    },
    Up {
        #[serde(default)]
        slide: Option<SlideTarget>,
    },
    Down {
        #[serde(default)]
        slide: Option<SlideTarget>,
    },
    Left {
        #[serde(default)]
        slide: Option<SlideTarget>,
    },
    Right {
        #[serde(default)]
        slide: Option<SlideTarget>,
    },
    #[serde(rename_all = "camelCase")]
    GotoId { slide_id: String },
    #[serde(rename_all = "camelCase")]
    GotoHistory { slide_id: String },
}
