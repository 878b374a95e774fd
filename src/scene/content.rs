use serde::{Deserialize, Serialize};

/// Dynamic text shown on the card. Owned by the page, not by the customization.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct CardContent {
    /// Event or page title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Human-readable date/time line.
    pub date: String,
    /// Venue or address.
    pub location: String,
}

impl CardContent {
    /// Content with a title and description; date and location left empty.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Self::default()
        }
    }
}
