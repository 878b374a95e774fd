//! Keyword classifier that turns card text into a background prompt.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Event category inferred from a card's title and description.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Wedding,
    Birthday,
    Conference,
    Party,
    Dining,
    Concert,
    Travel,
    Graduation,
    OutdoorNature,
    Generic,
}

impl Category {
    /// Categories in match priority order; `Generic` is the fallback and has no keywords.
    pub const PRIORITY: [Category; 9] = [
        Category::Wedding,
        Category::Birthday,
        Category::Conference,
        Category::Party,
        Category::Dining,
        Category::Concert,
        Category::Travel,
        Category::Graduation,
        Category::OutdoorNature,
    ];

    /// Wire spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Wedding => "wedding",
            Category::Birthday => "birthday",
            Category::Conference => "conference",
            Category::Party => "party",
            Category::Dining => "dining",
            Category::Concert => "concert",
            Category::Travel => "travel",
            Category::Graduation => "graduation",
            Category::OutdoorNature => "outdoor-nature",
            Category::Generic => "generic",
        }
    }

    fn keywords(self) -> &'static [&'static str] {
        match self {
            Category::Wedding => &[
                "wedding", "weddings", "bride", "groom", "bridal", "marriage", "married",
                "engagement", "nuptials", "vows",
            ],
            Category::Birthday => &[
                "birthday", "birthdays", "bday", "b day", "sweet sixteen", "quinceanera",
                "quinceañera",
            ],
            Category::Conference => &[
                "conference", "summit", "symposium", "workshop", "seminar", "keynote",
                "convention", "expo", "meetup", "webinar",
            ],
            Category::Party => &[
                "party", "parties", "celebration", "celebrate", "bash", "gala", "fiesta",
                "cocktail", "cocktails", "get together",
            ],
            Category::Dining => &[
                "dinner", "lunch", "brunch", "breakfast", "restaurant", "dining", "tasting",
                "banquet", "feast", "potluck", "barbecue", "bbq",
            ],
            Category::Concert => &[
                "concert", "gig", "live music", "band", "orchestra", "recital", "dj",
                "music festival", "jazz", "choir",
            ],
            Category::Travel => &[
                "trip", "travel", "vacation", "journey", "tour", "cruise", "getaway",
                "road trip", "flight",
            ],
            Category::Graduation => &[
                "graduation", "graduate", "graduates", "grad", "commencement", "convocation",
                "diploma", "class of",
            ],
            Category::OutdoorNature => &[
                "hike", "hiking", "camping", "camp", "picnic", "garden", "park", "beach",
                "forest", "mountain", "mountains", "lake", "outdoor", "outdoors", "nature",
                "trail",
            ],
            Category::Generic => &[],
        }
    }

    fn prompt_theme(self) -> &'static str {
        match self {
            Category::Wedding => {
                "an elegant wedding invitation backdrop with soft florals, ivory tones and warm golden light"
            }
            Category::Birthday => {
                "a cheerful birthday backdrop with balloons, confetti and bright playful colors"
            }
            Category::Conference => {
                "a clean modern conference backdrop with subtle geometric shapes and a professional palette"
            }
            Category::Party => {
                "a festive party backdrop with bokeh lights, streamers and vibrant colors"
            }
            Category::Dining => {
                "a warm dining backdrop with candlelight, a set table and rich appetizing tones"
            }
            Category::Concert => {
                "an energetic concert backdrop with stage lights, haze and bold saturated colors"
            }
            Category::Travel => {
                "an inspiring travel backdrop with a scenic horizon, open sky and adventurous mood"
            }
            Category::Graduation => {
                "a proud graduation backdrop with caps in the air, diplomas and celebratory accents"
            }
            Category::OutdoorNature => {
                "a serene outdoor backdrop with greenery, natural light and fresh earthy tones"
            }
            Category::Generic => {
                "a tasteful abstract backdrop with soft gradients and gentle textures"
            }
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Lowercased words joined by single spaces, padded so every word is bracketed by spaces.
fn normalize_words(text: &str) -> String {
    let mut out = String::from(" ");
    for word in text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
    {
        out.extend(word.chars().flat_map(char::to_lowercase));
        out.push(' ');
    }
    out
}

fn contains_phrase(haystack: &str, phrase: &str) -> bool {
    let needle = normalize_words(phrase);
    needle.len() > 1 && haystack.contains(&needle)
}

/// Classify a card by its title and description.
///
/// Categories are tried in [`Category::PRIORITY`] order and the first one with a whole-word
/// (or whole-phrase) keyword hit wins; case is ignored. No hit yields [`Category::Generic`].
pub fn classify(title: &str, description: &str) -> Category {
    let text = normalize_words(&format!("{title} {description}"));
    Category::PRIORITY
        .into_iter()
        .find(|c| c.keywords().iter().any(|k| contains_phrase(&text, k)))
        .unwrap_or(Category::Generic)
}

/// Build an image prompt for `category`, anchored on the card title when there is one.
pub fn derive_prompt(category: Category, title: &str) -> String {
    let title = title.trim();
    let mut prompt = format!("Card background: {}", category.prompt_theme());
    if !title.is_empty() {
        prompt.push_str(&format!(", evoking \"{title}\""));
    }
    prompt.push_str(". No text, no lettering, leave room for overlaid content.");
    prompt
}

/// Explicit prompt when non-blank, otherwise one derived from the content.
pub fn resolve_prompt(explicit: Option<&str>, title: &str, description: &str) -> String {
    match explicit.map(str::trim).filter(|p| !p.is_empty()) {
        Some(p) => p.to_owned(),
        None => derive_prompt(classify(title, description), title),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/generation/classify.rs"]
mod tests;
