//! Category taxonomy and tag normalization
//!
//! Free-text tag strings map many-to-one onto a fixed, ordered set of
//! categories. Matching is a case-insensitive substring test of the whole tag
//! string against each rule's keywords, in rule order; the first hit wins and
//! anything unmatched (including blank input) is `General`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed catalog category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Mathematics,
    Business,
    Technology,
    #[serde(rename = "Self-Help")]
    SelfHelp,
    Arts,
    Education,
    Health,
    Science,
    History,
    #[default]
    General,
}

/// Keyword rules in priority order; `General` is the implicit fallback
const RULES: &[(Category, &[&str])] = &[
    (Category::Mathematics, &["mathematics", "math", "probability", "statistics"]),
    (Category::Business, &["business", "economics", "marketing"]),
    (Category::Technology, &["technology", "engineering", "computer"]),
    (Category::SelfHelp, &["self-help", "psychology", "personal"]),
    (Category::Arts, &["music", "art", "literature"]),
    (Category::Education, &["education", "teaching", "learning"]),
    (Category::Health, &["health", "medical", "biochemistry"]),
    (
        Category::Science,
        &["science", "chemistry", "physics", "biology", "botany", "nature"],
    ),
    (Category::History, &["history", "anthropology", "archaeology"]),
];

impl Category {
    /// Every category, in taxonomy order
    pub const ALL: [Category; 10] = [
        Category::Mathematics,
        Category::Business,
        Category::Technology,
        Category::SelfHelp,
        Category::Arts,
        Category::Education,
        Category::Health,
        Category::Science,
        Category::History,
        Category::General,
    ];

    /// Display label, as stored in `categories.name`
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Mathematics => "Mathematics",
            Category::Business => "Business",
            Category::Technology => "Technology",
            Category::SelfHelp => "Self-Help",
            Category::Arts => "Arts",
            Category::Education => "Education",
            Category::Health => "Health",
            Category::Science => "Science",
            Category::History => "History",
            Category::General => "General",
        }
    }

    /// Description stored alongside the category row
    pub fn description(&self) -> &'static str {
        match self {
            Category::Mathematics => {
                "Mathematics, statistics, probability, and mathematical theory"
            }
            Category::Business => "Business, economics, marketing, and entrepreneurship",
            Category::Technology => "Technology, engineering, computer science, and programming",
            Category::SelfHelp => "Personal development, psychology, and self-improvement",
            Category::Arts => "Arts, literature, music, and cultural studies",
            Category::Education => "Education, teaching, and learning methodologies",
            Category::Health => "Health, medicine, wellness, and life sciences",
            Category::Science => "Science, research, and natural phenomena",
            Category::History => "History, anthropology, and historical studies",
            Category::General => "General literature and miscellaneous topics",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    /// Exact label lookup (case-insensitive); use [`normalize_tags`] for free text
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

/// Map a free-text tag string (possibly comma-separated) to one category
pub fn normalize_tags(tags: &str) -> Category {
    let lower = tags.to_lowercase();
    if lower.trim().is_empty() {
        return Category::General;
    }

    RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(category, _)| *category)
        .unwrap_or(Category::General)
}
