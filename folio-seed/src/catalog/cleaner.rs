//! Raw records → cleaned, normalized books

use super::dedup::{deduplicate, CanonicalKey, CatalogEntry, DedupOutcome};
use super::pricing::{parse_price, PricePolicy};
use super::reader::RawRecord;
use super::taxonomy::{normalize_tags, Category};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A validated, normalized book ready for persistence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanedBook {
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cover_image: String,
    #[serde(default)]
    pub isbn: String,
    pub price: f64,
    pub category: Category,
}

impl CleanedBook {
    /// Title and author both non-blank
    pub fn is_valid(&self) -> bool {
        !self.title.trim().is_empty() && !self.author.trim().is_empty()
    }
}

impl CatalogEntry for CleanedBook {
    fn canonical_key(&self) -> CanonicalKey {
        CanonicalKey::new(&self.title, &self.author)
    }

    fn identifier(&self) -> String {
        self.title.clone()
    }
}

impl CatalogEntry for RawRecord {
    fn canonical_key(&self) -> CanonicalKey {
        CanonicalKey::new(self.title(), self.authors())
    }

    fn identifier(&self) -> String {
        self.title().trim().to_string()
    }
}

/// Normalize one record
///
/// The price comes from a `price` column when it parses, otherwise from
/// `policy`.
pub fn clean_record<R: Rng + ?Sized>(
    record: &RawRecord,
    policy: &PricePolicy,
    rng: &mut R,
) -> CleanedBook {
    let category = normalize_tags(record.tags());
    let price = parse_price(record.get("price")).unwrap_or_else(|| policy.draw(category, rng));

    CleanedBook {
        title: record.title().trim().to_string(),
        author: record.authors().trim().to_string(),
        description: record.description().trim().to_string(),
        cover_image: record.cover_url().trim().to_string(),
        isbn: record.isbn().trim().to_string(),
        price,
        category,
    }
}

/// De-duplicate records, then normalize the survivors
///
/// The returned `dropped` list holds the titles of removed repeats.
pub fn clean_catalog<R: Rng + ?Sized>(
    records: Vec<RawRecord>,
    policy: &PricePolicy,
    rng: &mut R,
) -> DedupOutcome<CleanedBook> {
    let outcome = deduplicate(records);

    DedupOutcome {
        kept: outcome
            .kept
            .iter()
            .map(|record| clean_record(record, policy, rng))
            .collect(),
        dropped: outcome.dropped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::reader::{parse_records, SourceFormat};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn record(pairs: &[(&str, &str)]) -> RawRecord {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_pipe_scenario_to_cleaned_book() {
        let content = "title|authors|cover_url|description|tags|source_url\n\
                       Deep Learning|Ian Goodfellow|http://x/cover.jpg|\
                       A book about ML|technology,ai|http://x\n";
        let records = parse_records(content, SourceFormat::Pipe);
        let mut rng = StdRng::seed_from_u64(11);

        let outcome = clean_catalog(records, &PricePolicy::default(), &mut rng);

        assert_eq!(outcome.kept.len(), 1);
        let book = &outcome.kept[0];
        assert_eq!(book.title, "Deep Learning");
        assert_eq!(book.author, "Ian Goodfellow");
        assert_eq!(book.cover_image, "http://x/cover.jpg");
        assert_eq!(book.description, "A book about ML");
        assert_eq!(book.isbn, "");
        assert_eq!(book.category, Category::Technology);
        assert!((10.0..=50.0).contains(&book.price));
    }

    #[test]
    fn test_duplicates_collapse_before_cleaning() {
        let records = vec![
            record(&[
                ("title", "Deep Learning"),
                ("authors", "Ian Goodfellow"),
                ("tags", "computer"),
            ]),
            record(&[
                ("title", "deep learning "),
                ("authors", "Ian Goodfellow"),
                ("tags", "history"),
            ]),
        ];
        let mut rng = StdRng::seed_from_u64(5);

        let outcome = clean_catalog(records, &PricePolicy::default(), &mut rng);

        assert_eq!(outcome.kept.len(), 1);
        assert_eq!(outcome.kept[0].category, Category::Technology);
        assert_eq!(outcome.dropped, vec!["deep learning".to_string()]);
    }

    #[test]
    fn test_price_column_wins_over_policy() {
        let raw = record(&[("title", "T"), ("authors", "A"), ("price", "17.25")]);
        let mut rng = StdRng::seed_from_u64(9);

        let book = clean_record(&raw, &PricePolicy::ByCategory, &mut rng);
        assert_eq!(book.price, 17.25);
    }

    #[test]
    fn test_missing_tags_default_to_general() {
        let raw = record(&[("title", "T"), ("authors", "A")]);
        let mut rng = StdRng::seed_from_u64(9);

        let book = clean_record(&raw, &PricePolicy::default(), &mut rng);
        assert_eq!(book.category, Category::General);
        assert_eq!(book.description, "");
        assert_eq!(book.cover_image, "");
    }

    #[test]
    fn test_json_shape_uses_camel_case() {
        let book = CleanedBook {
            title: "T".into(),
            author: "A".into(),
            description: String::new(),
            cover_image: "http://c".into(),
            isbn: String::new(),
            price: 12.5,
            category: Category::SelfHelp,
        };

        let value = serde_json::to_value(&book).unwrap();
        assert_eq!(value["coverImage"], "http://c");
        assert_eq!(value["category"], "Self-Help");
        assert!(value.get("cover_image").is_none());
    }
}
