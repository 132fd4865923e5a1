//! Pattern-based organization extraction
//!
//! The fallback path: ordered regular expressions and keyword buckets over the
//! raw email text. It makes no external calls and never fails; a field whose
//! patterns all miss keeps its default.
//!
//! Every field is decided independently. Within a field the patterns are tried
//! in a fixed order and the first one that matches wins, so reordering them
//! changes the output for ambiguous text.

use crate::config::ExtractorConfig;
use chrono::Datelike;
use orgscout_domain::traits::RecordExtractor;
use orgscout_domain::{ExtractedRecord, Industry, PLACEHOLDER_NAME};
use regex::Regex;
use std::convert::Infallible;
use std::sync::OnceLock;
use tracing::debug;

/// Years strictly between these bounds are treated as founding years
const MIN_FOUNDING_YEAR: u64 = 1900;
const MAX_FOUNDING_YEAR: u64 = 2030;

/// A captured number below this is already an age, not a year
const MAX_LITERAL_AGE: u64 = 100;

/// Owner captures kept in the joined owners field
const MAX_OWNERS: usize = 3;

// Compile-once regex patterns via OnceLock. All are case-insensitive, so the
// `[A-Z]` "capitalized" anchors accept lowercase letters as well.

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in extraction pattern must compile")
}

fn re_names() -> &'static [Regex; 3] {
    static RE: OnceLock<[Regex; 3]> = OnceLock::new();
    RE.get_or_init(|| {
        [
            compile(
                r"(?i)(?:from|at|with)\s+([A-Z][a-zA-Z\s&]+(?:Inc|LLC|Corp|Company|Solutions|Technologies|Systems|Group))",
            ),
            compile(
                r"(?i)([A-Z][a-zA-Z\s&]+(?:Inc|LLC|Corp|Company|Solutions|Technologies|Systems|Group))",
            ),
            compile(r"(?i)(?:I'm|I am).*(?:from|at|with)\s+([A-Z][a-zA-Z\s&]+)"),
        ]
    })
}

fn re_location() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        compile(
            r"(?i)(?:based in|located in|from)\s+([A-Z][a-zA-Z\s,]+(?:CA|NY|TX|FL|WA|OR|MA|USA|United States))",
        )
    })
}

fn re_website() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        compile(r"(?i)(www\.[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}|https?://[a-zA-Z0-9.-]+\.[a-zA-Z]{2,})")
    })
}

fn re_owners() -> &'static [Regex; 2] {
    static RE: OnceLock<[Regex; 2]> = OnceLock::new();
    RE.get_or_init(|| {
        [
            compile(r"(?i)(?:founded by|co-founder|CEO|CTO|founder)\s*:?\s*([A-Z][a-zA-Z\s,&]+)"),
            compile(
                r"(?i)([A-Z][a-zA-Z\s]+)\s*\([^)]*(?:CEO|CTO|founder|co-founder|president)[^)]*\)",
            ),
        ]
    })
}

/// How a matched number turns into an age
#[derive(Debug, Clone, Copy)]
enum AgeRule {
    /// "<N> years old": N is the age
    Literal,
    /// "founded in <YYYY>": age is counted from the year
    Year,
}

fn re_ages() -> &'static [(Regex, AgeRule); 4] {
    static RE: OnceLock<[(Regex, AgeRule); 4]> = OnceLock::new();
    RE.get_or_init(|| {
        [
            (
                compile(r"(?i)([0-9]+)\s*years?\s*(?:old|in business|in operation)"),
                AgeRule::Literal,
            ),
            (compile(r"(?i)founded in\s*([0-9]{4})"), AgeRule::Year),
            (compile(r"(?i)established\s*([0-9]{4})"), AgeRule::Year),
            (compile(r"(?i)since\s*([0-9]{4})"), AgeRule::Year),
        ]
    })
}

/// Heuristic extractor for organization records
///
/// Holds only the reference year used to turn founding years into ages, so it
/// is cheap to copy and safe to share between threads.
///
/// # Examples
///
/// ```
/// use orgscout_extractor::PatternExtractor;
///
/// let extractor = PatternExtractor::new(2026);
/// let record = extractor.extract("Greetings from Acme Solutions Inc, founded in 1995.");
///
/// assert_eq!(record.name, "Acme Solutions Inc");
/// assert_eq!(record.age, 31);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternExtractor {
    reference_year: i32,
}

impl PatternExtractor {
    /// Create an extractor that computes ages relative to `reference_year`
    pub fn new(reference_year: i32) -> Self {
        Self { reference_year }
    }

    /// Create an extractor anchored at the current local calendar year
    ///
    /// The year is read once here; the extractor never consults the clock again.
    pub fn current() -> Self {
        Self::new(chrono::Local::now().year())
    }

    /// Create an extractor from configuration, using the current year when
    /// no reference year is set
    pub fn from_config(config: &ExtractorConfig) -> Self {
        config
            .reference_year
            .map(Self::new)
            .unwrap_or_else(Self::current)
    }

    /// The year ages are computed against
    pub fn reference_year(&self) -> i32 {
        self.reference_year
    }

    /// Extract a record from raw email text
    pub fn extract(&self, text: &str) -> ExtractedRecord {
        let industry = Industry::classify(text);

        let record = ExtractedRecord {
            name: extract_name(text).unwrap_or_else(|| PLACEHOLDER_NAME.to_string()),
            location: extract_location(text).unwrap_or_default(),
            owners: extract_owners(text),
            activities: industry.activities().to_string(),
            age: self.extract_age(text),
            website: extract_website(text).unwrap_or_default(),
            industry: industry.as_str().to_string(),
        };

        debug!(
            "Pattern extraction: name={:?} industry={} age={}",
            record.name, record.industry, record.age
        );

        record
    }

    /// First age pattern that matches decides, even when its number is unusable
    fn extract_age(&self, text: &str) -> u32 {
        for (pattern, rule) in re_ages() {
            if let Some(caps) = pattern.captures(text) {
                let Some(value) = caps.get(1).and_then(|m| m.as_str().parse::<u64>().ok()) else {
                    return 0;
                };
                return match rule {
                    AgeRule::Literal => u32::try_from(value).unwrap_or(0),
                    AgeRule::Year => self.age_from_year(value),
                };
            }
        }
        0
    }

    fn age_from_year(&self, year: u64) -> u32 {
        if year > MIN_FOUNDING_YEAR && year < MAX_FOUNDING_YEAR {
            // Bounded above by MAX_FOUNDING_YEAR, fits in i64
            let age = i64::from(self.reference_year) - year as i64;
            u32::try_from(age.max(0)).unwrap_or(0)
        } else if year < MAX_LITERAL_AGE {
            year as u32
        } else {
            0
        }
    }
}

impl Default for PatternExtractor {
    fn default() -> Self {
        Self::current()
    }
}

impl RecordExtractor for PatternExtractor {
    type Error = Infallible;

    fn extract_record(&self, text: &str) -> Result<ExtractedRecord, Self::Error> {
        Ok(self.extract(text))
    }
}

/// Trimmed first capture group of `pattern`, if it matches and is non-empty
fn first_capture(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn extract_name(text: &str) -> Option<String> {
    re_names()
        .iter()
        .find_map(|pattern| first_capture(pattern, text))
}

fn extract_location(text: &str) -> Option<String> {
    first_capture(re_location(), text)
}

fn extract_website(text: &str) -> Option<String> {
    // Not trimmed: the pattern cannot capture whitespace
    re_website()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// All owner captures, family by family in document order, no deduplication
fn extract_owners(text: &str) -> String {
    re_owners()
        .iter()
        .flat_map(|pattern| pattern.captures_iter(text))
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .take(MAX_OWNERS)
        .collect::<Vec<_>>()
        .join(", ")
}
