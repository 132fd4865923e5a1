//! Industry module - the fixed category buckets for organizations

/// Industry bucket assigned to an organization
///
/// Each bucket carries a display label and a canned activities description.
/// Buckets are checked in declaration order by [`Industry::classify`]:
/// - Technology: software, tech, ai, development
/// - Healthcare: healthcare, medical, health
/// - Manufacturing: manufacturing, production
/// - Consulting: consulting, advisory
/// - BusinessServices: everything else
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Industry {
    /// Software and technology companies
    Technology,

    /// Healthcare and medical providers
    Healthcare,

    /// Manufacturing and production
    Manufacturing,

    /// Consulting and advisory firms
    Consulting,

    /// Catch-all bucket
    #[default]
    BusinessServices,
}

/// Keyword table in priority order. The first bucket with any keyword
/// contained in the lowercased text wins.
const BUCKETS: [(Industry, &[&str]); 4] = [
    (Industry::Technology, &["software", "tech", "ai", "development"]),
    (Industry::Healthcare, &["healthcare", "medical", "health"]),
    (Industry::Manufacturing, &["manufacturing", "production"]),
    (Industry::Consulting, &["consulting", "advisory"]),
];

impl Industry {
    /// All buckets, in classification priority order
    pub const ALL: [Industry; 5] = [
        Industry::Technology,
        Industry::Healthcare,
        Industry::Manufacturing,
        Industry::Consulting,
        Industry::BusinessServices,
    ];

    /// Get the industry label as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Industry::Technology => "Technology",
            Industry::Healthcare => "Healthcare",
            Industry::Manufacturing => "Manufacturing",
            Industry::Consulting => "Consulting",
            Industry::BusinessServices => "Business Services",
        }
    }

    /// Activities description paired with this bucket
    pub fn activities(&self) -> &'static str {
        match self {
            Industry::Technology => "Software development, technology solutions",
            Industry::Healthcare => "Healthcare services, medical solutions",
            Industry::Manufacturing => "Manufacturing, production services",
            Industry::Consulting => "Consulting services, advisory",
            Industry::BusinessServices => "Professional services",
        }
    }

    /// Pick the bucket for a piece of text by case-insensitive keyword
    /// containment.
    ///
    /// Keywords are plain substrings, so "ai" also hits "email" or "said".
    ///
    /// # Examples
    ///
    /// ```
    /// use orgscout_domain::Industry;
    ///
    /// assert_eq!(Industry::classify("Our medical software"), Industry::Technology);
    /// assert_eq!(Industry::classify("A hospital group"), Industry::BusinessServices);
    /// ```
    pub fn classify(text: &str) -> Self {
        let lowered = text.to_lowercase();
        BUCKETS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
            .map(|(industry, _)| *industry)
            .unwrap_or_default()
    }

    /// Parse an industry from its label (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|industry| industry.as_str().eq_ignore_ascii_case(wanted))
    }
}

impl std::fmt::Display for Industry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Industry {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid industry: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_priority() {
        assert_eq!(
            Industry::classify("healthcare software platform"),
            Industry::Technology
        );
        assert_eq!(
            Industry::classify("medical device production"),
            Industry::Healthcare
        );
        assert_eq!(
            Industry::classify("production and consulting"),
            Industry::Manufacturing
        );
        assert_eq!(Industry::classify("Advisory firm"), Industry::Consulting);
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        assert_eq!(Industry::classify("SOFTWARE"), Industry::Technology);
        assert_eq!(Industry::classify("Consulting"), Industry::Consulting);
    }

    #[test]
    fn test_classify_substring_hits() {
        // "ai" inside "email"
        assert_eq!(Industry::classify("see my email"), Industry::Technology);
    }

    #[test]
    fn test_classify_default() {
        assert_eq!(Industry::classify("bakery"), Industry::BusinessServices);
        assert_eq!(Industry::classify(""), Industry::BusinessServices);
    }

    #[test]
    fn test_parse_round_trip() {
        for industry in Industry::ALL {
            assert_eq!(Industry::parse(industry.as_str()), Some(industry));
        }
        assert_eq!(
            Industry::parse("business services"),
            Some(Industry::BusinessServices)
        );
        assert!("Farming".parse::<Industry>().is_err());
    }
}
