/// Text classification for complaint descriptions
///
/// Two pure operations applied once at submission time:
///
/// - [`detect_priority`]: fixed-keyword substring match
/// - [`Classifier::sentiment`]: VADER compound score mapped to three labels
///
/// Both are deterministic and side-effect-free. The sentiment analyzer is a
/// black box; the only contract here is the compound-score thresholds.

use crate::models::{Priority, Sentiment};
use vader_sentiment::SentimentIntensityAnalyzer;

/// Keywords that escalate a complaint to `High` priority
///
/// Matched as substrings of the lower-cased description, not on word
/// boundaries. Deliberately permissive: "unbroken" triggers on "broken".
pub const PRIORITY_KEYWORDS: [&str; 10] = [
    "urgent",
    "immediately",
    "asap",
    "safety",
    "harass",
    "danger",
    "broken",
    "fire",
    "accident",
    "ragging",
];

/// Compound score at or above which text is labeled `Positive`
const POSITIVE_THRESHOLD: f64 = 0.05;

/// Compound score at or below which text is labeled `Negative`
const NEGATIVE_THRESHOLD: f64 = -0.05;

/// Detects the priority of a complaint from its description
///
/// Returns [`Priority::High`] if any priority keyword appears as a
/// case-insensitive substring, [`Priority::Normal`] otherwise.
///
/// # Example
///
/// ```
/// use grievance_shared::classify::detect_priority;
/// use grievance_shared::models::Priority;
///
/// assert_eq!(detect_priority("There was a fire in the hostel"), Priority::High);
/// assert_eq!(detect_priority("The wifi is slow"), Priority::Normal);
/// ```
pub fn detect_priority(text: &str) -> Priority {
    let text = text.to_lowercase();
    if PRIORITY_KEYWORDS.iter().any(|word| text.contains(word)) {
        Priority::High
    } else {
        Priority::Normal
    }
}

/// Sentiment classifier wrapping the VADER analyzer
///
/// Building the analyzer loads its lexicon, so one instance is constructed
/// at startup and shared across requests (it is `Send + Sync`).
pub struct Classifier {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl Classifier {
    /// Creates a classifier with the standard VADER lexicon
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }

    /// Classifies the sentiment of a complaint description
    ///
    /// Maps the VADER compound score in [-1, 1] onto three labels:
    /// >= 0.05 is `Positive`, <= -0.05 is `Negative`, anything else is
    /// `Neutral`.
    ///
    /// # Example
    ///
    /// ```
    /// use grievance_shared::classify::Classifier;
    /// use grievance_shared::models::Sentiment;
    ///
    /// let classifier = Classifier::new();
    /// assert_eq!(
    ///     classifier.sentiment("I love this hostel, it's wonderful"),
    ///     Sentiment::Positive
    /// );
    /// ```
    pub fn sentiment(&self, text: &str) -> Sentiment {
        let scores = self.analyzer.polarity_scores(text);
        let compound = scores.get("compound").copied().unwrap_or(0.0);

        if compound >= POSITIVE_THRESHOLD {
            Sentiment::Positive
        } else if compound <= NEGATIVE_THRESHOLD {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}
