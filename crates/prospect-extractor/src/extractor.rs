//! Keyword-driven opportunity extraction

use crate::config::{ExtractorConfig, KeywordPolicy};
use crate::tokenize::TokenizedTranscript;
use prospect_domain::Opportunity;
use std::collections::HashSet;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

/// Finds keyword occurrences in a transcript and wraps each one in an [`Opportunity`]
///
/// Pure apart from reading the clock in [`OpportunityExtractor::extract`];
/// safe to share across threads.
#[derive(Debug, Clone, Default)]
pub struct OpportunityExtractor {
    config: ExtractorConfig,
}

impl OpportunityExtractor {
    /// Create a new extractor
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// The active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract opportunities, stamping them with the current time
    pub fn extract<K: AsRef<str>>(
        &self,
        transcript: &str,
        keywords: &[K],
    ) -> Vec<Opportunity> {
        self.extract_at(transcript, keywords, unix_now())
    }

    /// Extract opportunities with an explicit `created_at` (Unix seconds)
    ///
    /// Results are grouped by keyword in input order, and within a keyword
    /// ordered left to right through the transcript. Matching is a
    /// case-insensitive substring test against each token, so `"pro"` hits
    /// `"Proyecto"`. A token hit by two keywords yields one opportunity per
    /// keyword.
    ///
    /// An empty transcript or keyword list yields no opportunities. Blank
    /// keywords (empty or whitespace-only) are skipped.
    ///
    /// # Examples
    ///
    /// ```
    /// use prospect_extractor::OpportunityExtractor;
    ///
    /// let extractor = OpportunityExtractor::default();
    /// let opps = extractor
    ///     .extract_at("We need to discuss BUDGET today", &["budget"], 0);
    ///
    /// assert_eq!(opps.len(), 1);
    /// assert_eq!(opps[0].context_before, "we need to discuss");
    /// assert_eq!(opps[0].full_context, "we need to discuss **budget** today");
    /// ```
    pub fn extract_at<K: AsRef<str>>(
        &self,
        transcript: &str,
        keywords: &[K],
        created_at: u64,
    ) -> Vec<Opportunity> {
        let tokens = TokenizedTranscript::new(transcript);
        if tokens.is_empty() || keywords.is_empty() {
            return Vec::new();
        }

        let keywords = self.effective_keywords(keywords);
        let window = self.config.context_window;
        let mut opportunities = Vec::new();

        for keyword in &keywords {
            let needle = keyword.to_lowercase();
            for (ordinal, index) in tokens.positions_containing(&needle).enumerate() {
                let (before, after) = tokens.context(index, window);
                opportunities.push(Opportunity::new(
                    *keyword,
                    ordinal + 1,
                    before,
                    after,
                    created_at,
                ));
            }
        }

        debug!(
            "Extracted {} opportunities from {} tokens for {} keywords",
            opportunities.len(),
            tokens.len(),
            keywords.len()
        );

        opportunities
    }

    /// Drop blank keywords, then apply the duplicate-keyword policy
    ///
    /// A blank needle would be contained in every token.
    fn effective_keywords<'k, K: AsRef<str>>(&self, keywords: &'k [K]) -> Vec<&'k str> {
        let non_blank = keywords.iter().map(AsRef::as_ref).filter(|k| {
            let blank = k.trim().is_empty();
            if blank {
                debug!("Skipping blank keyword {:?}", k);
            }
            !blank
        });

        match self.config.keyword_policy {
            KeywordPolicy::ScanEach => non_blank.collect(),
            KeywordPolicy::Dedupe => {
                let mut seen = HashSet::new();
                non_blank.filter(|k| seen.insert(k.to_lowercase())).collect()
            }
        }
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_stamps_current_time() {
        let extractor = OpportunityExtractor::default();
        let before = unix_now();
        let opps = extractor.extract("a deal here", &["deal"]);
        assert_eq!(opps.len(), 1);
        assert!(opps[0].created_at >= before);
    }

    #[test]
    fn test_blank_keywords_skipped() {
        let extractor = OpportunityExtractor::default();
        let opps = extractor.extract_at("budget anything", &["budget", "  ", ""], 0);
        assert_eq!(opps.len(), 1);
        assert_eq!(opps[0].keyword, "budget");
    }

    #[test]
    fn test_blank_keyword_on_empty_transcript_is_empty() {
        let extractor = OpportunityExtractor::default();
        assert_eq!(extractor.extract_at("", &[""], 0), vec![]);
    }

    #[test]
    fn test_dedupe_also_skips_blank() {
        let extractor = OpportunityExtractor::new(ExtractorConfig::deduplicating());
        let opps = extractor.extract_at("deal", &["", "deal", "DEAL"], 0);
        assert_eq!(opps.len(), 1);
    }

    #[test]
    fn test_huge_window_does_not_overflow() {
        let config = ExtractorConfig {
            context_window: usize::MAX,
            ..ExtractorConfig::default()
        };
        let opps = OpportunityExtractor::new(config).extract_at("a deal b", &["deal"], 0);
        assert_eq!(opps.len(), 1);
        assert_eq!(opps[0].context_before, "a");
        assert_eq!(opps[0].context_after, "b");
    }

    #[test]
    fn test_accepts_owned_keywords() {
        let extractor = OpportunityExtractor::default();
        let keywords = vec!["Deal".to_string()];
        let opps = extractor.extract_at("big deal", &keywords, 0);
        assert_eq!(opps[0].keyword, "Deal");
        assert_eq!(opps[0].full_context, "big **Deal** ");
    }

    #[test]
    fn test_multiword_keyword_never_matches_a_token() {
        let extractor = OpportunityExtractor::default();
        let opps = extractor.extract_at("a big deal", &["big deal"], 0);
        assert!(opps.is_empty());
    }

    #[test]
    fn test_label_uses_created_at() {
        let extractor = OpportunityExtractor::default();
        let opps = extractor.extract_at("budget budget", &["Budget"], 1_700_000_123);
        assert_eq!(opps[0].label, "1700000123_Budget_1");
        assert_eq!(opps[1].label, "1700000123_Budget_2");
    }
}
