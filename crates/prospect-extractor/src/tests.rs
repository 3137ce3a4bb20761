//! Integration tests for the Extractor

#[cfg(test)]
mod tests {
    use crate::{
        ExtractorConfig, ExtractorError, IngestPipeline, IngestRequest, KeywordPolicy,
        OpportunityExtractor,
    };
    use prospect_domain::traits::OpportunityStore;
    use prospect_domain::RecordingId;
    use prospect_llm::{LlmKeywordSuggester, MockProvider};
    use prospect_store::SqliteStore;
    use std::time::Duration;

    fn extractor() -> OpportunityExtractor {
        OpportunityExtractor::new(ExtractorConfig::default())
    }

    #[test]
    fn test_repeated_keyword_contexts() {
        let opps = extractor()
            .extract_at("we need to discuss budget today and budget again", &["budget"], 0);

        assert_eq!(opps.len(), 2);
        assert_eq!(opps[0].occurrence, 1);
        assert_eq!(opps[0].context_before, "we need to discuss");
        assert_eq!(opps[0].context_after, "today and budget again");
        assert_eq!(opps[1].occurrence, 2);
        assert_eq!(opps[1].context_before, "we need to discuss budget today and");
        assert_eq!(opps[1].context_after, "again");
    }

    #[test]
    fn test_empty_transcript() {
        let opps = extractor().extract_at("", &["x"], 0);
        assert!(opps.is_empty());
    }

    #[test]
    fn test_empty_keywords() {
        let keywords: [&str; 0] = [];
        let opps = extractor().extract_at("hello world", &keywords, 0);
        assert!(opps.is_empty());
    }

    #[test]
    fn test_every_token_matches() {
        let opps = extractor()
            .extract_at("proposal proposal proposal", &["proposal"], 0);

        let occurrences: Vec<usize> = opps.iter().map(|o| o.occurrence).collect();
        assert_eq!(occurrences, vec![1, 2, 3]);
        for opp in &opps {
            assert!(opp.full_context.contains("**proposal**"));
        }
        assert_eq!(opps[1].full_context, "proposal **proposal** proposal");
    }

    #[test]
    fn test_substring_match_keeps_keyword() {
        let opps = extractor()
            .extract_at("the proyecto is ready", &["pro"], 0);

        assert_eq!(opps.len(), 1);
        assert_eq!(opps[0].keyword, "pro");
        assert_eq!(opps[0].full_context, "the **pro** is ready");
    }

    #[test]
    fn test_context_is_lowercased_and_respaced() {
        let opps = extractor()
            .extract_at("Call  ACME\tabout the\n\nContract", &["contract"], 0);

        assert_eq!(opps[0].context_before, "call acme about the");
        assert_eq!(opps[0].context_after, "");
    }

    #[test]
    fn test_keyword_casing_preserved_match_case_insensitive() {
        let opps = extractor()
            .extract_at("the BUDGET is tight", &["Budget"], 0);

        assert_eq!(opps.len(), 1);
        assert_eq!(opps[0].keyword, "Budget");
        assert_eq!(opps[0].full_context, "the **Budget** is tight");
    }

    #[test]
    fn test_window_capped_at_fifteen() {
        let words: Vec<String> = (0..40).map(|i| format!("w{}", i)).collect();
        let mut transcript = words[..20].join(" ");
        transcript.push_str(" deal ");
        transcript.push_str(&words[20..].join(" "));

        let opps = extractor().extract_at(&transcript, &["deal"], 0);

        assert_eq!(opps.len(), 1);
        assert_eq!(opps[0].context_before.split(' ').count(), 15);
        assert!(opps[0].context_before.starts_with("w5 "));
        assert_eq!(opps[0].context_after.split(' ').count(), 15);
        assert!(opps[0].context_after.ends_with(" w34"));
    }

    #[test]
    fn test_custom_window() {
        let config = ExtractorConfig {
            context_window: 1,
            ..ExtractorConfig::default()
        };
        let opps = OpportunityExtractor::new(config)
            .extract_at("a b deal c d", &["deal"], 0);

        assert_eq!(opps[0].context_before, "b");
        assert_eq!(opps[0].context_after, "c");
    }

    #[test]
    fn test_grouped_by_keyword_input_order() {
        let opps = extractor()
            .extract_at("deal budget deal budget", &["budget", "deal"], 0);

        let keywords: Vec<&str> = opps.iter().map(|o| o.keyword.as_str()).collect();
        assert_eq!(keywords, vec!["budget", "budget", "deal", "deal"]);
        assert_eq!(opps[0].context_before, "deal");
        assert_eq!(opps[2].context_before, "");
    }

    #[test]
    fn test_overlapping_keywords_hit_same_token() {
        let opps = extractor()
            .extract_at("the proposal arrived", &["pro", "proposal"], 0);

        assert_eq!(opps.len(), 2);
        assert_eq!(opps[0].keyword, "pro");
        assert_eq!(opps[1].keyword, "proposal");
        assert_eq!(opps[0].context_before, opps[1].context_before);
        assert_eq!(opps[0].context_after, opps[1].context_after);
        assert_ne!(opps[0].id, opps[1].id);
    }

    #[test]
    fn test_duplicate_keywords_scanned_each_time_by_default() {
        let opps = extractor()
            .extract_at("budget and budget", &["budget", "Budget"], 0);

        let seen: Vec<(&str, usize)> = opps
            .iter()
            .map(|o| (o.keyword.as_str(), o.occurrence))
            .collect();
        assert_eq!(
            seen,
            vec![("budget", 1), ("budget", 2), ("Budget", 1), ("Budget", 2)]
        );
    }

    #[test]
    fn test_duplicate_keywords_deduplicated() {
        let extractor = OpportunityExtractor::new(ExtractorConfig::deduplicating());
        assert_eq!(extractor.config().keyword_policy, KeywordPolicy::Dedupe);

        let opps = extractor
            .extract_at("budget and budget", &["budget", "BUDGET", "and"], 0);

        let seen: Vec<(&str, usize)> = opps
            .iter()
            .map(|o| (o.keyword.as_str(), o.occurrence))
            .collect();
        assert_eq!(seen, vec![("budget", 1), ("budget", 2), ("and", 1)]);
    }

    #[test]
    fn test_rerun_is_structurally_identical() {
        let transcript = "pricing came up twice: pricing and then the renewal";
        let keywords = ["pricing", "renewal"];
        let first = extractor().extract_at(transcript, &keywords, 1);
        let second = extractor().extract_at(transcript, &keywords, 2);

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            assert!(a.same_content(b));
            assert_ne!(a.id, b.id);
        }
    }

    // Pipeline

    fn recording(id: &str) -> RecordingId {
        RecordingId::new(id).unwrap()
    }

    fn request(keywords: &[&str]) -> IngestRequest {
        IngestRequest {
            recording_id: recording("call-001"),
            audio: vec![0u8; 16],
            mime_type: "audio/wav".to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn test_ingest_persists_opportunities() {
        let transcriber = MockProvider::default()
            .with_transcript("The client asked about pricing and the pricing tiers");
        let store = SqliteStore::new(":memory:").unwrap();
        let pipeline =
            IngestPipeline::new(transcriber, store, ExtractorConfig::default()).unwrap();

        let result = pipeline.ingest(request(&["pricing"])).await.unwrap();

        assert_eq!(result.opportunities.len(), 2);
        assert_eq!(result.ids.len(), 2);
        assert_eq!(result.summary.count_for("pricing"), 2);

        let store = pipeline.store();
        let stored = store
            .lock()
            .unwrap()
            .list_opportunities(&recording("call-001"))
            .unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].id, result.ids[0]);
        assert_eq!(stored[0].recording_id, Some(recording("call-001")));
        assert_eq!(stored[1].occurrence, 2);
    }

    #[tokio::test]
    async fn test_ingest_without_hits_skips_store() {
        let transcriber = MockProvider::default().with_transcript("nothing relevant here");
        let store = SqliteStore::new(":memory:").unwrap();
        let pipeline =
            IngestPipeline::new(transcriber, store, ExtractorConfig::default()).unwrap();

        let result = pipeline.ingest(request(&["pricing"])).await.unwrap();
        assert!(result.opportunities.is_empty());
        assert!(result.ids.is_empty());
        assert_eq!(result.transcript, "nothing relevant here");
    }

    #[tokio::test]
    async fn test_ingest_transcription_failure() {
        let transcriber = MockProvider::default().with_transcription_error("service down");
        let store = SqliteStore::new(":memory:").unwrap();
        let pipeline =
            IngestPipeline::new(transcriber, store, ExtractorConfig::default()).unwrap();

        let result = pipeline.ingest(request(&["pricing"])).await;
        match result {
            Err(ExtractorError::Transcription(msg)) => assert!(msg.contains("service down")),
            other => panic!("Expected transcription error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_ingest_transcription_timeout() {
        let transcriber = MockProvider::default()
            .with_transcript("late")
            .with_delay(Duration::from_millis(1500));
        let store = SqliteStore::new(":memory:").unwrap();
        let config = ExtractorConfig {
            transcription_timeout_secs: 1,
            ..ExtractorConfig::default()
        };
        let pipeline = IngestPipeline::new(transcriber, store, config).unwrap();

        let result = pipeline.ingest(request(&["late"])).await;
        assert!(matches!(result, Err(ExtractorError::Timeout)));
    }

    #[tokio::test]
    async fn test_ingest_uses_suggested_keywords() {
        let transcriber = MockProvider::default()
            .with_transcript("renewal is due and the renewal price went up");
        let suggester = LlmKeywordSuggester::new(MockProvider::new(r#"["renewal", "price"]"#));
        let store = SqliteStore::new(":memory:").unwrap();
        let pipeline = IngestPipeline::new(transcriber, store, ExtractorConfig::default())
            .unwrap()
            .with_suggester(suggester);

        let result = pipeline.ingest(request(&[])).await.unwrap();

        assert_eq!(result.keywords, vec!["renewal".to_string(), "price".to_string()]);
        assert_eq!(result.summary.count_for("renewal"), 2);
        assert_eq!(result.summary.count_for("price"), 1);
    }

    #[tokio::test]
    async fn test_no_keywords_and_no_suggester() {
        let transcriber = MockProvider::default().with_transcript("some words");
        let store = SqliteStore::new(":memory:").unwrap();
        let pipeline =
            IngestPipeline::new(transcriber, store, ExtractorConfig::default()).unwrap();

        let result = pipeline.ingest(request(&[])).await.unwrap();
        assert!(result.keywords.is_empty());
        assert!(result.opportunities.is_empty());
    }

    #[test]
    fn test_pipeline_rejects_invalid_config() {
        let config = ExtractorConfig {
            transcription_timeout_secs: 0,
            ..ExtractorConfig::default()
        };
        let result = IngestPipeline::new(
            MockProvider::default(),
            SqliteStore::new(":memory:").unwrap(),
            config,
        );
        assert!(matches!(result, Err(ExtractorError::Config(_))));
    }
}

#[cfg(test)]
mod proptests {
    use crate::{ExtractorConfig, OpportunityExtractor};
    use proptest::prelude::*;

    const WINDOW: usize = 15;

    fn transcript_strategy() -> impl Strategy<Value = String> {
        prop::collection::vec(
            (
                prop::sample::select(vec![
                    "budget", "Budget", "deal", "ideal", "pro", "proposal", "the", "and", "x",
                ]),
                prop::sample::select(vec![" ", "  ", "\t", "\n"]),
            ),
            0..60,
        )
        .prop_map(|parts| {
            parts
                .into_iter()
                .map(|(word, sep)| format!("{}{}", word, sep))
                .collect()
        })
    }

    fn keywords_strategy() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec(
            prop::sample::select(vec!["budget", "DEAL", "pro", "an", "zzz"]).prop_map(String::from),
            0..4,
        )
    }

    /// Token positions containing `keyword`, computed without the crate's tokenizer
    fn positions(transcript: &str, keyword: &str) -> Vec<usize> {
        let needle = keyword.to_lowercase();
        transcript
            .to_lowercase()
            .split_whitespace()
            .enumerate()
            .filter(|(_, token)| token.contains(needle.as_str()))
            .map(|(i, _)| i)
            .collect()
    }

    proptest! {
        /// Hits per keyword equal the tokens containing it
        #[test]
        fn test_count_matches_token_scan(transcript in transcript_strategy(), keywords in keywords_strategy()) {
            let opps = OpportunityExtractor::new(ExtractorConfig::default())
                .extract_at(&transcript, &keywords, 0);

            let expected: usize = keywords.iter().map(|k| positions(&transcript, k).len()).sum();
            prop_assert_eq!(opps.len(), expected);
        }

        /// Occurrences run 1, 2, 3... within each keyword group, groups in input order
        #[test]
        fn test_occurrence_ordering(transcript in transcript_strategy(), keywords in keywords_strategy()) {
            let opps = OpportunityExtractor::new(ExtractorConfig::default())
                .extract_at(&transcript, &keywords, 0);

            let mut offset = 0;
            for keyword in &keywords {
                let hits = positions(&transcript, keyword).len();
                for (i, opp) in opps[offset..offset + hits].iter().enumerate() {
                    prop_assert_eq!(&opp.keyword, keyword);
                    prop_assert_eq!(opp.occurrence, i + 1);
                }
                offset += hits;
            }
        }

        /// Windows are clipped at the edges, never padded, never wider than 15
        #[test]
        fn test_window_bounds(transcript in transcript_strategy(), keywords in keywords_strategy()) {
            let opps = OpportunityExtractor::new(ExtractorConfig::default())
                .extract_at(&transcript, &keywords, 0);
            let total = transcript.split_whitespace().count();

            let mut offset = 0;
            for keyword in &keywords {
                let hits = positions(&transcript, keyword);
                for (opp, &pos) in opps[offset..offset + hits.len()].iter().zip(&hits) {
                    prop_assert_eq!(opp.context_before.split_whitespace().count(), pos.min(WINDOW));
                    prop_assert_eq!(
                        opp.context_after.split_whitespace().count(),
                        (total - pos - 1).min(WINDOW)
                    );
                }
                offset += hits.len();
            }
        }

        /// The bold keyword sits between the two lowercased halves
        #[test]
        fn test_full_context_shape(transcript in transcript_strategy(), keywords in keywords_strategy()) {
            let opps = OpportunityExtractor::new(ExtractorConfig::default())
                .extract_at(&transcript, &keywords, 0);

            for opp in &opps {
                prop_assert_eq!(
                    &opp.full_context,
                    &format!("{} **{}** {}", opp.context_before, opp.keyword, opp.context_after)
                );
                prop_assert_eq!(opp.context_before.to_lowercase(), opp.context_before.clone());
                prop_assert_eq!(opp.context_after.to_lowercase(), opp.context_after.clone());
            }
        }

        /// Two runs differ only in id, label and timestamp
        #[test]
        fn test_idempotent_up_to_timestamp(transcript in transcript_strategy(), keywords in keywords_strategy()) {
            let extractor = OpportunityExtractor::new(ExtractorConfig::default());
            let first = extractor.extract_at(&transcript, &keywords, 100);
            let second = extractor.extract_at(&transcript, &keywords, 200);

            prop_assert_eq!(first.len(), second.len());
            for (a, b) in first.iter().zip(&second) {
                prop_assert!(a.same_content(b));
            }
        }
    }
}
