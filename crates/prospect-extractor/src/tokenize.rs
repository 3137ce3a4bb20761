//! Transcript tokenization and context windows

/// Lowercased, whitespace-split view of a transcript
///
/// Original casing and spacing are gone; context is always rebuilt by joining
/// these tokens with single spaces.
pub struct TokenizedTranscript {
    tokens: Vec<String>,
}

impl TokenizedTranscript {
    /// Lowercase the transcript and split it on whitespace runs
    pub fn new(transcript: &str) -> Self {
        let tokens = transcript
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect();
        Self { tokens }
    }

    /// Number of tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True for an empty or whitespace-only transcript
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Positions of tokens containing `needle`, left to right
    ///
    /// `needle` must already be lowercase.
    pub fn positions_containing<'a>(&'a self, needle: &'a str) -> impl Iterator<Item = usize> + 'a {
        self.tokens
            .iter()
            .enumerate()
            .filter(move |(_, token)| token.contains(needle))
            .map(|(i, _)| i)
    }

    /// Context around the token at `index`, clipped at both ends
    ///
    /// Returns `(before, after)`, each at most `window` tokens joined by spaces.
    pub fn context(&self, index: usize, window: usize) -> (String, String) {
        let start = index.saturating_sub(window);
        let end = index
            .saturating_add(window)
            .saturating_add(1)
            .min(self.tokens.len());
        let before = self.tokens[start..index].join(" ");
        let after = self.tokens[index + 1..end].join(" ");
        (before, after)
    }
}
