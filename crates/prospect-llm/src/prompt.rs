//! Prompt construction for transcript questions and keyword suggestion

/// Builds the prompt for answering a question about a transcript
pub struct AnswerPrompt<'a> {
    question: &'a str,
    context: &'a str,
    keywords: &'a [String],
}

impl<'a> AnswerPrompt<'a> {
    /// Create a new answer prompt
    pub fn new(question: &'a str, context: &'a str, keywords: &'a [String]) -> Self {
        Self {
            question,
            context,
            keywords,
        }
    }

    /// Build the complete prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str(ANSWER_INSTRUCTIONS);
        prompt.push_str("\n\n");

        if !self.keywords.is_empty() {
            prompt.push_str("Keywords the user is tracking: ");
            prompt.push_str(&self.keywords.join(", "));
            prompt.push_str("\n\n");
        }

        prompt.push_str("Transcript:\n");
        prompt.push_str("---\n");
        prompt.push_str(self.context);
        prompt.push_str("\n---\n\n");

        prompt.push_str("Question: ");
        prompt.push_str(self.question.trim());
        prompt.push('\n');

        prompt
    }
}

/// Builds the prompt asking for keywords worth tracking
pub struct KeywordPrompt<'a> {
    transcript: &'a str,
    max_keywords: usize,
}

impl<'a> KeywordPrompt<'a> {
    /// Create a new keyword prompt
    pub fn new(transcript: &'a str, max_keywords: usize) -> Self {
        Self {
            transcript,
            max_keywords,
        }
    }

    /// Build the complete prompt
    pub fn build(&self) -> String {
        format!(
            "{}\nReturn at most {} keywords.\n\nTranscript:\n---\n{}\n---\n\n{}",
            KEYWORD_INSTRUCTIONS, self.max_keywords, self.transcript, KEYWORD_FORMAT_REMINDER
        )
    }
}

const ANSWER_INSTRUCTIONS: &str = "You are a business analyst reviewing a meeting transcript. \
Answer the question using only the transcript below. If the transcript does not contain \
the answer, say so. Be concise.";

const KEYWORD_INSTRUCTIONS: &str = "Identify short keywords in this transcript that signal \
business opportunities (products, budgets, deadlines, competitors, decisions). \
Each keyword must be a single word that appears in the transcript.";

const KEYWORD_FORMAT_REMINDER: &str = "Respond with a JSON array of strings only, \
for example: [\"budget\", \"renewal\"]";
