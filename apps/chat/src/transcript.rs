use std::fmt::Write;

/// One submitted query and the answer it got.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatTurn {
    pub query: String,
    pub answer: String,
}

/// Session-local conversation history. Append-only; dropped on exit.
/// Never sent back to the server.
#[derive(Debug, Default)]
pub struct Transcript {
    turns: Vec<ChatTurn>,
}

impl Transcript {
    pub fn push(&mut self, query: impl Into<String>, answer: impl Into<String>) {
        self.turns.push(ChatTurn {
            query: query.into(),
            answer: answer.into(),
        });
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    /// The whole conversation, oldest turn first.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for turn in &self.turns {
            let _ = writeln!(out, "You: {}", turn.query);
            let _ = writeln!(out, "Assistant: {}", turn.answer);
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_transcript_renders_nothing() {
        assert_eq!(Transcript::default().render(), "");
    }

    #[test]
    fn test_render_keeps_submission_order() {
        let mut transcript = Transcript::default();
        transcript.push("Find Python devs with 3+ years", "Asha fits.");
        transcript.push("Who has worked on healthcare projects?", "Chen.");

        assert_eq!(
            transcript.render(),
            "You: Find Python devs with 3+ years\nAssistant: Asha fits.\n\n\
             You: Who has worked on healthcare projects?\nAssistant: Chen.\n\n"
        );
        assert_eq!(transcript.turns().len(), 2);
        assert_eq!(transcript.turns()[0].answer, "Asha fits.");
    }
}
