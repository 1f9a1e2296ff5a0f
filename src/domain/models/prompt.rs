#[cfg(test)]
#[path = "prompt_test.rs"]
mod tests;

pub struct ExplainPrompt {
    pub text: String,
}

impl ExplainPrompt {
    /// Wraps the selection, verbatim, in an instruction asking for a plain
    /// language explanation.
    pub fn new(selection: &str) -> ExplainPrompt {
        let text = format!(
            r#"Explain the following text in simple, clear terms, as if you were explaining it to a 15-year-old. Focus on the core concepts and avoid jargon.

Text to explain:
---
"{selection}"
---

Simplified Explanation:"#
        );

        return ExplainPrompt { text };
    }
}
