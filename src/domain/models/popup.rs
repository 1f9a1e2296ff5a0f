#[cfg(test)]
#[path = "popup_test.rs"]
mod tests;

use super::SessionRecord;

/// What the popup window currently shows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PopupView {
    pub original_text: String,
    pub explanation: String,
    pub loader_visible: bool,
    pub explanation_visible: bool,
}

impl PopupView {
    /// Applies a full session record to the view. Empty text fields leave the
    /// previous content in place, only the visibility of the loader and the
    /// explanation is always recomputed.
    pub fn apply(&mut self, record: &SessionRecord) {
        if !record.original_text.is_empty() {
            self.original_text = record.original_text.to_string();
        }

        self.loader_visible = record.is_loading;
        self.explanation_visible = !record.is_loading;

        if !record.explanation.is_empty() {
            self.explanation = record.explanation.to_string();
        }
    }

    /// The explanation as markup. Provider text is trusted and inserted as is,
    /// newlines become line breaks.
    pub fn explanation_html(&self) -> String {
        return self.explanation.replace('\n', "<br>");
    }

    /// True once a finished explanation is on screen.
    pub fn is_settled(&self) -> bool {
        return self.explanation_visible && !self.explanation.is_empty();
    }
}
