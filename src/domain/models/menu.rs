pub const EXPLAIN_MENU_ITEM_ID: &str = "explain-with-ai-buddy";

/// Where the host shows a menu item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum MenuContext {
    Selection,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuItem {
    pub id: String,
    pub title: String,
    pub contexts: Vec<MenuContext>,
}

impl MenuItem {
    pub fn explain() -> MenuItem {
        return MenuItem {
            id: EXPLAIN_MENU_ITEM_ID.to_string(),
            title: "Explain with AI Buddy".to_string(),
            contexts: vec![MenuContext::Selection],
        };
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuClick {
    pub menu_item_id: String,
    pub selection_text: Option<String>,
}

impl MenuClick {
    pub fn new(menu_item_id: &str, selection_text: Option<&str>) -> MenuClick {
        return MenuClick {
            menu_item_id: menu_item_id.to_string(),
            selection_text: selection_text.map(|text| return text.to_string()),
        };
    }

    /// Returns the selected text when the click is on the explain item and
    /// something was actually selected.
    pub fn explain_selection(&self) -> Option<&str> {
        if self.menu_item_id != EXPLAIN_MENU_ITEM_ID {
            return None;
        }

        return self
            .selection_text
            .as_deref()
            .filter(|text| return !text.is_empty());
    }
}
