use anyhow::Result;
use async_trait::async_trait;

pub type WindowId = i64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum WindowKind {
    Normal,
    Popup,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WindowOptions {
    pub url: String,
    pub kind: WindowKind,
    pub width: u32,
    pub height: u32,
}

impl WindowOptions {
    pub fn popup() -> WindowOptions {
        return WindowOptions {
            url: "popup.html".to_string(),
            kind: WindowKind::Popup,
            width: 450,
            height: 500,
        };
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Window {
    pub id: WindowId,
    pub options: WindowOptions,
    pub focused: bool,
}

#[async_trait]
pub trait Windows {
    async fn create(&self, options: &WindowOptions) -> Result<WindowId>;

    /// Looks a window up by id. Returns `None` once the window has been
    /// closed.
    async fn get(&self, id: WindowId) -> Result<Option<Window>>;

    async fn focus(&self, id: WindowId) -> Result<()>;
}
