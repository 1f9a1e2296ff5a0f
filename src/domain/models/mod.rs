mod credential;
mod event;
mod explainer;
mod host;
mod menu;
mod popup;
mod prompt;
mod session;
mod storage;
mod window;

pub use credential::*;
pub use event::*;
pub use explainer::*;
pub use host::*;
pub use menu::*;
pub use popup::*;
pub use prompt::*;
pub use session::*;
pub use storage::*;
pub use window::*;
