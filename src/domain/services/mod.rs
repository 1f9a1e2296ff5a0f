mod background;
mod config_store;
mod options_page;
mod presentation;
mod session_store;

pub use background::*;
pub use config_store::*;
pub use options_page::*;
pub use presentation::*;
pub use session_store::*;
