use super::PopupView;

/// Everything the terminal front end reacts to.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    HostEventFailed(String),
    OptionsPageOpened(),
    PopupRendered(PopupView),
}
