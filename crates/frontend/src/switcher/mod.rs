pub mod boot;
pub mod dom;
pub mod model;

pub use boot::boot;
pub use dom::TabSwitcher;
pub use model::{Activatable, SwitchError, SwitchReport, Switchboard};
