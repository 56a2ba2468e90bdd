pub mod info_panel;
pub mod quiz;
pub mod search;
pub mod session;

pub use info_panel::*;
pub use quiz::*;
pub use search::*;
pub use session::*;
