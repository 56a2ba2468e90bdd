pub mod camera;
pub mod config;
pub mod globe;
pub mod interaction;
pub mod markers;
pub mod picking;
pub mod render;
pub mod rotation;

pub use camera::*;
pub use config::*;
pub use globe::*;
pub use interaction::*;
pub use markers::*;
pub use picking::*;
pub use render::*;
pub use rotation::*;
