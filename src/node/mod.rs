pub mod describe;
pub mod render;
pub mod types;

pub use render::NULL_DEVICE;
pub use types::{Command, Node, Redirect, RedirectMode};
