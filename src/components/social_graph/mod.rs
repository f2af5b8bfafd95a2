mod component;
pub mod reconcile;
mod render;
mod simulation;
mod state;
mod style;
mod tween;
mod types;
mod viewport;

pub use component::{SocialGraphCanvas, open_profile};
pub use types::{GraphData, NodeScope};
