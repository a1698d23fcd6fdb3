//! Terminal rendering.

pub mod game_common;
pub mod snake_scene;

pub use snake_scene::{render_snake_scene, SceneView};
