pub mod clip;
pub mod config;
pub mod landing;
pub mod region;
pub mod scroll_scene;
pub mod signal;
