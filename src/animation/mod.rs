pub mod binding;
pub mod ease;
pub mod timeline;
pub mod tween;
pub mod value;
