pub mod scrub;
pub mod source;
pub mod trigger;
