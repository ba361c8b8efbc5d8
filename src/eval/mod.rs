pub mod diff;
pub mod engine;
pub mod selector;
pub mod steps;
