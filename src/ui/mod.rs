pub mod accordion;
pub mod deck;
pub mod form;
pub mod switcher;
pub mod typing;
