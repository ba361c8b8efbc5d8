pub mod choreo;
pub mod health;
