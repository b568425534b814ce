pub mod diff;
pub mod eval;
pub mod input;
