pub mod check;
pub mod discover;
pub mod resolve;
