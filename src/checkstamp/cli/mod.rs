//! Terminal front end: message printing and the in-place progress line.

pub mod print;
pub mod progress;
