//! Text rendering shared by messages and encoders: printf-style substitution
//! and the short duration form.

pub mod duration;
pub mod printf;

pub use printf::{sprintf, sprintln};
