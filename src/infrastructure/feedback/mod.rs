//! User feedback adapters

pub mod console;

pub use console::ConsoleFeedback;
