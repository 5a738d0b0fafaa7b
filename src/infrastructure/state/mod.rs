//! Listening-intent persistence adapters

pub mod xdg;

pub use xdg::XdgStateStore;
