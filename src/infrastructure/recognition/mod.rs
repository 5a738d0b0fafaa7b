//! Recognition engine adapters

pub mod channel;

pub use channel::ChannelRecognizer;
