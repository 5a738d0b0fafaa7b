//! Remote-context transport adapters

pub mod loopback;

pub use loopback::LoopbackTransport;
