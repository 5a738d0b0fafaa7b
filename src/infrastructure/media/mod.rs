//! Media surface adapters

pub mod virtual_player;

pub use virtual_player::VirtualPlayer;
