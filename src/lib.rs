//! VoiceRemote - voice control for media playback surfaces
//!
//! This crate keeps a continuous speech-recognition session alive across
//! transient failures, parses finalized transcripts into typed commands,
//! and executes them against a local media surface or a remotely resolved
//! browsing context.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Command grammar, time-expression parser, session state
//!   machine, restart policy, and configuration value objects
//! - **Application**: Use cases (listening controller, command dispatcher,
//!   target resolver) and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (channel-driven engine
//!   stand-in, virtual player, loopback transport, XDG stores, console
//!   feedback)
//! - **CLI**: Command-line interface, argument parsing, and the
//!   interactive session loop

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
