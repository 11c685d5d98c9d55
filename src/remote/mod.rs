//! remote
//!
//! Abstraction for the remote publishing service.
//!
//! # Architecture
//!
//! The [`Publisher`] trait defines the interface for the articles API.
//! The publish pipeline is invoked only after local change-set resolution
//! succeeds, and publisher failures never compromise local correctness: a
//! failed call terminates that document's transaction and the batch moves
//! on.
//!
//! # Modules
//!
//! - `traits`: Core `Publisher` trait, payload, and response types
//! - [`devto`]: HTTP implementation against a dev.to-style articles API
//! - [`mock`]: Mock implementation for deterministic testing

pub mod devto;
pub mod mock;
mod traits;

pub use devto::DevtoClient;
pub use traits::*;
