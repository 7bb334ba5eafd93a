//! In-memory session accumulation for Viva.
//!
//! One `SessionStore` holds everything produced during a run: generated
//! questions, Q&A exchanges, and practice exchanges. Persistence happens
//! only through explicit export.

pub mod store;

pub use store::SessionStore;
