//! Request middleware.
//!
//! Purpose: request lifecycle concerns that sit outside handlers, currently
//! trace-id correlation and completion logging.

pub mod trace;

pub use trace::Trace;
