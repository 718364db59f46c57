//! Consumers of chart geometry.
//!
//! Styling lives here, applied after geometry is computed; nothing in this
//! module feeds back into the layout.

pub mod svg;
#[cfg(feature = "terminal")]
pub mod terminal;
