//! Host glue.
//!
//! Binds the tracker and the frame loop to one shared [`Stage`] and enforces
//! two-phase startup: the render module is loaded asynchronously through
//! [`Bootstrap`] first, and only the resulting [`ReadyModule`] can be used to
//! construct a [`Host`].

mod bootstrap;
mod driver;
mod stage;

pub use bootstrap::{Bootstrap, ReadyModule};
pub use driver::Host;
pub use stage::Stage;
