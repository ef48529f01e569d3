//! Pulse engine crate.
//!
//! Owns the resize-aware render scheduling core: viewport tracking, the frame
//! loop, and the glue that binds both to a render surface and an external
//! render routine. With the `native` feature it also owns the `winit` runtime
//! and the `wgpu` presenter used by the studio binary.

pub mod config;
pub mod coords;
pub mod error;
pub mod host;
pub mod render;
pub mod schedule;
pub mod surface;
pub mod time;
pub mod track;

#[cfg(feature = "native")]
pub mod device;
#[cfg(feature = "native")]
pub mod logging;
#[cfg(feature = "native")]
pub mod window;

pub use error::HostError;

#[cfg(test)]
pub(crate) mod testing;
