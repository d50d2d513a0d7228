//! Services layer (ports + adapters).
//!
//! - `ports`: wire contracts and settings types shared with the kernel.
//! - `adapters`: IO/async implementations (settings file, compiler bridge).

pub mod adapters;
pub mod ports;
