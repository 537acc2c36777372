//! pz-state: designer session, configuration and persistence
//!
//! [`FilterDesigner`] is the object a host application owns. Design files and
//! signals are plain CSV; the configuration is JSON.

mod config;
mod designer;
mod filter_file;
mod signal_file;

pub use config::*;
pub use designer::*;
pub use filter_file::*;
pub use signal_file::*;
