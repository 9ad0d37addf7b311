// src/lib.rs
pub mod colors;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod tty;

pub use error::*;
pub use pipeline::*;

pub use colors::{Colorizer, LevelStyle};
