//! Compiles a declarative jsnlog configuration (global options, appenders,
//! loggers) into the inline script that configures the client-side `JL`
//! library when a page loads.
//!
//! ```text
//! Configuration ──► render::compile ──► "<script ...>JL.setOptions(...)...</script>"
//!                        │
//!                        ├─ value    (validate + convert raw texts)
//!                        ├─ json     (ordered option objects, setOptions)
//!                        └─ element  (appenders, then loggers)
//! ```

pub mod config;
pub mod element;
pub mod error;
pub mod json;
pub mod render;
pub mod value;

pub use config::Configuration;
pub use error::{CompileError, ValueError};
pub use render::{CompileOptions, compile};
pub use value::{AppRoot, Identity, PathResolver};

pub type Result<T> = anyhow::Result<T>;
