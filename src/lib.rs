//! Card graphics generator: human-readable playing card specifications in,
//! print-ready SVG images out.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;

pub use app::Application;
pub use cli::Cli;
pub use config::GameConfig;
pub use error::CbgError;

pub use cbg_content as content;
pub use cbg_layout as layout;
pub use cbg_style as style;
pub use cbg_svg as svg;
pub use cbg_types as types;
