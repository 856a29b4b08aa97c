pub mod config;
pub mod cursor;
pub mod error;
pub mod image;
pub mod layouter;
pub mod presenter;
pub mod wrap;

pub use self::config::{LayoutConfig, LayoutMode};
pub use self::cursor::{Cursor, Direction};
pub use self::error::LayoutError;
pub use self::image::{Image, Subject};
pub use self::layouter::{FanGeometry, Layouter};
pub use self::presenter::{Side, Wardrobes, present_card};

#[cfg(test)]
mod test_utils;
