pub mod error;
pub mod font;
pub mod mode;
pub mod parsers;
pub mod samples;
pub mod wardrobe;

pub use error::StyleError;
pub use font::{Anchor, Font, FontStyle, FontVariant, FontWeight};
pub use mode::{Mode, ModeOverride};
pub use wardrobe::Wardrobe;
