pub mod document;
pub mod element;
pub mod error;
pub mod filter;
pub mod number;
pub mod path;
pub mod shapes;
pub mod transform;
pub mod writer;

pub use document::SvgDocument;
pub use element::Element;
pub use error::SvgError;
pub use filter::{Effect, Filter};
pub use number::rounded;
pub use path::Pathfinder;
pub use transform::Transform;
