pub mod color;
pub mod error;
pub mod geometry;
pub mod ids;
pub mod size;

pub use color::{Color, Paint};
pub use error::TypesError;
pub use geometry::{Corner, EdgePoint, Point, PointList, Rectangle};
pub use ids::{ElementId, IdGenerator};
pub use size::{CardSize, FontSize, PageSize};
