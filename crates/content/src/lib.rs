pub mod card;
pub mod deck;
pub mod error;
pub mod field;
pub mod grid;
pub mod markup;
pub mod selection;
pub mod serialization;
pub mod tag;

pub use card::{Card, CardType, ContentContext, ContentKind, Edge, FieldDef, PresenterKind};
pub use deck::{Deck, DeckEntry};
pub use error::ContentError;
pub use field::{Field, FieldContent, Paragraph, Table, TextField};
pub use grid::{AreaOfEffect, Cell};
pub use markup::{Interpolation, Markup, Shorthand};
pub use selection::{Restriction, Selection};
pub use tag::{Tag, TagField, TagRoster};
