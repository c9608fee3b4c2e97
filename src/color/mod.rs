//! Branch colors: the [Rgb] value type, deterministic derivation of colors
//! from strings, and the caller's [Palette].

pub mod derive;
pub mod palette;
pub mod rgb;

pub use derive::{DerivationMode, derive_color};
pub use palette::{Palette, TaxonomyColorer};
pub use rgb::Rgb;
