//! Caller-provided colors and the memoizing taxonomy/sequence colorer.

use crate::color::derive::{DerivationMode, derive_color};
use crate::color::rgb::Rgb;
use crate::model::{Sequence, Taxonomy};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =#========================================================================#=
// PALETTE
// =#========================================================================#=
/// Colors an engine caller configures.
///
/// Serializes colors as `"#rrggbb"` strings; missing fields take their
/// defaults, so a partial configuration such as `{"branch": "#00ff00"}` is
/// valid.
///
/// # Example
/// ```
/// use cladetint::color::{Palette, Rgb};
///
/// let palette = Palette::default().with_branch(Rgb::new(0, 255, 0));
/// assert_eq!(palette.background, Rgb::BLACK);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Start color of confidence interpolation (confidence 0)
    pub background: Rgb,
    /// End color of confidence interpolation (maximal confidence)
    pub branch: Rgb,
    /// Color of taxonomies with neither code nor scientific name
    pub taxonomy: Rgb,
    /// Color of sequences without name
    pub sequence: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            background: Rgb::BLACK,
            branch: Rgb::WHITE,
            taxonomy: Rgb::new(180, 180, 180),
            sequence: Rgb::new(230, 230, 230),
        }
    }
}

impl Palette {
    /// Sets the background color.
    pub fn with_background(mut self, color: Rgb) -> Self {
        self.background = color;
        self
    }

    /// Sets the branch color.
    pub fn with_branch(mut self, color: Rgb) -> Self {
        self.branch = color;
        self
    }

    /// Sets the fallback taxonomy color.
    pub fn with_taxonomy(mut self, color: Rgb) -> Self {
        self.taxonomy = color;
        self
    }

    /// Sets the fallback sequence color.
    pub fn with_sequence(mut self, color: Rgb) -> Self {
        self.sequence = color;
        self
    }
}

// =#========================================================================#=
// TAXONOMY COLORER
// =#========================================================================#=
/// Resolves colors for taxonomies and sequences.
///
/// Keys are the taxonomy code, else the scientific name, for taxonomies, and
/// the sequence name for sequences. A key first consults the colors assigned
/// by the user, then derives a color with [derive_color] and remembers it.
/// Since derivation is pure, memoization only saves work; the colors do not
/// depend on lookup order.
#[derive(Debug, Clone, Default)]
pub struct TaxonomyColorer {
    palette: Palette,
    colors: HashMap<String, Rgb>,
}

impl TaxonomyColorer {
    /// Creates a colorer without any assigned colors.
    pub fn new(palette: Palette) -> Self {
        TaxonomyColorer {
            palette,
            colors: HashMap::new(),
        }
    }

    /// Returns the palette.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Assigns `color` to `key` (a taxonomy code, scientific name or
    /// sequence name), replacing any derived or previously assigned color.
    pub fn assign_color<S: Into<String>>(&mut self, key: S, color: Rgb) {
        self.colors.insert(key.into(), color);
    }

    /// Returns the color of `taxonomy`: by code if present, else by
    /// scientific name, else the palette's taxonomy color.
    pub fn taxonomy_color(&mut self, taxonomy: &Taxonomy) -> Rgb {
        let key = if !taxonomy.code().is_empty() {
            taxonomy.code()
        } else {
            taxonomy.scientific_name()
        };
        self.lookup(key, DerivationMode::Taxonomy)
            .unwrap_or(self.palette.taxonomy)
    }

    /// Returns the color of `sequence`: by name, else the palette's sequence color.
    pub fn sequence_color(&mut self, sequence: &Sequence) -> Rgb {
        self.lookup(sequence.name(), DerivationMode::Label)
            .unwrap_or(self.palette.sequence)
    }

    fn lookup(&mut self, key: &str, mode: DerivationMode) -> Option<Rgb> {
        if let Some(&color) = self.colors.get(key) {
            return Some(color);
        }
        // Fails for empty keys only
        let color = derive_color(key, mode).ok()?;
        self.colors.insert(key.to_string(), color);
        Some(color)
    }
}
