//! Asset categories recognised by the content pipeline.
//!
//! Each [`Category`] corresponds to exactly one directory directly under the
//! content root and to one runtime resource type of the same name
//! (`Texture2D` files load as `Texture2D`, and so on).

use std::fmt;
use std::str::FromStr;

use crate::ManifestError;

/// A kind of asset with its own source directory and build template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Effect,
    Song,
    SoundEffect,
    SpriteFont,
    Texture2D,
}

impl Category {
    /// Every category, in the stable order used for scanning and code generation.
    ///
    /// The order is alphabetical by directory name.
    pub const ALL: [Category; 5] = [
        Category::Effect,
        Category::Song,
        Category::SoundEffect,
        Category::SpriteFont,
        Category::Texture2D,
    ];

    /// The directory name under the content root.
    pub fn dir_name(self) -> &'static str {
        match self {
            Category::Effect => "Effect",
            Category::Song => "Song",
            Category::SoundEffect => "SoundEffect",
            Category::SpriteFont => "SpriteFont",
            Category::Texture2D => "Texture2D",
        }
    }

    /// The runtime resource type the category's assets load as.
    pub fn type_name(self) -> &'static str {
        self.dir_name()
    }

    /// Look up a category by its directory name.
    pub fn from_dir_name(name: &str) -> crate::Result<Self> {
        Category::ALL
            .into_iter()
            .find(|c| c.dir_name() == name)
            .ok_or_else(|| ManifestError::UnsupportedCategory {
                name: name.to_owned(),
            })
    }

    /// The category an entry name such as `Texture2D/tiles.png` belongs to,
    /// if its leading path segment names one.
    pub fn of_entry_name(entry_name: &str) -> Option<Self> {
        let (prefix, _) = entry_name.split_once('/')?;
        Category::from_dir_name(prefix).ok()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

impl FromStr for Category {
    type Err = ManifestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::from_dir_name(s)
    }
}
