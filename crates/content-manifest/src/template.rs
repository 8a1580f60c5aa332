//! Default build blocks for newly discovered assets.
//!
//! Every [`Category`] has exactly one template: the importer, processor and
//! processor parameters MonoGame needs to build that kind of asset. A
//! synthesized entry is always `#begin <name>`, the template directives in
//! order, then `/build:<name>`.

use crate::category::Category;
use crate::manifest::{ManifestEntry, BEGIN_DIRECTIVE};

const EFFECT: &[&str] = &[
    "/importer:EffectImporter",
    "/processor:EffectProcessor",
    "/processorParam:DebugMode=Auto",
];

const SPRITE_FONT: &[&str] = &[
    "/importer:FontDescriptionImporter",
    "/processor:FontDescriptionProcessor",
    "/processorParam:PremultiplyAlpha=True",
    "/processorParam:TextureFormat=Compressed",
];

const TEXTURE_2D: &[&str] = &[
    "/importer:TextureImporter",
    "/processor:TextureProcessor",
    "/processorParam:ColorKeyColor=255,0,255,255",
    "/processorParam:ColorKeyEnabled=True",
    "/processorParam:GenerateMipmaps=False",
    "/processorParam:PremultiplyAlpha=True",
    "/processorParam:ResizeToPowerOfTwo=False",
    "/processorParam:MakeSquare=False",
    "/processorParam:TextureFormat=Color",
];

const SONG: &[&str] = &[
    "/importer:Mp3Importer",
    "/processor:SongProcessor",
    "/processorParam:Quality=Best",
];

const SOUND_EFFECT: &[&str] = &[
    "/importer:WavImporter",
    "/processor:SoundEffectProcessor",
    "/processorParam:Quality=Best",
];

/// Synthesizes manifest entries for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryBuilder {
    category: Category,
    directives: &'static [&'static str],
}

impl EntryBuilder {
    pub fn category(&self) -> Category {
        self.category
    }

    /// The importer/processor directives placed between `#begin` and `/build`.
    pub fn directives(&self) -> &'static [&'static str] {
        self.directives
    }

    /// Build the default entry for `name` (e.g. `Texture2D/tiles.png`).
    pub fn build(&self, name: &str) -> ManifestEntry {
        let mut lines = Vec::with_capacity(self.directives.len() + 2);
        lines.push(format!("{BEGIN_DIRECTIVE} {name}"));
        lines.extend(self.directives.iter().map(|d| (*d).to_owned()));
        lines.push(format!("/build:{name}"));
        ManifestEntry::new(name, lines)
    }
}

/// The builder for `category`. Total over the enum.
pub fn builder_for(category: Category) -> EntryBuilder {
    let directives = match category {
        Category::Effect => EFFECT,
        Category::SpriteFont => SPRITE_FONT,
        Category::Texture2D => TEXTURE_2D,
        Category::Song => SONG,
        Category::SoundEffect => SOUND_EFFECT,
    };
    EntryBuilder {
        category,
        directives,
    }
}

/// The builder for a category given by directory name.
///
/// Fails with [`ManifestError::UnsupportedCategory`](crate::ManifestError::UnsupportedCategory)
/// for names outside the supported set.
pub fn builder_for_name(name: &str) -> crate::Result<EntryBuilder> {
    Category::from_dir_name(name).map(builder_for)
}
