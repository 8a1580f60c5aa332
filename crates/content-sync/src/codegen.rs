//! Generation of the C# content index.
//!
//! For every scanned category the index declares a static class holding one
//! string constant per asset and a `Load<Category>s` extension method on
//! `ContentManager` that loads every asset of the category into a dictionary
//! keyed by asset identifier:
//!
//! ```text
//! public static class Texture2Ds
//! {
//!     public const string tiles = "Texture2D/tiles";
//!     public static Dictionary<string, Texture2D> LoadTexture2Ds(this ContentManager content)
//!     {
//!         return new Dictionary<string, Texture2D>
//!         {
//!             ["Texture2D/tiles"] = content.Load<Texture2D>("Texture2D/tiles"),
//!         };
//!     }
//! }
//! ```

use std::collections::HashMap;

use content_manifest::category::Category;
use content_manifest::manifest::LineEnding;

use crate::scanner::{CategoryAssets, ScanResult};

const USINGS: &[&str] = &[
    "using Microsoft.Xna.Framework.Audio;",
    "using Microsoft.Xna.Framework.Content;",
    "using Microsoft.Xna.Framework.Graphics;",
    "using Microsoft.Xna.Framework.Media;",
    "using System.Collections.Generic;",
];

/// Settings for the generated source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodegenOptions {
    /// Namespace enclosing the generated classes.
    pub namespace: String,
    pub line_ending: LineEnding,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self {
            namespace: "Content".to_owned(),
            line_ending: LineEnding::default(),
        }
    }
}

/// Turn a file base name into a constant name: every character that is not
/// alphanumeric or `_` becomes `_`.
pub fn sanitize_identifier(base_name: &str) -> String {
    base_name
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Render the content index for every scanned category.
///
/// Categories appear in [`Category::ALL`] order; categories that were not
/// scanned are left out, scanned but empty ones produce an empty class.
pub fn generate(scan: &ScanResult, options: &CodegenOptions) -> String {
    let mut out = SourceWriter::new(options.line_ending);

    for using in USINGS {
        out.line(0, using);
    }
    out.blank();
    out.line(0, &format!("namespace {}", options.namespace));
    out.line(0, "{");
    for category in Category::ALL {
        if let Some(group) = scan.group(category) {
            write_category(&mut out, group);
        }
    }
    out.line(0, "}");

    out.finish()
}

fn write_category(out: &mut SourceWriter, group: &CategoryAssets) {
    let ty = group.category.type_name();

    out.line(1, &format!("public static class {ty}s"));
    out.line(1, "{");

    let mut constants: HashMap<String, &str> = HashMap::new();
    for asset in &group.assets {
        let constant = sanitize_identifier(&asset.base_name);
        if let Some(previous) = constants.insert(constant.clone(), &asset.full_name) {
            tracing::warn!(
                constant = %constant,
                first = %previous,
                second = %asset.full_name,
                "assets map to the same constant name"
            );
        }
        out.line(
            2,
            &format!("public const string {constant} = {};", string_literal(&asset.identifier)),
        );
    }

    out.line(
        2,
        &format!("public static Dictionary<string, {ty}> Load{ty}s(this ContentManager content)"),
    );
    out.line(2, "{");
    out.line(3, &format!("return new Dictionary<string, {ty}>"));
    out.line(3, "{");
    for asset in &group.assets {
        let id = string_literal(&asset.identifier);
        out.line(4, &format!("[{id}] = content.Load<{ty}>({id}),"));
    }
    out.line(3, "};");
    out.line(2, "}");
    out.line(1, "}");
}

/// A C# regular string literal.
///
/// Control characters and the Unicode line separators, which C# does not
/// allow unescaped in a regular literal, become `\uXXXX`.
fn string_literal(value: &str) -> String {
    let mut lit = String::with_capacity(value.len() + 2);
    lit.push('"');
    for c in value.chars() {
        match c {
            '"' => lit.push_str("\\\""),
            '\\' => lit.push_str("\\\\"),
            '\n' => lit.push_str("\\n"),
            '\r' => lit.push_str("\\r"),
            '\t' => lit.push_str("\\t"),
            c if c.is_control() || c == '\u{2028}' || c == '\u{2029}' => {
                lit.push_str(&format!("\\u{:04X}", c as u32));
            }
            _ => lit.push(c),
        }
    }
    lit.push('"');
    lit
}

/// Tab-indented line accumulator.
struct SourceWriter {
    buf: String,
    nl: &'static str,
}

impl SourceWriter {
    fn new(line_ending: LineEnding) -> Self {
        Self {
            buf: String::new(),
            nl: line_ending.as_str(),
        }
    }

    fn line(&mut self, indent: usize, text: &str) {
        for _ in 0..indent {
            self.buf.push('\t');
        }
        self.buf.push_str(text);
        self.buf.push_str(self.nl);
    }

    fn blank(&mut self) {
        self.buf.push_str(self.nl);
    }

    fn finish(self) -> String {
        self.buf
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
