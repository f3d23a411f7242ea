use super::RenderError;

use std::fmt::Display;
use std::fs::read_to_string;
use std::path::Path;

/// A named slot in a template
///
/// Spaced placeholders are matched together with one surrounding space on each side (` _ERROR `), and those spaces are
/// consumed by the substitution. Bare placeholders are matched as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder {
    token: &'static str,
    spaced: bool,
}

impl Placeholder {
    pub const fn spaced(token: &'static str) -> Self {
        Self {
            token,
            spaced: true,
        }
    }

    pub const fn bare(token: &'static str) -> Self {
        Self {
            token,
            spaced: false,
        }
    }

    pub fn token(&self) -> &'static str {
        self.token
    }

    /// The exact text replaced in a template
    pub fn pattern(&self) -> String {
        if self.spaced {
            format!(" {} ", self.token)
        } else {
            self.token.to_string()
        }
    }
}

/// Error series coordinates
pub const ERROR: Placeholder = Placeholder::spaced("_ERROR");
/// Space reference curve coordinates
pub const H_COMPARISON: Placeholder = Placeholder::spaced("_H_COMPARISON");
/// Time reference curve coordinates
pub const T_COMPARISON: Placeholder = Placeholder::spaced("_T_COMPARISON");
/// Space-time reference curve coordinates
pub const HT_COMPARISON: Placeholder = Placeholder::spaced("_HT_COMPARISON");
/// Legend of the space reference curve
pub const LHP: Placeholder = Placeholder::spaced("_LHP");
/// Legend of the time reference curve
pub const LTQ: Placeholder = Placeholder::spaced("_LTQ");
/// Legend of the space-time reference curve
pub const LHPTQ: Placeholder = Placeholder::spaced("_LHPTQ");
/// Legend of the error series
pub const LERROR: Placeholder = Placeholder::spaced("_LERROR");
/// Mesh cells, one TikZ path per line
pub const POLYGONS: Placeholder = Placeholder::bare("_POLYGONS");

/// A text document with [Placeholder]s
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    text: String,
}

impl Template {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Read a template from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RenderError> {
        let path = path.as_ref();
        read_to_string(path)
            .map(Self::new)
            .map_err(|source| RenderError::Template {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Built-in pgfplots log-log axis with an error series and its three reference curves
    pub fn loglog() -> Self {
        Self::new(include_str!("../../templates/loglog.tex"))
    }

    /// Built-in TikZ drawing of a space diagram
    pub fn mesh() -> Self {
        Self::new(include_str!("../../templates/mesh.tex"))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn contains(&self, placeholder: Placeholder) -> bool {
        self.text.contains(&placeholder.pattern())
    }

    /// The template without the lines holding any of `placeholders`
    pub fn without(&self, placeholders: &[Placeholder]) -> Self {
        let patterns: Vec<String> = placeholders.iter().map(Placeholder::pattern).collect();

        Self::new(
            self.text
                .split_inclusive('\n')
                .filter(|line| !patterns.iter().any(|pattern| line.contains(pattern.as_str())))
                .collect::<String>(),
        )
    }

    /// Replace every occurrence of each placeholder, in order.
    ///
    /// Placeholders that don't appear in the template are ignored.
    pub fn substitute<'a>(
        &self,
        substitutions: impl IntoIterator<Item = (Placeholder, &'a str)>,
    ) -> String {
        substitutions
            .into_iter()
            .fold(self.text.clone(), |text, (placeholder, value)| {
                text.replace(&placeholder.pattern(), value)
            })
    }
}

/// `(x0, y0) (x1, y1) ...`
pub fn coordinates<X: Display, Y: Display>(points: impl IntoIterator<Item = (X, Y)>) -> String {
    points
        .into_iter()
        .map(|(x, y)| format!("({}, {})", x, y))
        .collect::<Vec<_>>()
        .join(" ")
}
