//! Column tag parsing
//!
//! A tag is `name[,option[,option...]]`. The name may be empty (use the
//! field's own name) or `-` (ignore the field). `omitempty` is the only
//! recognized option; anything else is skipped.

/// Parsed column tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tag<'a> {
    /// Declared column name (empty when not given)
    pub name: &'a str,
    /// Collapse zero values to an empty cell on encode
    pub omitempty: bool,
}

impl<'a> Tag<'a> {
    /// Parse a raw tag string
    pub fn parse(raw: &'a str) -> Self {
        let mut parts = raw.split(',');
        let name = parts.next().unwrap_or("");
        let mut tag = Tag {
            name,
            omitempty: false,
        };

        for option in parts {
            if option == "omitempty" {
                tag.omitempty = true;
            }
        }

        tag
    }

    /// Whether the field is excluded from decoding and encoding
    pub fn is_ignored(&self) -> bool {
        self.name == "-"
    }

    /// Whether an explicit column name was given
    pub fn has_name(&self) -> bool {
        !self.name.is_empty()
    }

    /// The column name, falling back to `default` when none was given
    pub fn name_or(&self, default: &'a str) -> &'a str {
        if self.name.is_empty() {
            default
        } else {
            self.name
        }
    }
}
