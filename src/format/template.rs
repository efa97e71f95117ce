//! Line templates.
//!
//! A template is literal text with `{placeholder}` slots, e.g.
//! `{time} - {name} - {level} - {message}`. `{{` and `}}` produce literal
//! braces. Templates are parsed once when a logger is built, so a typo in a
//! placeholder surfaces as a configuration error instead of odd output.

use std::fmt;
use std::str::FromStr;

/// One piece of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Time,
    Name,
    Level,
    Message,
    Target,
    Fields,
    Thread,
}

impl Segment {
    fn placeholder(name: &str) -> Option<Self> {
        let segment = match name {
            "time" => Segment::Time,
            "name" => Segment::Name,
            "level" => Segment::Level,
            "message" => Segment::Message,
            "target" => Segment::Target,
            "fields" => Segment::Fields,
            "thread" => Segment::Thread,
            _ => return None,
        };
        Some(segment)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("unknown placeholder `{{{name}}}` at byte {position}")]
    UnknownPlaceholder { name: String, position: usize },

    #[error("unclosed `{{` at byte {position}")]
    Unclosed { position: usize },

    #[error("unmatched `}}` at byte {position}")]
    Unmatched { position: usize },
}

/// A parsed line template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFormat {
    source: String,
    segments: Vec<Segment>,
}

impl LineFormat {
    pub const DEFAULT: &'static str = "{time} - {name} - {level} - {message}";

    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.char_indices().peekable();

        while let Some((position, c)) = chars.next() {
            match c {
                '{' if matches!(chars.peek(), Some((_, '{'))) => {
                    chars.next();
                    literal.push('{');
                }
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for (_, c) in chars.by_ref() {
                        if c == '}' {
                            closed = true;
                            break;
                        }
                        name.push(c);
                    }
                    if !closed {
                        return Err(TemplateError::Unclosed { position });
                    }
                    let segment = Segment::placeholder(name.trim()).ok_or_else(|| {
                        TemplateError::UnknownPlaceholder { name: name.clone(), position }
                    })?;
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(segment);
                }
                '}' if matches!(chars.peek(), Some((_, '}'))) => {
                    chars.next();
                    literal.push('}');
                }
                '}' => return Err(TemplateError::Unmatched { position }),
                c => literal.push(c),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl Default for LineFormat {
    fn default() -> Self {
        let sep = || Segment::Literal(" - ".to_string());
        Self {
            source: Self::DEFAULT.to_string(),
            segments: vec![
                Segment::Time,
                sep(),
                Segment::Name,
                sep(),
                Segment::Level,
                sep(),
                Segment::Message,
            ],
        }
    }
}

impl FromStr for LineFormat {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for LineFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
