//! Path template compilation.
//!
//! A path template is a `/`-delimited string in which a `:` followed by a word
//! identifier names a parameter:
//!
//! - `/accounts` - pure literal
//! - `/accounts/:id` - one parameter, `id`
//! - `/accounts/:acctId/documents/:docId` - two parameters, in declaration order
//!
//! Compilation produces an anchored regex with one `(\w+)` capture group per
//! parameter. Literal text is escaped in full, so `.`, `+` or `(` in a template
//! only ever match themselves. A `:` that is not followed by a word character is
//! kept as literal text instead of failing compilation.
//!
//! Parameter values are matched with `\w+`; values containing `-` or `.` (such
//! as UUIDs or file names) do not match a parameter segment.

use crate::error::{MappingError, Result};
use crate::MAX_PATH_TEMPLATE_LENGTH;
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Delimiter that introduces a named parameter in a path template
pub const PARAM_DELIMITER: char = ':';

const PARAM_CAPTURE: &str = r"(\w+)";

/// A path template compiled into an anchored matcher.
#[derive(Clone)]
pub struct CompiledPattern {
    template: String,
    regex: Regex,
    param_names: Vec<String>,
}

impl CompiledPattern {
    /// Compile a path template
    ///
    /// One trailing `/` is stripped from the template; the compiled matcher
    /// accepts paths with or without it.
    ///
    /// # Errors
    ///
    /// Returns `MappingError::TemplateTooLong` if the template exceeds
    /// `MAX_PATH_TEMPLATE_LENGTH`, or `MappingError::Regex` if the generated
    /// expression cannot be built.
    pub fn compile(template: impl Into<String>) -> Result<Self> {
        let template = template.into();

        if template.len() > MAX_PATH_TEMPLATE_LENGTH {
            return Err(MappingError::TemplateTooLong {
                max: MAX_PATH_TEMPLATE_LENGTH,
                length: template.len(),
            });
        }

        let body = template.strip_suffix('/').unwrap_or(&template);

        let mut source = String::with_capacity(body.len() + 8);
        let mut param_names = Vec::new();
        let mut last_end = 0;

        source.push('^');
        for (start, end) in param_tokens(body) {
            push_literal(&mut source, &body[last_end..start], &template);
            source.push_str(PARAM_CAPTURE);
            param_names.push(body[start + 1..end].to_string());
            last_end = end;
        }
        push_literal(&mut source, &body[last_end..], &template);
        source.push_str("/?$");

        let regex = Regex::new(&source)?;

        Ok(Self {
            template,
            regex,
            param_names,
        })
    }

    /// The template this pattern was compiled from
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Source of the generated regex
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Parameter names in declaration order
    #[must_use]
    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }

    /// Check if a concrete path matches this pattern
    #[must_use]
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// A concrete path this pattern matches, with every parameter set to `0`
    ///
    /// `/items/:id/tags` becomes `/items/0/tags`.
    #[must_use]
    pub fn sample_path(&self) -> String {
        let body = self.template.strip_suffix('/').unwrap_or(&self.template);
        let mut sample = String::with_capacity(body.len());
        let mut last_end = 0;

        for (start, end) in param_tokens(body) {
            sample.push_str(&body[last_end..start]);
            sample.push('0');
            last_end = end;
        }
        sample.push_str(&body[last_end..]);
        sample
    }

    /// Match a concrete path and extract its parameters.
    ///
    /// Returns `None` if the path does not match. If the number of capture
    /// groups differs from the number of declared parameter names the match
    /// still succeeds, with an empty context.
    #[must_use]
    pub fn captures(&self, path: &str) -> Option<BTreeMap<String, String>> {
        let caps = self.regex.captures(path)?;

        let groups = caps.len().saturating_sub(1);
        if groups != self.param_names.len() {
            debug!(
                template = %self.template,
                groups,
                params = self.param_names.len(),
                "capture arity mismatch, returning empty context"
            );
            return Some(BTreeMap::new());
        }

        let context = self
            .param_names
            .iter()
            .zip(caps.iter().skip(1))
            .filter_map(|(name, value)| value.map(|v| (name.clone(), v.as_str().to_string())))
            .collect();

        Some(context)
    }
}

/// Byte ranges of `:name` tokens in `body`, delimiter included
fn param_tokens(body: &str) -> Vec<(usize, usize)> {
    let mut tokens = Vec::new();
    let mut chars = body.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        if c != PARAM_DELIMITER {
            continue;
        }
        let mut end = start + c.len_utf8();
        while let Some(&(idx, next)) = chars.peek() {
            if !is_word_char(next) {
                break;
            }
            end = idx + next.len_utf8();
            chars.next();
        }
        if end > start + c.len_utf8() {
            tokens.push((start, end));
        }
    }

    tokens
}

fn push_literal(source: &mut String, literal: &str, template: &str) {
    if literal.contains(PARAM_DELIMITER) {
        debug!(template, literal, "stray parameter delimiter kept as literal text");
    }
    source.push_str(&regex::escape(literal));
}

impl PartialEq for CompiledPattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str() && self.param_names == other.param_names
    }
}

impl Eq for CompiledPattern {}

impl fmt::Debug for CompiledPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledPattern")
            .field("template", &self.template)
            .field("regex", &self.as_str())
            .field("param_names", &self.param_names)
            .finish()
    }
}

impl TryFrom<&str> for CompiledPattern {
    type Error = MappingError;

    fn try_from(s: &str) -> Result<Self> {
        Self::compile(s)
    }
}

impl TryFrom<String> for CompiledPattern {
    type Error = MappingError;

    fn try_from(s: String) -> Result<Self> {
        Self::compile(s)
    }
}

/// Check if a single path segment is a parameter token (`:name`)
#[must_use]
pub fn is_parameter(segment: &str) -> bool {
    segment
        .strip_prefix(PARAM_DELIMITER)
        .is_some_and(|name| !name.is_empty() && name.chars().all(is_word_char))
}

/// Non-empty segments of a path, in order
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Number of parameter segments in a path template
#[must_use]
pub fn parameter_count(path: &str) -> usize {
    segments(path).filter(|s| is_parameter(s)).count()
}

/// Literal (non-parameter) segments of a template joined with spaces.
///
/// `/accounts/:id/documents` becomes `accounts documents`.
#[must_use]
pub fn literal_name(path: &str) -> String {
    segments(path)
        .filter(|s| !is_parameter(s))
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
