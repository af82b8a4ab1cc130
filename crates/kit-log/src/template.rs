//! Positional format templates.
//!
//! A template is plain text with `{N}` slots that are replaced by the `N`th
//! argument's `Display` output. `{{` and `}}` produce literal braces. Any
//! other use of a brace is a [`TemplateError`].

use std::fmt::{self, Write as _};
use thiserror::Error;

/// `[time] [level] [scope] (event id) message`
pub const DEFAULT_FORMAT: &str = "[{0}] [{1}] [{2}] ({3}) {4}\n";

/// `message`, inner message (or `Empty`), stack trace.
pub const DEFAULT_EXCEPTION_FORMAT: &str = "{0}\nInner: {1}\nStack Trace:\n{2}";

/// A template could not be rendered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("unclosed '{{' at byte {position}")]
    UnclosedBrace { position: usize },

    #[error("unmatched '}}' at byte {position}")]
    UnmatchedCloseBrace { position: usize },

    #[error("invalid slot {text:?} at byte {position}")]
    InvalidSlot { position: usize, text: String },

    #[error("slot {{{index}}} has no argument ({available} supplied)")]
    MissingArgument { index: usize, available: usize },

    #[error("argument for slot {{{index}}} failed to format")]
    Format { index: usize },
}

/// Render `template`, substituting `args` into its positional slots.
pub fn render(template: &str, args: &[&dyn fmt::Display]) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len() + 32);
    let bytes = template.as_bytes();
    let mut literal_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'{' if bytes.get(i + 1) == Some(&b'{') => {
                out.push_str(&template[literal_start..=i]);
                i += 2;
                literal_start = i;
            }
            b'}' if bytes.get(i + 1) == Some(&b'}') => {
                out.push_str(&template[literal_start..=i]);
                i += 2;
                literal_start = i;
            }
            b'{' => {
                out.push_str(&template[literal_start..i]);
                let close = template[i + 1..]
                    .find('}')
                    .map(|offset| i + 1 + offset)
                    .ok_or(TemplateError::UnclosedBrace { position: i })?;
                let slot = &template[i + 1..close];
                let index: usize = slot.trim().parse().map_err(|_| TemplateError::InvalidSlot {
                    position: i,
                    text: slot.to_string(),
                })?;
                let arg = args.get(index).ok_or(TemplateError::MissingArgument {
                    index,
                    available: args.len(),
                })?;
                write!(out, "{arg}").map_err(|_| TemplateError::Format { index })?;
                i = close + 1;
                literal_start = i;
            }
            b'}' => return Err(TemplateError::UnmatchedCloseBrace { position: i }),
            _ => i += 1,
        }
    }
    out.push_str(&template[literal_start..]);
    Ok(out)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
