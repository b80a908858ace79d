//! Render configuration and per-render state.
//!
//! A [`RenderContext`] is created for every render call. It owns the output
//! buffer, the argument numbering table and the current render state, and is
//! discarded once the SQL text has been produced.

use crate::error::{QbError, QbResult};
use crate::ident::write_quoted;
use crate::qb::Source;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How argument placeholders are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderStyle {
    /// `$1, $2, ...`, numbered by first occurrence of each tag.
    #[default]
    Positional,
    /// `:tag`
    Named,
}

/// Options controlling how statements are rendered.
///
/// # Example
/// ```
/// use pgqb::{PlaceholderStyle, RenderOptions};
///
/// let opts = RenderOptions::new()
///     .placeholder(PlaceholderStyle::Named)
///     .auto_from(false);
/// assert!(!opts.auto_from);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Placeholder style for arguments.
    pub placeholder: PlaceholderStyle,
    /// Add column sources referenced by the statement but missing from FROM.
    pub auto_from: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            placeholder: PlaceholderStyle::Positional,
            auto_from: true,
        }
    }
}

impl RenderOptions {
    /// Create options with defaults (positional placeholders, auto-FROM on).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the placeholder style.
    pub fn placeholder(mut self, style: PlaceholderStyle) -> Self {
        self.placeholder = style;
        self
    }

    /// Use `:tag` placeholders.
    pub fn named(self) -> Self {
        self.placeholder(PlaceholderStyle::Named)
    }

    /// Enable or disable FROM inference.
    pub fn auto_from(mut self, enabled: bool) -> Self {
        self.auto_from = enabled;
        self
    }
}

/// How aliases and columns are written at the current position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderState {
    /// Aliases render as their name only.
    #[default]
    Reference,
    /// SELECT/RETURNING items: aliases render `<expr> "alias"`.
    Declaration,
    /// Columns render unqualified (INSERT columns, ON CONFLICT targets, SET keys).
    BareName,
}

/// Transient state for a single render pass.
#[derive(Debug)]
pub struct RenderContext {
    buf: String,
    options: RenderOptions,
    /// Options the pass started with, before any nested override.
    initial: RenderOptions,
    state: RenderState,
    next_arg: usize,
    tag_numbers: HashMap<String, usize>,
    arguments: Vec<String>,
}

impl RenderContext {
    /// Create a context for one render pass.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            buf: String::with_capacity(128),
            options,
            initial: options,
            state: RenderState::Reference,
            next_arg: 0,
            tag_numbers: HashMap::new(),
            arguments: Vec::new(),
        }
    }

    /// Options in effect at the current position.
    pub fn options(&self) -> RenderOptions {
        self.options
    }

    /// How columns and aliases are written at the current position.
    pub fn state(&self) -> RenderState {
        self.state
    }

    /// SQL written so far.
    pub fn sql(&self) -> &str {
        &self.buf
    }

    pub(crate) fn push_str(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    pub(crate) fn push(&mut self, ch: char) {
        self.buf.push(ch);
    }

    pub(crate) fn push_ident(&mut self, name: &str) {
        write_quoted(&mut self.buf, name);
    }

    /// Drop one trailing clause separator, if present.
    pub(crate) fn trim_trailing_space(&mut self) {
        if self.buf.ends_with(' ') {
            self.buf.pop();
        }
    }

    /// Run `f` with the render state temporarily set to `state`.
    pub(crate) fn with_state<R>(&mut self, state: RenderState, f: impl FnOnce(&mut Self) -> R) -> R {
        let saved = std::mem::replace(&mut self.state, state);
        let out = f(self);
        self.state = saved;
        out
    }

    /// Run `f` with FROM inference temporarily switched.
    pub(crate) fn with_auto_from<R>(&mut self, enabled: bool, f: impl FnOnce(&mut Self) -> R) -> R {
        let saved = self.options.auto_from;
        self.options.auto_from = enabled;
        let out = f(self);
        self.options.auto_from = saved;
        out
    }

    /// FROM inference as configured for the whole pass.
    pub(crate) fn initial_auto_from(&self) -> bool {
        self.initial.auto_from
    }

    /// Number for an argument tag; the empty tag always gets a fresh number.
    pub(crate) fn argument_number(&mut self, tag: &str) -> usize {
        if tag.is_empty() {
            return self.next_argument(tag);
        }
        if let Some(&n) = self.tag_numbers.get(tag) {
            return n;
        }
        let n = self.next_argument(tag);
        self.tag_numbers.insert(tag.to_string(), n);
        n
    }

    fn next_argument(&mut self, tag: &str) -> usize {
        self.next_arg += 1;
        self.arguments.push(tag.to_string());
        self.next_arg
    }

    /// Write a placeholder for `tag` in the configured style.
    pub(crate) fn write_argument(&mut self, tag: &str) -> QbResult<()> {
        match self.options.placeholder {
            PlaceholderStyle::Named => {
                if tag.is_empty() {
                    return Err(QbError::AnonymousArgument);
                }
                if !self.tag_numbers.contains_key(tag) {
                    self.argument_number(tag);
                }
                self.buf.push(':');
                self.buf.push_str(tag);
            }
            PlaceholderStyle::Positional => {
                let n = self.argument_number(tag);
                self.buf.push('$');
                self.buf.push_str(&n.to_string());
            }
        }
        Ok(())
    }

    /// Finish the pass, yielding the SQL and its argument slots.
    pub fn into_rendered(mut self) -> Rendered {
        self.trim_trailing_space();
        Rendered {
            sql: self.buf,
            arguments: self.arguments,
            style: self.options.placeholder,
        }
    }
}

/// Rendered SQL text plus the argument tag of each placeholder slot.
///
/// With positional placeholders `arguments[i]` is the tag bound to `$i+1`
/// (empty for anonymous arguments). With named placeholders it lists each
/// distinct tag once, in order of first use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub sql: String,
    pub arguments: Vec<String>,
    pub style: PlaceholderStyle,
}

impl Rendered {
    /// Number of placeholder slots.
    pub fn arg_count(&self) -> usize {
        self.arguments.len()
    }
}

impl std::fmt::Display for Rendered {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.sql)
    }
}

/// Column sources gathered from a statement, deduplicated by name.
///
/// Iteration follows first insertion; a later source with an already seen
/// name is dropped.
#[derive(Debug, Clone, Default)]
pub struct SourceSet {
    sources: Vec<Source>,
}

impl SourceSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `source` unless its name is already present. Pseudo sources are
    /// never gathered.
    pub fn insert(&mut self, source: Source) {
        if !source.is_pseudo() && !self.contains(source.name()) {
            self.sources.push(source);
        }
    }

    /// Whether a source with this name is present.
    pub fn contains(&self, name: &str) -> bool {
        self.sources.iter().any(|s| s.name() == name)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Sources in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Source> {
        self.sources.iter()
    }

    /// Source names in insertion order.
    pub fn names(&self) -> Vec<&str> {
        self.sources.iter().map(Source::name).collect()
    }

    /// Sources in `self` whose names are absent from `other`.
    pub fn difference<'a>(&'a self, other: &'a SourceSet) -> impl Iterator<Item = &'a Source> + 'a {
        self.sources.iter().filter(move |s| !other.contains(s.name()))
    }
}
