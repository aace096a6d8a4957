//! Single-pass character scanner and block interpreter

use std::mem;
use std::sync::Arc;

use serde_json::Value;
use smallvec::SmallVec;

use super::types::{Chunk, Helper, RenderContext, RenderError, RenderResult};

/// Scanner state, one dispatch match per character
///
/// Brace delimiters are recognized by lookahead alone. A single `{` or `}`
/// is held in a pending state until the next character confirms or refutes
/// the double delimiter; there is no brace-depth counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Outside any block, emitting literal text
    Literal,

    /// Backslash seen in literal text, next character is emitted verbatim
    LiteralEscape,

    /// Single `{` held, a second would open a block
    PendingOpenBrace,

    /// Between a confirmed `{{` and a confirmed `}}`
    InsideBlock,

    /// Backslash seen inside a block, next character joins the word verbatim
    BlockEscape,

    /// Single `}` held inside a block, a second would close it
    PendingCloseBrace,
}

/// Helper selected for the open block
enum ActiveHelper {
    /// No helper named; arguments pass through unchanged
    Identity,

    /// Named helper cloned out of the context table at selection time
    Named {
        name: String,
        helper: Arc<dyn Helper>,
    },
}

impl ActiveHelper {
    fn name(&self) -> &str {
        match self {
            ActiveHelper::Identity => "identity",
            ActiveHelper::Named { name, .. } => name,
        }
    }
}

/// All mutable state of one render call
///
/// Created fresh per call, fed one character at a time, discarded after the
/// scan. Helpers never see it, so a render cannot be reentered.
struct RenderState {
    scan: ScanState,

    /// Characters accumulated since the last delimiter
    word: String,

    /// Helper selected for the open block
    helper: Option<ActiveHelper>,

    /// Resolved arguments of the open block, in template order
    args: SmallVec<[Value; 4]>,

    /// Merged output chunks
    output: Vec<Chunk>,

    /// 0-based char offset of the character being processed, for diagnostics
    position: usize,
}

/// Render a template against a context
///
/// Scans the template once, character by character. Literal text passes
/// through verbatim, with backslash escaping the character after it.
/// `{{ ... }}` blocks split into space-separated words: the first word may
/// select a helper, every remaining word resolves to an argument (a JSON
/// string literal or a variable lookup), and the helper's returned values
/// are appended to the output with adjacent strings merged. Returns the
/// chunk array, or the first error encountered.
pub fn render(template: &str, context: &RenderContext) -> RenderResult<Vec<Chunk>> {
    let mut state = RenderState::new();

    for ch in template.chars() {
        state.step(ch, context)?;
        state.position += 1;
    }

    Ok(state.finish())
}

impl RenderState {
    fn new() -> Self {
        Self {
            scan: ScanState::Literal,
            word: String::new(),
            helper: None,
            args: SmallVec::new(),
            output: Vec::new(),
            position: 0,
        }
    }

    /// Dispatch one character against the current scan state
    fn step(&mut self, ch: char, context: &RenderContext) -> RenderResult<()> {
        match self.scan {
            ScanState::Literal => match ch {
                '\\' => self.scan = ScanState::LiteralEscape,
                '{' => self.scan = ScanState::PendingOpenBrace,
                _ => self.emit_char(ch),
            },

            ScanState::LiteralEscape => {
                self.emit_char(ch);
                self.scan = ScanState::Literal;
            }

            ScanState::PendingOpenBrace => {
                if ch == '{' {
                    self.scan = ScanState::InsideBlock;
                } else {
                    // The held `{` was ordinary text after all.
                    self.emit_char('{');
                    self.scan = ScanState::Literal;
                    self.step(ch, context)?;
                }
            }

            ScanState::InsideBlock => match ch {
                '\\' => self.scan = ScanState::BlockEscape,
                '}' => self.scan = ScanState::PendingCloseBrace,
                ' ' if !self.quoted_literal_open() => self.resolve_word(context)?,
                _ => self.word.push(ch),
            },

            ScanState::BlockEscape => {
                self.word.push(ch);
                self.scan = ScanState::InsideBlock;
            }

            ScanState::PendingCloseBrace => {
                if ch == '}' {
                    self.close_block(context)?;
                    self.scan = ScanState::Literal;
                } else {
                    // The held `}` was block content after all.
                    self.word.push('}');
                    self.scan = ScanState::InsideBlock;
                    self.step(ch, context)?;
                }
            }
        }

        Ok(())
    }

    /// Whether the pending word is an unfinished quoted literal
    ///
    /// A space extends such a word instead of delimiting it. The closing
    /// quote only counts when not preceded by an odd run of backslashes.
    fn quoted_literal_open(&self) -> bool {
        let word = self.word.trim_start();
        if !word.starts_with('"') {
            return false;
        }
        if word.len() < 2 || !word.ends_with('"') {
            return true;
        }

        let body = &word[..word.len() - 1];
        let trailing_backslashes = body.chars().rev().take_while(|c| *c == '\\').count();
        trailing_backslashes % 2 == 1
    }

    /// Resolve the pending word against the helper and variable tables
    ///
    /// Empty words are skipped. The first resolvable word of a block may
    /// select a helper; every other word becomes an argument: a JSON string
    /// literal if it starts with `"`, otherwise a variable lookup. A bare
    /// word matching neither table is an error.
    fn resolve_word(&mut self, context: &RenderContext) -> RenderResult<()> {
        let raw = mem::take(&mut self.word);
        let word = raw.trim();
        if word.is_empty() {
            return Ok(());
        }

        if self.helper.is_none() {
            if let Some(helper) = context.helpers.get(word) {
                self.helper = Some(ActiveHelper::Named {
                    name: word.to_string(),
                    helper: Arc::clone(helper),
                });
                return Ok(());
            }

            // Bare interpolation: the block names no helper.
            self.helper = Some(ActiveHelper::Identity);
        }

        if word.starts_with('"') {
            let literal: String =
                serde_json::from_str(word).map_err(|source| RenderError::MalformedLiteral {
                    literal: word.to_string(),
                    position: self.position,
                    source,
                })?;
            self.args.push(Value::String(literal));
        } else if let Some(value) = context.variables.get(word) {
            self.args.push(value.clone());
        } else {
            return Err(RenderError::UnknownReference {
                word: word.to_string(),
                position: self.position,
            });
        }

        Ok(())
    }

    /// Close the open block: resolve the trailing word, invoke the helper,
    /// append its values to the output
    fn close_block(&mut self, context: &RenderContext) -> RenderResult<()> {
        self.resolve_word(context)?;

        let active = self
            .helper
            .take()
            .ok_or_else(|| RenderError::UnexpectedBlockEnd {
                position: self.position,
            })?;
        let args = mem::take(&mut self.args);

        tracing::trace!(
            helper = active.name(),
            args = args.len(),
            position = self.position,
            "Expanding block"
        );

        let values = match &active {
            ActiveHelper::Identity => args.into_vec(),
            ActiveHelper::Named { name, helper } => {
                helper
                    .call(context, &args)
                    .map_err(|source| RenderError::Helper {
                        name: name.clone(),
                        position: self.position,
                        source,
                    })?
            }
        };

        for value in values {
            self.append(value);
        }

        Ok(())
    }

    /// Emit one literal character, merging into a trailing text chunk
    fn emit_char(&mut self, ch: char) {
        if let Some(Chunk::Text(text)) = self.output.last_mut() {
            text.push(ch);
        } else {
            self.output.push(Chunk::Text(ch.to_string()));
        }
    }

    /// Append one helper-produced value to the output
    ///
    /// Strings merge into a trailing text chunk; every other value is a
    /// standalone chunk that breaks the run.
    fn append(&mut self, value: Value) {
        match value {
            Value::String(text) => {
                if let Some(Chunk::Text(last)) = self.output.last_mut() {
                    last.push_str(&text);
                } else {
                    self.output.push(Chunk::Text(text));
                }
            }
            other => self.output.push(Chunk::Value(other)),
        }
    }

    /// Consume the state at end of input
    ///
    /// A held `{` flushes as literal text. A trailing backslash was
    /// consumed by the escape protocol and is dropped. An unterminated
    /// block is discarded wholesale; only literal output emitted before its
    /// `{{` remains.
    fn finish(mut self) -> Vec<Chunk> {
        if self.scan == ScanState::PendingOpenBrace {
            self.emit_char('{');
        }

        self.output
    }
}
