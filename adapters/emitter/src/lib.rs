#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Indentation-aware writer for brace-delimited source code.
//!
//! Backends describe the generated program as a sequence of lines, comments
//! and nested blocks; the emitter owns the indentation depth and guarantees
//! that every block opened through [`SourceEmitter::block`] or
//! [`SourceEmitter::emit_loop`] is closed again, even when the body fails.

use thiserror::Error;

const DEFAULT_INDENT: &str = "    ";

/// Failures raised when blocks are opened and closed out of balance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum EmitError {
    /// A block was closed while none was open.
    #[error("attempted to close a block while none is open")]
    UnbalancedExit,
    /// Output was finished or a block body returned with blocks still open.
    #[error("{open} block(s) left open")]
    UnclosedBlocks {
        /// Number of blocks that were never closed.
        open: usize,
    },
}

/// Accumulates source text at the current indentation depth.
#[derive(Clone, Debug)]
pub struct SourceEmitter {
    buffer: String,
    indent: String,
    depth: usize,
    comments: bool,
}

impl Default for SourceEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceEmitter {
    /// Creates an emitter indenting with four spaces and comments enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::with_indent(DEFAULT_INDENT)
    }

    /// Creates an emitter that indents every level with `indent`.
    #[must_use]
    pub fn with_indent(indent: impl Into<String>) -> Self {
        Self {
            buffer: String::new(),
            indent: indent.into(),
            depth: 0,
            comments: true,
        }
    }

    /// Number of blocks currently open.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Whether comment helpers currently produce output.
    #[must_use]
    pub const fn comments_enabled(&self) -> bool {
        self.comments
    }

    /// Turns [`comment`](Self::comment) and
    /// [`block_comment`](Self::block_comment) on or off.
    pub fn set_comments_enabled(&mut self, enabled: bool) {
        self.comments = enabled;
    }

    /// Writes one line at the current depth.
    ///
    /// Empty text produces an empty line without trailing indentation.
    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.buffer.push_str(&self.indent);
            }
            self.buffer.push_str(text);
        }
        self.buffer.push('\n');
    }

    /// Writes every provided line at the current depth.
    pub fn lines<I>(&mut self, lines: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for line in lines {
            self.line(line);
        }
    }

    /// Writes an empty line.
    pub fn blank(&mut self) {
        self.buffer.push('\n');
    }

    /// Writes a single-line `//` comment when comments are enabled.
    pub fn comment(&mut self, text: impl AsRef<str>) {
        if self.comments {
            self.line(format!("// {}", text.as_ref()));
        }
    }

    /// Writes a `/** ... */` comment block when comments are enabled.
    pub fn block_comment<I>(&mut self, lines: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        if !self.comments {
            return;
        }

        self.line("/**");
        for line in lines {
            let line = line.as_ref();
            if line.is_empty() {
                self.line(" *");
            } else {
                self.line(format!(" * {line}"));
            }
        }
        self.line(" */");
    }

    /// Writes `header {` and opens a block.
    pub fn enter_block(&mut self, header: impl AsRef<str>) {
        let header = header.as_ref();
        if header.is_empty() {
            self.line("{");
        } else {
            self.line(format!("{header} {{"));
        }
        self.depth += 1;
    }

    /// Closes the innermost open block with `}`.
    pub fn exit_block(&mut self) -> Result<(), EmitError> {
        self.depth = self.depth.checked_sub(1).ok_or(EmitError::UnbalancedExit)?;
        self.line("}");
        Ok(())
    }

    /// Closes the innermost block and opens a sibling on the same line, as in
    /// `} else {`.
    pub fn reopen_block(&mut self, header: impl AsRef<str>) -> Result<(), EmitError> {
        self.depth = self.depth.checked_sub(1).ok_or(EmitError::UnbalancedExit)?;
        self.line(format!("}} {} {{", header.as_ref()));
        self.depth += 1;
        Ok(())
    }

    /// Writes `header { body }`, closing the block after `body` returns.
    ///
    /// The depth is restored to its value before the call on every path. A
    /// body that leaves its own blocks open or closes more blocks than it
    /// opened fails with an [`EmitError`].
    pub fn block<F, E>(&mut self, header: impl AsRef<str>, body: F) -> Result<(), E>
    where
        F: FnOnce(&mut Self) -> Result<(), E>,
        E: From<EmitError>,
    {
        let entry = self.depth;
        self.enter_block(header);
        let outcome = body(self);
        let inner = self.depth;
        self.depth = entry + 1;

        if let Err(error) = outcome {
            self.depth = entry;
            return Err(error);
        }
        if inner > entry + 1 {
            self.depth = entry;
            return Err(EmitError::UnclosedBlocks {
                open: inner - entry - 1,
            }
            .into());
        }
        if inner < entry + 1 {
            self.depth = entry;
            return Err(EmitError::UnbalancedExit.into());
        }

        self.exit_block()?;
        Ok(())
    }

    /// Writes a counted `for` loop running `counter` from zero up to `bound`.
    pub fn emit_loop<F, E>(
        &mut self,
        counter: impl AsRef<str>,
        bound: impl AsRef<str>,
        body: F,
    ) -> Result<(), E>
    where
        F: FnOnce(&mut Self) -> Result<(), E>,
        E: From<EmitError>,
    {
        let counter = counter.as_ref();
        let header = format!(
            "for (int {counter} = 0; {counter} < {}; {counter}++)",
            bound.as_ref()
        );
        self.block(header, body)
    }

    /// Returns the accumulated text, failing if blocks remain open.
    pub fn finish(self) -> Result<String, EmitError> {
        if self.depth > 0 {
            return Err(EmitError::UnclosedBlocks { open: self.depth });
        }
        Ok(self.buffer)
    }
}
