//! Programmatic construction of token streams and doc-block metadata.
//!
//! Hosts with their own tokenizer can bridge into [`TokenStream`] through
//! this builder instead of computing token positions and doc-block metadata
//! by hand. It tracks lines, columns, byte offsets, the open doc block, and
//! the enclosing-structure stack as tokens are appended. The test suites use
//! it for the same reason.

use crate::token::{DocBlock, Token, TokenKind, TokenStream};
use std::path::PathBuf;

struct OpenBlock {
    opener: usize,
    tags: Vec<usize>,
}

/// Builder for a [`TokenStream`] and its [`DocBlock`] records.
///
/// # Example
///
/// ```
/// use testdoc_lint_core::TokenStreamBuilder;
///
/// let (stream, blocks) = TokenStreamBuilder::new("FooTest.php")
///     .doc_open()
///     .tag("@covers")
///     .text("Bar")
///     .doc_close()
///     .newline()
///     .class("FooTest")
///     .finish();
/// assert_eq!(blocks.len(), 1);
/// assert_eq!(blocks[0].tags.len(), 1);
/// assert!(!stream.is_empty());
/// ```
pub struct TokenStreamBuilder {
    path: PathBuf,
    tokens: Vec<Token>,
    blocks: Vec<DocBlock>,
    structures: Vec<usize>,
    open: Option<OpenBlock>,
    line: usize,
    column: usize,
    offset: usize,
}

impl TokenStreamBuilder {
    /// Creates a builder for a file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            tokens: Vec::new(),
            blocks: Vec::new(),
            structures: Vec::new(),
            open: None,
            line: 1,
            column: 1,
            offset: 0,
        }
    }

    fn push(&mut self, kind: TokenKind, text: &str) -> usize {
        let token = Token::new(kind, text, self.line, self.column).with_offset(self.offset);
        self.column += text.len();
        self.offset += text.len();
        self.tokens.push(token);
        self.tokens.len() - 1
    }

    /// Appends an arbitrary token at the current cursor.
    #[must_use]
    pub fn raw(mut self, kind: TokenKind, text: &str) -> Self {
        self.push(kind, text);
        self
    }

    /// Moves the cursor to the start of the next line.
    #[must_use]
    pub fn newline(mut self) -> Self {
        self.line += 1;
        self.column = 1;
        self.offset += 1;
        self
    }

    /// Opens a documentation comment at the current cursor.
    ///
    /// The block's nesting level is the current structure-stack depth.
    #[must_use]
    pub fn doc_open(mut self) -> Self {
        let opener = self.push(TokenKind::DocCommentOpen, "/**");
        self.open = Some(OpenBlock {
            opener,
            tags: Vec::new(),
        });
        self
    }

    /// Appends an annotation tag on its own comment line.
    #[must_use]
    pub fn tag(mut self, text: &str) -> Self {
        self = self.newline();
        self.push(TokenKind::DocCommentWhitespace, " * ");
        let pos = self.push(TokenKind::DocCommentTag, text);
        if let Some(open) = self.open.as_mut() {
            open.tags.push(pos);
        }
        self
    }

    /// Appends description text after the current tag.
    #[must_use]
    pub fn text(mut self, text: &str) -> Self {
        self.push(TokenKind::DocCommentWhitespace, " ");
        self.push(TokenKind::DocCommentString, text);
        self
    }

    /// Closes the open documentation comment and records its [`DocBlock`].
    #[must_use]
    pub fn doc_close(mut self) -> Self {
        self = self.newline();
        self.push(TokenKind::DocCommentWhitespace, " ");
        let closer = self.push(TokenKind::DocCommentClose, "*/");
        if let Some(open) = self.open.take() {
            let block = DocBlock::new(open.opener, closer, self.structures.len())
                .with_tags(open.tags)
                .with_enclosing(self.structures.clone());
            self.blocks.push(block);
        }
        self
    }

    fn declaration(&mut self, kind: TokenKind, keyword: &str, name: &str) -> usize {
        let pos = self.push(kind, keyword);
        self.push(TokenKind::Whitespace, " ");
        self.push(TokenKind::Ident, name);
        pos
    }

    /// Appends a class declaration and enters its scope.
    #[must_use]
    pub fn class(mut self, name: &str) -> Self {
        let pos = self.declaration(TokenKind::Class, "class", name);
        self.structures.push(pos);
        self
    }

    /// Appends a trait declaration and enters its scope.
    #[must_use]
    pub fn trait_def(mut self, name: &str) -> Self {
        let pos = self.declaration(TokenKind::Trait, "trait", name);
        self.structures.push(pos);
        self
    }

    /// Appends a function declaration without entering its scope.
    #[must_use]
    pub fn function(mut self, name: &str) -> Self {
        self.declaration(TokenKind::Function, "function", name);
        self.push(TokenKind::Other, "()");
        self
    }

    /// Appends a function declaration and enters its scope.
    ///
    /// Doc blocks opened before the matching [`end`](Self::end) are nested in
    /// a structure that is neither a class nor a trait.
    #[must_use]
    pub fn function_scope(mut self, name: &str) -> Self {
        let pos = self.declaration(TokenKind::Function, "function", name);
        self.push(TokenKind::Other, "()");
        self.structures.push(pos);
        self
    }

    /// Appends a declared return-type hint for the preceding function.
    #[must_use]
    pub fn return_type(mut self, ty: &str) -> Self {
        self.push(TokenKind::Other, ": ");
        self.push(TokenKind::ReturnType, ty);
        self
    }

    /// Leaves the innermost structure scope.
    #[must_use]
    pub fn end(mut self) -> Self {
        self.structures.pop();
        self
    }

    /// Finishes the build, returning the stream and its doc blocks.
    #[must_use]
    pub fn finish(self) -> (TokenStream, Vec<DocBlock>) {
        (TokenStream::new(self.path, self.tokens), self.blocks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_block_metadata() {
        let (stream, blocks) = TokenStreamBuilder::new("FooTest.php")
            .class("FooTest")
            .newline()
            .doc_open()
            .tag("@dataProvider")
            .text("provideCases")
            .doc_close()
            .newline()
            .function("testSomething")
            .finish();

        assert_eq!(blocks.len(), 1);
        let block = &blocks[0];
        assert_eq!(block.level, 1);
        assert_eq!(block.enclosing.len(), 1);
        assert_eq!(
            stream.get(block.enclosing[0]).map(|t| t.kind),
            Some(TokenKind::Class)
        );
        assert_eq!(block.tags.len(), 1);
        assert_eq!(
            stream.get(block.tags[0]).map(|t| t.text.as_str()),
            Some("@dataProvider")
        );
    }

    #[test]
    fn declaration_follows_closer_line() {
        let (stream, blocks) = TokenStreamBuilder::new("FooTest.php")
            .doc_open()
            .tag("@covers")
            .text("Bar")
            .doc_close()
            .newline()
            .class("FooTest")
            .finish();

        let block = &blocks[0];
        let closer_line = stream.line_of(block.closer).unwrap();
        let class = stream
            .find_next(TokenKind::Class, block.closer + 1, None)
            .unwrap();
        assert_eq!(stream.line_of(class), Some(closer_line + 1));
    }

    #[test]
    fn end_leaves_scope() {
        let (_, blocks) = TokenStreamBuilder::new("FooTest.php")
            .class("FooTest")
            .end()
            .newline()
            .doc_open()
            .tag("@covers")
            .doc_close()
            .finish();

        assert_eq!(blocks[0].level, 0);
        assert!(blocks[0].enclosing.is_empty());
    }
}
