//! Token model and navigation queries over a host-materialized token array.
//!
//! Tokenization itself is owned by the host analysis engine. This module only
//! defines the shape the host hands over per file: a flat [`Token`] array
//! wrapped in a [`TokenStream`], plus one [`DocBlock`] record per
//! documentation comment with the metadata the host has already derived
//! (closer position, nesting level, contained tags, enclosing structures).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Lexical kind of a token, reduced to the set the rules consume.
///
/// Hosts map any token kind without a counterpart here to [`TokenKind::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Opening of a documentation comment (`/**`).
    DocCommentOpen,
    /// Closing of a documentation comment (`*/`).
    DocCommentClose,
    /// An `@name` annotation tag inside a documentation comment.
    DocCommentTag,
    /// Plain description text inside a documentation comment.
    DocCommentString,
    /// Whitespace and decoration (` * `) inside a documentation comment.
    DocCommentWhitespace,
    /// The `class` keyword.
    Class,
    /// The `trait` keyword.
    Trait,
    /// The `function` keyword.
    Function,
    /// An identifier (class, trait, or function name).
    Ident,
    /// A declared return-type hint.
    ReturnType,
    /// Whitespace outside documentation comments.
    Whitespace,
    /// Any token the rules do not care about.
    Other,
}

/// A single lexical token as supplied by the host tokenizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Lexical kind.
    pub kind: TokenKind,
    /// Literal source text.
    pub text: String,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// Byte offset from the start of the file.
    pub offset: usize,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
            column,
            offset: 0,
        }
    }

    /// Sets the byte offset for this token.
    #[must_use]
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }
}

/// A documentation-comment block with host-derived metadata.
///
/// The host computes these fields while tokenizing; rules never rediscover
/// them from braces or indentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocBlock {
    /// Position of the opening token.
    pub opener: usize,
    /// Position of the closing token.
    pub closer: usize,
    /// Nesting depth: 0 at file scope, >0 inside structural declarations.
    pub level: usize,
    /// Positions of the annotation tag tokens inside the block, in order.
    pub tags: Vec<usize>,
    /// Positions of the enclosing structure keyword tokens, outermost first.
    pub enclosing: Vec<usize>,
}

impl DocBlock {
    /// Creates a new doc block record.
    #[must_use]
    pub fn new(opener: usize, closer: usize, level: usize) -> Self {
        Self {
            opener,
            closer,
            level,
            tags: Vec::new(),
            enclosing: Vec::new(),
        }
    }

    /// Sets the contained tag positions.
    #[must_use]
    pub fn with_tags(mut self, tags: Vec<usize>) -> Self {
        self.tags = tags;
        self
    }

    /// Sets the enclosing-structure chain.
    #[must_use]
    pub fn with_enclosing(mut self, enclosing: Vec<usize>) -> Self {
        self.enclosing = enclosing;
        self
    }
}

/// One file's token array plus read-only navigation queries.
///
/// All rule logic goes through these queries; none of them allocate or
/// mutate, so repeated analysis of the same stream is idempotent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenStream {
    path: PathBuf,
    tokens: Vec<Token>,
}

impl TokenStream {
    /// Creates a stream from a host-materialized token array.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, tokens: Vec<Token>) -> Self {
        Self {
            path: path.into(),
            tokens,
        }
    }

    /// Returns the path of the file this stream was lexed from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if the stream holds no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns the token at a position.
    #[must_use]
    pub fn get(&self, pos: usize) -> Option<&Token> {
        self.tokens.get(pos)
    }

    /// Returns the line of the token at a position.
    #[must_use]
    pub fn line_of(&self, pos: usize) -> Option<usize> {
        self.tokens.get(pos).map(|t| t.line)
    }

    /// Finds the next token of `kind` at or after `from`, bounded by `until`
    /// (exclusive) when given.
    #[must_use]
    pub fn find_next(&self, kind: TokenKind, from: usize, until: Option<usize>) -> Option<usize> {
        let end = until.unwrap_or(self.tokens.len()).min(self.tokens.len());
        (from..end).find(|&i| self.tokens[i].kind == kind)
    }

    /// Finds the first non-whitespace doc-comment token in `[from, until)`.
    ///
    /// Used for the emptiness check: the caller bounds the scan by the
    /// block's closing token so it never leaves the comment.
    #[must_use]
    pub fn next_in_comment(&self, from: usize, until: usize) -> Option<usize> {
        let end = until.min(self.tokens.len());
        (from..end).find(|&i| self.tokens[i].kind != TokenKind::DocCommentWhitespace)
    }

    /// Returns the declared name of the class, trait, or function whose
    /// keyword token sits at `pos`.
    ///
    /// Skips whitespace after the keyword; returns `None` when the next
    /// meaningful token is not an identifier.
    #[must_use]
    pub fn declaration_name(&self, pos: usize) -> Option<&str> {
        let mut i = pos.checked_add(1)?;
        while let Some(token) = self.tokens.get(i) {
            match token.kind {
                TokenKind::Whitespace => i += 1,
                TokenKind::Ident => return Some(&token.text),
                _ => return None,
            }
        }
        None
    }

    /// Returns the position of the declared return-type hint of the function
    /// whose keyword token sits at `pos`.
    ///
    /// The scan stops at the next declaration or doc comment, so a hint from
    /// a later function is never attributed to this one.
    #[must_use]
    pub fn return_type_of(&self, pos: usize) -> Option<usize> {
        let from = pos.checked_add(1)?;
        for i in from..self.tokens.len() {
            match self.tokens[i].kind {
                TokenKind::ReturnType => return Some(i),
                TokenKind::Function
                | TokenKind::Class
                | TokenKind::Trait
                | TokenKind::DocCommentOpen => return None,
                _ => {}
            }
        }
        None
    }

    /// Returns the positions of all function keyword tokens.
    #[must_use]
    pub fn functions(&self) -> Vec<usize> {
        self.tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| t.kind == TokenKind::Function)
            .map(|(i, _)| i)
            .collect()
    }

    /// Replaces the text of the token at `pos`.
    ///
    /// This is the host-side fix application: it is only called for fixes the
    /// host has accepted.
    pub fn replace_text(&mut self, pos: usize, text: impl Into<String>) {
        if let Some(token) = self.tokens.get_mut(pos) {
            token.text = text.into();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(tokens: Vec<Token>) -> TokenStream {
        TokenStream::new("Example.php", tokens)
    }

    #[test]
    fn find_next_respects_bound() {
        let s = stream(vec![
            Token::new(TokenKind::Other, "<?php", 1, 1),
            Token::new(TokenKind::Class, "class", 2, 1),
            Token::new(TokenKind::Class, "class", 5, 1),
        ]);
        assert_eq!(s.find_next(TokenKind::Class, 0, None), Some(1));
        assert_eq!(s.find_next(TokenKind::Class, 2, None), Some(2));
        assert_eq!(s.find_next(TokenKind::Class, 2, Some(2)), None);
    }

    #[test]
    fn declaration_name_skips_whitespace() {
        let s = stream(vec![
            Token::new(TokenKind::Class, "class", 1, 1),
            Token::new(TokenKind::Whitespace, " ", 1, 6),
            Token::new(TokenKind::Ident, "FooTest", 1, 7),
        ]);
        assert_eq!(s.declaration_name(0), Some("FooTest"));
    }

    #[test]
    fn declaration_name_requires_identifier() {
        let s = stream(vec![
            Token::new(TokenKind::Class, "class", 1, 1),
            Token::new(TokenKind::Whitespace, " ", 1, 6),
            Token::new(TokenKind::Other, "{", 1, 7),
        ]);
        assert_eq!(s.declaration_name(0), None);
    }

    #[test]
    fn return_type_bounded_by_next_declaration() {
        let s = stream(vec![
            Token::new(TokenKind::Function, "function", 1, 1),
            Token::new(TokenKind::Ident, "foo", 1, 10),
            Token::new(TokenKind::Function, "function", 3, 1),
            Token::new(TokenKind::Ident, "bar", 3, 10),
            Token::new(TokenKind::ReturnType, "void", 3, 17),
        ]);
        assert_eq!(s.return_type_of(0), None);
        assert_eq!(s.return_type_of(2), Some(4));
    }

    #[test]
    fn next_in_comment_skips_whitespace_only() {
        let s = stream(vec![
            Token::new(TokenKind::DocCommentTag, "@covers", 1, 4),
            Token::new(TokenKind::DocCommentWhitespace, " ", 1, 11),
            Token::new(TokenKind::DocCommentString, "Bar", 1, 12),
            Token::new(TokenKind::DocCommentClose, "*/", 2, 2),
        ]);
        assert_eq!(s.next_in_comment(1, 3), Some(2));
        assert_eq!(s.next_in_comment(1, 2), None);
    }

    #[test]
    fn replace_text_rewrites_in_place() {
        let mut s = stream(vec![Token::new(TokenKind::DocCommentTag, "@cover", 1, 4)]);
        s.replace_text(0, "@covers");
        assert_eq!(s.get(0).map(|t| t.text.as_str()), Some("@covers"));
    }
}
