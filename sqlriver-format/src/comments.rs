//! The parallel comment stream and its anchoring rules.
//!
//! Comments are not nodes of the statement tree; they are collected from
//! the token stream, addressed by source offset, and re-attached at emit
//! time: trailing comments stay on the line of the token they followed,
//! leading comments come out on their own lines at the indentation of
//! the construct that follows them.

#[cfg(not(feature = "std"))]
use alloc::{format, string::String, vec::Vec};

use sqlriver_core::{Token, TokenKind};

/// One comment from the source, with the position info the anchoring
/// rules need.
#[derive(Clone, Debug)]
pub(crate) struct CommentTok {
    /// The raw comment text (`-- ...` or `/* ... */`).
    pub text: String,
    /// True for `--` comments.
    pub line_comment: bool,
    /// Byte offset where the comment starts.
    pub start: usize,
    /// True when the comment sits on the same source line as the token
    /// before it.
    pub trailing: bool,
    /// True when a blank line separated this comment from what precedes
    /// it.
    pub blank_before: bool,
}

impl CommentTok {
    /// True for MySQL `/*! ... */` conditional comments, which are kept
    /// inline and never rewritten.
    pub fn is_conditional(&self) -> bool {
        self.text.starts_with("/*!")
    }

    /// Renders the comment. Line comments are normalised to block form
    /// when `normalize` is set (write statements and column-definition
    /// contexts), so a wrapped layout can never merge following text
    /// into them.
    pub fn render(&self, normalize: bool) -> String {
        if self.line_comment && normalize {
            let body = self.text.trim_start_matches('-').trim();
            if body.is_empty() {
                "/* */".into()
            } else {
                format!("/* {} */", body)
            }
        } else {
            self.text.clone()
        }
    }
}

/// An offset-ordered queue of the source comments.
#[derive(Debug, Default)]
pub(crate) struct CommentQueue {
    items: Vec<CommentTok>,
    pos: usize,
}

impl CommentQueue {
    /// Collects the comments of a token stream.
    pub fn from_tokens(tokens: &[Token]) -> Self {
        let mut items = Vec::new();
        let mut first = true;
        for token in tokens {
            match token.kind {
                TokenKind::LineComment | TokenKind::BlockComment => {
                    items.push(CommentTok {
                        text: token.text.clone(),
                        line_comment: token.kind == TokenKind::LineComment,
                        start: token.span.start,
                        trailing: !first && token.same_line_as_previous(),
                        blank_before: token.has_blank_line_before(),
                    });
                }
                _ => {}
            }
            if token.kind != TokenKind::Eof {
                first = false;
            }
        }
        Self { items, pos: 0 }
    }

    /// Takes every remaining comment that starts before `offset`.
    pub fn take_before(&mut self, offset: usize) -> Vec<CommentTok> {
        let mut taken = Vec::new();
        while self.pos < self.items.len() && self.items[self.pos].start < offset {
            taken.push(self.items[self.pos].clone());
            self.pos += 1;
        }
        taken
    }

    /// Takes the trailing comments that start before `offset`; leading
    /// comments in that range are left queued.
    pub fn take_trailing_before(&mut self, offset: usize) -> Vec<CommentTok> {
        let mut taken = Vec::new();
        while self.pos < self.items.len()
            && self.items[self.pos].start < offset
            && self.items[self.pos].trailing
        {
            taken.push(self.items[self.pos].clone());
            self.pos += 1;
        }
        taken
    }

    /// Takes every comment left in the queue.
    pub fn take_rest(&mut self) -> Vec<CommentTok> {
        let taken = self.items[self.pos..].to_vec();
        self.pos = self.items.len();
        taken
    }

    /// Peeks whether the next queued comment starts before `offset`.
    pub fn has_before(&self, offset: usize) -> bool {
        self.items.get(self.pos).is_some_and(|c| c.start < offset)
    }
}
