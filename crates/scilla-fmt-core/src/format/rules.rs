//! Whitespace and line-break passes
//!
//! Everything except indentation lives here. Each pass is a unit struct so
//! the pipeline can hold them as trait objects.

use super::FormatOptions;
use super::pipeline::Rule;
use crate::sequence::TokenSequence;
use crate::token::{Token, TokenKind};

/// Drops newlines and whitespace before the first real token.
pub struct RemoveLeadingBlankLines;

impl Rule for RemoveLeadingBlankLines {
    fn name(&self) -> &'static str {
        "remove-leading-blank-lines"
    }

    fn apply(&self, tokens: &mut TokenSequence, _options: &FormatOptions) {
        while tokens.kind(0).is_some_and(TokenKind::is_space) {
            tokens.remove(0);
        }
    }
}

/// Keeps at most one blank line between two lines of content.
pub struct CollapseBlankLines;

impl Rule for CollapseBlankLines {
    fn name(&self) -> &'static str {
        "collapse-blank-lines"
    }

    fn apply(&self, tokens: &mut TokenSequence, _options: &FormatOptions) {
        let mut newlines = 0;
        let mut i = 0;
        while i < tokens.len() {
            match tokens[i].kind {
                TokenKind::Newline => {
                    newlines += 1;
                    if newlines > 2 {
                        // drop the extra blank line along with any spaces on it
                        let mut start = i;
                        while start > 0 && tokens[start - 1].kind.is_whitespace() {
                            start -= 1;
                        }
                        for _ in start..=i {
                            tokens.remove(start);
                        }
                        i = start;
                        continue;
                    }
                }
                kind if kind.is_whitespace() => {}
                _ => newlines = 0,
            }
            i += 1;
        }
    }
}

/// Empties lines that hold nothing but whitespace.
pub struct WhitespaceOnlyLines;

impl Rule for WhitespaceOnlyLines {
    fn name(&self) -> &'static str {
        "whitespace-only-lines"
    }

    fn apply(&self, tokens: &mut TokenSequence, _options: &FormatOptions) {
        let mut i = 0;
        while i < tokens.len() {
            let starts_line = i == 0 || tokens[i - 1].kind == TokenKind::Newline;
            let ends_line = matches!(
                tokens.kind(i + 1),
                Some(TokenKind::Newline | TokenKind::Eof) | None
            );
            if tokens[i].kind == TokenKind::Whitespace && starts_line && ends_line {
                tokens.remove(i);
            } else {
                i += 1;
            }
        }
    }
}

/// Shrinks runs of spaces between tokens to one space.
///
/// Leading indentation and spacing after comments are left alone.
pub struct CollapseInteriorWhitespace;

impl Rule for CollapseInteriorWhitespace {
    fn name(&self) -> &'static str {
        "collapse-interior-whitespace"
    }

    fn apply(&self, tokens: &mut TokenSequence, _options: &FormatOptions) {
        for i in 1..tokens.len() {
            if tokens[i].kind != TokenKind::Whitespace || tokens[i].text() == " " {
                continue;
            }
            let after = tokens[i - 1].kind;
            if after == TokenKind::Newline || after == TokenKind::Comment {
                continue;
            }
            if let Some(token) = tokens.get_mut(i) {
                token.set_literal(" ");
            }
        }
    }
}

fn is_spaced_operator(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Eq | TokenKind::Assign | TokenKind::Tarrow | TokenKind::Arrow | TokenKind::Fetch
    )
}

/// Exactly one space on both sides of `=`, `:=`, `->`, `=>` and `<-`.
pub struct SpaceAroundOperators;

impl Rule for SpaceAroundOperators {
    fn name(&self) -> &'static str {
        "space-around-operators"
    }

    fn apply(&self, tokens: &mut TokenSequence, _options: &FormatOptions) {
        let mut i = 0;
        while i < tokens.len() {
            if !is_spaced_operator(tokens[i].kind) {
                i += 1;
                continue;
            }

            if !tokens.is_first_on_line(i) {
                if tokens[i - 1].kind == TokenKind::Whitespace {
                    set_single_space(tokens, i - 1);
                } else {
                    tokens.insert(i, Token::synthetic(TokenKind::Whitespace, " "));
                    i += 1;
                }
            }

            match tokens.kind(i + 1) {
                Some(TokenKind::Whitespace) => set_single_space(tokens, i + 1),
                Some(TokenKind::Newline | TokenKind::Eof) | None => {}
                Some(_) => {
                    tokens.insert_after(i, Token::synthetic(TokenKind::Whitespace, " "));
                }
            }
            i += 1;
        }
    }
}

fn set_single_space(tokens: &mut TokenSequence, index: usize) {
    if let Some(token) = tokens.get_mut(index) {
        if token.text() != " " {
            token.set_literal(" ");
        }
    }
}

fn hugs_previous(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Comma
            | TokenKind::Colon
            | TokenKind::Semicolon
            | TokenKind::Period
            | TokenKind::Rparen
            | TokenKind::Rsqb
            | TokenKind::Rbrace
    )
}

fn hugs_next(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Lparen | TokenKind::Lsqb | TokenKind::Lbrace | TokenKind::At | TokenKind::And
    )
}

/// No space before separators and closers, none after openers and prefixes.
pub struct TightenPunctuation;

impl Rule for TightenPunctuation {
    fn name(&self) -> &'static str {
        "tighten-punctuation"
    }

    fn apply(&self, tokens: &mut TokenSequence, _options: &FormatOptions) {
        let mut i = 0;
        while i < tokens.len() {
            let kind = tokens[i].kind;
            if hugs_previous(kind)
                && i > 0
                && tokens[i - 1].kind == TokenKind::Whitespace
                && !tokens.is_first_on_line(i)
            {
                tokens.remove(i - 1);
                i -= 1;
            }
            if hugs_next(kind) && tokens.kind(i + 1) == Some(TokenKind::Whitespace) {
                tokens.remove(i + 1);
            }
            i += 1;
        }
    }
}

/// Removes spaces at the end of every line.
pub struct StripTrailingWhitespace;

impl Rule for StripTrailingWhitespace {
    fn name(&self) -> &'static str {
        "strip-trailing-whitespace"
    }

    fn apply(&self, tokens: &mut TokenSequence, _options: &FormatOptions) {
        let mut i = 0;
        while i < tokens.len() {
            if tokens[i].kind == TokenKind::Newline {
                while i > 0 && tokens[i - 1].kind.is_whitespace() {
                    tokens.remove(i - 1);
                    i -= 1;
                }
            }
            i += 1;
        }
    }
}

/// Drops trailing blank lines and, if configured, ends with one newline.
pub struct TrimDocumentEnd;

impl Rule for TrimDocumentEnd {
    fn name(&self) -> &'static str {
        "trim-document-end"
    }

    fn apply(&self, tokens: &mut TokenSequence, options: &FormatOptions) {
        let mut end = match tokens.tokens().last() {
            Some(last) if last.kind == TokenKind::Eof => tokens.len() - 1,
            _ => tokens.len(),
        };
        while end > 0 && tokens[end - 1].kind.is_space() {
            tokens.remove(end - 1);
            end -= 1;
        }
        if options.end_with_newline && end > 0 {
            tokens.insert(
                end,
                Token::synthetic(TokenKind::Newline, options.newline.clone()),
            );
        }
    }
}

/// Rewrites every line break to the configured newline sequence.
pub struct NormalizeNewlines;

impl Rule for NormalizeNewlines {
    fn name(&self) -> &'static str {
        "normalize-newlines"
    }

    fn apply(&self, tokens: &mut TokenSequence, options: &FormatOptions) {
        for i in 0..tokens.len() {
            if tokens[i].kind != TokenKind::Newline || tokens[i].text() == options.newline {
                continue;
            }
            if let Some(token) = tokens.get_mut(i) {
                token.set_literal(options.newline.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn run(rule: &dyn Rule, source: &str) -> String {
        let (tokens, error) = tokenize(source);
        assert!(error.is_none());
        let mut tokens = TokenSequence::new(tokens);
        rule.apply(&mut tokens, &FormatOptions::default());
        tokens.render()
    }

    #[test]
    fn test_remove_leading_blank_lines() {
        assert_eq!(run(&RemoveLeadingBlankLines, "\n  \n\t library X\n"), "library X\n");
        assert_eq!(run(&RemoveLeadingBlankLines, "\n\n"), "");
    }

    #[test]
    fn test_collapse_blank_lines() {
        assert_eq!(run(&CollapseBlankLines, "a\n\n\n\nb"), "a\n\nb");
        assert_eq!(run(&CollapseBlankLines, "a\n  \n \n\t\nb"), "a\n  \nb");
        assert_eq!(run(&CollapseBlankLines, "a\n\nb\nc"), "a\n\nb\nc");
    }

    #[test]
    fn test_collapse_blank_lines_ignores_comment_lines() {
        assert_eq!(
            run(&CollapseBlankLines, "a\n\n(* c *)\n\nb"),
            "a\n\n(* c *)\n\nb"
        );
    }

    #[test]
    fn test_whitespace_only_lines() {
        assert_eq!(run(&WhitespaceOnlyLines, "a\n   \nb\n  "), "a\n\nb\n");
        assert_eq!(run(&WhitespaceOnlyLines, "a\n  b"), "a\n  b");
    }

    #[test]
    fn test_collapse_interior_whitespace() {
        assert_eq!(
            run(&CollapseInteriorWhitespace, "let   x =\t\t1\n    y"),
            "let x = 1\n    y"
        );
    }

    #[test]
    fn test_collapse_interior_whitespace_keeps_comment_spacing() {
        assert_eq!(
            run(&CollapseInteriorWhitespace, "x  (* a *)   (* b *)   y"),
            "x (* a *)   (* b *)   y"
        );
    }

    #[test]
    fn test_space_around_operators() {
        assert_eq!(
            run(&SpaceAroundOperators, "x<-f;y:=x;z=y;fun (a:T)=>a;T->U"),
            "x <- f;y := x;z = y;fun (a:T) => a;T -> U"
        );
    }

    #[test]
    fn test_space_around_operators_at_line_edges() {
        assert_eq!(run(&SpaceAroundOperators, "let x =\n= y"), "let x =\n= y");
        assert_eq!(run(&SpaceAroundOperators, "a    =   b"), "a = b");
    }

    #[test]
    fn test_tighten_punctuation() {
        assert_eq!(
            run(&TightenPunctuation, "f ( a , b ) ; { x : y } [ k ] . c @ l"),
            "f (a, b); {x: y} [k]. c @l"
        );
    }

    #[test]
    fn test_tighten_punctuation_keeps_leading_space() {
        assert_eq!(run(&TightenPunctuation, "f (\n  a\n  )"), "f (\n  a\n  )");
    }

    #[test]
    fn test_strip_trailing_whitespace() {
        assert_eq!(run(&StripTrailingWhitespace, "a  \nb\t\n"), "a\nb\n");
    }

    #[test]
    fn test_trim_document_end() {
        assert_eq!(run(&TrimDocumentEnd, "a\n\n\n  "), "a\n");
        assert_eq!(run(&TrimDocumentEnd, "a"), "a\n");
        assert_eq!(run(&TrimDocumentEnd, ""), "");
    }

    #[test]
    fn test_normalize_newlines() {
        assert_eq!(run(&NormalizeNewlines, "a\r\nb\rc\n"), "a\nb\nc\n");
    }
}
