use super::{Position, Syntax, Token, TokenKind};

#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    /** Human Readable positions in file */
    pub cur_line: usize,
    pub cur_col: usize,

    /** 'raw' format / offset within the file (in terms of 'codepoints') */
    pub codepoint_offset: usize,

    chars: std::iter::Peekable<std::str::Chars<'a>>,
    syntax: Syntax,
}

impl<'a> Lexer<'a> {
    pub fn new(chars: &'a str, syntax: Syntax) -> Lexer<'a> {
        Lexer {
            cur_col: 1,
            cur_line: 1,

            codepoint_offset: 0,

            chars: chars.chars().peekable(),
            syntax,
        }
    }

    fn position(&self) -> Position {
        Position {
            line: self.cur_line,
            column: self.cur_col,
            offset: self.codepoint_offset,
        }
    }

    fn transform_to_type(&mut self, c: char) -> TokenKind {
        match c {
            '+' => TokenKind::Flip,
            '-' if self.syntax == Syntax::Extended => TokenKind::Flip,
            '<' => TokenKind::Left,
            '>' => TokenKind::Right,
            ',' => TokenKind::Read,
            ';' => TokenKind::Write,
            '.' if self.syntax == Syntax::Extended => TokenKind::Write,
            '[' => TokenKind::JumpStart,
            ']' => TokenKind::JumpEnd,
            c => {
                // Simplify the comment stream down to strings
                let mut comment = String::from(c);
                while let Some(&next) = self.chars.peek() {
                    if self.syntax.is_command(next) {
                        break;
                    }
                    self.consume_char();
                    comment.push(next);
                }
                // trailing whitespace isn't part of the comment
                comment.truncate(comment.trim_end().len());

                TokenKind::Comment(comment)
            }
        }
    }

    fn consume_char(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        self.cur_col += 1;
        if c == '\n' {
            self.cur_line += 1;
            self.cur_col = 1;
        }
        self.codepoint_offset += 1;
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.chars.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.consume_char();
        }
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let position = self.position();
        let kind = match self.consume_char() {
            Some(c) => self.transform_to_type(c),
            None => TokenKind::EOF,
        };
        Token { kind, position }
    }

    /// Every token up to (but not including) the end of file.
    pub fn collect_tokens(&mut self) -> Vec<Token> {
        let mut v = vec![];
        loop {
            match self.next_token() {
                Token {
                    kind: TokenKind::EOF,
                    ..
                } => break v,
                tok => v.push(tok),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str, syntax: Syntax) -> Vec<TokenKind> {
        Lexer::new(source, syntax)
            .collect_tokens()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn lexes_every_command() {
        assert_eq!(
            kinds("+,;<>[]", Syntax::Boolfuck),
            vec![
                TokenKind::Flip,
                TokenKind::Read,
                TokenKind::Write,
                TokenKind::Left,
                TokenKind::Right,
                TokenKind::JumpStart,
                TokenKind::JumpEnd,
            ]
        );
    }

    #[test]
    fn comments_are_grouped() {
        assert_eq!(
            kinds("flip it + now - done.", Syntax::Boolfuck),
            vec![
                TokenKind::Comment("flip it".to_string()),
                TokenKind::Flip,
                TokenKind::Comment("now - done.".to_string()),
            ]
        );
    }

    #[test]
    fn extended_syntax_aliases() {
        assert_eq!(
            kinds("-.", Syntax::Extended),
            vec![TokenKind::Flip, TokenKind::Write]
        );
        assert_eq!(
            kinds("-.", Syntax::Boolfuck),
            vec![TokenKind::Comment("-.".to_string())]
        );
    }

    #[test]
    fn default_syntax_has_eight_commands() {
        assert_eq!(Syntax::default(), Syntax::Extended);
        assert_eq!(
            kinds("+-,;.<>[]", Syntax::default()),
            vec![
                TokenKind::Flip,
                TokenKind::Flip,
                TokenKind::Read,
                TokenKind::Write,
                TokenKind::Write,
                TokenKind::Left,
                TokenKind::Right,
                TokenKind::JumpStart,
                TokenKind::JumpEnd,
            ]
        );
    }

    #[test]
    fn tracks_positions() {
        let tokens = Lexer::new("+\n  >é<", Syntax::Boolfuck).collect_tokens();
        let positions: Vec<_> = tokens.iter().map(|t| t.position).collect();
        assert_eq!(
            positions,
            vec![
                Position { line: 1, column: 1, offset: 0 },
                Position { line: 2, column: 3, offset: 4 },
                Position { line: 2, column: 4, offset: 5 },
                Position { line: 2, column: 5, offset: 6 },
            ]
        );
        assert_eq!(tokens[2].kind, TokenKind::Comment("é".to_string()));
    }

    #[test]
    fn empty_source_has_no_tokens() {
        assert!(kinds("", Syntax::Boolfuck).is_empty());
        assert!(kinds(" \n\t ", Syntax::Boolfuck).is_empty());
    }
}
