use std::fmt;

pub mod lexer;

/// Which characters count as commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Syntax {
    /// Only `+ , ; < > [ ]`, so `-` and `.` are free for comments
    Boolfuck,
    /// The Boolfuck set plus `-` (flip) and `.` (write). A bit only has two
    /// states so increment and decrement are the same flip.
    #[default]
    Extended,
}

impl Syntax {
    pub fn is_command(self, c: char) -> bool {
        match c {
            '+' | ',' | ';' | '<' | '>' | '[' | ']' => true,
            '-' | '.' => self == Syntax::Extended,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    // `+` (and `-` in the extended syntax): Flip the bit under the `data pointer`
    Flip,

    // `<`: Move the `data pointer` one bit to the left
    Left,
    // `>`: Move the `data pointer` one bit to the right
    Right,

    // `,`: Read one bit from the `input device` into the bit under the `data pointer`
    Read,
    // `;` (and `.` in the extended syntax): Write the bit under the `data pointer` to the `output device`
    Write,

    // `[`: If the bit under the `data pointer` is zero, jump forward to the instruction after the matching `]`
    JumpStart,
    // `]`: If the bit under the `data pointer` is one, jump back to the instruction after the matching `[`
    JumpEnd,

    // End of file: no more tokens left
    EOF,

    // Comment every other character
    Comment(String),
}

/// Where a token starts in the source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Position {
    /** Human Readable positions in file */
    pub line: usize,
    pub column: usize,

    /** offset within the file (in terms of 'codepoints') */
    pub offset: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: Position,
}

impl Token {
    pub fn symbol(&self) -> Option<char> {
        match self.kind {
            TokenKind::Flip => Some('+'),
            TokenKind::Left => Some('<'),
            TokenKind::Right => Some('>'),
            TokenKind::Read => Some(','),
            TokenKind::Write => Some(';'),
            TokenKind::JumpStart => Some('['),
            TokenKind::JumpEnd => Some(']'),
            TokenKind::EOF | TokenKind::Comment(_) => None,
        }
    }
}
