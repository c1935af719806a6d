use thiserror::Error;

const WORD_BITS: usize = u64::BITS as usize;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TapeError {
    #[error("Data pointer moved outside of the addressable range")]
    PointerOverflow,

    #[error("Tape grew past its limit of {limit} bits")]
    LimitExceeded { limit: usize },
}

/// One half of the tape, growing away from the origin.
#[derive(Debug, Clone, Default)]
struct Half {
    words: Vec<u64>,
    /// one past the furthest bit that has been written
    len: usize,
}

impl Half {
    fn get(&self, index: usize) -> bool {
        self.words
            .get(index / WORD_BITS)
            .is_some_and(|word| (word >> (index % WORD_BITS)) & 1 == 1)
    }

    fn word_mut(&mut self, index: usize) -> &mut u64 {
        let word = index / WORD_BITS;
        if word >= self.words.len() {
            self.words.resize(word + 1, 0);
        }
        self.len = self.len.max(index + 1);
        &mut self.words[word]
    }
}

/// An unbounded tape of bits with a movable data pointer.
///
/// Non-negative positions live in one half and negative ones in the other
/// (position `-1` is index 0 of the negative half), so the pointer can wander
/// either way from the origin. Moving never allocates; storage only grows
/// when a bit is written.
#[derive(Debug, Clone, Default)]
pub struct Tape {
    /// Signed position of the data pointer relative to the origin
    pointer: isize,

    positive: Half,
    negative: Half,

    /// Max number of bits the two halves may hold together
    limit: Option<usize>,
}

impl Tape {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    pub fn pointer(&self) -> isize {
        self.pointer
    }

    pub fn move_left(&mut self) -> Result<(), TapeError> {
        self.move_by(-1)
    }

    pub fn move_right(&mut self) -> Result<(), TapeError> {
        self.move_by(1)
    }

    pub fn move_by(&mut self, delta: isize) -> Result<(), TapeError> {
        self.pointer = self
            .pointer
            .checked_add(delta)
            .ok_or(TapeError::PointerOverflow)?;
        Ok(())
    }

    /// The bit under the data pointer
    pub fn read_current(&self) -> bool {
        self.get(self.pointer)
    }

    pub fn get(&self, position: isize) -> bool {
        match split(position) {
            (false, index) => self.positive.get(index),
            (true, index) => self.negative.get(index),
        }
    }

    pub fn set_current(&mut self, bit: bool) -> Result<(), TapeError> {
        // clearing a bit nobody has touched doesn't need any storage
        if !bit && !self.read_current() {
            return Ok(());
        }
        let (word, mask) = self.current_word_mut()?;
        if bit {
            *word |= mask;
        } else {
            *word &= !mask;
        }
        Ok(())
    }

    pub fn toggle(&mut self) -> Result<(), TapeError> {
        let (word, mask) = self.current_word_mut()?;
        *word ^= mask;
        Ok(())
    }

    /// Lowest and highest positions that have storage behind them, if any.
    pub fn span(&self) -> Option<(isize, isize)> {
        let low = match self.negative.len {
            0 if self.positive.len == 0 => return None,
            0 => 0,
            len => -(len as isize),
        };
        let high = match self.positive.len {
            0 => -1,
            len => len as isize - 1,
        };
        Some((low, high))
    }

    /// Bits with storage behind them across both halves
    pub fn used_bits(&self) -> usize {
        self.positive.len + self.negative.len
    }

    pub fn reset(&mut self) {
        self.pointer = 0;
        self.positive = Half::default();
        self.negative = Half::default();
    }

    fn current_word_mut(&mut self) -> Result<(&mut u64, u64), TapeError> {
        let (negative, index) = split(self.pointer);
        let (half, other) = if negative {
            (&mut self.negative, &self.positive)
        } else {
            (&mut self.positive, &self.negative)
        };

        if let Some(limit) = self.limit {
            let needed = half.len.max(index + 1) + other.len;
            if needed > limit {
                return Err(TapeError::LimitExceeded { limit });
            }
        }

        Ok((half.word_mut(index), 1 << (index % WORD_BITS)))
    }
}

/// Maps a signed position to (is_negative, index into that half)
fn split(position: isize) -> (bool, usize) {
    if position >= 0 {
        (false, position as usize)
    } else {
        // -1 -> 0, -2 -> 1, ...; `!position` can't overflow unlike `-position - 1`
        (true, !position as usize)
    }
}
