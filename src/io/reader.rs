use std::io::{ErrorKind, Read};

use crate::interpreter::RuntimeError;

use super::EofPolicy;

pub struct BitReader<R> {
    in_stream: R,
    eof: EofPolicy,

    /// the byte currently being handed out bit by bit
    current: u8,
    /// bits of `current` still to hand out
    remaining: u8,
    exhausted: bool,

    bits_read: u64,
}

impl<R: Read> BitReader<R> {
    pub fn new(in_stream: R, eof: EofPolicy) -> Self {
        Self {
            in_stream,
            eof,
            current: 0,
            remaining: 0,
            exhausted: false,
            bits_read: 0,
        }
    }

    /// Read the next bit, pulling a fresh byte from the stream every 8 bits
    pub fn read_bit(&mut self) -> Result<bool, RuntimeError> {
        if self.remaining == 0 {
            match self.next_byte()? {
                Some(byte) => {
                    self.current = byte;
                    self.remaining = 8;
                }
                None => {
                    return match self.eof {
                        EofPolicy::Zero => Ok(false),
                        EofPolicy::One => Ok(true),
                        EofPolicy::Fault => Err(RuntimeError::InputExhausted {
                            bit: self.bits_read,
                        }),
                    };
                }
            }
        }

        let bit = self.current & 1 == 1;
        self.current >>= 1;
        self.remaining -= 1;
        self.bits_read += 1;
        Ok(bit)
    }

    /// Bits actually taken from the stream (eof filler isn't counted)
    pub fn bits_read(&self) -> u64 {
        self.bits_read
    }

    fn next_byte(&mut self) -> Result<Option<u8>, RuntimeError> {
        // once a stream says eof we don't ask it again, stdin would block
        if self.exhausted {
            return Ok(None);
        }
        let mut buf = [0u8; 1];
        loop {
            match self.in_stream.read(&mut buf) {
                Ok(0) => {
                    self.exhausted = true;
                    return Ok(None);
                }
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    fn bits<R: Read>(reader: &mut BitReader<R>, count: usize) -> Vec<bool> {
        (0..count).map(|_| reader.read_bit().unwrap()).collect()
    }

    #[test]
    fn reads_little_endian() {
        let mut reader = BitReader::new(&b"\xa3"[..], EofPolicy::Zero);
        assert_eq!(
            bits(&mut reader, 8),
            vec![true, true, false, false, false, true, false, true]
        );
        assert_eq!(reader.bits_read(), 8);
    }

    #[test]
    fn pulls_bytes_in_order() {
        let mut reader = BitReader::new(&b"\x01\x80"[..], EofPolicy::Zero);
        let read = bits(&mut reader, 16);
        assert!(read[0]);
        assert!(read[15]);
        assert_eq!(read.iter().filter(|b| **b).count(), 2);
    }

    #[test]
    fn eof_policies() {
        let mut zero = BitReader::new(io::empty(), EofPolicy::Zero);
        assert_eq!(bits(&mut zero, 3), vec![false; 3]);
        assert_eq!(zero.bits_read(), 0);

        let mut one = BitReader::new(io::empty(), EofPolicy::One);
        assert_eq!(bits(&mut one, 3), vec![true; 3]);

        let mut fault = BitReader::new(&b"\xff"[..], EofPolicy::Fault);
        assert_eq!(bits(&mut fault, 8), vec![true; 8]);
        assert!(matches!(
            fault.read_bit(),
            Err(RuntimeError::InputExhausted { bit: 8 })
        ));
    }

    struct Flaky {
        interrupted: bool,
    }

    impl Read for Flaky {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(io::Error::from(ErrorKind::Interrupted));
            }
            Err(io::Error::new(ErrorKind::Other, "device gone"))
        }
    }

    #[test]
    fn retries_interrupts_and_surfaces_other_errors() {
        let mut reader = BitReader::new(Flaky { interrupted: false }, EofPolicy::Zero);
        match reader.read_bit() {
            Err(RuntimeError::Io(e)) => assert_eq!(e.to_string(), "device gone"),
            other => panic!("expected an io error, got {other:?}"),
        }
    }
}
