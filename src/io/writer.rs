use std::io::Write;

pub struct BitWriter<W> {
    out_stream: W,

    /// bits collected for the next byte, lowest bit first
    pending: u8,
    pending_len: u8,

    bits_written: u64,
    bytes_written: u64,
}

impl<W: Write> BitWriter<W> {
    pub fn new(out_stream: W) -> Self {
        Self {
            out_stream,
            pending: 0,
            pending_len: 0,
            bits_written: 0,
            bytes_written: 0,
        }
    }

    /// Queue a bit, the byte is written out as soon as it is complete
    pub fn write_bit(&mut self, bit: bool) -> std::io::Result<()> {
        self.pending |= u8::from(bit) << self.pending_len;
        self.pending_len += 1;
        self.bits_written += 1;

        if self.pending_len == 8 {
            self.emit()?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        self.out_stream.flush()
    }

    /// Deal with a trailing partial byte and flush the stream.
    ///
    /// With `pad` the missing high bits are filled with zeros and the byte is
    /// written, otherwise it's dropped.
    pub fn finish(&mut self, pad: bool) -> std::io::Result<()> {
        if self.pending_len > 0 {
            if pad {
                self.emit()?;
            } else {
                self.pending = 0;
                self.pending_len = 0;
            }
        }
        self.flush()
    }

    pub fn bits_written(&self) -> u64 {
        self.bits_written
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Bits waiting for the current byte to fill up
    pub fn pending_bits(&self) -> u8 {
        self.pending_len
    }

    pub fn get_ref(&self) -> &W {
        &self.out_stream
    }

    pub fn into_inner(self) -> W {
        self.out_stream
    }

    fn emit(&mut self) -> std::io::Result<()> {
        self.out_stream.write_all(&[self.pending])?;
        self.pending = 0;
        self.pending_len = 0;
        self.bytes_written += 1;
        Ok(())
    }
}
