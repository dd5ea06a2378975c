/// Decodes byte chunks into text without splitting multi-byte characters
/// across chunk boundaries.
#[derive(Debug, Default)]
pub(crate) struct Utf8Chunker {
    pending: Vec<u8>,
}

impl Utf8Chunker {
    pub fn push(&mut self, bytes: &[u8]) -> String {
        self.pending.extend_from_slice(bytes);
        let mut out = String::new();
        loop {
            match std::str::from_utf8(&self.pending) {
                Ok(s) => {
                    out.push_str(s);
                    self.pending.clear();
                    return out;
                }
                Err(e) => {
                    let valid = e.valid_up_to();
                    out.push_str(&String::from_utf8_lossy(&self.pending[..valid]));
                    match e.error_len() {
                        Some(bad) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            self.pending.drain(..valid + bad);
                        }
                        // Incomplete sequence at the end: keep it for the next chunk.
                        None => {
                            self.pending.drain(..valid);
                            return out;
                        }
                    }
                }
            }
        }
    }

    pub fn finish(&mut self) -> String {
        let out = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending.clear();
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_multibyte_char_is_joined() {
        let bytes = "ok ✔".as_bytes();
        let mut c = Utf8Chunker::default();
        let first = c.push(&bytes[..4]);
        let second = c.push(&bytes[4..]);
        assert_eq!(first, "ok ");
        assert_eq!(second, "✔");
        assert_eq!(c.finish(), "");
    }

    #[test]
    fn invalid_bytes_are_replaced() {
        let mut c = Utf8Chunker::default();
        assert_eq!(c.push(&[b'a', 0xff, b'b']), "a\u{FFFD}b");
    }

    #[test]
    fn invalid_byte_does_not_break_a_split_char() {
        let mut c = Utf8Chunker::default();
        let first = c.push(&[b'a', 0xff, b'b', 0xe2, 0x9c]);
        let second = c.push(&[0x94]);
        assert_eq!(first, "a\u{FFFD}b");
        assert_eq!(format!("{first}{second}"), "a\u{FFFD}b✔");
        assert_eq!(c.finish(), "");
    }

    #[test]
    fn each_invalid_sequence_is_one_replacement() {
        let mut c = Utf8Chunker::default();
        assert_eq!(c.push(&[0xff, 0xfe, b'x']), "\u{FFFD}\u{FFFD}x");
    }

    #[test]
    fn dangling_bytes_flush_lossily() {
        let mut c = Utf8Chunker::default();
        assert_eq!(c.push(&[b'x', 0xe2, 0x9c]), "x");
        assert_eq!(c.finish(), "\u{FFFD}");
    }
}
