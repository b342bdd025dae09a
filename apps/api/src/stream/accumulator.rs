/// Append-only text buffer for one logical stream.
#[derive(Debug, Default, Clone)]
pub struct Accumulator {
    buffer: String,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, chunk: &str) {
        self.buffer.push_str(chunk);
    }

    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_concatenates_in_order() {
        let mut acc = Accumulator::new();
        acc.append("{\"na");
        acc.append("me\":");
        acc.append("\"Ana\"");
        assert_eq!(acc.as_str(), "{\"name\":\"Ana\"");
        assert_eq!(acc.len(), 13);
    }

    #[test]
    fn test_empty_chunk_is_a_no_op() {
        let mut acc = Accumulator::new();
        acc.append("abc");
        acc.append("");
        assert_eq!(acc.as_str(), "abc");
    }

    #[test]
    fn test_reset_clears_buffer() {
        let mut acc = Accumulator::new();
        acc.append("{\"name\"");
        acc.reset();
        assert!(acc.is_empty());
        acc.append("{");
        assert_eq!(acc.as_str(), "{");
    }
}
