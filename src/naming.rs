//! Output file naming

use std::path::Path;

/// Extension of every generated file
pub const OUTPUT_EXTENSION: &str = "png";

/// Formats zero-padded, 1-based output file names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputNamer {
    digits: usize,
}

impl OutputNamer {
    #[must_use]
    pub fn new(digits: usize) -> Self {
        Self { digits }
    }

    #[must_use]
    pub fn digits(&self) -> usize {
        self.digits
    }

    /// Zero-padded sequence number; wider numbers are never truncated
    #[must_use]
    pub fn sequence(&self, index: usize) -> String {
        format!("{:0width$}", index, width = self.digits)
    }

    /// `{stem}_{index}.png`, used when every input gets its own palette
    #[must_use]
    pub fn name_for(&self, stem: &str, index: usize) -> String {
        format!("{}_{}.{}", stem, self.sequence(index), OUTPUT_EXTENSION)
    }

    /// `{index}.png`, used when inputs are cycled over a single palette
    #[must_use]
    pub fn sequence_name(&self, index: usize) -> String {
        format!("{}.{}", self.sequence(index), OUTPUT_EXTENSION)
    }
}

/// File stem of an input path, lossily converted
#[must_use]
pub fn input_stem(path: &Path) -> String {
    path.file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_padding() {
        let namer = OutputNamer::new(4);
        assert_eq!(namer.sequence(1), "0001");
        assert_eq!(namer.sequence(42), "0042");
        assert_eq!(namer.sequence(9999), "9999");
    }

    #[test]
    fn test_wider_numbers_not_truncated() {
        let namer = OutputNamer::new(2);
        assert_eq!(namer.sequence(123), "123");
        assert_eq!(namer.sequence_name(100), "100.png");
    }

    #[test]
    fn test_per_input_names() {
        let namer = OutputNamer::new(3);
        assert_eq!(namer.name_for("cat", 1), "cat_001.png");
        assert_eq!(namer.name_for("my.complex.name", 12), "my.complex.name_012.png");
    }

    #[test]
    fn test_sequence_names() {
        let namer = OutputNamer::new(5);
        assert_eq!(namer.sequence_name(7), "00007.png");
    }

    #[test]
    fn test_input_stem() {
        assert_eq!(input_stem(Path::new("/data/sprites/hero.png")), "hero");
        assert_eq!(input_stem(Path::new("archive.tar.PNG")), "archive.tar");
        assert_eq!(input_stem(Path::new("no_extension")), "no_extension");
    }
}
