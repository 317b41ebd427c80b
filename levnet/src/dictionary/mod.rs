//! Word lists: whitespace-separated tokens from a file, stream or string.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use memmap2::MmapOptions;
use smol_str::SmolStr;

use self::error::DictionaryError;

pub mod error;

/// The words of a dictionary, in input order. Duplicates are kept; every
/// index built from a dictionary stores each word once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    words: Vec<SmolStr>,
}

impl Dictionary {
    /// Maps the file at `path` and splits it on whitespace.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Dictionary, DictionaryError> {
        let path = path.as_ref();
        let io_error = |source| DictionaryError::Io {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(io_error)?;

        if file.metadata().map_err(io_error)?.len() == 0 {
            log::warn!("dictionary {} is empty", path.display());
            return Ok(Dictionary::default());
        }

        let mmap = unsafe { MmapOptions::new().map(&file) }.map_err(io_error)?;
        let text = std::str::from_utf8(&mmap).map_err(|source| DictionaryError::Encoding {
            path: path.to_path_buf(),
            source,
        })?;

        let dictionary = Dictionary::parse(text);
        log::debug!(
            "loaded {} words from {}",
            dictionary.len(),
            path.display()
        );

        Ok(dictionary)
    }

    /// Reads `reader` to the end and splits it on whitespace.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Dictionary, DictionaryError> {
        let mut buffer = String::new();
        reader.read_to_string(&mut buffer)?;
        Ok(Dictionary::parse(&buffer))
    }

    /// Splits `text` on whitespace.
    pub fn parse(text: &str) -> Dictionary {
        text.split_whitespace().collect()
    }

    /// Number of words, duplicates included.
    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the dictionary holds no words.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The words in input order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.words.iter().map(SmolStr::as_str)
    }

    /// The words as stored.
    pub fn words(&self) -> &[SmolStr] {
        &self.words
    }

    /// Consumes the dictionary, returning its words.
    pub fn into_words(self) -> Vec<SmolStr> {
        self.words
    }
}

impl<S: AsRef<str>> FromIterator<S> for Dictionary {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Dictionary {
        Dictionary {
            words: iter.into_iter().map(|w| SmolStr::new(w.as_ref())).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, Write};

    use super::*;

    #[test]
    fn splits_on_any_whitespace() {
        let dictionary = Dictionary::parse("  cat\ncot\r\ncog\t\tdog  \n\ncar ");

        assert_eq!(
            dictionary.iter().collect::<Vec<_>>(),
            vec!["cat", "cot", "cog", "dog", "car"]
        );
    }

    #[test]
    fn keeps_duplicates_and_order() {
        let dictionary = Dictionary::parse("b a b");

        assert_eq!(dictionary.iter().collect::<Vec<_>>(), vec!["b", "a", "b"]);
        assert_eq!(dictionary.len(), 3);
    }

    #[test]
    fn empty_text() {
        assert!(Dictionary::parse("").is_empty());
        assert!(Dictionary::parse(" \n\t ").is_empty());
    }

    #[test]
    fn reads_stream() {
        let dictionary = Dictionary::from_reader("causes\ncause\n".as_bytes()).unwrap();

        assert_eq!(dictionary.words(), &[SmolStr::new("causes"), SmolStr::new("cause")]);
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "connection lost"))
        }
    }

    #[test]
    fn stream_failure() {
        match Dictionary::from_reader(FailingReader) {
            Err(DictionaryError::Stream(e)) => assert_eq!(e.kind(), io::ErrorKind::BrokenPipe),
            other => panic!("expected a stream error, got {:?}", other),
        }
    }

    #[test]
    fn stream_not_utf8() {
        assert!(matches!(
            Dictionary::from_reader(&b"cat\n\xff\n"[..]),
            Err(DictionaryError::Stream(_))
        ));
    }

    #[test]
    fn opens_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "causes\nclauses\ncause\nnaïve").unwrap();
        file.flush().unwrap();

        let dictionary = Dictionary::open(file.path()).unwrap();

        assert_eq!(
            dictionary.into_words(),
            vec!["causes", "clauses", "cause", "naïve"]
        );
    }

    #[test]
    fn opens_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();

        let dictionary = Dictionary::open(file.path()).unwrap();

        assert!(dictionary.is_empty());
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");

        match Dictionary::open(&path) {
            Err(DictionaryError::Io { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected an I/O error, got {:?}", other),
        }
    }

    #[test]
    fn rejects_invalid_utf8() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"cat\n\xff\xfe\n").unwrap();
        file.flush().unwrap();

        assert!(matches!(
            Dictionary::open(file.path()),
            Err(DictionaryError::Encoding { .. })
        ));
    }
}
