//! Text provider for line-oriented categorical feature files.
//!
//! Each line is one point and each token on the line is one feature. Tokens
//! are mapped to matrix columns in order of first appearance, so the same
//! file always produces the same [`CsrMatrix`].
use std::{
    collections::{HashMap, hash_map::Entry},
    io::BufRead,
};

use jacscan_core::{CsrMatrix, MatrixError};
use thiserror::Error;

/// Errors raised while loading a [`TextProvider`].
#[derive(Debug, Error)]
pub enum TextProviderError {
    /// Reading from the underlying source failed.
    #[error("failed to read feature lines: {0}")]
    Io(#[from] std::io::Error),
    /// A line was not valid UTF-8.
    #[error("line {line} is not valid UTF-8")]
    InvalidUtf8 {
        /// One-based line number.
        line: usize,
    },
    /// The assembled matrix failed validation.
    #[error("feature matrix is invalid: {0}")]
    Matrix(#[from] MatrixError),
}

/// How a line is split into feature tokens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tokenizer {
    /// Split on runs of Unicode whitespace.
    #[default]
    Whitespace,
    /// Split on a single character; surrounding whitespace is trimmed and
    /// empty tokens are skipped.
    Delimiter(char),
}

impl Tokenizer {
    fn tokens<'a>(self, line: &'a str) -> Box<dyn Iterator<Item = &'a str> + 'a> {
        match self {
            Self::Whitespace => Box::new(line.split_whitespace()),
            Self::Delimiter(delimiter) => Box::new(
                line.split(delimiter)
                    .map(str::trim)
                    .filter(|token| !token.is_empty()),
            ),
        }
    }
}

/// Feature matrix loaded from text together with its token vocabulary.
#[derive(Clone, Debug)]
pub struct TextProvider {
    name: String,
    vocabulary: Vec<String>,
    matrix: CsrMatrix,
}

impl TextProvider {
    /// Builds a provider from in-memory lines.
    ///
    /// # Errors
    /// Returns [`TextProviderError::Matrix`] if the assembled matrix fails
    /// validation.
    ///
    /// # Examples
    /// ```
    /// use jacscan_providers_text::{TextProvider, Tokenizer};
    ///
    /// let lines = ["red blue", "", "blue"];
    /// let provider = TextProvider::try_from_lines("demo", lines, Tokenizer::Whitespace)?;
    /// assert_eq!(provider.len(), 3);
    /// assert_eq!(provider.vocabulary(), ["red", "blue"]);
    /// assert_eq!(provider.matrix().row(2), Some(&[1][..]));
    /// # Ok::<(), jacscan_providers_text::TextProviderError>(())
    /// ```
    pub fn try_from_lines<I, S>(
        name: impl Into<String>,
        lines: I,
        tokenizer: Tokenizer,
    ) -> Result<Self, TextProviderError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vocabulary = Vocabulary::default();
        let rows: Vec<Vec<usize>> = lines
            .into_iter()
            .map(|line| vocabulary.encode(tokenizer.tokens(line.as_ref())))
            .collect();
        let matrix = CsrMatrix::from_rows(vocabulary.tokens.len(), rows)?;
        Ok(Self {
            name: name.into(),
            vocabulary: vocabulary.tokens,
            matrix,
        })
    }

    /// Reads one point per line from `reader`, splitting on whitespace.
    ///
    /// # Errors
    /// Returns [`TextProviderError::Io`] if reading fails and
    /// [`TextProviderError::InvalidUtf8`] if a line is not UTF-8.
    pub fn try_from_reader<R: BufRead>(
        name: impl Into<String>,
        reader: R,
    ) -> Result<Self, TextProviderError> {
        Self::try_from_reader_with(name, reader, Tokenizer::default())
    }

    /// Reads one point per line from `reader` using `tokenizer`.
    ///
    /// Trailing `\n` and `\r\n` terminators are stripped. A trailing
    /// terminator on the final line does not introduce an extra point.
    ///
    /// # Errors
    /// Returns [`TextProviderError::Io`] if reading fails and
    /// [`TextProviderError::InvalidUtf8`] if a line is not UTF-8.
    pub fn try_from_reader_with<R: BufRead>(
        name: impl Into<String>,
        mut reader: R,
        tokenizer: Tokenizer,
    ) -> Result<Self, TextProviderError> {
        let mut lines = Vec::new();
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            if buf.last() == Some(&b'\n') {
                buf.pop();
                if buf.last() == Some(&b'\r') {
                    buf.pop();
                }
            }
            let line = String::from_utf8(std::mem::take(&mut buf)).map_err(|_| {
                TextProviderError::InvalidUtf8 {
                    line: lines.len() + 1,
                }
            })?;
            lines.push(line);
        }
        Self::try_from_lines(name, lines, tokenizer)
    }

    /// Name used to identify the source in reports.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of points (lines) loaded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.matrix.rows()
    }

    /// Returns whether no points were loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matrix.is_empty()
    }

    /// Distinct tokens in column order.
    #[must_use]
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Token mapped to `column`, if any.
    #[must_use]
    pub fn feature(&self, column: usize) -> Option<&str> {
        self.vocabulary.get(column).map(String::as_str)
    }

    /// Feature matrix with one row per line.
    #[must_use]
    pub fn matrix(&self) -> &CsrMatrix {
        &self.matrix
    }

    /// Consumes the provider and returns its matrix.
    #[must_use]
    pub fn into_matrix(self) -> CsrMatrix {
        self.matrix
    }
}

#[derive(Default)]
struct Vocabulary {
    columns: HashMap<String, usize>,
    tokens: Vec<String>,
}

impl Vocabulary {
    fn encode<'a>(&mut self, tokens: impl Iterator<Item = &'a str>) -> Vec<usize> {
        let mut row: Vec<usize> = tokens.map(|token| self.column(token)).collect();
        row.sort_unstable();
        row.dedup();
        row
    }

    fn column(&mut self, token: &str) -> usize {
        match self.columns.entry(token.to_owned()) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                let column = self.tokens.len();
                self.tokens.push(token.to_owned());
                *entry.insert(column)
            }
        }
    }
}
