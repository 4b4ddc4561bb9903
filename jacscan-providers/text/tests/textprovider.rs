#![expect(clippy::expect_used, reason = "tests require contextual panics")]
//! Integration tests covering the text-backed feature matrix loader.
use std::io::Cursor;

use jacscan_providers_text::{TextProvider, TextProviderError, Tokenizer};
use rstest::rstest;

fn rows(provider: &TextProvider) -> Vec<Vec<usize>> {
    provider
        .matrix()
        .iter_rows()
        .map(<[usize]>::to_vec)
        .collect()
}

#[rstest]
#[case("a b\nb c\n", vec![vec![0, 1], vec![1, 2]])]
#[case("a b\r\nb c\r\n", vec![vec![0, 1], vec![1, 2]])]
#[case("a b\nb c", vec![vec![0, 1], vec![1, 2]])]
#[case("  a\t\tb  \n", vec![vec![0, 1]])]
fn try_from_reader_splits_on_whitespace(#[case] raw: &str, #[case] expected: Vec<Vec<usize>>) {
    let provider = TextProvider::try_from_reader("demo", Cursor::new(raw))
        .expect("provider must build");
    assert_eq!(rows(&provider), expected);
}

#[rstest]
fn tokens_are_numbered_by_first_appearance() {
    let provider = TextProvider::try_from_reader("demo", Cursor::new("zeta alpha\nalpha mu\n"))
        .expect("provider must build");
    assert_eq!(provider.vocabulary(), ["zeta", "alpha", "mu"]);
    assert_eq!(provider.feature(2), Some("mu"));
    assert_eq!(provider.feature(3), None);
    assert_eq!(provider.matrix().columns(), 3);
}

#[rstest]
fn blank_lines_are_empty_points() {
    let provider = TextProvider::try_from_reader("demo", Cursor::new("a\n\n   \nb\n"))
        .expect("provider must build");
    assert_eq!(provider.len(), 4);
    assert_eq!(rows(&provider), vec![vec![0], vec![], vec![], vec![1]]);
}

#[rstest]
fn repeated_tokens_count_once() {
    let provider = TextProvider::try_from_reader("demo", Cursor::new("x y x y x\n"))
        .expect("provider must build");
    assert_eq!(rows(&provider), vec![vec![0, 1]]);
    assert_eq!(provider.matrix().nnz(), 2);
}

#[rstest]
#[case(',', "red, green,,blue\n", vec![vec![0, 1, 2]])]
#[case(';', "light blue;dark red\n", vec![vec![0, 1]])]
fn delimiter_tokenizer_trims_and_skips_empty_tokens(
    #[case] delimiter: char,
    #[case] raw: &str,
    #[case] expected: Vec<Vec<usize>>,
) {
    let provider =
        TextProvider::try_from_reader_with("demo", Cursor::new(raw), Tokenizer::Delimiter(delimiter))
            .expect("provider must build");
    assert_eq!(rows(&provider), expected);
}

#[rstest]
fn delimiter_keeps_inner_whitespace() {
    let provider = TextProvider::try_from_lines(
        "demo",
        ["light blue;dark red"],
        Tokenizer::Delimiter(';'),
    )
    .expect("provider must build");
    assert_eq!(provider.vocabulary(), ["light blue", "dark red"]);
}

#[rstest]
fn empty_input_yields_zero_rows() {
    let provider =
        TextProvider::try_from_reader("demo", Cursor::new("")).expect("provider must build");
    assert!(provider.is_empty());
    assert!(provider.vocabulary().is_empty());
    assert_eq!(provider.into_matrix().rows(), 0);
}

#[rstest]
fn invalid_utf8_reports_line_number() {
    let raw: &[u8] = b"ok\nstill ok\n\xff\xfe\n";
    let err = TextProvider::try_from_reader("demo", Cursor::new(raw))
        .expect_err("invalid UTF-8 must fail");
    assert!(matches!(err, TextProviderError::InvalidUtf8 { line: 3 }));
    assert_eq!(err.to_string(), "line 3 is not valid UTF-8");
}

#[rstest]
fn try_from_reader_propagates_io_error() {
    struct FailingReader;

    impl std::io::Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("boom"))
        }
    }

    impl std::io::BufRead for FailingReader {
        fn fill_buf(&mut self) -> std::io::Result<&[u8]> {
            Err(std::io::Error::other("boom"))
        }

        fn consume(&mut self, _amt: usize) {}
    }

    let err = TextProvider::try_from_reader("demo", FailingReader)
        .expect_err("I/O failure must propagate");
    assert!(matches!(err, TextProviderError::Io(_)));
}

#[rstest]
fn provider_reports_metadata() {
    let provider = TextProvider::try_from_lines("features.txt", ["a", "b"], Tokenizer::default())
        .expect("provider must build");
    assert_eq!(provider.name(), "features.txt");
    assert_eq!(provider.len(), 2);
    assert!(!provider.is_empty());
}
