use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor, Read};
use std::path::{Path, PathBuf};

use crate::line_char_nums::{CharNum, LineCharNums, LineNum};
use crate::scanner::{ScanResult, Scanner};
use crate::source_chars::source_chars;

pub const TEST_DATA_DIR: &'static str = "test_data";
pub const GLOB_STR: &'static str = "*.{bin,txt}";

/// `LineCharNums` from bare numbers, for writing expected values.
pub fn lc(line: u64, char: u64) -> LineCharNums {
    LineCharNums::new(LineNum::new(line), CharNum::new(char))
}

/// Runs the whole scan pipeline over `bytes` and collects every result.
pub fn scan_bytes(bytes: Vec<u8>) -> Vec<ScanResult> {
    Scanner::new(source_chars(Box::new(Cursor::new(bytes)))).collect()
}

pub fn scan_str(s: &str) -> Vec<ScanResult> {
    scan_bytes(s.as_bytes().to_vec())
}

/// A reader that yields its bytes and then fails instead of reaching EOF.
pub struct FailingReader {
    bytes: Cursor<Vec<u8>>,
    message: &'static str,
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.bytes.read(buf)? {
            0 => Err(io::Error::new(io::ErrorKind::Other, self.message)),
            n => Ok(n),
        }
    }
}

/// Scan input that delivers `bytes` and then a read error with `message`.
pub fn failing_input(bytes: &[u8], message: &'static str) -> Box<dyn BufRead> {
    Box::new(BufReader::new(FailingReader {
        bytes: Cursor::new(bytes.to_vec()),
        message,
    }))
}

/// Calls `test_fn` for every file under `test_data_subdir` matching `GLOB_STR`.
pub fn fixture_glob<P: Into<PathBuf>, F: FnMut(&Path, Box<dyn BufRead>)>(
    test_data_subdir: P,
    mut test_fn: F,
) {
    let fixture_dir = PathBuf::from(TEST_DATA_DIR).join(test_data_subdir.into());

    insta::glob!(fixture_dir, GLOB_STR, |file_path| {
        let file = File::open(file_path).unwrap();

        test_fn(file_path, Box::new(BufReader::new(file)));
    });
}

/// Reads the `.ron` expectation sitting next to a fixture file.
pub fn expected_results(file_path: &Path) -> Vec<ScanResult> {
    let ron_path = file_path.with_extension("ron");
    let text = std::fs::read_to_string(&ron_path)
        .unwrap_or_else(|e| panic!("{}: {e}", ron_path.display()));

    ron::from_str(&text).unwrap_or_else(|e| panic!("{}: {e}", ron_path.display()))
}

/// Reads the `.out` expectation sitting next to a fixture file.
///
/// Line endings are normalized so a checkout that rewrites them does not
/// change the expectation.
pub fn expected_output(file_path: &Path) -> String {
    let out_path = file_path.with_extension("out");

    std::fs::read_to_string(&out_path)
        .unwrap_or_else(|e| panic!("{}: {e}", out_path.display()))
        .replace("\r\n", "\n")
}
