// Copyright 2026 the tickscan developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::parity::Parity;
use crate::scanner::{ScanResult, Scanner};
use crate::source_chars::source_chars;

/// Scans `input` and writes the report to `out`.
///
/// Writes one line per backtick found and a warning after every line that
/// ends with an odd running count. A blank line, the total, and the verdict
/// close the report.
/// A decode or read failure stops the report where it stands: whatever was
/// written stays written, and no total or verdict follows.
pub fn scan_report(input: Box<dyn BufRead>, out: &mut dyn Write) -> Result<()> {
    let scanner = Scanner::new(source_chars(input));

    for result in scanner {
        match result {
            ScanResult::Backtick { line_char, total } => {
                writeln!(
                    out,
                    "Line {}, char {}: Found backtick (total: {})",
                    line_char.line(),
                    line_char.char(),
                    total
                )?;
            }
            ScanResult::UnclosedLine { line } => {
                writeln!(
                    out,
                    "*** WARNING: Unclosed backtick detected at end of line {line}"
                )?;
            }
            ScanResult::Summary { total, parity } => {
                writeln!(out)?;
                writeln!(out, "Total backticks: {total}")?;
                match parity {
                    Parity::Odd => writeln!(
                        out,
                        "ERROR: Odd number of backticks - there's an unclosed template literal!"
                    )?,
                    Parity::Even => writeln!(out, "OK: Even number of backticks")?,
                }
            }
            ScanResult::Error(err) => return Err(err.into()),
        }
    }

    Ok(())
}

/// Opens `path` and reports on it. The handle lives only for the scan.
pub fn scan_path(path: &Path, out: &mut dyn Write) -> Result<()> {
    let file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;

    scan_report(Box::new(BufReader::new(file)), out)
}

#[cfg(test)]
mod test {
    use super::*;

    fn report_str(s: &str) -> String {
        let mut out = Vec::new();
        scan_report(
            Box::new(std::io::Cursor::new(s.as_bytes().to_vec())),
            &mut out,
        )
        .unwrap();

        String::from_utf8(out).unwrap()
    }

    #[test]
    fn renders_the_unclosed_report() {
        assert_eq!(
            report_str("a`b"),
            "Line 1, char 2: Found backtick (total: 1)\n\
             *** WARNING: Unclosed backtick detected at end of line 1\n\
             \n\
             Total backticks: 1\n\
             ERROR: Odd number of backticks - there's an unclosed template literal!\n"
        );
    }

    #[test]
    fn renders_the_balanced_report() {
        assert_eq!(
            report_str("a`b`c"),
            "Line 1, char 2: Found backtick (total: 1)\n\
             Line 1, char 4: Found backtick (total: 2)\n\
             \n\
             Total backticks: 2\n\
             OK: Even number of backticks\n"
        );
    }

    #[test]
    fn renders_the_empty_report() {
        assert_eq!(report_str(""), "\nTotal backticks: 0\nOK: Even number of backticks\n");
    }

    #[test]
    fn report_snapshot() {
        let text = report_str("a`b`c\n`\n");

        insta::assert_snapshot!(text.trim_end(), @r"
        Line 1, char 2: Found backtick (total: 1)
        Line 1, char 4: Found backtick (total: 2)
        Line 2, char 1: Found backtick (total: 3)
        *** WARNING: Unclosed backtick detected at end of line 2

        Total backticks: 3
        ERROR: Odd number of backticks - there's an unclosed template literal!
        ");
    }

    #[test]
    fn failure_keeps_partial_output_and_skips_the_verdict() {
        let mut out = Vec::new();
        let err = scan_report(
            Box::new(std::io::Cursor::new(b"x`\xff".to_vec())),
            &mut out,
        )
        .unwrap_err();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Line 1, char 2: Found backtick (total: 1)\n"
        );
        assert_eq!(
            err.to_string(),
            "invalid utf-8 byte 0xff at offset 2 (line 1)"
        );
    }

    #[test]
    fn read_failure_keeps_partial_output() {
        let mut out = Vec::new();
        let err = scan_report(
            crate::test_util::failing_input(b"x`y\nz", "device error"),
            &mut out,
        )
        .unwrap_err();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Line 1, char 2: Found backtick (total: 1)\n\
             *** WARNING: Unclosed backtick detected at end of line 1\n"
        );
        assert_eq!(err.to_string(), "read failed at offset 5: device error");
    }

    #[test]
    fn missing_file_reports_nothing() {
        let mut out = Vec::new();
        let result = scan_path(Path::new("src/test_data/report/no_such_file.txt"), &mut out);

        assert!(result.is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn scans_a_file_by_path() {
        let mut out = Vec::new();
        scan_path(Path::new("src/test_data/report/balanced.txt"), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("OK: Even number of backticks\n"));
    }

    #[test]
    fn output_is_identical_across_runs() {
        assert_eq!(report_str("a`\n`b`\n"), report_str("a`\n`b`\n"));
    }

    #[test]
    fn fixtures() {
        crate::test_util::fixture_glob("report", |file_path, input| {
            let mut out = Vec::new();
            scan_report(input, &mut out).unwrap();

            assert_eq!(
                String::from_utf8(out).unwrap(),
                crate::test_util::expected_output(file_path)
            );
        });
    }
}
