//! Input reading and test-case segmentation

use crate::error::RegistryResult;
use std::io::BufRead;

/// The command lines of one test case, sentinel excluded
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TestCase {
    pub lines: Vec<String>,
}

impl TestCase {
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Streams test cases out of `reader`, one per sentinel.
///
/// Lines are decoded lossily, so bytes that are not valid UTF-8 become
/// U+FFFD inside that line instead of failing the whole input. Lines are
/// trimmed and blank lines dropped. Cases with no commands are skipped, and
/// commands after the last sentinel form a final case.
pub struct TestCaseReader<R> {
    reader: R,
    sentinel: String,
    buf: Vec<u8>,
    done: bool,
}

impl<R: BufRead> TestCaseReader<R> {
    pub fn new(reader: R, sentinel: impl Into<String>) -> Self {
        Self {
            reader,
            sentinel: sentinel.into(),
            buf: Vec::new(),
            done: false,
        }
    }

    /// Next non-empty case, or `None` at end of input.
    pub fn next_case(&mut self) -> RegistryResult<Option<TestCase>> {
        let mut current = TestCase::default();

        while !self.done {
            self.buf.clear();
            if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
                self.done = true;
                break;
            }

            let line = String::from_utf8_lossy(&self.buf);
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if trimmed == self.sentinel {
                if current.is_empty() {
                    continue;
                }
                return Ok(Some(current));
            }
            current.lines.push(trimmed.to_string());
        }

        Ok((!current.is_empty()).then_some(current))
    }
}

impl<R: BufRead> Iterator for TestCaseReader<R> {
    type Item = RegistryResult<TestCase>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_case() {
            Ok(case) => case.map(Ok),
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

/// Read every test case from `reader` up front.
pub fn read_test_cases<R: BufRead>(
    reader: R,
    sentinel: &str,
) -> RegistryResult<Vec<TestCase>> {
    TestCaseReader::new(reader, sentinel).collect()
}
