//! Record segmentation
//!
//! Splits the raw text of one block into per-entry spans. An entry starts
//! at a line whose beginning looks like a record header and runs until the
//! next header. A header is an all-caps surname followed by a comma, which
//! covers `NEGRO MAN,` in every profile; attribution states also start
//! entries at an unnamed-person marker with no comma after it, such as
//! `AFRICAN AMERICAN MEN (3) hired ...`.

use crate::normalize::{is_page_number, page_number_prefix_len, RunningHeaders};
use crate::patterns::{is_surname_header, unnamed_marker};
use muster_domain::RecordSpan;
use std::ops::{Range, RangeInclusive};

/// Splits block text into [`RecordSpan`]s
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segmenter {
    unnamed_markers: bool,
    strip_running_headers: bool,
    running_headers: RunningHeaders,
    printed_pages: Option<RangeInclusive<u32>>,
}

/// A header line found during the scan
struct HeaderHit {
    line_start: usize,
    header_line: String,
}

impl Default for Segmenter {
    fn default() -> Self {
        Self {
            unnamed_markers: false,
            strip_running_headers: true,
            running_headers: RunningHeaders::default(),
            printed_pages: None,
        }
    }
}

impl Segmenter {
    /// Segmenter for surname-headed entries only
    pub fn new() -> Self {
        Self::default()
    }

    /// Also start entries at unnamed-person markers
    pub fn with_unnamed_markers(mut self, enabled: bool) -> Self {
        self.unnamed_markers = enabled;
        self
    }

    /// Recognize running page headers/footers as artifacts
    pub fn with_header_stripping(mut self, enabled: bool) -> Self {
        self.strip_running_headers = enabled;
        self
    }

    /// Take `<state> <page>` lines as running headers
    ///
    /// Without a state only the section titles are known.
    pub fn with_state(mut self, state: &str) -> Self {
        self.running_headers = RunningHeaders::for_state(state);
        self
    }

    /// Only take bare numbers in `pages` as page numbers
    pub fn with_printed_pages(mut self, pages: RangeInclusive<u32>) -> Self {
        self.printed_pages = Some(pages);
        self
    }

    /// Whether `line` (already left-trimmed) opens a new entry
    pub fn is_record_start(&self, line: &str) -> bool {
        is_surname_header(line) || (self.unnamed_markers && unnamed_marker(line).is_some())
    }

    /// Split `raw` into entry spans
    ///
    /// Spans are in document order and never overlap. Every span starts at
    /// a header line, except a leading span for text before the first
    /// header, which is marked unparsed. Text with no header at all comes
    /// back as a single unparsed span; empty or blank text gives no spans.
    pub fn segment(&self, raw: &str) -> Vec<RecordSpan> {
        let (headers, artifacts) = self.scan(raw);

        if headers.is_empty() {
            if !has_content(raw, 0..raw.len(), &artifacts) {
                return Vec::new();
            }
            let mut span = RecordSpan::unparsed(raw, 0, raw.len());
            span.artifacts = artifacts;
            return vec![span];
        }

        let mut spans = Vec::with_capacity(headers.len() + 1);

        let first_start = headers[0].line_start;
        if first_start > 0 && has_content(raw, 0..first_start, &artifacts) {
            let mut preamble = RecordSpan::unparsed(raw, 0, first_start);
            preamble.artifacts = artifacts_within(&artifacts, 0..first_start);
            spans.push(preamble);
        }

        for (i, hit) in headers.iter().enumerate() {
            let end = headers
                .get(i + 1)
                .map_or(raw.len(), |next| next.line_start);
            let mut span = RecordSpan::new(raw, hit.line_start, end, hit.header_line.as_str());
            span.artifacts = artifacts_within(&artifacts, hit.line_start..end);
            spans.push(span);
        }

        spans
    }

    fn scan(&self, raw: &str) -> (Vec<HeaderHit>, Vec<Range<usize>>) {
        let mut headers = Vec::new();
        let mut artifacts = Vec::new();
        let mut offset = 0;

        let lines: Vec<&str> = raw.split_inclusive('\n').collect();
        let first = lines.iter().position(|l| !l.trim().is_empty());
        let last = lines.iter().rposition(|l| !l.trim().is_empty());

        for (i, line) in lines.iter().enumerate() {
            let line_start = offset;
            offset += line.len();

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            // Bare page numbers only count at the top or bottom of the block
            let at_edge = Some(i) == first || Some(i) == last;
            if self.strip_running_headers && self.is_artifact_line(trimmed, at_edge) {
                artifacts.push(line_start..offset);
                continue;
            }

            let indent = line.len() - line.trim_start().len();
            let body = line.trim_start();

            if self.is_record_start(body) {
                headers.push(HeaderHit {
                    line_start,
                    header_line: body.trim_end().to_string(),
                });
                continue;
            }

            // OCR sometimes glues the page header onto the first entry line.
            if self.strip_running_headers {
                if let Some(prefix) = self.artifact_prefix_len(body, Some(i) == first) {
                    let rest = &body[prefix..];
                    if self.is_record_start(rest) {
                        let artifact_start = line_start + indent;
                        artifacts.push(artifact_start..artifact_start + prefix);
                        headers.push(HeaderHit {
                            line_start,
                            header_line: rest.trim_end().to_string(),
                        });
                    }
                }
            }
        }

        (headers, artifacts)
    }

    fn is_artifact_line(&self, line: &str, at_edge: bool) -> bool {
        self.running_headers.is_header(line)
            || (at_edge && is_page_number(line) && self.is_expected_page(line))
    }

    fn artifact_prefix_len(&self, line: &str, at_top: bool) -> Option<usize> {
        self.running_headers.prefix_len(line).or_else(|| {
            let len = page_number_prefix_len(line).filter(|_| at_top)?;
            self.is_expected_page(&line[..len]).then_some(len)
        })
    }

    /// Whether a page number fits the block's printed pages, when known
    fn is_expected_page(&self, number: &str) -> bool {
        match (&self.printed_pages, number.trim().parse::<u32>()) {
            (Some(pages), Ok(page)) => pages.contains(&page),
            (Some(_), Err(_)) => false,
            (None, _) => true,
        }
    }
}

fn artifacts_within(artifacts: &[Range<usize>], bounds: Range<usize>) -> Vec<Range<usize>> {
    artifacts
        .iter()
        .filter(|r| r.start >= bounds.start && r.end <= bounds.end)
        .cloned()
        .collect()
}

/// Whether `raw[bounds]` holds anything besides whitespace and artifacts
fn has_content(raw: &str, bounds: Range<usize>, artifacts: &[Range<usize>]) -> bool {
    let mut cursor = bounds.start;
    for artifact in artifacts_within(artifacts, bounds.clone()) {
        if !raw[cursor..artifact.start].trim().is_empty() {
            return true;
        }
        cursor = artifact.end;
    }
    !raw[cursor..bounds.end].trim().is_empty()
}
