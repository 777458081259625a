//! Plain-text documents split into titled sections, and their row layout.
//!
//! A line starting with `# ` opens a titled section; a bare `#` opens an
//! unlabeled one.  Anything before the first heading becomes an unlabeled
//! preamble.  [`DocumentLayout`] word-wraps the document for a given width
//! and reports each section's rows as a [`SectionSource`].

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::core::geometry::{Extent, SectionSource};

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("cannot read document '{path}'")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Built-in text shown when no document path is given.
const SAMPLE: &str = include_str!("sample.md");

// ───────────────────────────────────────── model ─────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocSection {
    /// Empty for unlabeled sections and the preamble.
    pub title: String,
    /// `false` only for the preamble, which has no heading row.
    pub has_heading: bool,
    pub body: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub sections: Vec<DocSection>,
}

fn heading_title(line: &str) -> Option<&str> {
    if line == "#" {
        Some("")
    } else {
        line.strip_prefix("# ").map(str::trim)
    }
}

impl Document {
    pub fn parse(text: &str) -> Self {
        let mut sections = Vec::new();
        let mut current = DocSection {
            title: String::new(),
            has_heading: false,
            body: Vec::new(),
        };

        for line in text.lines() {
            let line = line.trim_end();
            if let Some(title) = heading_title(line) {
                push_section(&mut sections, current);
                current = DocSection {
                    title: title.to_string(),
                    has_heading: true,
                    body: Vec::new(),
                };
            } else {
                current.body.push(line.to_string());
            }
        }
        push_section(&mut sections, current);

        Self { sections }
    }

    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let text = std::fs::read_to_string(path).map_err(|source| DocumentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let doc = Self::parse(&text);
        debug!("loaded {} sections from {}", doc.sections.len(), path.display());
        Ok(doc)
    }

    pub fn sample() -> Self {
        Self::parse(SAMPLE)
    }

    /// Lay the document out for a terminal `width` columns wide.
    pub fn layout(&self, width: usize) -> DocumentLayout {
        DocumentLayout::new(self, width)
    }
}

/// Close out a section: drop trailing blank lines, and drop a preamble that
/// has nothing in it.
fn push_section(sections: &mut Vec<DocSection>, mut section: DocSection) {
    while section.body.last().is_some_and(|l| l.trim().is_empty()) {
        section.body.pop();
    }
    if !section.has_heading && section.body.is_empty() {
        return;
    }
    sections.push(section);
}

// ───────────────────────────────────────── layout ────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Heading,
    Body,
    Blank,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub text: String,
    pub kind: RowKind,
    pub section: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SectionRows {
    top: usize,
    height: usize,
    /// First and last body row, if any.
    content: Option<(usize, usize)>,
}

/// A document wrapped to a fixed width; one row per terminal line.
#[derive(Debug, Clone)]
pub struct DocumentLayout {
    rows: Vec<Row>,
    titles: Vec<String>,
    extents: Vec<SectionRows>,
}

impl DocumentLayout {
    fn new(doc: &Document, width: usize) -> Self {
        let width = width.max(1);
        let mut rows = Vec::new();
        let mut titles = Vec::with_capacity(doc.sections.len());
        let mut extents = Vec::with_capacity(doc.sections.len());

        for (index, section) in doc.sections.iter().enumerate() {
            let top = rows.len();
            let mut content: Option<(usize, usize)> = None;

            if section.has_heading {
                let text = if section.title.is_empty() {
                    "#".to_string()
                } else {
                    format!("# {}", section.title)
                };
                for line in wrap(&text, width) {
                    rows.push(Row { text: line, kind: RowKind::Heading, section: index });
                }
            }

            for line in &section.body {
                if line.trim().is_empty() {
                    rows.push(Row { text: String::new(), kind: RowKind::Blank, section: index });
                    continue;
                }
                for piece in wrap(line, width) {
                    let at = rows.len();
                    content = Some(content.map_or((at, at), |(first, _)| (first, at)));
                    rows.push(Row { text: piece, kind: RowKind::Body, section: index });
                }
            }

            // Separator row.
            rows.push(Row { text: String::new(), kind: RowKind::Blank, section: index });

            titles.push(section.title.clone());
            extents.push(SectionRows {
                top,
                height: rows.len() - top,
                content,
            });
        }

        Self {
            rows,
            titles,
            extents,
        }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn total_rows(&self) -> usize {
        self.rows.len()
    }
}

impl SectionSource for DocumentLayout {
    fn section_count(&self) -> usize {
        self.extents.len()
    }

    fn title(&self, index: usize) -> &str {
        &self.titles[index]
    }

    fn bounds(&self, index: usize) -> Extent {
        let rows = self.extents[index];
        Extent::new(rows.top as f64, rows.height as f64)
    }

    fn content_bounds(&self, index: usize) -> Option<Extent> {
        self.extents[index]
            .content
            .map(|(first, last)| Extent::new(first as f64, (last - first + 1) as f64))
    }
}

/// Greedy word wrap by character count.  Words wider than `width` are split.
pub fn wrap(line: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in line.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        // Hard-split anything that cannot fit on a line of its own.
        while word.len() > width {
            if current_len > 0 {
                out.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(width);
            out.push(word.into_iter().collect());
            word = rest;
        }
        if word.is_empty() {
            continue;
        }

        let needed = if current_len == 0 { word.len() } else { current_len + 1 + word.len() };
        if needed > width {
            out.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.extend(word.iter());
        current_len += word.len();
    }

    if current_len > 0 || out.is_empty() {
        out.push(current);
    }
    out
}
