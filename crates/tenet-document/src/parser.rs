use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

use tenet_core::DocKind;

use crate::frontmatter::Frontmatter;
use crate::model::{CheckState, ChecklistItem, CodeBlock, Document, Heading, Link};

static HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ {0,3}(#{1,6})[ \t]+(.*?)[ \t]*#*[ \t]*$").unwrap());
static CHECKBOX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[ \t]*([-*+])[ \t]+\[([ xX])\]([ \t]*)(.*)$").unwrap());
static FENCE_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ {0,3}(```+|~~~+)[ \t]*([^`\s]*)").unwrap());
static FENCE_CLOSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^ {0,3}(```+|~~~+)[ \t]*$").unwrap());
static LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"!?\[([^\]]*)\]\(([^()\s]+)(?:[ \t]+"[^"]*")?\)"#).unwrap());
static LINK_DEF: Lazy<Regex> = Lazy::new(|| Regex::new(r"^ {0,3}\[([^\]^][^\]]*)\]:[ \t]*(\S+)").unwrap());
static SETEXT_H1: Lazy<Regex> = Lazy::new(|| Regex::new(r"^ {0,3}=+[ \t]*$").unwrap());
static SETEXT_H2: Lazy<Regex> = Lazy::new(|| Regex::new(r"^ {0,3}-+[ \t]*$").unwrap());
static BULLET: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[ \t]*(?:[-*+]|\d+[.)])[ \t]+").unwrap());

/// Parse markdown structure from `content`.
///
/// Never fails: a document with no recognizable structure is a valid
/// `Document` with empty structure. Line numbers are absolute 1-based file
/// lines; the frontmatter block (when present) is skipped, not scanned.
pub fn parse(content: &str, path: &Path) -> Document {
    let frontmatter = Frontmatter::detect(content);
    let skip_lines = frontmatter.as_ref().map(|f| f.span_lines).unwrap_or(0);
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();

    let mut doc = Document {
        path: path.to_path_buf(),
        kind: DocKind::from_file_name(&file_name),
        file_name,
        frontmatter,
        title: None,
        headings: Vec::new(),
        checklist: Vec::new(),
        code_blocks: Vec::new(),
        links: Vec::new(),
        line_count: content.lines().count(),
        raw: content.to_string(),
    };

    let mut in_fence = false;
    let mut fence_marker = '`';
    let mut fence_lang: Option<String> = None;
    let mut fence_start = 0usize;
    let mut current_section = String::new();
    // (line, text) of the previous line when it could be a setext heading.
    let mut prev_paragraph: Option<(usize, String)> = None;

    for (idx, raw_line) in content.lines().enumerate() {
        let line_no = idx + 1;
        if line_no <= skip_lines {
            continue;
        }
        let line = raw_line.trim_end_matches('\r');

        // Fenced code swallows everything until a matching closing fence.
        if in_fence {
            if is_fence_close(line, fence_marker) {
                doc.code_blocks.push(CodeBlock {
                    language: fence_lang.take(),
                    start_line: fence_start,
                    end_line: Some(line_no),
                });
                in_fence = false;
            }
            continue;
        }
        if let Some((marker, lang)) = fence_open(line) {
            in_fence = true;
            fence_marker = marker;
            fence_lang = lang;
            fence_start = line_no;
            prev_paragraph = None;
            continue;
        }

        // A setext underline promotes the preceding paragraph line. This
        // also resolves the `---` ambiguity the CommonMark way: underline
        // after a paragraph, thematic break otherwise.
        if let Some((prev_line, prev_text)) = prev_paragraph.take() {
            if let Some(level) = setext_level(line) {
                if level == 1 && doc.title.is_none() {
                    doc.title = Some(prev_text.clone());
                }
                current_section = prev_text.clone();
                doc.headings.push(Heading {
                    level,
                    text: prev_text,
                    line: prev_line,
                });
                continue;
            }
        }

        if let Some(caps) = HEADING.captures(line) {
            let level = caps[1].len() as u8;
            let text = caps[2].trim().to_string();
            if level == 1 && doc.title.is_none() {
                doc.title = Some(text.clone());
            }
            current_section = text.clone();
            doc.headings.push(Heading {
                level,
                text,
                line: line_no,
            });
            continue;
        }

        if let Some(caps) = CHECKBOX.captures(line) {
            let check = caps[2].chars().next().unwrap_or(' ');
            doc.checklist.push(ChecklistItem {
                text: caps[4].trim_end().to_string(),
                state: if check == ' ' {
                    CheckState::Unchecked
                } else {
                    CheckState::Checked
                },
                marker: caps[1].chars().next().unwrap_or('-'),
                check,
                gap: caps[3].len(),
                line: line_no,
                section: current_section.clone(),
            });
        }

        // Links: a reference definition owns its whole line; otherwise scan
        // for inline links and images (checklist lines included).
        if let Some(caps) = LINK_DEF.captures(line) {
            doc.links.push(Link {
                text: caps[1].to_string(),
                target: caps[2].to_string(),
                line: line_no,
            });
        } else {
            for caps in LINK.captures_iter(line) {
                doc.links.push(Link {
                    text: caps[1].to_string(),
                    target: caps[2].to_string(),
                    line: line_no,
                });
            }
        }

        prev_paragraph = classify_paragraph(line, line_no);
    }

    if in_fence {
        doc.code_blocks.push(CodeBlock {
            language: fence_lang.take(),
            start_line: fence_start,
            end_line: None,
        });
    }

    doc
}

fn fence_open(line: &str) -> Option<(char, Option<String>)> {
    let caps = FENCE_OPEN.captures(line)?;
    let marker = caps[1].chars().next().unwrap_or('`');
    let lang = caps
        .get(2)
        .map(|m| m.as_str())
        .unwrap_or_default()
        .split(',')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string();
    Some((marker, if lang.is_empty() { None } else { Some(lang) }))
}

fn is_fence_close(line: &str, marker: char) -> bool {
    FENCE_CLOSE
        .captures(line)
        .is_some_and(|caps| caps[1].starts_with(marker))
}

fn setext_level(line: &str) -> Option<u8> {
    if SETEXT_H1.is_match(line) {
        Some(1)
    } else if SETEXT_H2.is_match(line) {
        Some(2)
    } else {
        None
    }
}

/// Lines that can be promoted by a setext underline: non-empty, not a list
/// bullet, not a blockquote, not an (attempted) ATX heading.
fn classify_paragraph(line: &str, line_no: usize) -> Option<(usize, String)> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('>') || trimmed.starts_with('#') {
        return None;
    }
    if BULLET.is_match(line) {
        return None;
    }
    Some((line_no, trimmed.to_string()))
}
