use std::collections::HashMap;

/// Optional YAML frontmatter at the top of a standards document.
///
/// Parsed with a simple `key: value` scanner — the only YAML shapes the
/// format supports are scalar values and `[a, b]` / `a, b` tag lists.
/// Unknown keys are preserved in `extra` so rules can inspect them.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Frontmatter {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Where the document applies: "repo", "user", or "org".
    pub scope: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub version: Option<String>,
    /// Keys the schema doesn't know about, kept verbatim.
    #[serde(default)]
    pub extra: HashMap<String, String>,
    /// Total lines the block occupies in the file, delimiters included.
    #[serde(default)]
    pub span_lines: usize,
}

impl Frontmatter {
    /// Detect and parse a frontmatter block at the start of `content`.
    ///
    /// Returns `None` when the first line is not a `---` delimiter or no
    /// closing delimiter exists — an unterminated opener is treated as body
    /// content (it is usually a thematic break), never an error.
    pub fn detect(content: &str) -> Option<Frontmatter> {
        let mut lines = content.lines();
        if lines.next().map(|l| l.trim_end())? != "---" {
            return None;
        }

        let mut inner: Vec<&str> = Vec::new();
        let mut closed_at = None;
        for (i, line) in lines.enumerate() {
            if line.trim_end() == "---" {
                // i is 0-based over the lines after the opener
                closed_at = Some(i + 2);
                break;
            }
            inner.push(line);
        }
        let span_lines = closed_at?;

        let mut fm = Frontmatter {
            span_lines,
            ..Frontmatter::default()
        };

        for line in inner {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim();

            match key {
                "name" => fm.name = non_empty(unquote(value)),
                "description" => fm.description = non_empty(unquote(value)),
                "scope" => fm.scope = non_empty(unquote(value)),
                "version" => fm.version = non_empty(unquote(value)),
                "tags" => {
                    let inner = value.trim_start_matches('[').trim_end_matches(']');
                    fm.tags = inner
                        .split(',')
                        .map(|t| unquote(t.trim()))
                        .filter(|t| !t.is_empty())
                        .collect();
                }
                _ => {
                    fm.extra.insert(key.to_string(), unquote(value));
                }
            }
        }

        Some(fm)
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}

/// Remove surrounding quotes from a YAML value.
fn unquote(s: &str) -> String {
    let s = s.trim();
    if s.len() >= 2
        && ((s.starts_with('"') && s.ends_with('"'))
            || (s.starts_with('\'') && s.ends_with('\'')))
    {
        s[1..s.len() - 1].to_string()
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_full_block() {
        let content = "---\nname: rust-conventions\ndescription: Rust standards\nscope: repo\ntags: [rust, style]\nversion: 1.2.0\n---\n\n# Rust\n";
        let fm = Frontmatter::detect(content).unwrap();
        assert_eq!(fm.name.as_deref(), Some("rust-conventions"));
        assert_eq!(fm.description.as_deref(), Some("Rust standards"));
        assert_eq!(fm.scope.as_deref(), Some("repo"));
        assert_eq!(fm.tags, vec!["rust", "style"]);
        assert_eq!(fm.version.as_deref(), Some("1.2.0"));
        assert_eq!(fm.span_lines, 7);
    }

    #[test]
    fn no_frontmatter_is_none() {
        assert!(Frontmatter::detect("# Just a title\n\nBody.\n").is_none());
        assert!(Frontmatter::detect("").is_none());
    }

    #[test]
    fn unterminated_opener_is_none() {
        // An opening --- with no closer is body content, not an error.
        let content = "---\nname: oops\nno closing delimiter here\n";
        assert!(Frontmatter::detect(content).is_none());
    }

    #[test]
    fn quoted_values_and_bare_tags() {
        let content = "---\nname: \"quoted\"\ndescription: 'single'\ntags: a, b\n---\nBody.\n";
        let fm = Frontmatter::detect(content).unwrap();
        assert_eq!(fm.name.as_deref(), Some("quoted"));
        assert_eq!(fm.description.as_deref(), Some("single"));
        assert_eq!(fm.tags, vec!["a", "b"]);
    }

    #[test]
    fn unknown_keys_preserved() {
        let content = "---\nname: x\nowner: platform-team\n---\nBody.\n";
        let fm = Frontmatter::detect(content).unwrap();
        assert_eq!(fm.extra.get("owner").map(String::as_str), Some("platform-team"));
    }

    #[test]
    fn empty_values_are_none() {
        let content = "---\nname:\ndescription:   \n---\nBody.\n";
        let fm = Frontmatter::detect(content).unwrap();
        assert!(fm.name.is_none());
        assert!(fm.description.is_none());
    }

    #[test]
    fn comments_and_blank_lines_skipped() {
        let content = "---\n# a comment\n\nname: x\n---\nBody.\n";
        let fm = Frontmatter::detect(content).unwrap();
        assert_eq!(fm.name.as_deref(), Some("x"));
    }
}
