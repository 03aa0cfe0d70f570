//! Duplicate detection across the catalog.
//!
//! Two passes: exact duplicates by content fingerprint, then near
//! duplicates by Jaccard similarity over word shingles. Frontmatter is
//! excluded from both, so renaming a copied document does not hide it.

use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};
use std::path::PathBuf;
use serde::Serialize;
use tracing::debug;

use tenet_config::DuplicatesConfig;
use tenet_document::Document;

/// Documents whose normalized bodies are byte-for-byte identical.
#[derive(Debug, Clone, Serialize)]
pub struct ExactGroup {
    pub fingerprint: String,
    pub paths: Vec<PathBuf>,
}

/// Two documents above the similarity threshold.
#[derive(Debug, Clone, Serialize)]
pub struct NearPair {
    pub left: PathBuf,
    pub right: PathBuf,
    pub similarity: f64,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct DuplicateReport {
    pub exact: Vec<ExactGroup>,
    pub near: Vec<NearPair>,
}

impl DuplicateReport {
    pub fn is_clean(&self) -> bool {
        self.exact.is_empty() && self.near.is_empty()
    }

    pub fn to_json(&self) -> tenet_core::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub struct DuplicateScanner {
    config: DuplicatesConfig,
}

impl DuplicateScanner {
    pub fn new(config: DuplicatesConfig) -> Self {
        Self { config }
    }

    /// Compare every document against every other.
    pub fn scan(&self, docs: &[&Document]) -> DuplicateReport {
        let mut report = DuplicateReport::default();

        // Pass 1: exact groups by fingerprint.
        let mut by_fingerprint: HashMap<String, Vec<usize>> = HashMap::new();
        let fingerprints: Vec<String> = docs.iter().map(|d| fingerprint(d)).collect();
        for (idx, fp) in fingerprints.iter().enumerate() {
            by_fingerprint.entry(fp.clone()).or_default().push(idx);
        }
        for (fp, members) in by_fingerprint {
            if members.len() < 2 {
                continue;
            }
            let mut paths: Vec<PathBuf> = members.iter().map(|&i| docs[i].path.clone()).collect();
            paths.sort();
            report.exact.push(ExactGroup {
                fingerprint: fp,
                paths,
            });
        }
        report.exact.sort_by(|a, b| a.paths.cmp(&b.paths));

        // Pass 2: near pairs by shingle similarity. Short documents
        // pair with everything ("see the root AGENTS.md" stubs), so
        // they are exempt below min_lines.
        let eligible: Vec<usize> = (0..docs.len())
            .filter(|&i| docs[i].line_count >= self.config.min_lines)
            .collect();
        let shingle_sets: HashMap<usize, HashSet<u64>> = eligible
            .iter()
            .map(|&i| (i, self.shingles(docs[i])))
            .collect();

        for (a_pos, &a) in eligible.iter().enumerate() {
            for &b in &eligible[a_pos + 1..] {
                if fingerprints[a] == fingerprints[b] {
                    continue;
                }
                let similarity = jaccard(&shingle_sets[&a], &shingle_sets[&b]);
                if similarity >= self.config.similarity {
                    debug!(
                        left = %docs[a].path.display(),
                        right = %docs[b].path.display(),
                        similarity,
                        "near-duplicate pair"
                    );
                    let (mut left, mut right) = (docs[a].path.clone(), docs[b].path.clone());
                    if right < left {
                        std::mem::swap(&mut left, &mut right);
                    }
                    report.near.push(NearPair {
                        left,
                        right,
                        similarity,
                    });
                }
            }
        }
        report.near.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| (&a.left, &a.right).cmp(&(&b.left, &b.right)))
        });

        report
    }

    /// Hashed word shingles of the document body. A document shorter
    /// than one shingle contributes a single hash of all its words.
    fn shingles(&self, doc: &Document) -> HashSet<u64> {
        let words: Vec<String> = doc
            .body()
            .split_whitespace()
            .map(|w| w.to_lowercase())
            .collect();
        let mut set = HashSet::new();
        if words.is_empty() {
            return set;
        }
        if words.len() < self.config.shingle_size {
            set.insert(hash_window(&words));
            return set;
        }
        for window in words.windows(self.config.shingle_size) {
            set.insert(hash_window(window));
        }
        set
    }
}

/// Content fingerprint: blake3 over the body with per-line trailing
/// whitespace removed and leading/trailing blank lines dropped. Two
/// documents with equal fingerprints are exact duplicates.
pub fn fingerprint(doc: &Document) -> String {
    let lines: Vec<&str> = doc.body().lines().map(|l| l.trim_end()).collect();
    let start = lines.iter().position(|l| !l.is_empty()).unwrap_or(0);
    let end = lines.iter().rposition(|l| !l.is_empty()).map_or(0, |i| i + 1);

    let mut hasher = blake3::Hasher::new();
    for line in &lines[start..end.max(start)] {
        hasher.update(line.as_bytes());
        hasher.update(b"\n");
    }
    hasher.finalize().to_hex().to_string()
}

fn hash_window(words: &[String]) -> u64 {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    for word in words {
        word.hash(&mut hasher);
    }
    hasher.finish()
}

fn jaccard(a: &HashSet<u64>, b: &HashSet<u64>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    if union == 0 {
        return 0.0;
    }
    intersection as f64 / union as f64
}
