//! Cross-checks the catalog against the content directory.

use crate::library::book::Book;
use crate::library::catalog::Catalog;
use crate::library::reader::ContentReader;
use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

/// A problem found while verifying book content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    /// Catalog entry whose content cannot be read or parsed.
    MissingContent {
        /// Catalog path.
        path: String,
        /// Failure description.
        reason: String,
    },
    /// Book without any section.
    EmptyBook {
        /// Catalog path.
        path: String,
    },
    /// Section ID used more than once in a book.
    DuplicateSection {
        /// Catalog path.
        path: String,
        /// Repeated section ID.
        section: String,
    },
    /// Choice pointing at a section that does not exist.
    DanglingLink {
        /// Catalog path.
        path: String,
        /// Section holding the choice.
        section: String,
        /// Missing target section.
        goto: String,
    },
    /// Health consequence whose value is not an integer.
    InvalidConsequence {
        /// Catalog path.
        path: String,
        /// Section holding the choice.
        section: String,
        /// Offending value, `None` when the source holds `null` or omits it.
        value: Option<String>,
    },
    /// Book whose initial section never leads to an ending.
    NoReachableEnding {
        /// Catalog path.
        path: String,
    },
    /// Content file that no catalog entry refers to.
    OrphanFile {
        /// File on disk.
        file: PathBuf,
    },
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::MissingContent { path, reason } => {
                write!(f, "{}: content unavailable ({})", path, reason)
            }
            Issue::EmptyBook { path } => write!(f, "{}: book has no sections", path),
            Issue::DuplicateSection { path, section } => {
                write!(f, "{}: section {} is defined more than once", path, section)
            }
            Issue::DanglingLink {
                path,
                section,
                goto,
            } => write!(
                f,
                "{}: section {} links to unknown section {}",
                path, section, goto
            ),
            Issue::InvalidConsequence {
                path,
                section,
                value,
            } => write!(
                f,
                "{}: section {} has a health consequence with non-numeric value {:?}",
                path, section, value
            ),
            Issue::NoReachableEnding { path } => {
                write!(f, "{}: no ending is reachable from the initial section", path)
            }
            Issue::OrphanFile { file } => {
                write!(f, "{}: not referenced by the catalog", file.display())
            }
        }
    }
}

/// Verify every catalog entry and look for unreferenced content files.
pub fn verify(catalog: &Catalog, reader: &ContentReader) -> Vec<Issue> {
    let mut issues = Vec::new();

    for summary in catalog.books() {
        let book = reader
            .read_json(&summary.path)
            .and_then(|json| Book::from_json(&json));

        match book {
            Ok(book) => check_book(&summary.path, &book, &mut issues),
            Err(e) => issues.push(Issue::MissingContent {
                path: summary.path.clone(),
                reason: e.to_string(),
            }),
        }
    }

    issues.extend(orphan_files(catalog, reader));
    issues
}

/// Structural checks on a single parsed book.
fn check_book(path: &str, book: &Book, issues: &mut Vec<Issue>) {
    if book.sections.is_empty() {
        issues.push(Issue::EmptyBook {
            path: path.to_string(),
        });
        return;
    }

    let mut ids = HashSet::with_capacity(book.sections.len());
    for section in &book.sections {
        if !ids.insert(section.id.as_str()) {
            issues.push(Issue::DuplicateSection {
                path: path.to_string(),
                section: section.id.clone(),
            });
        }
    }

    for section in &book.sections {
        for choice in &section.options {
            if !ids.contains(choice.goto_id.as_str()) {
                issues.push(Issue::DanglingLink {
                    path: path.to_string(),
                    section: section.id.clone(),
                    goto: choice.goto_id.clone(),
                });
            }

            if let Some(consequence) = &choice.consequence
                && consequence.affects_health()
                && consequence.health_delta().is_none()
            {
                issues.push(Issue::InvalidConsequence {
                    path: path.to_string(),
                    section: section.id.clone(),
                    value: consequence.value.clone(),
                });
            }
        }
    }

    if !book.has_reachable_ending() {
        issues.push(Issue::NoReachableEnding {
            path: path.to_string(),
        });
    }
}

/// `.json` files directly under the content root that the catalog never names.
fn orphan_files(catalog: &Catalog, reader: &ContentReader) -> Vec<Issue> {
    let mut orphans: Vec<Issue> = walkdir::WalkDir::new(reader.root())
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
        })
        .filter(|e| {
            e.file_name()
                .to_str()
                .is_none_or(|name| catalog.get(name).is_none())
        })
        .map(|e| Issue::OrphanFile {
            file: e.into_path(),
        })
        .collect();

    orphans.sort_by(|a, b| a.to_string().cmp(&b.to_string()));
    orphans
}
