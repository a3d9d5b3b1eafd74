//! Reading the `openedge-project.json` project manifest.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// File that marks a workspace folder as an OpenEdge project.
pub const PROJECT_MANIFEST: &str = "openedge-project.json";

/// The subset of the project manifest the launcher reads.
///
/// Manifests in the wild carry comments and trailing commas, so the raw text
/// is stripped down to strict JSON before parsing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectManifest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub oeversion: String,
    #[serde(default)]
    pub extra_parameters: String,
    #[serde(default)]
    pub db_connections: Vec<DbConnection>,
}

/// One database connection descriptor from the manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct DbConnection {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub connect: Option<String>,
}

impl ProjectManifest {
    /// Whether `project_dir` carries a manifest at all.
    pub fn exists(project_dir: &Path) -> bool {
        project_dir.join(PROJECT_MANIFEST).is_file()
    }

    pub fn load(project_dir: &Path) -> Result<Self> {
        let path = project_dir.join(PROJECT_MANIFEST);
        let raw = std::fs::read_to_string(&path).map_err(|e| Error::ManifestError {
            path: path.clone(),
            message: e.to_string(),
        })?;
        let stripped = strip_json_extras(&raw);
        serde_json::from_str(&stripped).map_err(|e| Error::ManifestError {
            path,
            message: e.to_string(),
        })
    }

    /// Connection strings declared by the manifest, in declaration order.
    /// Entries without a usable `connect` field are ignored.
    pub fn connection_strings(&self) -> Vec<String> {
        self.db_connections
            .iter()
            .filter_map(|c| c.connect.clone())
            .filter(|c| !c.trim().is_empty())
            .collect()
    }
}

/// Remove `//` and `/* */` comments plus trailing commas so the manifest can
/// be handed to a strict JSON parser. String literals are left untouched.
fn strip_json_extras(input: &str) -> String {
    strip_trailing_commas(&strip_comments(input))
}

fn strip_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;
    let mut escaped = false;
    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            '/' => match chars.peek() {
                Some('/') => {
                    while let Some(&next) = chars.peek() {
                        if next == '\n' {
                            break;
                        }
                        chars.next();
                    }
                }
                Some('*') => {
                    chars.next();
                    let mut prev = '\0';
                    for next in chars.by_ref() {
                        if prev == '*' && next == '/' {
                            break;
                        }
                        prev = next;
                    }
                }
                _ => out.push(c),
            },
            _ => out.push(c),
        }
    }
    out
}

fn strip_trailing_commas(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut in_string = false;
    let mut escaped = false;
    for (i, &c) in chars.iter().enumerate() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            ',' => {
                let next = chars[i + 1..].iter().find(|ch| !ch.is_whitespace());
                if !matches!(next, Some('}') | Some(']')) {
                    out.push(c);
                }
            }
            _ => out.push(c),
        }
    }
    out
}
