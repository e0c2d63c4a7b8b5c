use std::path::{Component, Path, PathBuf};

use regex::RegexBuilder;

use crate::core::{Error, Result};

/// Pulls `<file path="...">` blocks out of a model reply. Bodies are kept
/// verbatim apart from the line break that follows the opening tag.
pub fn extract_xml_files(raw: &str) -> Vec<(String, String)> {
    let re = RegexBuilder::new(r#"<file\s+path="([^"]+)">(.*?)</file>"#)
        .dot_matches_new_line(true)
        .build()
        .expect("valid regex");

    re.captures_iter(raw)
        .map(|cap| {
            let body = &cap[2];
            let body = body
                .strip_prefix("\r\n")
                .or_else(|| body.strip_prefix('\n'))
                .unwrap_or(body);
            (cap[1].trim().to_string(), body.to_string())
        })
        .collect()
}

/// Returns the outermost `{ ... }` span of a model reply.
pub fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}

/// Joins `relative` onto `root`, refusing anything that could land outside it.
pub fn confine_to_root(root: &Path, relative: &str) -> Result<PathBuf> {
    let candidate = Path::new(relative.trim());
    if candidate.as_os_str().is_empty() {
        return Err(Error::AgentProtocol("Empty file path".into()));
    }

    let mut normalized = PathBuf::new();
    for component in candidate.components() {
        match component {
            Component::Normal(part) => normalized.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(Error::AgentProtocol(format!(
                    "Path {relative} escapes the project root"
                )));
            }
        }
    }
    if normalized.as_os_str().is_empty() {
        return Err(Error::AgentProtocol(format!(
            "Path {relative} does not name a file"
        )));
    }

    Ok(root.join(normalized))
}

/// Shortens `text` for error messages.
pub fn snippet(text: &str, max_chars: usize) -> String {
    let mut out: String = text.chars().take(max_chars).collect();
    if text.chars().count() > max_chars {
        out.push_str("...");
    }
    out
}
