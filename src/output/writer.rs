//! Writes the discovered URL list

use crate::output::{OutputError, OutputResult};
use crate::persist::write_atomically;
use std::collections::HashSet;
use std::path::Path;

/// Renders URLs sorted lexicographically, one per line
///
/// Every line ends with a newline; an empty set renders as an empty string.
/// The result depends only on set membership, never on discovery order.
pub fn render_url_list(urls: &HashSet<String>) -> String {
    let mut sorted: Vec<&str> = urls.iter().map(String::as_str).collect();
    sorted.sort_unstable();

    let mut out = String::with_capacity(sorted.iter().map(|url| url.len() + 1).sum());
    for url in sorted {
        out.push_str(url);
        out.push('\n');
    }
    out
}

/// Writes the sorted URL list to `path`, atomically
///
/// # Returns
///
/// * `Ok(usize)` - Number of URLs written
/// * `Err(OutputError)` - The file could not be written; any previous file is untouched
pub fn write_url_list(path: &Path, urls: &HashSet<String>) -> OutputResult<usize> {
    let content = render_url_list(urls);
    write_atomically(path, content.as_bytes()).map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!("Wrote {} URLs to {}", urls.len(), path.display());
    Ok(urls.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn set(urls: &[&str]) -> HashSet<String> {
        urls.iter().map(|u| u.to_string()).collect()
    }

    #[test]
    fn test_render_sorted_one_per_line() {
        let urls = set(&[
            "https://example.com/b",
            "https://example.com/a",
            "https://example.com/c",
        ]);
        assert_eq!(
            render_url_list(&urls),
            "https://example.com/a\nhttps://example.com/b\nhttps://example.com/c\n"
        );
    }

    #[test]
    fn test_render_is_independent_of_insertion_order() {
        let mut forward = HashSet::new();
        let mut backward = HashSet::new();
        let urls: Vec<String> = (0..50)
            .map(|i| format!("https://example.com/page{}", i))
            .collect();
        for url in &urls {
            forward.insert(url.clone());
        }
        for url in urls.iter().rev() {
            backward.insert(url.clone());
        }
        assert_eq!(render_url_list(&forward), render_url_list(&backward));
    }

    #[test]
    fn test_render_empty_set() {
        assert_eq!(render_url_list(&HashSet::new()), "");
    }

    #[test]
    fn test_write_url_list() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("urls.txt");

        let written = write_url_list(&path, &set(&["https://b.example", "https://a.example"]))
            .unwrap();
        assert_eq!(written, 2);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "https://a.example\nhttps://b.example\n"
        );
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("urls.txt");

        let result = write_url_list(&path, &set(&["https://a.example"]));
        assert!(matches!(result, Err(OutputError::Write { .. })));
        assert!(!path.exists());
    }
}
