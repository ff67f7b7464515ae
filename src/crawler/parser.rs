//! Sitemap XML parser
//!
//! This module classifies a fetched sitemap document and extracts its
//! `<loc>` entries:
//! - `<sitemapindex>` roots yield child sitemap URLs
//! - any other root is treated as a `<urlset>` and yields page URLs

use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;
use thiserror::Error;
use url::Url;

/// Namespace of the sitemap protocol
pub const SITEMAP_NAMESPACE: &[u8] = b"http://www.sitemaps.org/schemas/sitemap/0.9";

/// Errors that can occur while parsing a sitemap
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Document has no root element")]
    NoRootElement,

    #[error("Document ends inside <{0}>")]
    Truncated(String),

    #[error("Unexpected closing tag </{0}>")]
    UnexpectedClose(String),

    #[error("Second root element <{0}> after the document element")]
    MultipleRoots(String),
}

/// A parsed sitemap document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SitemapDocument {
    /// A sitemap index listing other sitemaps
    Index { sitemaps: Vec<String> },

    /// A URL set listing pages
    UrlSet { pages: Vec<String> },
}

impl SitemapDocument {
    /// Number of entries in the document
    pub fn len(&self) -> usize {
        match self {
            Self::Index { sitemaps } => sitemaps.len(),
            Self::UrlSet { pages } => pages.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RootKind {
    Index,
    UrlSet,
}

/// Parses sitemap XML and resolves its entries against `base_url`
///
/// # Entry Extraction Rules
///
/// **Include:**
/// - `<loc>` elements in the sitemap namespace or in no namespace
///
/// **Exclude:**
/// - `<loc>` elements from extension namespaces (e.g. `image:loc`)
/// - Empty entries
/// - Entries that do not resolve to an HTTP(S) URL
///
/// Text is entity-decoded, CDATA is taken verbatim, surrounding whitespace
/// is trimmed.
///
/// # Arguments
///
/// * `content` - Raw document bytes
/// * `base_url` - URL of the document itself, for relative entries
///
/// # Returns
///
/// * `Ok(SitemapDocument)` - The classified document with absolute URLs
/// * `Err(ParseError)` - Malformed, empty, or truncated XML
///
/// # Example
///
/// ```
/// use sitemap_sweep::crawler::{parse_sitemap, SitemapDocument};
/// use url::Url;
///
/// let xml = br#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
///   <url><loc>/about</loc></url>
/// </urlset>"#;
/// let base = Url::parse("https://example.com/sitemap.xml").unwrap();
/// let doc = parse_sitemap(xml, &base).unwrap();
/// assert_eq!(
///     doc,
///     SitemapDocument::UrlSet { pages: vec!["https://example.com/about".to_string()] }
/// );
/// ```
pub fn parse_sitemap(content: &[u8], base_url: &Url) -> Result<SitemapDocument, ParseError> {
    let mut reader = NsReader::from_reader(content);
    let mut buf = Vec::new();

    let mut root: Option<RootKind> = None;
    let mut open: Vec<String> = Vec::new();
    let mut current_loc: Option<String> = None;
    let mut entries = Vec::new();

    loop {
        match reader.read_resolved_event_into(&mut buf)? {
            (ns, Event::Start(e)) => {
                let local = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                if open.is_empty() {
                    if root.is_some() {
                        return Err(ParseError::MultipleRoots(local));
                    }
                    root = Some(classify_root(&local));
                }
                if current_loc.is_none() && is_loc(&ns, &local) {
                    current_loc = Some(String::new());
                }
                open.push(local);
            }
            (_, Event::Empty(e)) => {
                if open.is_empty() {
                    let local = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                    if root.is_some() {
                        return Err(ParseError::MultipleRoots(local));
                    }
                    root = Some(classify_root(&local));
                }
            }
            (_, Event::Text(t)) => {
                if let Some(loc) = current_loc.as_mut() {
                    loc.push_str(&t.unescape()?);
                }
            }
            (_, Event::CData(c)) => {
                if let Some(loc) = current_loc.as_mut() {
                    loc.push_str(&String::from_utf8_lossy(&c.into_inner()));
                }
            }
            (ns, Event::End(e)) => {
                let local = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                if open.pop().is_none() {
                    return Err(ParseError::UnexpectedClose(local));
                }
                if is_loc(&ns, &local) {
                    if let Some(raw) = current_loc.take() {
                        if let Some(url) = resolve_entry(&raw, base_url) {
                            entries.push(url);
                        }
                    }
                }
            }
            (_, Event::Eof) => break,
            _ => {}
        }
        buf.clear();
    }

    if let Some(unclosed) = open.pop() {
        return Err(ParseError::Truncated(unclosed));
    }

    match root {
        Some(RootKind::Index) => Ok(SitemapDocument::Index { sitemaps: entries }),
        Some(RootKind::UrlSet) => Ok(SitemapDocument::UrlSet { pages: entries }),
        None => Err(ParseError::NoRootElement),
    }
}

fn classify_root(local_name: &str) -> RootKind {
    if local_name == "sitemapindex" {
        RootKind::Index
    } else {
        RootKind::UrlSet
    }
}

fn is_loc(ns: &ResolveResult<'_>, local_name: &str) -> bool {
    if local_name != "loc" {
        return false;
    }
    match ns {
        ResolveResult::Unbound => true,
        ResolveResult::Bound(Namespace(uri)) => *uri == SITEMAP_NAMESPACE,
        ResolveResult::Unknown(_) => false,
    }
}

/// Resolves a `<loc>` value to an absolute HTTP(S) URL
///
/// Returns None if the entry should be skipped:
/// - Empty after trimming
/// - Cannot be joined with the base URL
/// - Resolves to a non-HTTP(S) scheme
fn resolve_entry(raw: &str, base_url: &Url) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    match base_url.join(raw) {
        Ok(absolute) if matches!(absolute.scheme(), "http" | "https") => Some(absolute.into()),
        Ok(absolute) => {
            tracing::debug!("Skipping non-HTTP sitemap entry: {}", absolute);
            None
        }
        Err(e) => {
            tracing::debug!("Skipping unresolvable sitemap entry {:?}: {}", raw, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://example.com/sitemaps/index.xml").unwrap()
    }

    #[test]
    fn test_sitemap_index() {
        let xml = br#"<?xml version="1.0" encoding="UTF-8"?>
            <sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
              <sitemap><loc>https://example.com/sitemap1.xml</loc></sitemap>
              <sitemap><loc>https://example.com/sitemap2.xml</loc><lastmod>2024-01-01</lastmod></sitemap>
            </sitemapindex>"#;
        let doc = parse_sitemap(xml, &base_url()).unwrap();
        assert_eq!(
            doc,
            SitemapDocument::Index {
                sitemaps: vec![
                    "https://example.com/sitemap1.xml".to_string(),
                    "https://example.com/sitemap2.xml".to_string(),
                ]
            }
        );
    }

    #[test]
    fn test_urlset() {
        let xml = br#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
              <url><loc>https://example.com/page1.html</loc></url>
              <url><loc>https://example.com/page2.html</loc><priority>0.5</priority></url>
            </urlset>"#;
        let doc = parse_sitemap(xml, &base_url()).unwrap();
        assert_eq!(
            doc,
            SitemapDocument::UrlSet {
                pages: vec![
                    "https://example.com/page1.html".to_string(),
                    "https://example.com/page2.html".to_string(),
                ]
            }
        );
    }

    #[test]
    fn test_relative_entries_resolve_against_document() {
        let xml = br#"<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
              <sitemap><loc>child.xml</loc></sitemap>
              <sitemap><loc>/root-child.xml</loc></sitemap>
            </sitemapindex>"#;
        let doc = parse_sitemap(xml, &base_url()).unwrap();
        assert_eq!(
            doc,
            SitemapDocument::Index {
                sitemaps: vec![
                    "https://example.com/sitemaps/child.xml".to_string(),
                    "https://example.com/root-child.xml".to_string(),
                ]
            }
        );
    }

    #[test]
    fn test_no_namespace_is_accepted() {
        let xml = b"<urlset><url><loc>https://example.com/a</loc></url></urlset>";
        let doc = parse_sitemap(xml, &base_url()).unwrap();
        assert_eq!(
            doc,
            SitemapDocument::UrlSet {
                pages: vec!["https://example.com/a".to_string()]
            }
        );
    }

    #[test]
    fn test_extension_loc_is_ignored() {
        let xml = br#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"
                    xmlns:image="http://www.google.com/schemas/sitemap-image/1.1">
              <url>
                <loc>https://example.com/gallery</loc>
                <image:image><image:loc>https://example.com/photo.jpg</image:loc></image:image>
              </url>
            </urlset>"#;
        let doc = parse_sitemap(xml, &base_url()).unwrap();
        assert_eq!(
            doc,
            SitemapDocument::UrlSet {
                pages: vec!["https://example.com/gallery".to_string()]
            }
        );
    }

    #[test]
    fn test_entities_cdata_and_whitespace() {
        let xml = br#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
              <url><loc>
                  https://example.com/search?a=1&amp;b=2
              </loc></url>
              <url><loc><![CDATA[https://example.com/cdata]]></loc></url>
              <url><loc>   </loc></url>
            </urlset>"#;
        let doc = parse_sitemap(xml, &base_url()).unwrap();
        assert_eq!(
            doc,
            SitemapDocument::UrlSet {
                pages: vec![
                    "https://example.com/search?a=1&b=2".to_string(),
                    "https://example.com/cdata".to_string(),
                ]
            }
        );
    }

    #[test]
    fn test_non_http_entries_are_skipped() {
        let xml = br#"<urlset>
              <url><loc>mailto:someone@example.com</loc></url>
              <url><loc>ftp://example.com/file</loc></url>
              <url><loc>https://example.com/ok</loc></url>
            </urlset>"#;
        let doc = parse_sitemap(xml, &base_url()).unwrap();
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_empty_root_elements() {
        let doc = parse_sitemap(
            br#"<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9" />"#,
            &base_url(),
        )
        .unwrap();
        assert_eq!(doc, SitemapDocument::Index { sitemaps: vec![] });

        let doc = parse_sitemap(b"<root/>", &base_url()).unwrap();
        assert_eq!(doc, SitemapDocument::UrlSet { pages: vec![] });
        assert!(doc.is_empty());
    }

    #[test]
    fn test_malformed_xml_fails() {
        let result = parse_sitemap(b"<root><unclosed-tag</root>", &base_url());
        assert!(result.is_err());
    }

    #[test]
    fn test_mismatched_close_fails() {
        let result = parse_sitemap(b"<urlset><url></urlset>", &base_url());
        assert!(result.is_err());
    }

    #[test]
    fn test_second_root_element_fails() {
        let xml = br#"<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
              <sitemap><loc>https://example.com/child.xml</loc></sitemap>
            </sitemapindex><urlset></urlset>"#;
        assert!(matches!(
            parse_sitemap(xml, &base_url()),
            Err(ParseError::MultipleRoots(name)) if name == "urlset"
        ));

        let xml = br#"<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
              <sitemap><loc>https://example.com/child.xml</loc></sitemap>
            </sitemapindex><urlset/>"#;
        assert!(matches!(
            parse_sitemap(xml, &base_url()),
            Err(ParseError::MultipleRoots(_))
        ));

        assert!(matches!(
            parse_sitemap(b"<a/><b></b>", &base_url()),
            Err(ParseError::MultipleRoots(name)) if name == "b"
        ));
    }

    #[test]
    fn test_truncated_document_fails() {
        let result = parse_sitemap(
            b"<urlset><url><loc>https://example.com/a</loc></url>",
            &base_url(),
        );
        assert!(matches!(result, Err(ParseError::Truncated(_))));
    }

    #[test]
    fn test_empty_document_fails() {
        assert!(matches!(
            parse_sitemap(b"", &base_url()),
            Err(ParseError::NoRootElement)
        ));
        assert!(matches!(
            parse_sitemap(b"<?xml version=\"1.0\"?>\n", &base_url()),
            Err(ParseError::NoRootElement)
        ));
    }
}
