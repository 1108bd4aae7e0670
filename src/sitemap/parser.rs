//! Sitemap XML parsing

use crate::sitemap::SitemapError;
use crate::url::is_valid_url;
use quick_xml::events::Event;
use quick_xml::Reader;

/// A parsed sitemap document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SitemapDocument {
    /// A sitemap index listing child sitemap URLs
    Index(Vec<String>),

    /// A URL set listing page URLs
    UrlSet(Vec<String>),
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Parent {
    Sitemap,
    Url,
}

/// The `<url>` or `<sitemap>` element currently open
struct Entry {
    parent: Parent,
    depth: usize,
    loc_seen: bool,
}

/// Parses sitemap XML
///
/// A document containing any `<sitemap>` element is treated as an index and
/// its `<loc>` values are returned as child sitemaps. Otherwise the `<loc>` of
/// every `<url>` is returned, keeping only valid absolute URLs.
///
/// Only the first `<loc>` directly inside each entry counts. Extension
/// elements such as `<image:loc>` sit deeper and are ignored.
///
/// # Errors
///
/// Returns `SitemapError::InvalidXml` when the document is not well-formed.
pub fn parse_sitemap(xml: &str) -> Result<SitemapDocument, SitemapError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut entry: Option<Entry> = None;
    let mut loc_text: Option<String> = None;
    let mut depth: usize = 0;
    let mut saw_element = false;
    let mut saw_sitemap = false;
    let mut sitemap_locs = Vec::new();
    let mut url_locs = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                depth += 1;
                saw_element = true;
                match e.local_name().as_ref() {
                    name @ (b"sitemap" | b"url") => {
                        let parent = if name == b"sitemap" {
                            saw_sitemap = true;
                            Parent::Sitemap
                        } else {
                            Parent::Url
                        };
                        if entry.is_none() {
                            entry = Some(Entry {
                                parent,
                                depth,
                                loc_seen: false,
                            });
                        }
                    }
                    b"loc" => {
                        if let Some(open) = entry.as_mut() {
                            if depth == open.depth + 1 && !open.loc_seen {
                                open.loc_seen = true;
                                loc_text = Some(String::new());
                            }
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::Empty(e)) => {
                saw_element = true;
                if e.local_name().as_ref() == b"sitemap" {
                    saw_sitemap = true;
                }
            }
            Ok(Event::End(_)) => {
                if let Some((parent, entry_depth)) = entry.as_ref().map(|e| (e.parent, e.depth)) {
                    if depth == entry_depth + 1 && loc_text.is_some() {
                        if let Some(text) = loc_text.take() {
                            push_loc(parent, text.trim(), &mut sitemap_locs, &mut url_locs);
                        }
                    } else if depth == entry_depth {
                        entry = None;
                    }
                }
                depth = depth.saturating_sub(1);
            }
            Ok(Event::Text(t)) => {
                if let Some(text) = loc_text.as_mut() {
                    let unescaped = t
                        .unescape()
                        .map_err(|e| SitemapError::InvalidXml(e.to_string()))?;
                    text.push_str(&unescaped);
                }
            }
            Ok(Event::CData(c)) => {
                if let Some(text) = loc_text.as_mut() {
                    text.push_str(&String::from_utf8_lossy(&c.into_inner()));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(SitemapError::InvalidXml(format!(
                    "at position {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
            _ => {}
        }
    }

    if !saw_element {
        return Err(SitemapError::InvalidXml("document has no elements".to_string()));
    }

    if depth != 0 {
        return Err(SitemapError::InvalidXml("unexpected end of document".to_string()));
    }

    if saw_sitemap {
        Ok(SitemapDocument::Index(sitemap_locs))
    } else {
        Ok(SitemapDocument::UrlSet(url_locs))
    }
}

fn push_loc(parent: Parent, loc: &str, sitemaps: &mut Vec<String>, urls: &mut Vec<String>) {
    if loc.is_empty() {
        return;
    }

    match parent {
        Parent::Sitemap => sitemaps.push(loc.to_string()),
        Parent::Url if is_valid_url(loc) => urls.push(loc.to_string()),
        Parent::Url => tracing::debug!("Skipping invalid sitemap URL: {}", loc),
    }
}
