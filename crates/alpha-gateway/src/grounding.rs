//! Citation extraction and JSON body recovery.

use serde::{Deserialize, Serialize};

use crate::envelope::GroundingChunk;

/// Anchor used when a web reference carries no address.
pub const PLACEHOLDER_URI: &str = "#";

/// One web source the model cited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCitation {
    pub title: String,
    pub uri: String,
}

/// Turn grounding chunks into citations.
///
/// Chunks without a `web` reference are dropped; order is preserved.
/// Blank titles become `placeholder_label`, blank addresses become `#`.
pub fn extract_citations(chunks: &[GroundingChunk], placeholder_label: &str) -> Vec<SourceCitation> {
    chunks
        .iter()
        .filter_map(|chunk| chunk.web.as_ref())
        .map(|web| SourceCitation {
            title: non_blank(web.title.as_deref()).unwrap_or(placeholder_label).to_string(),
            uri: non_blank(web.uri.as_deref()).unwrap_or(PLACEHOLDER_URI).to_string(),
        })
        .collect()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Locate the JSON object in a reply that may be wrapped in Markdown fences or prose.
pub fn extract_json(text: &str) -> &str {
    let trimmed = text.trim();

    if let Some(start) = trimmed.find("```json") {
        let after_marker = &trimmed[start + 7..];
        if let Some(end) = after_marker.find("```") {
            return after_marker[..end].trim();
        }
    }

    if let Some(start) = trimmed.find("```") {
        let after_marker = &trimmed[start + 3..];
        if let Some(end) = after_marker.find("```") {
            return after_marker[..end].trim();
        }
    }

    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if end > start {
            return &trimmed[start..=end];
        }
    }

    trimmed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::WebReference;

    fn web(title: Option<&str>, uri: Option<&str>) -> GroundingChunk {
        GroundingChunk {
            web: Some(WebReference {
                title: title.map(String::from),
                uri: uri.map(String::from),
            }),
        }
    }

    #[test]
    fn test_only_web_chunks_are_kept() {
        let chunks = vec![web(Some("X"), Some("http://x")), GroundingChunk { web: None }];
        let sources = extract_citations(&chunks, "Grounding Source");
        assert_eq!(
            sources,
            vec![SourceCitation { title: "X".to_string(), uri: "http://x".to_string() }]
        );
    }

    #[test]
    fn test_placeholders_and_order() {
        let chunks = vec![
            web(None, Some("http://a")),
            GroundingChunk { web: None },
            web(Some("B"), None),
            web(Some(""), Some("")),
        ];
        let sources = extract_citations(&chunks, "IPO Intel");
        assert_eq!(sources.len(), 3);
        assert_eq!(sources[0].title, "IPO Intel");
        assert_eq!(sources[0].uri, "http://a");
        assert_eq!(sources[1].title, "B");
        assert_eq!(sources[1].uri, PLACEHOLDER_URI);
        assert_eq!(sources[2].title, "IPO Intel");
        assert_eq!(sources[2].uri, PLACEHOLDER_URI);
    }

    #[test]
    fn test_extract_json_variants() {
        assert_eq!(extract_json("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(extract_json("```\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(extract_json("Here you go: {\"a\":1} thanks"), "{\"a\":1}");
        assert_eq!(extract_json("  plain  "), "plain");
    }
}
