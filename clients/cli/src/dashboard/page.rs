//! In-memory page holding the dashboard regions
//!
//! Regions are addressed by element id. A page may be built without some
//! regions; lookups for those return `None` and renders skip them.

use super::markup::Markup;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display)]
pub enum RegionId {
    #[strum(serialize = "recommended-rpc")]
    RecommendedRpc,
    #[strum(serialize = "rpc-cards")]
    RpcCards,
    #[strum(serialize = "dapp-cards")]
    DappCards,
    #[strum(serialize = "incidents-list")]
    IncidentsList,
}

impl RegionId {
    pub const ALL: [RegionId; 4] = [
        RegionId::RecommendedRpc,
        RegionId::RpcCards,
        RegionId::DappCards,
        RegionId::IncidentsList,
    ];

    /// Element the region is rendered as in the page document.
    fn tag(self) -> &'static str {
        match self {
            RegionId::RecommendedRpc => "span",
            RegionId::RpcCards | RegionId::DappCards => "div",
            RegionId::IncidentsList => "ul",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViewError {
    #[error("page has no element with id {0}")]
    MissingRegion(RegionId),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Region {
    content: Markup,
}

impl Region {
    /// Replace the content with a single text node.
    pub fn set_text(&mut self, text: &str) {
        self.content = Markup::text(text);
    }

    /// Replace the content with a rendered fragment.
    pub fn set_markup(&mut self, markup: Markup) {
        self.content = markup;
    }

    pub fn clear(&mut self) {
        self.content = Markup::new();
    }

    pub fn markup(&self) -> &Markup {
        &self.content
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    regions: BTreeMap<RegionId, Region>,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    /// Page with every dashboard region present and empty.
    pub fn new() -> Self {
        Self::with_regions(&RegionId::ALL)
    }

    pub fn with_regions(ids: &[RegionId]) -> Self {
        Self {
            regions: ids.iter().map(|id| (*id, Region::default())).collect(),
        }
    }

    pub fn region(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(&id)
    }

    pub fn region_mut(&mut self, id: RegionId) -> Option<&mut Region> {
        self.regions.get_mut(&id)
    }

    /// Like `region_mut`, for regions the dashboard cannot do without.
    pub fn require_mut(&mut self, id: RegionId) -> Result<&mut Region, ViewError> {
        self.region_mut(id).ok_or(ViewError::MissingRegion(id))
    }

    /// Rendered content of a region, empty when the region is absent.
    #[cfg(test)]
    pub fn html(&self, id: RegionId) -> &str {
        self.region(id).map(|r| r.markup().as_str()).unwrap_or_default()
    }

    /// Minimal standalone document containing the present regions.
    pub fn document(&self) -> String {
        let mut body = String::new();
        for id in RegionId::ALL {
            let Some(region) = self.region(id) else {
                continue;
            };
            let element = format!(
                "<{tag} id=\"{id}\">{content}</{tag}>",
                tag = id.tag(),
                content = region.markup().as_str()
            );
            match id {
                RegionId::RecommendedRpc => {
                    body.push_str(&format!("<p>Recommended RPC: {}</p>\n", element))
                }
                _ => {
                    body.push_str(&element);
                    body.push('\n');
                }
            }
        }

        format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>Aptos Guardian</title>\n</head>\n<body>\n{}</body>\n</html>\n",
            body
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_ids_match_element_ids() {
        let ids: Vec<String> = RegionId::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(
            ids,
            ["recommended-rpc", "rpc-cards", "dapp-cards", "incidents-list"]
        );
    }

    #[test]
    fn test_set_text_escapes() {
        let mut page = Page::new();
        page.require_mut(RegionId::RecommendedRpc)
            .unwrap()
            .set_text("<img src=x>");
        assert_eq!(page.html(RegionId::RecommendedRpc), "&lt;img src=x&gt;");
    }

    #[test]
    fn test_missing_region() {
        let mut page = Page::with_regions(&[RegionId::RpcCards]);
        assert!(page.region_mut(RegionId::DappCards).is_none());
        assert_eq!(
            page.require_mut(RegionId::RecommendedRpc),
            Err(ViewError::MissingRegion(RegionId::RecommendedRpc))
        );
        assert_eq!(page.html(RegionId::IncidentsList), "");
    }

    #[test]
    fn test_document_lists_present_regions() {
        let mut page = Page::with_regions(&[RegionId::RecommendedRpc, RegionId::IncidentsList]);
        page.require_mut(RegionId::RecommendedRpc)
            .unwrap()
            .set_text("aptoslabs");

        let document = page.document();
        assert!(document.starts_with("<!DOCTYPE html>"));
        assert!(document.contains(
            r#"<p>Recommended RPC: <span id="recommended-rpc">aptoslabs</span></p>"#
        ));
        assert!(document.contains(r#"<ul id="incidents-list"></ul>"#));
        assert!(!document.contains("rpc-cards"));
    }
}
