//! Sub-resource policy applied while a page loads.

use chromiumoxide::cdp::browser_protocol::network::ResourceType;
use geoaudit_core::ResourceKind;
use std::collections::HashSet;

/// Verdict for one paused request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Let the request continue untouched
    Allow,
    /// Abort the request so it never holds the load open
    Block,
}

/// Decides which sub-resource fetches a navigation may perform.
///
/// The default policy blocks images, stylesheets, fonts and media, which cost
/// load time and contribute nothing to text or structure extraction.
#[derive(Debug, Clone)]
pub struct ResourceFilter {
    blocked: HashSet<ResourceKind>,
}

impl Default for ResourceFilter {
    fn default() -> Self {
        Self::blocking(ResourceKind::HEAVY)
    }
}

impl ResourceFilter {
    /// Block exactly the given kinds.
    pub fn blocking(kinds: impl IntoIterator<Item = ResourceKind>) -> Self {
        Self {
            blocked: kinds.into_iter().collect(),
        }
    }

    pub fn decide(&self, kind: ResourceKind) -> Decision {
        if self.blocked.contains(&kind) {
            Decision::Block
        } else {
            Decision::Allow
        }
    }

    /// Decide on a request as classified by the DevTools protocol.
    pub fn decide_cdp(&self, resource_type: &ResourceType) -> Decision {
        self.decide(resource_kind(resource_type))
    }
}

/// Map a DevTools resource type onto our own classification.
pub fn resource_kind(resource_type: &ResourceType) -> ResourceKind {
    match resource_type {
        ResourceType::Document => ResourceKind::Document,
        ResourceType::Stylesheet => ResourceKind::Stylesheet,
        ResourceType::Image => ResourceKind::Image,
        ResourceType::Media => ResourceKind::Media,
        ResourceType::Font => ResourceKind::Font,
        ResourceType::Script => ResourceKind::Script,
        ResourceType::TextTrack => ResourceKind::TextTrack,
        ResourceType::Xhr => ResourceKind::Xhr,
        ResourceType::Fetch => ResourceKind::Fetch,
        ResourceType::EventSource => ResourceKind::EventSource,
        ResourceType::WebSocket => ResourceKind::WebSocket,
        ResourceType::Manifest => ResourceKind::Manifest,
        _ => ResourceKind::Other,
    }
}
