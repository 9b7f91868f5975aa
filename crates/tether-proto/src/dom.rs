//! DOM-domain commands: element geometry queries.

use serde::{Deserialize, Serialize};
use tether_core::geometry::{Point, Quad};

use crate::command::Command;

/// `DOM.getContentQuads` request. Exactly one of the three element
/// handles should be set; the remote side rejects ambiguous requests.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetContentQuads {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend_node_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
}

/// On-screen regions occupied by one logical element. Disjoint quads
/// happen naturally, e.g. inline text wrapped across lines.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetContentQuadsResult {
    pub quads: Vec<Quad>,
}

impl GetContentQuadsResult {
    /// A "good enough" point to interact with the element: the center of
    /// the first quad, or `None` when the element occupies no region.
    ///
    /// Deliberately weak semantics: not a centroid across quads and not
    /// a containment test. Callers depend on "first quad's center"
    /// exactly; do not substitute a more correct algorithm.
    pub fn one_point_inside(&self) -> Option<Point> {
        self.quads.first().and_then(Quad::center)
    }
}

impl Command for GetContentQuads {
    const METHOD: &'static str = "DOM.getContentQuads";
    type Response = GetContentQuadsResult;
}
