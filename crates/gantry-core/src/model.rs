//! Core data structures for the resource graph

use std::collections::BTreeMap;
use std::hash::{DefaultHasher, Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Unique, stable identifier for a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct NodeId(pub u64);

impl NodeId {
    pub fn new(name: &str, kind: ResourceKind) -> Self {
        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        kind.hash(&mut hasher);
        NodeId(hasher.finish())
    }
}

/// Unique edge identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct EdgeId(pub u64);

/// Discriminates what kind of infrastructure resource a node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    Cluster,
    ServiceAccount,
    HelmRelease,
    LoadBalancer,
    Listener,
    TargetGroup,
    Alarm,
    Manifest,
    Output,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ResourceKind::Cluster => "cluster",
            ResourceKind::ServiceAccount => "service-account",
            ResourceKind::HelmRelease => "helm-release",
            ResourceKind::LoadBalancer => "load-balancer",
            ResourceKind::Listener => "listener",
            ResourceKind::TargetGroup => "target-group",
            ResourceKind::Alarm => "alarm",
            ResourceKind::Manifest => "manifest",
            ResourceKind::Output => "output",
        };
        write!(f, "{}", label)
    }
}

/// A single declared resource in the stack graph.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResourceNode {
    pub id: NodeId,
    pub kind: ResourceKind,
    /// Stack-unique logical name.
    pub name: String,
    /// Kind-specific configuration.
    pub properties: BTreeMap<String, PropValue>,
    /// Explicit ordering constraints on other nodes, by logical name.
    /// Required whenever a dependency lives only inside an opaque payload.
    pub depends_on: Vec<String>,
}

impl ResourceNode {
    pub fn new(name: impl Into<String>, kind: ResourceKind) -> Self {
        let name = name.into();
        ResourceNode {
            id: NodeId::new(&name, kind),
            kind,
            name,
            properties: BTreeMap::new(),
            depends_on: Vec::new(),
        }
    }
}

/// A reference to another node's attribute, e.g. `hello-lb.dns_name`.
/// Structurally visible to edge inference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttrRef {
    pub node: String,
    pub attr: String,
}

impl AttrRef {
    pub fn new(node: impl Into<String>, attr: impl Into<String>) -> Self {
        AttrRef {
            node: node.into(),
            attr: attr.into(),
        }
    }
}

impl std::fmt::Display for AttrRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.node, self.attr)
    }
}

/// A property value in a node's configuration bag.
///
/// `Ref` values are walked by edge inference; `Opaque` payloads are handed to
/// the apply engine as-is, so identifiers embedded inside them produce no
/// edge and must be covered by `depends_on`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum PropValue {
    Str(String),
    Int(i64),
    Bool(bool),
    List(Vec<PropValue>),
    Map(BTreeMap<String, PropValue>),
    Ref(AttrRef),
    Opaque(serde_json::Value),
}

impl PropValue {
    pub fn string(value: impl Into<String>) -> Self {
        PropValue::Str(value.into())
    }

    pub fn reference(node: impl Into<String>, attr: impl Into<String>) -> Self {
        PropValue::Ref(AttrRef::new(node, attr))
    }
}

/// How an edge was established.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeOrigin {
    /// Found by walking `Ref` values in the dependent node's property bag.
    Inferred,
    /// Declared by the author via `depends_on`.
    Explicit,
}

/// A directed edge in the stack graph.
///
/// Direction is apply direction: source must be converged before target
/// starts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DependencyEdge {
    pub id: EdgeId,
    /// The dependency.
    pub source: NodeId,
    /// The dependent.
    pub target: NodeId,
    pub origin: EdgeOrigin,
    /// Human-readable label, e.g. the attribute reference that produced it.
    pub label: Option<String>,
}
