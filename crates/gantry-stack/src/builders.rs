//! Typed builders producing resource nodes for each kind

use std::collections::BTreeMap;

use gantry_core::{PropValue, ResourceKind, ResourceNode};

/// Managed Kubernetes cluster.
pub struct Cluster {
    node: ResourceNode,
}

impl Cluster {
    pub fn new(name: &str) -> Self {
        Cluster {
            node: ResourceNode::new(name, ResourceKind::Cluster),
        }
    }

    pub fn version(mut self, version: &str) -> Self {
        self.node
            .properties
            .insert("version".to_string(), PropValue::string(version));
        self
    }

    pub fn build(self) -> ResourceNode {
        self.node
    }
}

/// Kubernetes service account bound to a cloud IAM principal.
pub struct ServiceAccount {
    node: ResourceNode,
}

impl ServiceAccount {
    pub fn new(name: &str) -> Self {
        ServiceAccount {
            node: ResourceNode::new(name, ResourceKind::ServiceAccount),
        }
    }

    /// The in-cluster account name (distinct from the node's logical name).
    pub fn account_name(mut self, account_name: &str) -> Self {
        self.node
            .properties
            .insert("account_name".to_string(), PropValue::string(account_name));
        self
    }

    pub fn namespace(mut self, namespace: &str) -> Self {
        self.node
            .properties
            .insert("namespace".to_string(), PropValue::string(namespace));
        self
    }

    pub fn cluster(mut self, cluster: &str) -> Self {
        self.node
            .properties
            .insert("cluster".to_string(), PropValue::reference(cluster, "name"));
        self
    }

    /// IAM statements attached to the account's principal policy. The
    /// statements are engine-opaque configuration data.
    pub fn policy(mut self, statements: Vec<serde_json::Value>) -> Self {
        self.node.properties.insert(
            "policy".to_string(),
            PropValue::Opaque(serde_json::Value::Array(statements)),
        );
        self
    }

    pub fn build(self) -> ResourceNode {
        self.node
    }
}

/// Packaged chart release installed into the cluster.
pub struct HelmRelease {
    node: ResourceNode,
    values: BTreeMap<String, PropValue>,
}

impl HelmRelease {
    pub fn new(name: &str) -> Self {
        HelmRelease {
            node: ResourceNode::new(name, ResourceKind::HelmRelease),
            values: BTreeMap::new(),
        }
    }

    pub fn chart(mut self, chart: &str) -> Self {
        self.node
            .properties
            .insert("chart".to_string(), PropValue::string(chart));
        self
    }

    pub fn repository(mut self, repository: &str) -> Self {
        self.node
            .properties
            .insert("repository".to_string(), PropValue::string(repository));
        self
    }

    pub fn release(mut self, release: &str) -> Self {
        self.node
            .properties
            .insert("release".to_string(), PropValue::string(release));
        self
    }

    pub fn namespace(mut self, namespace: &str) -> Self {
        self.node
            .properties
            .insert("namespace".to_string(), PropValue::string(namespace));
        self
    }

    pub fn cluster(mut self, cluster: &str) -> Self {
        self.node
            .properties
            .insert("cluster".to_string(), PropValue::reference(cluster, "name"));
        self
    }

    /// Add one chart value. References passed here stay structurally visible
    /// to edge inference.
    pub fn value(mut self, key: &str, value: PropValue) -> Self {
        self.values.insert(key.to_string(), value);
        self
    }

    pub fn build(mut self) -> ResourceNode {
        if !self.values.is_empty() {
            self.node
                .properties
                .insert("values".to_string(), PropValue::Map(self.values));
        }
        self.node
    }
}

/// Internet-facing or internal load balancer.
pub struct LoadBalancer {
    node: ResourceNode,
}

impl LoadBalancer {
    pub fn new(name: &str) -> Self {
        LoadBalancer {
            node: ResourceNode::new(name, ResourceKind::LoadBalancer),
        }
    }

    pub fn vpc(mut self, cluster: &str) -> Self {
        self.node
            .properties
            .insert("vpc".to_string(), PropValue::reference(cluster, "vpc_id"));
        self
    }

    pub fn internet_facing(mut self, internet_facing: bool) -> Self {
        self.node.properties.insert(
            "internet_facing".to_string(),
            PropValue::Bool(internet_facing),
        );
        self
    }

    pub fn build(self) -> ResourceNode {
        self.node
    }
}

/// Listener on a load balancer port.
pub struct Listener {
    node: ResourceNode,
}

impl Listener {
    pub fn new(name: &str) -> Self {
        Listener {
            node: ResourceNode::new(name, ResourceKind::Listener),
        }
    }

    pub fn load_balancer(mut self, load_balancer: &str) -> Self {
        self.node.properties.insert(
            "load_balancer".to_string(),
            PropValue::reference(load_balancer, "arn"),
        );
        self
    }

    pub fn port(mut self, port: i64) -> Self {
        self.node
            .properties
            .insert("port".to_string(), PropValue::Int(port));
        self
    }

    pub fn open(mut self, open: bool) -> Self {
        self.node
            .properties
            .insert("open".to_string(), PropValue::Bool(open));
        self
    }

    pub fn default_target_group(mut self, target_group: &str) -> Self {
        self.node.properties.insert(
            "default_target_group".to_string(),
            PropValue::reference(target_group, "arn"),
        );
        self
    }

    pub fn build(self) -> ResourceNode {
        self.node
    }
}

/// Target group routing to IP or instance targets.
pub struct TargetGroup {
    node: ResourceNode,
}

impl TargetGroup {
    pub fn new(name: &str) -> Self {
        TargetGroup {
            node: ResourceNode::new(name, ResourceKind::TargetGroup),
        }
    }

    pub fn port(mut self, port: i64) -> Self {
        self.node
            .properties
            .insert("port".to_string(), PropValue::Int(port));
        self
    }

    pub fn target_type(mut self, target_type: &str) -> Self {
        self.node
            .properties
            .insert("target_type".to_string(), PropValue::string(target_type));
        self
    }

    pub fn vpc(mut self, cluster: &str) -> Self {
        self.node
            .properties
            .insert("vpc".to_string(), PropValue::reference(cluster, "vpc_id"));
        self
    }

    pub fn build(self) -> ResourceNode {
        self.node
    }
}

/// Threshold alarm on a load balancer metric.
pub struct Alarm {
    node: ResourceNode,
}

impl Alarm {
    pub fn new(name: &str) -> Self {
        Alarm {
            node: ResourceNode::new(name, ResourceKind::Alarm),
        }
    }

    pub fn metric(mut self, metric: &str) -> Self {
        self.node
            .properties
            .insert("metric".to_string(), PropValue::string(metric));
        self
    }

    pub fn load_balancer(mut self, load_balancer: &str) -> Self {
        self.node.properties.insert(
            "load_balancer".to_string(),
            PropValue::reference(load_balancer, "arn"),
        );
        self
    }

    pub fn threshold(mut self, threshold: i64) -> Self {
        self.node
            .properties
            .insert("threshold".to_string(), PropValue::Int(threshold));
        self
    }

    pub fn evaluation_periods(mut self, periods: i64) -> Self {
        self.node
            .properties
            .insert("evaluation_periods".to_string(), PropValue::Int(periods));
        self
    }

    pub fn build(self) -> ResourceNode {
        self.node
    }
}

/// Bundle of declarative Kubernetes documents applied to a cluster.
///
/// Documents are stored as an opaque payload: identifiers embedded inside
/// them are invisible to edge inference, so any ordering they imply must be
/// declared with `depends_on`.
pub struct Manifest {
    node: ResourceNode,
    documents: Vec<serde_json::Value>,
}

impl Manifest {
    pub fn new(name: &str) -> Self {
        Manifest {
            node: ResourceNode::new(name, ResourceKind::Manifest),
            documents: Vec::new(),
        }
    }

    pub fn cluster(mut self, cluster: &str) -> Self {
        self.node
            .properties
            .insert("cluster".to_string(), PropValue::reference(cluster, "name"));
        self
    }

    pub fn document(mut self, document: serde_json::Value) -> Self {
        self.documents.push(document);
        self
    }

    pub fn depends_on(mut self, name: &str) -> Self {
        self.node.depends_on.push(name.to_string());
        self
    }

    pub fn build(mut self) -> ResourceNode {
        self.node.properties.insert(
            "documents".to_string(),
            PropValue::Opaque(serde_json::Value::Array(self.documents)),
        );
        self.node
    }
}

/// Named string value surfaced after apply.
pub struct Output {
    node: ResourceNode,
}

impl Output {
    pub fn new(name: &str) -> Self {
        Output {
            node: ResourceNode::new(name, ResourceKind::Output),
        }
    }

    pub fn value(mut self, node: &str, attr: &str) -> Self {
        self.node
            .properties
            .insert("value".to_string(), PropValue::reference(node, attr));
        self
    }

    pub fn build(self) -> ResourceNode {
        self.node
    }
}
