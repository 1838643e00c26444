//! Stack validation — every check runs before any plan is produced

use std::collections::{HashMap, HashSet};

use crate::error::StackError;
use crate::infer::collect_refs;
use crate::model::ResourceNode;

/// Validate a declared node set. Returns every violation found rather than
/// stopping at the first, so one run reports the complete picture.
pub fn validate(nodes: &[ResourceNode]) -> Vec<StackError> {
    let mut errors = Vec::new();

    errors.extend(validate_unique_names(nodes));
    errors.extend(validate_references(nodes));
    errors.extend(detect_cycles(nodes));

    errors
}

/// Logical names must be unique within a stack.
fn validate_unique_names(nodes: &[ResourceNode]) -> Vec<StackError> {
    let mut errors = Vec::new();
    let mut seen = HashSet::with_capacity(nodes.len());
    let mut duplicates = HashSet::new();

    for node in nodes {
        if !seen.insert(node.name.as_str()) {
            duplicates.insert(node.name.as_str());
        }
    }

    for name in duplicates {
        errors.push(StackError::DuplicateName(name.to_string()));
    }

    errors
}

/// Every `Ref` and `depends_on` entry must name a declared node, and no node
/// may depend on itself.
fn validate_references(nodes: &[ResourceNode]) -> Vec<StackError> {
    let mut errors = Vec::new();
    let declared: HashSet<_> = nodes.iter().map(|n| n.name.as_str()).collect();

    for node in nodes {
        for attr_ref in collect_refs(node) {
            if attr_ref.node == node.name {
                errors.push(StackError::SelfDependency(node.name.clone()));
            } else if !declared.contains(attr_ref.node.as_str()) {
                errors.push(StackError::UnknownReference {
                    referrer: node.name.clone(),
                    name: attr_ref.node,
                });
            }
        }

        for dep in &node.depends_on {
            if dep == &node.name {
                errors.push(StackError::SelfDependency(node.name.clone()));
            } else if !declared.contains(dep.as_str()) {
                errors.push(StackError::UnknownReference {
                    referrer: node.name.clone(),
                    name: dep.clone(),
                });
            }
        }
    }

    errors
}

/// Detects dependency cycles between declared nodes.
///
/// Uses depth-first search over the combined inferred + explicit dependency
/// relation. Self-edges are reported by `validate_references` and ignored
/// here.
fn detect_cycles(nodes: &[ResourceNode]) -> Vec<StackError> {
    let mut errors = Vec::new();

    let declared: HashSet<_> = nodes.iter().map(|n| n.name.as_str()).collect();

    // Adjacency from dependent to its dependencies, restricted to names that
    // exist so dangling references don't distort the search.
    let mut graph: HashMap<&str, Vec<String>> = HashMap::with_capacity(nodes.len());
    for node in nodes {
        let mut deps: Vec<String> = collect_refs(node)
            .into_iter()
            .map(|r| r.node)
            .chain(node.depends_on.iter().cloned())
            .filter(|dep| dep != &node.name && declared.contains(dep.as_str()))
            .collect();
        deps.dedup();

        if !deps.is_empty() {
            graph.insert(node.name.as_str(), deps);
        }
    }

    if graph.is_empty() {
        return errors;
    }

    let mut visited = HashSet::with_capacity(nodes.len());
    let mut path_set = HashSet::with_capacity(nodes.len());
    let mut cycles = Vec::new();

    for node in nodes {
        if !visited.contains(node.name.as_str()) {
            find_cycles(
                node.name.as_str(),
                &graph,
                &mut visited,
                &mut path_set,
                &mut Vec::new(),
                &mut cycles,
            );
        }
    }

    for cycle in cycles {
        // Format the cycle as a -> b -> c -> a
        let mut path = cycle.join(" -> ");
        if let Some(first) = cycle.first() {
            path.push_str(" -> ");
            path.push_str(first);
        }
        errors.push(StackError::Cycle { path });
    }

    errors
}

fn find_cycles<'a>(
    node: &'a str,
    graph: &'a HashMap<&'a str, Vec<String>>,
    visited: &mut HashSet<&'a str>,
    path_set: &mut HashSet<&'a str>,
    current_path: &mut Vec<&'a str>,
    cycles: &mut Vec<Vec<String>>,
) {
    if visited.contains(node) {
        return;
    }

    // Seeing a node that is still on the current path means we closed a loop.
    if path_set.contains(node) {
        if let Some(cycle_start) = current_path.iter().position(|&n| n == node) {
            let cycle = current_path[cycle_start..]
                .iter()
                .map(|&s| s.to_string())
                .collect();
            cycles.push(cycle);
        }
        return;
    }

    path_set.insert(node);
    current_path.push(node);

    if let Some(deps) = graph.get(node) {
        for dep in deps {
            find_cycles(dep.as_str(), graph, visited, path_set, current_path, cycles);
        }
    }

    path_set.remove(node);
    current_path.pop();
    visited.insert(node);
}
