//! Reverse-dependency graph and reload ordering.
//!
//! [`build_depended_graph`] folds every plugin's mandatory and optional
//! dependencies into a single "depended-by" relation. [`DependedGraph::resolve`]
//! then peels that graph frontier by frontier, starting at a target plugin,
//! and produces the order in which the target and everything that
//! transitively depends on it have to be unloaded.
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use log::{debug, warn};
use thiserror::Error;

use crate::plugin_system::registry::PluginRegistry;

/// Error that can occur when resolving a reload order
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DependencyError {
    /// The target plugin is not in the registry snapshot
    #[error("Plugin not found: {0}")]
    TargetNotFound(String),

    /// The dependents of the target form a cycle, so no unload order exists
    #[error("Circular dependency detected among plugins: {}", .0.join(", "))]
    CyclicDependency(Vec<String>),
}

/// Maps a plugin name to the set of plugins declaring a dependency on it.
///
/// Names referenced as dependencies but not installed are ordinary nodes.
/// Dependent sets are ordered, which makes resolution deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependedGraph {
    dependents: BTreeMap<String, BTreeSet<String>>,
}

impl DependedGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `dependent` declares a dependency on `dependency`.
    ///
    /// The entry for `dependency` is created even if the edge is rejected.
    /// Self-referential edges are dropped; returns whether the edge was kept.
    pub fn add_edge(&mut self, dependency: &str, dependent: &str) -> bool {
        let entry = self.dependents.entry(dependency.to_string()).or_default();
        if dependency == dependent {
            warn!("Ignoring self-dependency declared by plugin '{}'", dependent);
            return false;
        }
        entry.insert(dependent.to_string());
        true
    }

    /// Whether `name` appears as a dependency target
    pub fn contains(&self, name: &str) -> bool {
        self.dependents.contains_key(name)
    }

    /// The plugins directly depending on `name`, if it is a dependency target
    pub fn dependents_of(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.dependents.get(name)
    }

    /// A copy of the one-hop dependents of `name`; empty when nothing depends on it
    pub fn direct_dependents(&self, name: &str) -> BTreeSet<String> {
        self.dependents.get(name).cloned().unwrap_or_default()
    }

    /// Iterate over `(dependency, dependents)` entries in name order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeSet<String>)> {
        self.dependents.iter()
    }

    /// Number of dependency targets
    pub fn len(&self) -> usize {
        self.dependents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dependents.is_empty()
    }

    /// Total number of depended-by edges
    pub fn edge_count(&self) -> usize {
        self.dependents.values().map(BTreeSet::len).sum()
    }

    /// Compute the unload order for `target` and everything depending on it.
    ///
    /// Each round, every frontier plugin whose dependents have all been
    /// placed is appended to the order; the others pull their unvisited
    /// dependents into the next frontier. Plugins placed in a round only
    /// release their own dependencies once the round is over. Within a round
    /// plugins are visited in name order.
    ///
    /// The target is always the last element of the returned order. Fails
    /// with [`DependencyError::CyclicDependency`] when a round can neither
    /// place a plugin nor discover a new one.
    ///
    /// Whether `target` is installed is not checked here; see
    /// [`PluginRegistry::plan_reload`].
    pub fn resolve(&self, target: &str) -> Result<ReloadPlan, DependencyError> {
        let direct_dependents = self.direct_dependents(target);

        // Working copy: dependents still waiting to be placed, per plugin,
        // plus the forward edges needed to release them.
        let mut remaining: HashMap<&str, usize> = HashMap::new();
        let mut depends_on: HashMap<&str, Vec<&str>> = HashMap::new();
        for (dependency, dependents) in &self.dependents {
            remaining.insert(dependency.as_str(), dependents.len());
            for dependent in dependents {
                depends_on.entry(dependent.as_str()).or_default().push(dependency.as_str());
            }
        }

        // Every plugin is discovered once and placed once.
        let node_count = remaining.len() + depends_on.len() + 1;
        let max_rounds = 2 * node_count + 1;

        let mut frontier: BTreeSet<&str> = BTreeSet::from([target]);
        let mut visited: HashSet<&str> = HashSet::from([target]);
        let mut order: Vec<String> = Vec::new();
        let mut rounds = 0usize;

        while !frontier.is_empty() {
            rounds += 1;
            if rounds > max_rounds {
                return Err(cycle_error(&frontier));
            }

            let mut placed: Vec<&str> = Vec::new();
            let mut discovered: Vec<&str> = Vec::new();
            for &plugin in &frontier {
                if remaining.get(plugin).copied().unwrap_or(0) == 0 {
                    order.push(plugin.to_string());
                    placed.push(plugin);
                } else if let Some(dependents) = self.dependents.get(plugin) {
                    for dependent in dependents {
                        if visited.insert(dependent.as_str()) {
                            discovered.push(dependent.as_str());
                        }
                    }
                }
            }

            if placed.is_empty() && discovered.is_empty() {
                return Err(cycle_error(&frontier));
            }
            debug!(
                "Round {} for '{}': placed {:?}, discovered {:?}",
                rounds, target, placed, discovered
            );

            for plugin in placed {
                if let Some(dependencies) = depends_on.get(plugin) {
                    for dependency in dependencies {
                        if let Some(count) = remaining.get_mut(dependency) {
                            *count = count.saturating_sub(1);
                        }
                    }
                }
                frontier.remove(plugin);
            }
            frontier.extend(discovered);
        }

        Ok(ReloadPlan {
            target: target.to_string(),
            order,
            direct_dependents,
        })
    }
}

fn cycle_error(frontier: &BTreeSet<&str>) -> DependencyError {
    DependencyError::CyclicDependency(frontier.iter().map(|s| s.to_string()).collect())
}

/// Builds the reverse-dependency graph from every plugin in the registry.
///
/// Mandatory and optional dependencies produce identical edges.
pub fn build_depended_graph(registry: &PluginRegistry) -> DependedGraph {
    let mut graph = DependedGraph::new();
    for plugin in registry.iter_plugins() {
        for dep in plugin.dependencies() {
            graph.add_edge(&dep.plugin_name, &plugin.name);
        }
    }
    debug!(
        "Built depended graph: {} dependency targets, {} edges",
        graph.len(),
        graph.edge_count()
    );
    graph
}

/// The result of resolving a reload for one target plugin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReloadPlan {
    target: String,
    order: Vec<String>,
    direct_dependents: BTreeSet<String>,
}

impl ReloadPlan {
    /// The plugin the plan was resolved for
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Unload order: every dependent before what it depends on, target last
    pub fn order(&self) -> &[String] {
        &self.order
    }

    /// Load order, the reverse of [`order`](Self::order)
    pub fn load_order(&self) -> Vec<String> {
        self.order.iter().rev().cloned().collect()
    }

    /// All transitive dependents: the unload order without the target, reversed
    pub fn depending(&self) -> Vec<String> {
        let dependents = self.order.len().saturating_sub(1);
        self.order[..dependents].iter().rev().cloned().collect()
    }

    /// Plugins with a one-hop edge to the target, captured before traversal
    pub fn direct_dependents(&self) -> &BTreeSet<String> {
        &self.direct_dependents
    }

    /// Number of plugins the plan touches, target included
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
