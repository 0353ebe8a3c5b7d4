//! `WeightedGraph`: named vertices joined by weighted edges.
//!
//! The action taken from a vertex is the name of the neighbour to move to.
//! Actions are enumerated in edge insertion order, which keeps search order
//! reproducible.

use std::collections::BTreeMap;

use wayfinder_kernel::problem::StateSpace;

#[derive(Debug, Clone, PartialEq)]
pub struct WeightedGraph {
    directed: bool,
    adjacency: BTreeMap<String, Vec<(String, f64)>>,
}

impl WeightedGraph {
    /// Edges added with [`Self::add_edge`] are traversable both ways.
    #[must_use]
    pub fn undirected() -> Self {
        Self {
            directed: false,
            adjacency: BTreeMap::new(),
        }
    }

    /// Edges added with [`Self::add_edge`] run from `from` to `to` only.
    #[must_use]
    pub fn directed() -> Self {
        Self {
            directed: true,
            adjacency: BTreeMap::new(),
        }
    }

    /// Build an undirected graph from `(a, b, weight)` triples.
    #[must_use]
    pub fn from_undirected_edges<'a>(edges: impl IntoIterator<Item = (&'a str, &'a str, f64)>) -> Self {
        let mut graph = Self::undirected();
        for (a, b, w) in edges {
            graph.add_edge(a, b, w);
        }
        graph
    }

    #[must_use]
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Add an isolated vertex. Existing vertices are left untouched.
    pub fn add_vertex(&mut self, name: &str) -> &mut Self {
        self.adjacency.entry(name.to_string()).or_default();
        self
    }

    /// Add an edge, creating missing endpoints. Re-adding an existing edge
    /// replaces its weight. Weights are checked at query time, not here.
    pub fn add_edge(&mut self, from: &str, to: &str, weight: f64) -> &mut Self {
        self.add_vertex(to);
        Self::upsert(self.adjacency.entry(from.to_string()).or_default(), to, weight);
        if !self.directed {
            Self::upsert(self.adjacency.entry(to.to_string()).or_default(), from, weight);
        }
        self
    }

    fn upsert(edges: &mut Vec<(String, f64)>, to: &str, weight: f64) {
        match edges.iter_mut().find(|(name, _)| name == to) {
            Some(edge) => edge.1 = weight,
            None => edges.push((to.to_string(), weight)),
        }
    }

    /// Vertex names in lexicographic order.
    pub fn vertices(&self) -> impl Iterator<Item = &str> {
        self.adjacency.keys().map(String::as_str)
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Outgoing `(neighbour, weight)` pairs of `vertex`, in insertion order.
    #[must_use]
    pub fn neighbours(&self, vertex: &str) -> &[(String, f64)] {
        self.adjacency.get(vertex).map_or(&[][..], Vec::as_slice)
    }

    #[must_use]
    pub fn weight(&self, from: &str, to: &str) -> Option<f64> {
        self.neighbours(from)
            .iter()
            .find(|(name, _)| name == to)
            .map(|(_, w)| *w)
    }
}

impl StateSpace for WeightedGraph {
    type State = String;
    type Action = String;

    fn contains(&self, state: &String) -> bool {
        self.adjacency.contains_key(state)
    }

    fn actions(&self, state: &String) -> Vec<String> {
        self.neighbours(state)
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    fn transition(&self, _state: &String, action: &String) -> String {
        action.clone()
    }

    fn has_cost_function(&self) -> bool {
        true
    }

    fn step_cost(&self, state: &String, action: &String) -> Option<f64> {
        self.weight(state, action)
    }

    fn predecessors(&self, state: &String) -> Option<Vec<(String, String)>> {
        Some(
            self.adjacency
                .iter()
                .filter(|(_, edges)| edges.iter().any(|(to, _)| to == state))
                .map(|(from, _)| (from.clone(), state.clone()))
                .collect(),
        )
    }
}
