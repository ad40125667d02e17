//! Undirected graphs read from the DIMACS-like edge-list format.
//!
//! ```text
//! c comment
//! p edge N M
//! e u v
//! ```
//!
//! The `p` line declares vertices `1..=N`; `M` is advisory. Every `e` line
//! adds an edge without any bounds, duplicate or self-loop check, and an
//! endpoint outside `1..=N` simply becomes a vertex of its own.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{HeuristicError, Result};

/// An undirected graph with ascending vertex ids.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    /// Name of the instance (file stem when loaded from disk)
    pub name: String,
    /// Vertex count declared by the `p` line
    pub declared_vertices: usize,
    /// Edge count declared by the `p` line, if present
    pub declared_edges: Option<usize>,
    adjacency: BTreeMap<usize, BTreeSet<usize>>,
    edges: Vec<(usize, usize)>,
}

impl Graph {
    /// Graph with vertices `1..=n` and no edges.
    pub fn with_vertices(n: usize) -> Self {
        let mut graph = Graph::default();
        graph.add_vertices(n);
        graph
    }

    /// Graph with vertices `1..=n` and the given edges.
    pub fn from_edges(n: usize, edges: &[(usize, usize)]) -> Self {
        let mut graph = Self::with_vertices(n);
        for &(u, v) in edges {
            graph.add_edge(u, v);
        }
        graph
    }

    /// Load a graph from an edge-list file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| HeuristicError::UnreadableFile {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self::parse(BufReader::new(file), &name)
    }

    /// Parse the edge-list format from any buffered reader.
    ///
    /// A malformed `p` or `e` line aborts parsing; nothing is recovered.
    pub fn parse<R: BufRead>(reader: R, name: &str) -> Result<Self> {
        let mut graph = Graph {
            name: name.to_string(),
            ..Default::default()
        };

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            let line_no = index + 1;

            if line.starts_with('c') {
                continue;
            }

            if line.starts_with('p') {
                let parts: Vec<&str> = line.split_whitespace().collect();
                let n: usize = parts
                    .get(2)
                    .ok_or_else(|| HeuristicError::malformed(line_no, "problem line lacks a vertex count"))?
                    .parse()
                    .map_err(|_| HeuristicError::malformed(line_no, format!("invalid vertex count in `{}`", line)))?;

                graph.declared_vertices = n;
                graph.declared_edges = parts.get(3).and_then(|m| m.parse().ok());
                graph.add_vertices(n);
                continue;
            }

            if line.starts_with('e') {
                let parts: Vec<&str> = line.split_whitespace().collect();
                if parts.len() != 3 {
                    return Err(HeuristicError::malformed(
                        line_no,
                        format!("expected `e u v`, found {} fields", parts.len()),
                    ));
                }
                let u: usize = parts[1]
                    .parse()
                    .map_err(|_| HeuristicError::malformed(line_no, format!("invalid endpoint `{}`", parts[1])))?;
                let v: usize = parts[2]
                    .parse()
                    .map_err(|_| HeuristicError::malformed(line_no, format!("invalid endpoint `{}`", parts[2])))?;

                graph.add_edge(u, v);
            }
        }

        if let Some(declared) = graph.declared_edges {
            if declared != graph.edges.len() {
                log::warn!(
                    "{}: problem line declares {} edges but {} were read",
                    graph.name,
                    declared,
                    graph.edges.len()
                );
            }
        }
        log::debug!(
            "{}: loaded {} vertices, {} edge lines",
            graph.name,
            graph.num_vertices(),
            graph.edges.len()
        );

        Ok(graph)
    }

    fn add_vertices(&mut self, n: usize) {
        for v in 1..=n {
            self.adjacency.entry(v).or_default();
        }
    }

    /// Add an undirected edge, creating missing endpoints.
    pub fn add_edge(&mut self, u: usize, v: usize) {
        self.adjacency.entry(u).or_default().insert(v);
        self.adjacency.entry(v).or_default().insert(u);
        self.edges.push((u, v));
    }

    /// Vertex ids in ascending order.
    pub fn vertices(&self) -> impl Iterator<Item = usize> + '_ {
        self.adjacency.keys().copied()
    }

    pub fn num_vertices(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of edge lines read, duplicates included.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn contains(&self, v: usize) -> bool {
        self.adjacency.contains_key(&v)
    }

    /// Distinct neighbours of `v` in ascending order (empty for unknown ids).
    pub fn neighbors(&self, v: usize) -> impl Iterator<Item = usize> + '_ {
        self.adjacency.get(&v).into_iter().flatten().copied()
    }

    /// Number of distinct neighbours of `v`; a self-loop counts twice.
    pub fn degree(&self, v: usize) -> usize {
        self.adjacency.get(&v).map_or(0, |adj| adj.len() + usize::from(adj.contains(&v)))
    }

    pub fn max_degree(&self) -> usize {
        self.vertices().map(|v| self.degree(v)).max().unwrap_or(0)
    }

    /// Edges exactly as read.
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// Each unordered pair once, in order of first appearance.
    pub fn distinct_edges(&self) -> Vec<(usize, usize)> {
        let mut seen = HashSet::new();
        self.edges
            .iter()
            .copied()
            .filter(|&(u, v)| seen.insert((u.min(v), u.max(v))))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CYCLE: &str = "c a 4-cycle\np edge 4 4\ne 1 2\ne 2 3\ne 3 4\ne 4 1\n";

    #[test]
    fn test_parse_cycle() {
        let graph = Graph::parse(CYCLE.as_bytes(), "cycle").unwrap();

        assert_eq!(graph.num_vertices(), 4);
        assert_eq!(graph.num_edges(), 4);
        assert_eq!(graph.declared_edges, Some(4));
        assert_eq!(graph.neighbors(1).collect::<Vec<_>>(), vec![2, 4]);
        assert_eq!(graph.max_degree(), 2);
    }

    #[test]
    fn test_isolated_vertices_come_from_problem_line() {
        let graph = Graph::parse("p edge 5 1\ne 1 2\n".as_bytes(), "g").unwrap();

        assert_eq!(graph.vertices().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
        assert_eq!(graph.degree(5), 0);
    }

    #[test]
    fn test_permissive_edges() {
        // undeclared endpoint, duplicate, self-loop and a wrong edge count
        let text = "p edge 3 10\ne 1 2\ne 2 1\ne 3 3\ne 2 7\n";
        let graph = Graph::parse(text.as_bytes(), "g").unwrap();

        assert!(graph.contains(7));
        assert_eq!(graph.num_edges(), 4);
        assert_eq!(graph.distinct_edges(), vec![(1, 2), (3, 3), (2, 7)]);
        assert_eq!(graph.neighbors(2).collect::<Vec<_>>(), vec![1, 7]);
        assert_eq!(graph.neighbors(3).collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn test_self_loop_adds_two_to_degree() {
        let graph = Graph::parse("p edge 3 3\ne 1 1\ne 1 1\ne 1 2\n".as_bytes(), "g").unwrap();

        assert_eq!(graph.degree(1), 3);
        assert_eq!(graph.degree(2), 1);
        assert_eq!(graph.degree(3), 0);
        assert_eq!(graph.max_degree(), 3);
    }

    #[test]
    fn test_other_lines_are_ignored() {
        let text = "\nhello\n  c indented comment\np edge 2 1\nx 1 2\ne 1 2\n";
        let graph = Graph::parse(text.as_bytes(), "g").unwrap();

        assert_eq!(graph.num_vertices(), 2);
        assert_eq!(graph.num_edges(), 1);
    }

    #[test]
    fn test_short_edge_line_is_fatal() {
        let err = Graph::parse("p edge 2 1\ne 1\n".as_bytes(), "g").unwrap_err();
        match err {
            HeuristicError::MalformedInput { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_long_edge_line_is_fatal() {
        assert!(Graph::parse("p edge 2 1\ne 1 2 9\n".as_bytes(), "g").is_err());
    }

    #[test]
    fn test_bad_problem_line_is_fatal() {
        assert!(Graph::parse("p edge\n".as_bytes(), "g").is_err());
        assert!(Graph::parse("p edge four 4\n".as_bytes(), "g").is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = Graph::from_file("/definitely/not/here.col").unwrap_err();
        assert!(matches!(err, HeuristicError::UnreadableFile { .. }));
    }

    #[test]
    fn test_from_file_uses_stem_as_name() {
        let path = std::env::temp_dir().join("combopt_graph_test_cycle.col");
        std::fs::write(&path, CYCLE).unwrap();

        let graph = Graph::from_file(&path).unwrap();
        assert_eq!(graph.name, "combopt_graph_test_cycle");
        assert_eq!(graph.num_edges(), 4);

        let _ = std::fs::remove_file(&path);
    }
}
