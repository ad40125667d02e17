//! Module for parsing TSPLIB-style coordinate instances.
//!
//! Only the `NODE_COORD_SECTION` matters: header lines before it are ignored
//! (apart from `NAME` and `COMMENT`, kept as metadata), rows that do not read
//! as `id x y` are skipped, and an `EOF` line stops the parser.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{HeuristicError, Result};

/// A planar point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A coordinate instance: one point per node id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TspInstance {
    /// Name of the instance
    pub name: String,
    /// Comment/description
    pub comment: String,
    /// Node coordinates keyed by id
    pub coords: BTreeMap<usize, Point>,
}

impl TspInstance {
    /// Build an instance from `(id, x, y)` triples
    pub fn from_points(name: &str, points: &[(usize, f64, f64)]) -> Self {
        TspInstance {
            name: name.to_string(),
            comment: String::new(),
            coords: points
                .iter()
                .map(|&(id, x, y)| (id, Point::new(x, y)))
                .collect(),
        }
    }

    /// Parse an instance from a TSPLIB file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| HeuristicError::UnreadableFile {
            path: path.to_path_buf(),
            source,
        })?;
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut instance = Self::parse(BufReader::new(file))?;
        if instance.name.is_empty() {
            instance.name = stem;
        }
        Ok(instance)
    }

    /// Parse the coordinate format from any buffered reader
    pub fn parse<R: BufRead>(reader: R) -> Result<Self> {
        let mut instance = TspInstance::default();
        let mut in_section = false;

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let upper = line.to_uppercase();
            if upper.starts_with("EOF") {
                break;
            }
            if upper.starts_with("NODE_COORD_SECTION") {
                in_section = true;
                continue;
            }

            if !in_section {
                if let Some((key, value)) = line.split_once(':') {
                    match key.trim().to_uppercase().as_str() {
                        "NAME" => instance.name = value.trim().to_string(),
                        "COMMENT" => instance.comment = value.trim().to_string(),
                        _ => {}
                    }
                }
                continue;
            }

            match parse_coord_row(line) {
                Some((id, x, y)) => {
                    instance.coords.insert(id, Point::new(x, y));
                }
                None => log::debug!("skipping coordinate row {}: `{}`", index + 1, line),
            }
        }

        Ok(instance)
    }

    /// Number of nodes
    pub fn dimension(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn contains(&self, id: usize) -> bool {
        self.coords.contains_key(&id)
    }

    /// Smallest node id, the default tour start
    pub fn first_id(&self) -> Option<usize> {
        self.coords.keys().next().copied()
    }
}

/// Read the first three fields of a row as `(id, x, y)`; extra fields are ignored
pub fn parse_coord_row(line: &str) -> Option<(usize, f64, f64)> {
    let mut parts = line.split_whitespace();
    let id = parts.next()?.parse().ok()?;
    let x = parts.next()?.parse().ok()?;
    let y = parts.next()?.parse().ok()?;
    Some((id, x, y))
}

/// Complete symmetric distance table over the instance's nodes.
///
/// Node ids are sorted ascending and mapped to dense indices `0..n`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistanceMatrix {
    ids: Vec<usize>,
    values: Vec<Vec<f64>>,
    rounded: bool,
}

impl DistanceMatrix {
    /// Compute Euclidean distances; with `rounding`, each one becomes `floor(d + 0.5)`
    pub fn build(instance: &TspInstance, rounding: bool) -> Self {
        let ids: Vec<usize> = instance.coords.keys().copied().collect();
        let points: Vec<Point> = instance.coords.values().copied().collect();

        let values: Vec<Vec<f64>> = points
            .par_iter()
            .enumerate()
            .map(|(i, from)| {
                points
                    .iter()
                    .enumerate()
                    .map(|(j, to)| {
                        if i == j {
                            0.0
                        } else {
                            let d = from.distance(to);
                            if rounding {
                                (d + 0.5).floor()
                            } else {
                                d
                            }
                        }
                    })
                    .collect::<Vec<f64>>()
            })
            .collect();

        DistanceMatrix {
            ids,
            values,
            rounded: rounding,
        }
    }

    /// Node ids, ascending; position is the dense index
    pub fn ids(&self) -> &[usize] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn is_rounded(&self) -> bool {
        self.rounded
    }

    /// Dense index of a node id
    pub fn index_of(&self, id: usize) -> Option<usize> {
        self.ids.binary_search(&id).ok()
    }

    /// Node id at a dense index
    #[inline]
    pub fn id_at(&self, index: usize) -> usize {
        self.ids[index]
    }

    /// Distance between dense indices
    #[inline]
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        self.values[i][j]
    }

    /// Row of distances from dense index `i`
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i]
    }

    /// Distance between two node ids
    pub fn between(&self, u: usize, v: usize) -> Option<f64> {
        Some(self.distance(self.index_of(u)?, self.index_of(v)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
NAME : sample
COMMENT : three points
TYPE : TSP
DIMENSION : 3
EDGE_WEIGHT_TYPE : EUC_2D
node_coord_section
1 0 0
2 10 0 extra
this row is junk
3 1.5 0
EOF
4 99 99
";

    #[test]
    fn test_parse_section() {
        let instance = TspInstance::parse(SAMPLE.as_bytes()).unwrap();

        assert_eq!(instance.name, "sample");
        assert_eq!(instance.comment, "three points");
        assert_eq!(instance.dimension(), 3);
        assert_eq!(instance.coords[&2], Point::new(10.0, 0.0));
        assert!(!instance.contains(4));
        assert_eq!(instance.first_id(), Some(1));
    }

    #[test]
    fn test_rows_before_section_are_ignored() {
        let text = "1 5 5\nNODE_COORD_SECTION\n2 0 0\n";
        let instance = TspInstance::parse(text.as_bytes()).unwrap();

        assert_eq!(instance.coords.keys().copied().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_eof_is_case_insensitive_and_optional() {
        let text = "NODE_COORD_SECTION\n1 0 0\neof\n2 1 1\n";
        assert_eq!(TspInstance::parse(text.as_bytes()).unwrap().dimension(), 1);

        let text = "NODE_COORD_SECTION\n1 0 0\n2 1 1";
        assert_eq!(TspInstance::parse(text.as_bytes()).unwrap().dimension(), 2);
    }

    #[test]
    fn test_repeated_id_keeps_last_row() {
        let instance = TspInstance::parse("NODE_COORD_SECTION\n1 0 0\n1 5 5\n".as_bytes()).unwrap();

        assert_eq!(instance.coords[&1], Point::new(5.0, 5.0));
        assert_eq!(instance.dimension(), 1);
    }

    #[test]
    fn test_parse_coord_row() {
        assert_eq!(parse_coord_row("7 1.5 -2"), Some((7, 1.5, -2.0)));
        assert_eq!(parse_coord_row("7 1.5 -2 0.3"), Some((7, 1.5, -2.0)));
        assert_eq!(parse_coord_row("7 1.5"), None);
        assert_eq!(parse_coord_row("7.0 1 2"), None);
        assert_eq!(parse_coord_row("a b c"), None);
    }

    #[test]
    fn test_distance_calculation() {
        let instance = TspInstance::from_points("t", &[(1, 0.0, 0.0), (2, 3.0, 4.0)]);
        let matrix = DistanceMatrix::build(&instance, false);

        assert!((matrix.distance(0, 1) - 5.0).abs() < 1e-10);
        assert!((matrix.distance(1, 0) - 5.0).abs() < 1e-10);
        assert_eq!(matrix.distance(0, 0), 0.0);
        assert_eq!(matrix.between(2, 1), Some(5.0));
        assert_eq!(matrix.between(2, 9), None);
    }

    #[test]
    fn test_rounding() {
        let instance = TspInstance::from_points(
            "t",
            &[(1, 0.0, 0.0), (2, 1.0, 1.0), (5, 2.5, 0.0), (9, 0.0, 2.4)],
        );
        let raw = DistanceMatrix::build(&instance, false);
        let rounded = DistanceMatrix::build(&instance, true);

        assert!(rounded.is_rounded());
        assert_eq!(rounded.ids(), &[1, 2, 5, 9]);
        assert_eq!(rounded.between(1, 2), Some(1.0));
        assert_eq!(rounded.between(1, 5), Some(3.0));
        assert_eq!(rounded.between(1, 9), Some(2.0));
        assert!((raw.between(1, 2).unwrap() - 2f64.sqrt()).abs() < 1e-12);

        for i in 0..rounded.len() {
            for j in 0..rounded.len() {
                assert_eq!(rounded.distance(i, j).fract(), 0.0);
                assert_eq!(rounded.distance(i, j), rounded.distance(j, i));
            }
        }
    }

    #[test]
    fn test_missing_file() {
        let err = TspInstance::from_file("/definitely/not/here.tsp").unwrap_err();
        assert!(matches!(err, HeuristicError::UnreadableFile { .. }));
    }
}
