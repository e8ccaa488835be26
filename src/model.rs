//! Polygon outlines for asteroids
//!
//! Text format: one coordinate per line, `x_<number>` or `y_<number>`. An x
//! followed by a y (in either order) completes a vertex. Blank lines and lines
//! starting with anything else are skipped.

use std::f32::consts::TAU;
use std::path::{Path, PathBuf};

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use thiserror::Error;

/// Failure to read a model file
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read model {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: invalid coordinate {text:?}")]
    InvalidNumber { line: usize, text: String },
}

/// Closed polygon; vertices are offsets from the owner's position
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model {
    vertices: Vec<Vec2>,
}

impl Model {
    pub fn from_vertices(vertices: Vec<Vec2>) -> Self {
        Self { vertices }
    }

    /// Read and parse a model file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let model = Self::parse(&text)?;
        log::info!(
            "Loaded model {} ({} vertices)",
            path.display(),
            model.vertices.len()
        );
        Ok(model)
    }

    pub fn parse(text: &str) -> Result<Self, ModelError> {
        let mut vertices = Vec::new();
        let mut x: Option<f32> = None;
        let mut y: Option<f32> = None;

        for (i, line) in text.lines().enumerate() {
            let line = line.trim();
            let Some((axis, number)) = line.split_once('_') else {
                continue;
            };
            let slot = match axis {
                "x" => &mut x,
                "y" => &mut y,
                _ => continue,
            };
            // A repeated axis before the pair completes is ignored
            if slot.is_some() {
                continue;
            }
            let value = number
                .trim()
                .parse::<f32>()
                .map_err(|_| ModelError::InvalidNumber {
                    line: i + 1,
                    text: line.to_string(),
                })?;
            *slot = Some(value);

            if let (Some(vx), Some(vy)) = (x, y) {
                vertices.push(Vec2::new(vx, vy));
                x = None;
                y = None;
            }
        }

        Ok(Self { vertices })
    }

    /// Jagged outline around the origin, deterministic for a given seed
    pub fn procedural(seed: u64, radius: Vec2, points: usize) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let points = points.max(3);
        let vertices = (0..points)
            .map(|i| {
                let theta = i as f32 / points as f32 * TAU;
                let jitter: f32 = rng.random_range(0.7..=1.0);
                Vec2::new(theta.cos() * radius.x, theta.sin() * radius.y) * jitter
            })
            .collect();
        Self { vertices }
    }

    pub fn unload(&mut self) {
        self.vertices.clear();
    }

    pub fn is_loaded(&self) -> bool {
        !self.vertices.is_empty()
    }

    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    /// Edges of the closed loop, last vertex joined back to the first
    pub fn edges(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pairs() {
        let model = Model::parse("x_0\ny_20\n\nx_30\ny_0\ny_10\nx_50\n").unwrap();
        assert_eq!(
            model.vertices(),
            &[
                Vec2::new(0.0, 20.0),
                Vec2::new(30.0, 0.0),
                Vec2::new(50.0, 10.0)
            ]
        );
    }

    #[test]
    fn test_parse_skips_repeated_axis_and_noise() {
        let model = Model::parse("# outline\nx_1\nx_2\ny_3\nz_9\n").unwrap();
        assert_eq!(model.vertices(), &[Vec2::new(1.0, 3.0)]);
    }

    #[test]
    fn test_parse_rejects_bad_number() {
        let err = Model::parse("x_1\ny_abc\n").unwrap_err();
        assert!(matches!(err, ModelError::InvalidNumber { line: 2, .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Model::load("/nonexistent/asteroid.txt").unwrap_err();
        assert!(matches!(err, ModelError::Io { .. }));
    }

    #[test]
    fn test_edges_close_the_loop() {
        let model = Model::from_vertices(vec![Vec2::ZERO, Vec2::X, Vec2::Y]);
        let edges: Vec<_> = model.edges().collect();
        assert_eq!(edges.len(), 3);
        assert_eq!(edges[2], (Vec2::Y, Vec2::ZERO));
    }

    #[test]
    fn test_procedural_is_deterministic() {
        let a = Model::procedural(7, Vec2::new(80.0, 70.0), 12);
        let b = Model::procedural(7, Vec2::new(80.0, 70.0), 12);
        assert_eq!(a, b);
        assert_eq!(a.vertices().len(), 12);
        assert!(a.vertices().iter().all(|v| v.x.abs() <= 80.0 && v.y.abs() <= 70.0));
    }

    #[test]
    fn test_unload() {
        let mut model = Model::procedural(1, Vec2::splat(10.0), 5);
        assert!(model.is_loaded());
        model.unload();
        assert!(!model.is_loaded());
    }
}
