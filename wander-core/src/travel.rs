//! Moving a traveller across the world.
//!
//! [`NearestNeighborWalker`] tours a fixed set of sample points greedily.
//! [`wander_step`] is the free-roaming alternative that picks its own
//! destinations one step at a time.

use std::f64::consts::TAU;

use glam::IVec2;
use wander_utils::random::Random;

use crate::error::WorldError;
use crate::sampling::{SamplePoint, distance_squared};
use crate::worldgen::TerrainGrid;

/// Index of the unvisited point closest to `current`.
///
/// Distances are squared Euclidean; the first point encountered wins ties.
/// Returns `None` when every point has been visited.
#[must_use]
pub fn nearest_unvisited(current: IVec2, points: &[SamplePoint]) -> Option<usize> {
    let mut best: Option<(usize, i64)> = None;
    for (idx, point) in points.iter().enumerate() {
        if point.visited {
            continue;
        }
        let distance = distance_squared(current, point.position);
        if best.is_none_or(|(_, d)| distance < d) {
            best = Some((idx, distance));
        }
    }
    best.map(|(idx, _)| idx)
}

/// Greedy nearest-neighbour tour over a set of sample points.
///
/// Not an optimal tour: each step simply moves to the closest point not yet
/// visited.
#[derive(Debug, Clone, Default)]
pub struct NearestNeighborWalker {
    points: Vec<SamplePoint>,
    path: Vec<SamplePoint>,
    current: Option<usize>,
}

impl NearestNeighborWalker {
    /// Create a walker over `points`. Call [`place`](Self::place) before stepping.
    #[must_use]
    pub const fn new(points: Vec<SamplePoint>) -> Self {
        Self {
            points,
            path: Vec::new(),
            current: None,
        }
    }

    /// Pick a uniformly random starting point, clearing any earlier tour.
    pub fn place<R: Random>(&mut self, rng: &mut R) -> Result<&SamplePoint, WorldError> {
        if self.points.is_empty() {
            return Err(WorldError::InsufficientLand {
                requested: 1,
                accepted: 0,
                attempts: 0,
            });
        }
        for point in &mut self.points {
            point.visited = false;
        }
        self.path.clear();

        let start = rng.next_index(self.points.len());
        Ok(self.visit(start))
    }

    /// Move to the nearest unvisited point.
    ///
    /// Returns `None` before [`place`](Self::place) or once every point is visited.
    pub fn step(&mut self) -> Option<&SamplePoint> {
        let position = self.position()?;
        let next = nearest_unvisited(position, &self.points)?;
        Some(self.visit(next))
    }

    /// Step until every point has been visited and return the full path.
    pub fn walk(&mut self) -> &[SamplePoint] {
        while self.step().is_some() {}
        &self.path
    }

    /// Points reached so far, in visiting order.
    #[must_use]
    pub fn path(&self) -> &[SamplePoint] {
        &self.path
    }

    /// The full point set with current visited flags.
    #[must_use]
    pub fn points(&self) -> &[SamplePoint] {
        &self.points
    }

    /// Where the walker stands, if it has been placed.
    #[must_use]
    pub fn position(&self) -> Option<IVec2> {
        self.current.map(|idx| self.points[idx].position)
    }

    /// Whether every point has been visited.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.points.iter().all(|p| p.visited)
    }

    fn visit(&mut self, idx: usize) -> &SamplePoint {
        self.points[idx].visited = true;
        self.current = Some(idx);
        self.path.push(self.points[idx]);
        &self.points[idx]
    }
}

/// One free-roaming step from `from`.
///
/// The heading drifts by `sin(2π·r)` radians on every try and the try moves
/// `step_size` cells along it. Tries landing off the grid or in water are
/// discarded, but the drifted heading is kept for the next try. Returns the
/// reached point and the final heading.
pub fn wander_step<R: Random>(
    grid: &TerrainGrid,
    rng: &mut R,
    from: IVec2,
    heading: f64,
    step_size: f64,
    max_attempts: usize,
) -> Result<(SamplePoint, f64), WorldError> {
    let mut heading = heading;
    for _ in 0..max_attempts {
        heading += (TAU * rng.next_f64()).sin();
        // Casts saturate, so huge steps land off the grid instead of wrapping.
        let target = from.saturating_add(IVec2::new(
            (step_size * heading.sin()).round() as i32,
            (step_size * heading.cos()).round() as i32,
        ));
        if !grid.contains(target) {
            continue;
        }
        let cell = grid.cell_at(target)?;
        if cell.altitude > grid.sealevel() {
            return Ok((SamplePoint::from_cell(target, cell), heading));
        }
    }
    Err(WorldError::InsufficientLand {
        requested: 1,
        accepted: 0,
        attempts: max_attempts,
    })
}
