//! Best-candidate point sampling over land cells.
//!
//! Each step draws a handful of uniform candidates and keeps the one farthest
//! from every point accepted so far, giving an even spread without a grid.

use glam::IVec2;
use wander_utils::random::Random;

use crate::error::{ConfigError, WorldError};
use crate::worldgen::{Cell, TerrainGrid};

/// A sampled land location and the raster values at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplePoint {
    /// Raster coordinates.
    pub position: IVec2,
    /// Altitude when sampled.
    pub altitude: u8,
    /// Temperature when sampled.
    pub temperature: u8,
    /// Rainfall when sampled.
    pub rainfall: u8,
    /// Set once a traveller has reached this point.
    pub visited: bool,
}

impl SamplePoint {
    /// Build an unvisited point from a fetched cell.
    #[must_use]
    pub const fn from_cell(position: IVec2, cell: Cell) -> Self {
        Self {
            position,
            altitude: cell.altitude,
            temperature: cell.temperature,
            rainfall: cell.rainfall,
            visited: false,
        }
    }
}

/// Places well-spread sample points on the land of a generated grid.
#[derive(Debug, Clone, Copy)]
pub struct PointSampler<'a> {
    grid: &'a TerrainGrid,
}

impl<'a> PointSampler<'a> {
    /// Create a sampler over `grid`. The grid should already be generated.
    #[must_use]
    pub const fn new(grid: &'a TerrainGrid) -> Self {
        Self { grid }
    }

    /// Place `target_count` land points.
    ///
    /// Every selection, accepted or rejected as water, counts as one attempt.
    /// Returns [`WorldError::InsufficientLand`] once `max_attempts` selections
    /// have been spent without reaching the target.
    pub fn generate<R: Random>(
        &self,
        rng: &mut R,
        target_count: usize,
        candidates_per_step: usize,
        max_attempts: usize,
    ) -> Result<Vec<SamplePoint>, WorldError> {
        if candidates_per_step == 0 {
            return Err(ConfigError::ZeroCandidates.into());
        }
        if target_count == 0 {
            return Ok(Vec::new());
        }

        let mut accepted: Vec<IVec2> = Vec::with_capacity(target_count);
        let mut points = Vec::with_capacity(target_count);
        let mut candidates = Vec::with_capacity(candidates_per_step);
        let mut attempts = 0;

        while points.len() < target_count {
            if attempts >= max_attempts {
                return Err(WorldError::InsufficientLand {
                    requested: target_count,
                    accepted: points.len(),
                    attempts,
                });
            }
            attempts += 1;

            let selected = if accepted.is_empty() {
                self.random_position(rng)
            } else {
                candidates.clear();
                candidates.extend((0..candidates_per_step).map(|_| self.random_position(rng)));
                match best_candidate(&accepted, &candidates) {
                    Some(pos) => pos,
                    None => return Err(ConfigError::ZeroCandidates.into()),
                }
            };

            let cell = self.grid.cell_at(selected)?;
            if cell.altitude <= self.grid.sealevel() {
                continue;
            }
            accepted.push(selected);
            points.push(SamplePoint::from_cell(selected, cell));
        }

        log::debug!(
            "Sampled {} land points in {} attempts",
            points.len(),
            attempts
        );
        Ok(points)
    }

    fn random_position<R: Random>(&self, rng: &mut R) -> IVec2 {
        let x = rng.next_bounded(self.grid.width());
        let y = rng.next_bounded(self.grid.height());
        IVec2::new(x as i32, y as i32)
    }
}

/// The candidate whose nearest accepted point is farthest away.
///
/// Distances are squared Euclidean. On a tie the earlier candidate wins. With
/// nothing accepted yet every candidate ties, so the first is returned.
#[must_use]
pub fn best_candidate(accepted: &[IVec2], candidates: &[IVec2]) -> Option<IVec2> {
    let mut best = None;
    let mut best_distance = -1;
    for &candidate in candidates {
        let nearest = accepted
            .iter()
            .map(|&p| distance_squared(p, candidate))
            .min()
            .unwrap_or(i64::MAX);
        if nearest > best_distance {
            best_distance = nearest;
            best = Some(candidate);
        }
    }
    best
}

pub(crate) fn distance_squared(a: IVec2, b: IVec2) -> i64 {
    let dx = i64::from(a.x) - i64::from(b.x);
    let dy = i64::from(a.y) - i64::from(b.y);
    dx * dx + dy * dy
}
