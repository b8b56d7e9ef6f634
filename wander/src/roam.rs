//! Free-roaming walk that continues from the end of the tour.

use std::f64::consts::TAU;

use wander_core::journal::describe_leg;
use wander_core::sampling::SamplePoint;
use wander_core::worldgen::World;
use wander_utils::random::Random;

use crate::config::RoamConfig;

/// Walk `config.steps` random steps from `start`, logging a journal entry for each.
pub fn roam(world: &mut World, start: SamplePoint, config: &RoamConfig) -> anyhow::Result<()> {
    let (sealevel, snowline) = (world.grid().sealevel(), world.grid().snowline());
    let mut heading = TAU * world.rng_mut().next_f64();
    let mut current = start;

    for step in 1..=config.steps {
        let (next, next_heading) = world.wander_step(
            current.position,
            heading,
            config.step_size,
            config.max_attempts,
        )?;
        tracing::info!(
            "Roam {}: {}",
            step,
            describe_leg(&current, &next, sealevel, snowline)
        );
        current = next;
        heading = next_heading;
    }
    Ok(())
}
