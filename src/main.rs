use std::time::Duration;

use anyhow::{Context, Result};
use glam::DVec3;
use log::{debug, info};

use marble_box::engine::physics::body::presets::MARBLE_RADIUS;
use marble_box::{
    BodyInstance, BoxPreset, FixedStepper, PointerTracker, Simulation, SimulationConfig,
};

/// Length of the scripted run
const RUN_SECONDS: f64 = 8.0;

/// Time spent in each interaction mode before cycling
const MODE_SECONDS: f64 = 2.0;

/// Radius of the circle the scripted pointer sweeps
const POINTER_ORBIT: f64 = 0.6;

/// Marble grid dimensions (x, y, z)
const GRID: (usize, usize, usize) = (4, 2, 4);

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting marble box...");

    let mut sim = Simulation::new(SimulationConfig::default(), BoxPreset::Standard.bounds())
        .context("Failed to create simulation")?;
    spawn_grid(&mut sim)?;
    info!(
        "Spawned {} marbles in a {:?} box",
        sim.body_count(),
        BoxPreset::Standard
    );

    let mut stepper = FixedStepper::new();
    let mut pointer = PointerTracker::new();
    let mut instances: Vec<BodyInstance> = Vec::with_capacity(sim.body_count());

    // Uneven frame times, like a real display loop
    let frames = [Duration::from_millis(14), Duration::from_millis(20)];
    let mut elapsed = 0.0;
    let mut next_report = 1.0;
    let mut next_mode_change = MODE_SECONDS;

    for frame_time in frames.iter().cycle() {
        if elapsed >= RUN_SECONDS {
            break;
        }
        elapsed += frame_time.as_secs_f64();

        if elapsed >= next_mode_change {
            sim.set_interaction_mode(sim.interaction_mode().next());
            info!("Switched to {:?}", sim.interaction_mode());
            next_mode_change += MODE_SECONDS;
        }

        // Sweep the pointer around the box center
        let angle = elapsed * std::f64::consts::TAU / MODE_SECONDS;
        let state = pointer.update(
            POINTER_ORBIT * angle.cos(),
            POINTER_ORBIT * angle.sin(),
            frame_time.as_secs_f64(),
        );
        sim.set_pointer(state);

        let mut contacts = 0;
        for _ in 0..stepper.advance(*frame_time) {
            let stats = sim.step(stepper.timestep());
            contacts += stats.pair_contacts;
        }
        debug!("Frame {}: {} pair contacts", stepper.frame_count(), contacts);

        sim.write_instances(&mut instances);

        if elapsed >= next_report {
            report(&sim, stepper.simulated_secs());
            next_report += 1.0;
        }
    }

    info!(
        "Finished: {} steps over {} frames ({:.2}s simulated, {} dropped), {} bytes of instance data",
        stepper.step_count(),
        stepper.frame_count(),
        stepper.simulated_secs(),
        stepper.dropped_steps(),
        bytemuck::cast_slice::<BodyInstance, u8>(&instances).len()
    );

    Ok(())
}

/// Place marbles on a regular grid in the upper half of the box
fn spawn_grid(sim: &mut Simulation) -> Result<()> {
    let spacing = MARBLE_RADIUS * 3.0;
    let (nx, ny, nz) = GRID;
    let offset = |n: usize, i: usize| (i as f64 - (n - 1) as f64 / 2.0) * spacing;

    for ix in 0..nx {
        for iy in 0..ny {
            for iz in 0..nz {
                let position = DVec3::new(offset(nx, ix), 0.2 + iy as f64 * spacing, offset(nz, iz));
                sim.spawn(position, MARBLE_RADIUS)
                    .with_context(|| format!("Failed to spawn marble at {}", position))?;
            }
        }
    }
    Ok(())
}

fn report(sim: &Simulation, simulated_secs: f64) {
    let count = sim.body_count().max(1) as f64;
    let mean_height = sim.bodies().iter().map(|b| b.position().y).sum::<f64>() / count;
    let max_speed = sim
        .bodies()
        .iter()
        .map(|b| b.speed())
        .fold(0.0_f64, f64::max);

    info!(
        "t={:.1}s mode={:?} energy={:.4} mean_y={:.3} max_speed={:.3}",
        simulated_secs,
        sim.interaction_mode(),
        sim.total_kinetic_energy(),
        mean_height,
        max_speed
    );
}
