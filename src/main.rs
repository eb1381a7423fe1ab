//! Poly Putt headless runner
//!
//! Plays a course without a window: shots are chosen by a seeded RNG, and the
//! session is logged until the ball reaches the finish or a limit is hit.
//!
//! Usage: `poly-putt [--course FILE] [--settings FILE] [--seed N] [--max-shots N]`

use std::f64::consts::TAU;
use std::path::PathBuf;

use clap::Parser;
use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use poly_putt::Settings;
use poly_putt::sim::{Course, GameEvent, GameState, TickInput, tick};

/// Frames simulated per shot before giving up on the ball stopping
const MAX_FRAMES_PER_SHOT: u32 = 20_000;

/// Command line options for the headless runner.
#[derive(Parser, Debug)]
#[command(author, version, about = "Headless Poly Putt course runner")]
struct Args {
    /// Course JSON file (defaults to the built-in tutorial course).
    #[arg(long, value_name = "FILE")]
    course: Option<PathBuf>,

    /// Physics settings JSON file.
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Seed for shot selection.
    #[arg(long, default_value_t = 12345)]
    seed: u64,

    /// Give up after this many shots.
    #[arg(long, default_value_t = 50)]
    max_shots: u32,
}

fn load_course(path: Option<&PathBuf>) -> Option<Course> {
    let Some(path) = path else {
        log::info!("Using built-in tutorial course");
        return Some(Course::tutorial());
    };

    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(err) => {
            log::error!("Could not read course {}: {err}", path.display());
            return None;
        }
    };
    match Course::from_json(&json) {
        Ok(course) => Some(course),
        Err(err) => {
            log::error!("Invalid course {}: {err}", path.display());
            None
        }
    }
}

/// Pick a pointer position for the next shot: half the time roughly toward
/// the finish, otherwise in a random direction
fn choose_pointer(rng: &mut Pcg32, ball: DVec2, finish: DVec2, settings: &Settings) -> DVec2 {
    let direction = if rng.random_bool(0.5) {
        let jitter = rng.random_range(-0.3..0.3);
        let to_finish = (finish - ball).normalize_or(DVec2::X);
        DVec2::from_angle(jitter).rotate(to_finish)
    } else {
        DVec2::from_angle(rng.random_range(0.0..TAU))
    };
    let strength = rng.random_range(0.2..1.0) * settings.max_velocity / settings.aim_scale;
    ball - direction * strength
}

fn main() {
    env_logger::init();
    log::info!("Poly Putt (headless) starting...");

    let args = Args::parse();
    let settings = args
        .settings
        .as_deref()
        .map(Settings::load)
        .unwrap_or_default();

    log::info!(
        "Collision mode: {}, bounce friction {}",
        settings.collision_mode.as_str(),
        settings.bounce_friction
    );

    let Some(course) = load_course(args.course.as_ref()) else {
        std::process::exit(1);
    };

    let finish = course.finish().center();
    let mut state = GameState::new(course);
    let mut rng = Pcg32::seed_from_u64(args.seed);
    let mut bounces = 0usize;

    for _ in 0..args.max_shots {
        if state.finished {
            break;
        }
        let input = TickInput {
            pointer: choose_pointer(&mut rng, state.body.position, finish, &settings),
            shoot: true,
        };
        tick(&mut state, &input, &settings);

        let mut frames = 0;
        while state.body.moving && !state.finished && frames < MAX_FRAMES_PER_SHOT {
            let output = tick(&mut state, &TickInput::default(), &settings);
            bounces += output
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::Bounce { .. }))
                .count();
            frames += 1;
        }

        log::info!(
            "Shot {}: ball at ({:.1}, {:.1}) after {} frames",
            state.shots,
            state.body.position.x,
            state.body.position.y,
            frames
        );
    }

    if state.finished {
        println!(
            "Finished in {} shots, {} frames, {} bounces (seed {})",
            state.shots, state.time_ticks, bounces, args.seed
        );
    } else {
        println!(
            "Gave up after {} shots, {} frames, {} bounces (seed {})",
            state.shots, state.time_ticks, bounces, args.seed
        );
    }
}
