//! Fixed timestep frame step
//!
//! Advances a session by exactly one frame: motion, aiming, finish check and
//! collision response, in that order.

use glam::DVec2;

use super::collision::{ball_collider, resolve_collisions};
use super::integrator::{aim_vector, commit_shot, integrate};
use super::state::GameState;
use crate::Settings;

/// Input for a single frame (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Pointer position in course coordinates
    pub pointer: DVec2,
    /// Player confirmed the shot
    pub shoot: bool,
}

/// Things that happened during a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A shot was committed
    Shot { velocity: DVec2 },
    /// The ball came to rest
    Stopped { position: DVec2 },
    /// The ball bounced off an obstacle
    Bounce { obstacle: usize, point: DVec2 },
    /// The ball reached the finish
    Finished { shots: u32 },
}

/// Aim guide shown while the ball is at rest
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimPreview {
    /// Ball centre
    pub origin: DVec2,
    /// End of the guide line
    pub end: DVec2,
    /// Velocity a shot would commit
    pub velocity: DVec2,
}

/// Per-frame output for the render sink
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutput {
    /// Collider vertices (debug draw)
    pub collider: Vec<DVec2>,
    pub aim: Option<AimPreview>,
    pub events: Vec<GameEvent>,
    pub finished: bool,
}

/// Advance the session by one frame
pub fn tick(state: &mut GameState, input: &TickInput, settings: &Settings) -> FrameOutput {
    if state.finished {
        return FrameOutput {
            collider: ball_collider(state.body.position, settings).vertices().to_vec(),
            aim: None,
            events: Vec::new(),
            finished: true,
        };
    }

    state.time_ticks += 1;
    let mut events = Vec::new();

    let integration = integrate(&mut state.body, settings);
    if integration.stopped {
        log::debug!(
            "Ball at rest at ({:.2}, {:.2})",
            state.body.position.x,
            state.body.position.y
        );
        events.push(GameEvent::Stopped {
            position: state.body.position,
        });
    }

    let collider = ball_collider(state.body.position, settings);

    // Aiming only while at rest
    let mut aim = None;
    if !state.body.moving {
        let velocity = aim_vector(state.body.position, input.pointer, settings);
        let origin = collider.center();
        aim = Some(AimPreview {
            origin,
            end: origin + velocity * settings.aim_preview_scale,
            velocity,
        });

        if input.shoot {
            commit_shot(&mut state.body, velocity, settings);
            state.shots += 1;
            log::debug!(
                "Shot {} fired with velocity ({:.2}, {:.2})",
                state.shots,
                state.body.velocity.x,
                state.body.velocity.y
            );
            events.push(GameEvent::Shot {
                velocity: state.body.velocity,
            });
        }
    }

    if state
        .course
        .is_finished(&collider, settings.finish_threshold)
    {
        state.finished = true;
        log::info!(
            "Course finished in {} shots ({} frames)",
            state.shots,
            state.time_ticks
        );
        events.push(GameEvent::Finished { shots: state.shots });
        return FrameOutput {
            collider: collider.vertices().to_vec(),
            aim,
            events,
            finished: true,
        };
    }

    let was_moving = state.body.moving;
    let bounces = resolve_collisions(
        &mut state.body,
        &collider,
        integration.previous_position,
        state.course.obstacles(),
        settings,
    );
    events.extend(bounces.iter().map(|bounce| GameEvent::Bounce {
        obstacle: bounce.obstacle,
        point: bounce.hit.point(),
    }));
    // A bounce can absorb all remaining speed
    if was_moving && !state.body.moving {
        events.push(GameEvent::Stopped {
            position: state.body.position,
        });
    }

    FrameOutput {
        collider: collider.vertices().to_vec(),
        aim,
        events,
        finished: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::course::Course;
    use crate::sim::polygon::Polygon;
    use crate::sim::state::{Body, GamePhase};

    fn rect(min: DVec2, max: DVec2) -> Polygon {
        Polygon::new(vec![
            min,
            DVec2::new(max.x, min.y),
            max,
            DVec2::new(min.x, max.y),
        ])
    }

    fn open_course(start: DVec2, finish: DVec2, obstacles: Vec<Polygon>) -> Course {
        Course::new(
            Polygon::regular(start, 20.0, 20, 0.0),
            Polygon::regular(finish, 20.0, 20, 0.0),
            obstacles,
        )
    }

    fn frictionless() -> Settings {
        Settings {
            friction: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_shot_from_rest() {
        let course = open_course(DVec2::new(100.0, 100.0), DVec2::new(900.0, 900.0), Vec::new());
        let mut state = GameState::new(course);
        state.body = Body::at_rest(DVec2::new(100.0, 100.0));

        let input = TickInput {
            pointer: DVec2::new(50.0, 100.0),
            shoot: true,
        };
        let output = tick(&mut state, &input, &Settings::default());

        assert_eq!(state.body.velocity, DVec2::new(75.0, 0.0));
        assert!(state.body.moving);
        assert_eq!(state.shots, 1);
        assert_eq!(state.phase(), GamePhase::Rolling);
        assert_eq!(
            output.events,
            vec![GameEvent::Shot {
                velocity: DVec2::new(75.0, 0.0)
            }]
        );
        assert!(!output.finished);
    }

    #[test]
    fn test_aim_preview_without_shot() {
        let course = open_course(DVec2::new(100.0, 100.0), DVec2::new(900.0, 900.0), Vec::new());
        let mut state = GameState::new(course);
        state.body = Body::at_rest(DVec2::new(100.0, 100.0));

        let input = TickInput {
            pointer: DVec2::new(100.0, 160.0),
            shoot: false,
        };
        let output = tick(&mut state, &input, &Settings::default());

        let aim = output.aim.expect("preview while at rest");
        assert_eq!(aim.velocity, DVec2::new(0.0, -90.0));
        assert!((aim.origin - DVec2::new(100.0, 100.0)).length() < 1e-9);
        assert!((aim.end - (aim.origin + DVec2::new(0.0, -45.0))).length() < 1e-9);
        assert_eq!(state.body.velocity, DVec2::ZERO);
        assert!(output.events.is_empty());
        assert_eq!(output.collider.len(), 20);
    }

    #[test]
    fn test_no_preview_while_rolling() {
        let course = open_course(DVec2::new(100.0, 100.0), DVec2::new(900.0, 900.0), Vec::new());
        let mut state = GameState::new(course);
        state.body.velocity = DVec2::new(50.0, 0.0);
        state.body.moving = true;

        let input = TickInput {
            pointer: DVec2::ZERO,
            shoot: true,
        };
        let output = tick(&mut state, &input, &Settings::default());

        assert!(output.aim.is_none());
        assert_eq!(state.shots, 0);
    }

    #[test]
    fn test_bounce_off_horizontal_edge() {
        let wall = rect(DVec2::new(0.0, 400.0), DVec2::new(200.0, 450.0));
        let course = open_course(DVec2::new(100.0, 100.0), DVec2::new(900.0, 900.0), vec![wall]);
        let mut state = GameState::new(course);
        state.body = Body {
            position: DVec2::new(100.0, 385.0),
            velocity: DVec2::new(0.0, 300.0),
            moving: true,
        };

        let output = tick(&mut state, &TickInput::default(), &frictionless());

        assert!((state.body.velocity - DVec2::new(0.0, -293.0)).length() < 1e-9);
        assert_eq!(state.body.position, DVec2::new(100.0, 385.0));
        assert!(matches!(
            output.events.as_slice(),
            [GameEvent::Bounce { obstacle: 0, .. }]
        ));
    }

    #[test]
    fn test_weak_bounce_reports_stop() {
        let wall = rect(DVec2::new(0.0, 400.0), DVec2::new(200.0, 450.0));
        let course = open_course(DVec2::new(100.0, 100.0), DVec2::new(900.0, 900.0), vec![wall]);
        let mut state = GameState::new(course);
        state.body = Body {
            position: DVec2::new(100.0, 383.1),
            velocity: DVec2::new(0.0, 6.0),
            moving: true,
        };

        let output = tick(&mut state, &TickInput::default(), &frictionless());

        assert!(!state.body.moving);
        assert_eq!(state.phase(), GamePhase::Aiming);
        assert_eq!(output.events.len(), 2);
        assert!(matches!(output.events[0], GameEvent::Bounce { obstacle: 0, .. }));
        assert_eq!(
            output.events[1],
            GameEvent::Stopped {
                position: DVec2::new(100.0, 383.1)
            }
        );
    }

    #[test]
    fn test_finish_skips_collision_and_freezes() {
        let wall = rect(DVec2::new(0.0, 210.0), DVec2::new(400.0, 260.0));
        let course = open_course(DVec2::new(50.0, 50.0), DVec2::new(200.0, 200.0), vec![wall]);
        let mut state = GameState::new(course);
        state.body = Body {
            position: DVec2::new(200.0, 197.0),
            velocity: DVec2::new(0.0, 300.0),
            moving: true,
        };

        let output = tick(&mut state, &TickInput::default(), &frictionless());

        assert!(output.finished);
        assert_eq!(state.phase(), GamePhase::Finished);
        assert_eq!(output.events, vec![GameEvent::Finished { shots: 0 }]);
        // Collider touches the wall but no bounce was applied
        assert_eq!(state.body.velocity, DVec2::new(0.0, 300.0));
        assert_eq!(state.body.position, DVec2::new(200.0, 200.0));

        let frozen = state.body;
        let output = tick(&mut state, &TickInput::default(), &frictionless());
        assert!(output.finished);
        assert!(output.events.is_empty());
        assert_eq!(state.body, frozen);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_rolling_ball_stops() {
        let course = open_course(DVec2::new(100.0, 100.0), DVec2::new(900.0, 900.0), Vec::new());
        let mut state = GameState::new(course);
        state.body.velocity = DVec2::new(20.0, 0.0);
        state.body.moving = true;

        let mut stopped = false;
        for _ in 0..10_000 {
            let output = tick(&mut state, &TickInput::default(), &Settings::default());
            if output
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::Stopped { .. }))
            {
                stopped = true;
                break;
            }
        }
        assert!(stopped);
        assert_eq!(state.phase(), GamePhase::Aiming);
        assert_eq!(state.body.velocity, DVec2::ZERO);
    }

    #[test]
    fn test_tutorial_shot_bounces_off_far_wall() {
        let settings = Settings::default();
        let mut state = GameState::new(Course::tutorial());
        let start = state.body.position;

        let shoot = TickInput {
            pointer: start - DVec2::new(1000.0, 0.0),
            shoot: true,
        };
        tick(&mut state, &shoot, &settings);
        assert!((state.body.velocity - DVec2::new(300.0, 0.0)).length() < 1e-9);

        let mut bounces = 0;
        let mut frames = 0;
        while state.body.moving {
            let output = tick(&mut state, &TickInput::default(), &settings);
            bounces += output
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::Bounce { .. }))
                .count();
            let pos = state.body.position;
            assert!(pos.x > 240.0 && pos.x < 840.0, "escaped corridor at {pos:?}");
            assert!((pos.y - start.y).abs() < 1e-6);
            frames += 1;
            assert!(frames < 20_000);
        }

        assert_eq!(bounces, 1);
        assert!(!state.finished);
        assert_eq!(state.shots, 1);
    }

    #[test]
    fn test_determinism() {
        let inputs = [
            TickInput {
                pointer: DVec2::new(200.0, 170.0),
                shoot: false,
            },
            TickInput {
                pointer: DVec2::new(150.0, 160.0),
                shoot: true,
            },
            TickInput::default(),
        ];

        let mut state1 = GameState::new(Course::tutorial());
        let mut state2 = GameState::new(Course::tutorial());
        let settings = Settings::default();

        for frame in 0..3000 {
            let input = &inputs[frame.min(inputs.len() - 1)];
            let out1 = tick(&mut state1, input, &settings);
            let out2 = tick(&mut state2, input, &settings);
            assert_eq!(out1, out2);
        }

        assert_eq!(state1.body, state2.body);
        assert_eq!(state1.time_ticks, state2.time_ticks);
    }
}
