//! Simulation state
//!
//! The moving ball and the play session that owns it. Everything the frame
//! step mutates lives here; nothing is global.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::course::Course;

/// Position and velocity of the ball
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Body {
    pub position: DVec2,
    pub velocity: DVec2,
    /// False while the ball is at rest and waiting for a shot
    pub moving: bool,
}

impl Body {
    /// A ball at rest at `position`
    pub fn at_rest(position: DVec2) -> Self {
        Self {
            position,
            velocity: DVec2::ZERO,
            moving: false,
        }
    }

    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }
}

/// Current phase of a session, derived from the ball and finish flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball at rest, aim preview shown
    Aiming,
    /// Ball in motion
    Rolling,
    /// Ball reached the finish
    Finished,
}

/// One play session on one course
#[derive(Debug, Clone)]
pub struct GameState {
    pub course: Course,
    pub body: Body,
    /// Shots taken since the last restart
    pub shots: u32,
    /// Frames simulated since the last restart
    pub time_ticks: u64,
    pub finished: bool,
}

impl GameState {
    /// Start a session with the ball resting on the course's start marker
    pub fn new(course: Course) -> Self {
        let body = Body::at_rest(course.start_position());
        Self {
            course,
            body,
            shots: 0,
            time_ticks: 0,
            finished: false,
        }
    }

    /// Reset the ball and counters, keeping the course
    pub fn restart(&mut self) {
        self.body = Body::at_rest(self.course.start_position());
        self.shots = 0;
        self.time_ticks = 0;
        self.finished = false;
    }

    pub fn phase(&self) -> GamePhase {
        if self.finished {
            GamePhase::Finished
        } else if self.body.moving {
            GamePhase::Rolling
        } else {
            GamePhase::Aiming
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::polygon::Polygon;

    fn course() -> Course {
        Course::new(
            Polygon::regular(DVec2::new(50.0, 60.0), 10.0, 4, 0.0),
            Polygon::regular(DVec2::new(300.0, 60.0), 10.0, 4, 0.0),
            Vec::new(),
        )
    }

    #[test]
    fn test_new_session_rests_on_start() {
        let state = GameState::new(course());
        assert!((state.body.position - DVec2::new(50.0, 60.0)).length() < 1e-9);
        assert_eq!(state.body.velocity, DVec2::ZERO);
        assert_eq!(state.phase(), GamePhase::Aiming);
    }

    #[test]
    fn test_restart_resets_ball_and_counters() {
        let mut state = GameState::new(course());
        state.body.position = DVec2::new(200.0, 200.0);
        state.body.velocity = DVec2::new(10.0, 0.0);
        state.body.moving = true;
        state.shots = 4;
        state.time_ticks = 900;
        assert_eq!(state.phase(), GamePhase::Rolling);

        state.finished = true;
        assert_eq!(state.phase(), GamePhase::Finished);

        state.restart();
        assert_eq!(state.body, Body::at_rest(state.course.start_position()));
        assert_eq!(state.shots, 0);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.phase(), GamePhase::Aiming);
    }
}
