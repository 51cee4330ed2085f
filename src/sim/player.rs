//! Player kinematics and input handling
//!
//! Lane changes are discrete on the index but continuous on screen: `x`
//! eases toward the target lane every tick and never snaps.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::{approach, lane_offset};

/// Result of a duck command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuckOutcome {
    /// Airborne: pushed back toward the ground
    FastFall,
    /// Grounded: slide started
    Slide,
    /// Already sliding
    Ignored,
}

/// The runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Target lane index in `0..LANE_COUNT`
    pub lane: usize,
    /// Continuous lateral position
    pub x: f32,
    /// Height above ground
    pub y: f32,
    /// Vertical velocity (only nonzero while airborne)
    pub vy: f32,
    /// Forward speed
    pub speed: f32,
    pub jumping: bool,
    pub sliding: bool,
    /// Seconds of slide remaining
    pub slide_timer: f32,
    /// Seconds of shield remaining (0 = no shield)
    pub shield_timer: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            lane: START_LANE,
            x: lane_offset(START_LANE),
            y: GROUND_Y,
            vy: 0.0,
            speed: START_SPEED,
            jumping: false,
            sliding: false,
            slide_timer: 0.0,
            shield_timer: 0.0,
        }
    }
}

impl Player {
    /// Shift one lane left; no-op at the leftmost lane
    pub fn move_left(&mut self) -> bool {
        if self.lane == 0 {
            return false;
        }
        self.lane -= 1;
        true
    }

    /// Shift one lane right; no-op at the rightmost lane
    pub fn move_right(&mut self) -> bool {
        if self.lane + 1 >= LANE_COUNT {
            return false;
        }
        self.lane += 1;
        true
    }

    /// Start a jump if grounded and not sliding
    pub fn jump(&mut self) -> bool {
        if self.jumping || self.sliding {
            return false;
        }
        self.vy = JUMP_VELOCITY;
        self.jumping = true;
        true
    }

    /// Fast-fall when airborne, otherwise start a slide
    pub fn duck(&mut self) -> DuckOutcome {
        if self.jumping {
            self.vy -= FAST_FALL_BOOST;
            DuckOutcome::FastFall
        } else if !self.sliding {
            self.sliding = true;
            self.slide_timer = SLIDE_DURATION;
            DuckOutcome::Slide
        } else {
            DuckOutcome::Ignored
        }
    }

    /// Lateral position of the target lane
    #[inline]
    pub fn target_x(&self) -> f32 {
        lane_offset(self.lane)
    }

    /// (Re)start the shield at full duration
    pub fn activate_shield(&mut self) {
        self.shield_timer = SHIELD_DURATION;
    }

    /// Advance speed, lateral easing, vertical motion and timers by `dt`
    pub fn integrate(&mut self, dt: f32) {
        self.speed = (self.speed + SPEED_ACCEL * dt).min(MAX_SPEED);

        self.x = approach(self.x, self.target_x(), LANE_CHANGE_SPEED, dt);

        if self.jumping {
            // Semi-implicit Euler
            self.vy -= GRAVITY * dt;
            self.y += self.vy * dt;
            if self.y <= GROUND_Y {
                self.y = GROUND_Y;
                self.vy = 0.0;
                self.jumping = false;
            }
        } else if self.sliding {
            self.slide_timer -= dt;
            if self.slide_timer <= 0.0 {
                self.slide_timer = 0.0;
                self.sliding = false;
            }
            self.y = GROUND_Y;
        } else {
            self.y = GROUND_Y;
        }

        if self.shield_timer > 0.0 {
            self.shield_timer = (self.shield_timer - dt).max(0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_lane_bounds() {
        let mut player = Player::default();
        assert!(player.move_left());
        assert_eq!(player.lane, 0);
        assert!(!player.move_left());
        assert_eq!(player.lane, 0);

        assert!(player.move_right());
        assert!(player.move_right());
        assert_eq!(player.lane, LANE_COUNT - 1);
        assert!(!player.move_right());
        assert_eq!(player.lane, LANE_COUNT - 1);
    }

    #[test]
    fn test_lane_change_is_smooth() {
        let mut player = Player::default();
        player.move_right();
        player.integrate(DT);
        // Moved toward the lane but did not snap
        assert!(player.x > 0.0 && player.x < LANE_WIDTH);

        for _ in 0..120 {
            player.integrate(DT);
        }
        assert!((player.x - LANE_WIDTH).abs() < 0.01);
    }

    #[test]
    fn test_jump_arc_lands() {
        let mut player = Player::default();
        assert!(player.jump());
        assert!(!player.jump(), "no double jump");

        let mut peak: f32 = 0.0;
        let mut ticks = 0;
        while player.jumping && ticks < 600 {
            player.integrate(DT);
            peak = peak.max(player.y);
            ticks += 1;
        }
        assert!(!player.jumping);
        assert_eq!(player.y, GROUND_Y);
        assert_eq!(player.vy, 0.0);

        let expected_peak = JUMP_VELOCITY * JUMP_VELOCITY / (2.0 * GRAVITY);
        assert!((peak - expected_peak).abs() < 0.25, "peak {peak}");
        assert!(peak > JUMP_CLEARANCE);
    }

    #[test]
    fn test_duck_fast_falls_when_airborne() {
        let mut player = Player::default();
        player.jump();
        player.integrate(DT);
        let vy = player.vy;
        assert_eq!(player.duck(), DuckOutcome::FastFall);
        assert!((player.vy - (vy - FAST_FALL_BOOST)).abs() < 1e-5);
        assert!(!player.sliding);
    }

    #[test]
    fn test_slide_expires() {
        let mut player = Player::default();
        assert_eq!(player.duck(), DuckOutcome::Slide);
        assert_eq!(player.duck(), DuckOutcome::Ignored);
        assert!(!player.jump(), "cannot jump out of a slide");

        let ticks = (SLIDE_DURATION / DT).ceil() as usize + 1;
        for _ in 0..ticks {
            assert_eq!(player.y, GROUND_Y);
            player.integrate(DT);
        }
        assert!(!player.sliding);
        assert_eq!(player.slide_timer, 0.0);
    }

    #[test]
    fn test_speed_capped() {
        let mut player = Player::default();
        for _ in 0..100_000 {
            player.integrate(MAX_DT);
        }
        assert_eq!(player.speed, MAX_SPEED);
    }

    #[test]
    fn test_shield_counts_down() {
        let mut player = Player::default();
        player.activate_shield();
        player.integrate(1.0);
        assert!((player.shield_timer - (SHIELD_DURATION - 1.0)).abs() < 1e-5);
        player.integrate(SHIELD_DURATION);
        assert_eq!(player.shield_timer, 0.0);
    }
}
