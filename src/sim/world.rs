//! Object registry and world scroll
//!
//! The world owns every live segment and object. Each tick the whole track
//! slides toward the camera by `speed * dt`; objects that pass the camera are
//! culled and segments that fall behind are recycled into new far segments.

use std::collections::VecDeque;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{ObjectKind, Segment, WorldObject};
use super::track;
use crate::consts::*;

/// Live segments and objects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    /// Ordered nearest-first (front = closest to the camera)
    pub segments: VecDeque<Segment>,
    /// Active objects (ascending id)
    pub objects: Vec<WorldObject>,
    /// Next entity ID (never reused)
    next_id: u32,
}

impl Default for World {
    fn default() -> Self {
        Self {
            segments: VecDeque::new(),
            objects: Vec::new(),
            next_id: 1,
        }
    }
}

impl World {
    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Place an object on the track and return its id
    pub fn spawn(&mut self, kind: ObjectKind, lane: usize, z: f32) -> u32 {
        let id = self.next_entity_id();
        self.objects.push(WorldObject {
            id,
            kind,
            lane: lane.min(LANE_COUNT - 1),
            z,
            active: true,
            judged: false,
        });
        id
    }

    /// Position of the farthest segment
    pub fn far_boundary(&self) -> Option<f32> {
        self.segments.back().map(|s| s.z)
    }

    /// Whether an obstacle already occupies `lane` at `z`
    pub fn is_occupied(&self, lane: usize, z: f32) -> bool {
        self.objects
            .iter()
            .any(|o| o.active && o.kind.is_obstacle() && o.lane == lane && (o.z - z).abs() < 0.01)
    }

    pub fn find(&self, id: u32) -> Option<&WorldObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn find_mut(&mut self, id: u32) -> Option<&mut WorldObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    /// Move the whole track toward the camera
    pub fn advance(&mut self, distance: f32) {
        for segment in &mut self.segments {
            segment.z += distance;
        }
        for object in self.objects.iter_mut().filter(|o| o.active) {
            object.z += distance;
        }
    }

    /// Drop objects that passed the camera or were consumed
    pub fn cull(&mut self) -> usize {
        for object in &mut self.objects {
            if object.z > CULL_Z {
                object.active = false;
            }
        }
        self.release_inactive()
    }

    /// Remove inactive objects from the registry and from segment ownership
    pub fn release_inactive(&mut self) -> usize {
        let before = self.objects.len();
        self.objects.retain(|o| o.active);
        let released = before - self.objects.len();
        if released > 0 {
            let objects = &self.objects;
            for segment in &mut self.segments {
                segment
                    .object_ids
                    .retain(|id| objects.iter().any(|o| o.id == *id));
            }
        }
        released
    }

    /// Pop segments that fell behind the player, releasing what they still own
    pub fn recycle_segments(&mut self) -> usize {
        let mut recycled = 0;
        while self.segments.front().is_some_and(|s| s.z > SEGMENT_RECYCLE_Z) {
            if let Some(segment) = self.segments.pop_front() {
                self.objects.retain(|o| !segment.object_ids.contains(&o.id));
                log::debug!("Recycled segment {} at z={:.1}", segment.id, segment.z);
                recycled += 1;
            }
        }
        recycled
    }

    /// Scroll by `distance`, then cull, recycle and stream new segments
    pub fn scroll<R: Rng + ?Sized>(&mut self, distance: f32, rng: &mut R) {
        self.advance(distance);
        self.cull();
        self.recycle_segments();
        track::extend_if_needed(self, rng);
    }

    /// Release every segment and object
    pub fn clear(&mut self) {
        self.segments.clear();
        self.objects.clear();
    }

    /// Throw away the current track and stream a fresh one
    pub fn rebuild<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.clear();
        track::extend_if_needed(self, rng);
    }
}
