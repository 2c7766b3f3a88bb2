// extensions/tween.rs
//
// Tweens animate entity properties by EntityId. Used for the fade-out of
// cleared shapes and the drop-in of replacement dots.
//
// Usage:
//   tweens.add(id, Tween::fade_out(0.075, Easing::SineIn).despawn_on_complete());
//   tweens.tick(dt, &mut scene);

use super::easing::{ease, Easing};
use crate::api::types::EntityId;
use crate::core::scene::Scene;

/// What property a tween animates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TweenTarget {
    PositionY { from: f32, to: f32 },
    Alpha { from: f32, to: f32 },
}

/// A single tween animation.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    pub target: TweenTarget,
    /// Duration in seconds.
    pub duration: f32,
    pub elapsed: f32,
    pub easing: Easing,
    /// Remove the entity from the scene once the tween finishes.
    pub despawn: bool,
}

impl Tween {
    pub fn new(target: TweenTarget, duration: f32, easing: Easing) -> Self {
        Self {
            target,
            duration,
            elapsed: 0.0,
            easing,
            despawn: false,
        }
    }

    pub fn position_y(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self::new(TweenTarget::PositionY { from, to }, duration, easing)
    }

    pub fn alpha(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self::new(TweenTarget::Alpha { from, to }, duration, easing)
    }

    pub fn fade_in(duration: f32, easing: Easing) -> Self {
        Self::alpha(0.0, 1.0, duration, easing)
    }

    pub fn fade_out(duration: f32, easing: Easing) -> Self {
        Self::alpha(1.0, 0.0, duration, easing)
    }

    pub fn despawn_on_complete(mut self) -> Self {
        self.despawn = true;
        self
    }

    /// Normalized progress [0, 1].
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Active tweens, each bound to one entity.
#[derive(Debug, Default)]
pub struct TweenState {
    tweens: Vec<(EntityId, Tween)>,
}

impl TweenState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entity: EntityId, tween: Tween) {
        self.tweens.push((entity, tween));
    }

    /// Drop all tweens for an entity without applying their end state.
    pub fn remove_entity(&mut self, entity: EntityId) {
        self.tweens.retain(|(e, _)| *e != entity);
    }

    pub fn is_animating(&self, entity: EntityId) -> bool {
        self.tweens.iter().any(|(e, _)| *e == entity)
    }

    /// Advance all tweens and write their values into the scene. Finished
    /// tweens are removed, despawning their entity when asked to.
    /// Returns the number of tweens that completed this tick.
    pub fn tick(&mut self, dt: f32, scene: &mut Scene) -> usize {
        let mut despawns = Vec::new();
        let before = self.tweens.len();

        self.tweens.retain_mut(|(entity_id, tween)| {
            tween.elapsed += dt;
            let t = tween.progress();
            let Some(entity) = scene.get_mut(*entity_id) else {
                // Entity is gone, so is its animation.
                return false;
            };
            match tween.target {
                TweenTarget::PositionY { from, to } => {
                    entity.pos.y = ease(from, to, t, tween.easing);
                }
                TweenTarget::Alpha { from, to } => {
                    entity.alpha = ease(from, to, t, tween.easing).clamp(0.0, 1.0);
                }
            }
            if tween.is_complete() {
                if tween.despawn {
                    despawns.push(*entity_id);
                }
                return false;
            }
            true
        });

        for id in despawns {
            self.remove_entity(id);
            scene.despawn(id);
        }
        before - self.tweens.len()
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    pub fn clear(&mut self) {
        self.tweens.clear();
    }
}
