//! Falling object spawner
//!
//! Each spawn drops an object at the position announced by the previous
//! preview, then rolls the next preview. The cadence itself is owned by the
//! session's scheduler.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{FallingObject, Preview};

#[derive(Debug, Clone)]
pub struct Spawner {
    rng: Pcg32,
    preview: Preview,
    object_size: f32,
    field_width: f32,
}

impl Spawner {
    /// Seeded spawner with its first preview already rolled
    pub fn new(seed: u64, field_width: f32, object_size: f32) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let preview = roll_preview(&mut rng, field_width, object_size);
        Self {
            rng,
            preview,
            object_size,
            field_width,
        }
    }

    /// Roll a fresh preview for a new round (RNG stream continues)
    pub fn reset(&mut self) {
        self.preview = roll_preview(&mut self.rng, self.field_width, self.object_size);
    }

    pub fn preview(&self) -> Preview {
        self.preview
    }

    pub fn object_size(&self) -> f32 {
        self.object_size
    }

    /// Append an object at the preview position and roll the next preview
    pub fn spawn_into(&mut self, objects: &mut Vec<FallingObject>) {
        objects.push(FallingObject::new(self.preview.x, 0.0, self.object_size));
        self.preview = roll_preview(&mut self.rng, self.field_width, self.object_size);
    }
}

/// `x` uniform in `[0, field_width - size]`, `y` one object above the field
fn roll_preview(rng: &mut Pcg32, field_width: f32, size: f32) -> Preview {
    let max_x = (field_width - size).max(0.0);
    Preview {
        x: rng.random_range(0.0..=max_x),
        y: -size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_uses_previous_preview() {
        let mut spawner = Spawner::new(42, 800.0, 20.0);
        let mut objects = Vec::new();

        let first = spawner.preview();
        spawner.spawn_into(&mut objects);
        assert_eq!(objects, vec![FallingObject::new(first.x, 0.0, 20.0)]);

        let second = spawner.preview();
        spawner.spawn_into(&mut objects);
        assert_eq!(objects[1].x, second.x);
        assert_eq!(objects.len(), 2);
    }

    #[test]
    fn test_preview_stays_within_field() {
        let mut spawner = Spawner::new(7, 800.0, 20.0);
        let mut objects = Vec::new();
        for _ in 0..1_000 {
            let p = spawner.preview();
            assert!(p.x >= 0.0 && p.x <= 780.0, "preview x out of range: {}", p.x);
            assert_eq!(p.y, -20.0);
            spawner.spawn_into(&mut objects);
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = Spawner::new(99, 800.0, 20.0);
        let mut b = Spawner::new(99, 800.0, 20.0);
        let (mut oa, mut ob) = (Vec::new(), Vec::new());
        for _ in 0..10 {
            a.spawn_into(&mut oa);
            b.spawn_into(&mut ob);
        }
        assert_eq!(oa, ob);
    }
}
