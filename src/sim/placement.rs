//! Random placement of non-overlapping circles
//!
//! Candidates are rejection-sampled: pick a radius, pick a center inside the
//! safe area, keep it if no existing circle is too close. After the attempt
//! budget runs out the board is considered full.

use rand::Rng;

use super::circle::Circle;
use crate::tuning::Tuning;

/// Safe-area insets in device pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Insets {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl Insets {
    pub const ZERO: Insets = Insets {
        left: 0,
        top: 0,
        right: 0,
        bottom: 0,
    };
}

/// Canvas geometry active at placement time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Canvas width (device pixels)
    pub width: u32,
    /// Canvas height (device pixels)
    pub height: u32,
    /// Device pixels per density-independent unit
    pub density: f32,
    pub insets: Insets,
}

impl Bounds {
    pub fn new(width: u32, height: u32, density: f32) -> Self {
        Self {
            width,
            height,
            density,
            insets: Insets::ZERO,
        }
    }

    pub fn with_insets(mut self, insets: Insets) -> Self {
        self.insets = insets;
        self
    }

    /// Convert density-independent units to whole device pixels.
    ///
    /// Saturates for absurd densities instead of wrapping.
    #[inline]
    pub fn dp_to_px(&self, dp: u32) -> i64 {
        (dp as f64 * self.density as f64).round() as i64
    }

    /// Inclusive range of valid center x for radius `r`, if any
    fn x_range(&self, r: i64) -> Option<(i64, i64)> {
        let lo = (self.insets.left as i64).saturating_add(r);
        let hi = (self.width as i64 - self.insets.right as i64).saturating_sub(r);
        (lo <= hi).then_some((lo, hi))
    }

    /// Inclusive range of valid center y for radius `r`, if any
    fn y_range(&self, r: i64) -> Option<(i64, i64)> {
        let lo = (self.insets.top as i64).saturating_add(r);
        let hi = (self.height as i64 - self.insets.bottom as i64).saturating_sub(r);
        (lo <= hi).then_some((lo, hi))
    }

    /// True if `circle` lies fully inside the safe area
    pub fn contains(&self, circle: &Circle) -> bool {
        let r = circle.r;
        circle.x >= self.insets.left as f32 + r
            && circle.x <= self.width as f32 - self.insets.right as f32 - r
            && circle.y >= self.insets.top as f32 + r
            && circle.y <= self.height as f32 - self.insets.bottom as f32 - r
    }
}

/// Draw one random candidate. `None` when the sampled radius does not fit.
pub fn random_candidate<R: Rng + ?Sized>(
    bounds: &Bounds,
    tuning: &Tuning,
    rng: &mut R,
) -> Option<Circle> {
    let r_dp = rng.random_range(tuning.min_radius_dp..=tuning.max_radius_dp);
    let r = bounds.dp_to_px(r_dp);
    let (x_lo, x_hi) = bounds.x_range(r)?;
    let (y_lo, y_hi) = bounds.y_range(r)?;
    let x = rng.random_range(x_lo..=x_hi);
    let y = rng.random_range(y_lo..=y_hi);
    Some(Circle::new(x as f32, y as f32, r as f32))
}

/// Place a new circle clear of `existing`.
///
/// Returns `None` once `tuning.max_placement_attempts` candidates have been
/// rejected; callers treat that as a full board. Candidates that do not fit the
/// bounds at all count against the same budget. `existing` is never modified.
pub fn place_new_circle<R: Rng + ?Sized>(
    existing: &[Circle],
    bounds: &Bounds,
    tuning: &Tuning,
    rng: &mut R,
) -> Option<Circle> {
    for attempt in 0..tuning.max_placement_attempts {
        let Some(candidate) = random_candidate(bounds, tuning, rng) else {
            continue;
        };
        if candidate.is_clear_of(existing) {
            log::debug!(
                "Placed circle at ({}, {}) r={} after {} attempts",
                candidate.x,
                candidate.y,
                candidate.r,
                attempt + 1
            );
            return Some(candidate);
        }
    }
    log::debug!(
        "No room for circle {} after {} attempts",
        existing.len() + 1,
        tuning.max_placement_attempts
    );
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_dp_to_px_rounds() {
        assert_eq!(Bounds::new(100, 100, 1.0).dp_to_px(16), 16);
        assert_eq!(Bounds::new(100, 100, 2.625).dp_to_px(16), 42);
        assert_eq!(Bounds::new(100, 100, 1.5).dp_to_px(17), 26); // 25.5 rounds up
    }

    #[test]
    fn test_first_circle_always_fits_in_roomy_canvas() {
        let mut rng = Pcg32::seed_from_u64(1);
        let bounds = Bounds::new(1080, 1920, 2.0);
        let c = place_new_circle(&[], &bounds, &Tuning::default(), &mut rng).unwrap();
        assert!(bounds.contains(&c));
        assert!(c.r >= 32.0 && c.r <= 64.0);
    }

    #[test]
    fn test_degenerate_bounds_exhaust_budget() {
        let mut rng = Pcg32::seed_from_u64(2);
        // Narrower than the smallest diameter
        let bounds = Bounds::new(20, 500, 1.0);
        assert!(place_new_circle(&[], &bounds, &Tuning::default(), &mut rng).is_none());
    }

    #[test]
    fn test_insets_shrink_area() {
        let mut rng = Pcg32::seed_from_u64(3);
        let insets = Insets {
            left: 100,
            top: 50,
            right: 10,
            bottom: 200,
        };
        let bounds = Bounds::new(400, 800, 1.0).with_insets(insets);
        for _ in 0..200 {
            let c = random_candidate(&bounds, &Tuning::default(), &mut rng).unwrap();
            assert!(c.x >= 100.0 + c.r && c.x <= 390.0 - c.r);
            assert!(c.y >= 50.0 + c.r && c.y <= 600.0 - c.r);
        }
    }

    #[test]
    fn test_huge_radius_counts_as_failed_attempt() {
        let mut rng = Pcg32::seed_from_u64(6);
        let insets = Insets {
            left: 10,
            top: 10,
            ..Insets::ZERO
        };
        let bounds = Bounds::new(1080, 1920, 2.0).with_insets(insets);
        let tuning = Tuning {
            max_radius_dp: 4_000_000_000,
            ..Tuning::default()
        };
        for _ in 0..50 {
            if let Some(c) = place_new_circle(&[], &bounds, &tuning, &mut rng) {
                assert!(bounds.contains(&c));
            }
        }
    }

    #[test]
    fn test_huge_density_exhausts_budget() {
        let mut rng = Pcg32::seed_from_u64(7);
        let insets = Insets {
            left: 10,
            top: 10,
            right: 10,
            bottom: 10,
        };
        for density in [1.0e9f32, f32::MAX, f32::INFINITY] {
            let bounds = Bounds::new(1080, 1920, density).with_insets(insets);
            assert!(place_new_circle(&[], &bounds, &Tuning::default(), &mut rng).is_none());
        }
    }

    #[test]
    fn test_tiny_canvas_fits_one_circle() {
        let mut rng = Pcg32::seed_from_u64(4);
        let tuning = Tuning::default();
        // Only a 16px circle centered at (16, 16) fits
        let bounds = Bounds::new(32, 32, 1.0);

        let first = place_new_circle(&[], &bounds, &tuning, &mut rng).unwrap();
        assert_eq!(first, Circle::new(16.0, 16.0, 16.0));

        assert!(place_new_circle(&[first], &bounds, &tuning, &mut rng).is_none());
    }

    #[test]
    fn test_existing_not_mutated() {
        let mut rng = Pcg32::seed_from_u64(5);
        let existing = vec![Circle::new(200.0, 200.0, 20.0)];
        let snapshot = existing.clone();
        let _ = place_new_circle(&existing, &Bounds::new(400, 400, 1.0), &Tuning::default(), &mut rng);
        assert_eq!(existing, snapshot);
    }

    proptest! {
        #[test]
        fn prop_placement_invariants(
            seed in any::<u64>(),
            width in 64u32..1200,
            height in 64u32..1200,
            density in prop::sample::select(vec![1.0f32, 1.5, 2.0, 3.0]),
            count in 1usize..40,
            left in 0u32..200,
            top in 0u32..200,
            right in 0u32..200,
            bottom in 0u32..200,
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let bounds = Bounds::new(width, height, density).with_insets(Insets { left, top, right, bottom });
            let tuning = Tuning { max_placement_attempts: 200, ..Tuning::default() };
            let mut circles: Vec<Circle> = Vec::new();

            for _ in 0..count {
                let Some(c) = place_new_circle(&circles, &bounds, &tuning, &mut rng) else {
                    break;
                };
                prop_assert!(bounds.contains(&c));
                prop_assert!(c.x - c.r >= left as f32 && c.x + c.r <= width as f32 - right as f32);
                prop_assert!(c.y - c.r >= top as f32 && c.y + c.r <= height as f32 - bottom as f32);
                for older in &circles {
                    prop_assert!(older.distance_to(c.center()) >= older.r * 2.0);
                }
                circles.push(c);
            }
        }
    }
}
