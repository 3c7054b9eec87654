//! Shared capabilities of garden entities.
//!
//! Cells, the gardener and pests are stored in separate typed collections but all
//! advance once per simulation tick. Cells and pests additionally respond to the
//! gardener's time manipulation.

/// Multiplier applied to a time factor before it reaches any clock.
pub const TIME_EFFECT_SCALE: i32 = 5;

/// Clock delta produced by a time factor.
#[must_use]
pub fn scaled_shift(factor: i32) -> i32 {
    factor.saturating_mul(TIME_EFFECT_SCALE)
}

/// Something that advances by one fixed simulation tick.
pub trait Tick {
    /// External state the entity reads or mutates while advancing.
    type Context<'a>;
    /// What the tick reports back to the caller.
    type Outcome;

    /// Advance one tick.
    fn tick(&mut self, ctx: Self::Context<'_>) -> Self::Outcome;
}

/// Something the time-manipulation ability can act on.
///
/// Positive factors accelerate, negative factors reverse and zero does nothing.
pub trait TimeAffected {
    /// Apply a signed time factor.
    fn apply_time_effect(&mut self, factor: i32);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled_shift() {
        assert_eq!(scaled_shift(10), 50);
        assert_eq!(scaled_shift(-10), -50);
        assert_eq!(scaled_shift(0), 0);
    }

    #[test]
    fn test_scaled_shift_saturates() {
        assert_eq!(scaled_shift(i32::MAX), i32::MAX);
        assert_eq!(scaled_shift(i32::MIN), i32::MIN);
    }
}
