//! Angle helpers for the degree-indexed accumulator columns.

/// Reduces a degree value into `[0, 180)`; opposite directions coincide.
#[inline]
pub fn half_turn_degrees(deg: i64) -> i64 {
    deg.rem_euclid(180)
}

/// Whether two accumulator columns describe parallel line families.
#[inline]
pub fn same_direction(col_a: usize, col_b: usize) -> bool {
    half_turn_degrees(col_a as i64) == half_turn_degrees(col_b as i64)
}
