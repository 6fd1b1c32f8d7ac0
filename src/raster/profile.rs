//! 1-D profile helpers. Ranges are inclusive `[x1, x2]` and silently clamped
//! to the slice.
use std::ops::RangeInclusive;

fn clamp_range(len: usize, x1: isize, x2: isize) -> Option<RangeInclusive<usize>> {
    if len == 0 {
        return None;
    }
    let lo = x1.max(0);
    let hi = x2.min(len as isize - 1);
    (lo <= hi).then(|| lo as usize..=hi as usize)
}

/// Median of the values; even counts average the middle pair, empty gives 0.
pub fn median_of(mut values: Vec<f32>) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        0.5 * (values[mid - 1] + values[mid])
    } else {
        values[mid]
    }
}

/// Median of `values[x1..=x2]`.
pub fn median(values: &[f32], x1: isize, x2: isize) -> f32 {
    match clamp_range(values.len(), x1, x2) {
        Some(r) => median_of(values[r].to_vec()),
        None => 0.0,
    }
}

/// Index of the maximum in `values[x1..=x2]`, leftmost on ties.
pub fn find_max1(values: &[f32], x1: isize, x2: isize) -> Option<usize> {
    let range = clamp_range(values.len(), x1, x2)?;
    let mut best = *range.start();
    for i in range {
        if values[i] > values[best] {
            best = i;
        }
    }
    Some(best)
}

pub fn set_range1(values: &mut [f32], x1: isize, x2: isize, value: f32) {
    if let Some(r) = clamp_range(values.len(), x1, x2) {
        values[r].fill(value);
    }
}

/// Flatten the peak at `x0` down to its local median.
///
/// The threshold is the median of `[x0 - win, x0 + win]`. Cells are overwritten
/// with `value` walking right from `x0` (at most `win` cells) and left from
/// `x0 - 1` (at most `win - 1` cells); each walk stops at the first cell below
/// the threshold.
pub fn median_peak_remove(values: &mut [f32], x0: usize, win: usize, value: f32) {
    if x0 >= values.len() {
        return;
    }
    let (c, w) = (x0 as isize, win as isize);
    let threshold = median(values, c - w, c + w);

    for x in (x0..values.len()).take(win) {
        if values[x] < threshold {
            break;
        }
        values[x] = value;
    }
    for x in (0..x0).rev().take(win.saturating_sub(1)) {
        if values[x] < threshold {
            break;
        }
        values[x] = value;
    }
}
