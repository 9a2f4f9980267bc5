//! Separable box blur over the penalty layer.
//!
//! Two linear passes (rows, then columns) with a running window sum, so the
//! cost is O(width × height) regardless of the kernel radius. Samples that
//! fall outside the grid are clamped to the nearest edge index
//! (`0..=dimension-1` on both axes).

/// Blur `values` (row-major, `width × height`) in place with a
/// `(2 * radius + 1)²` box kernel, rounding averages to the nearest integer.
///
/// A constant field is left unchanged.
pub fn box_blur(values: &mut [u32], width: usize, height: usize, radius: usize) {
    debug_assert_eq!(values.len(), width * height);
    if radius == 0 || width == 0 || height == 0 {
        return;
    }

    let kernel = 2 * radius + 1;
    let area = (kernel * kernel) as u64;

    // Horizontal pass: window sums along each row
    let mut horizontal = vec![0u64; width * height];
    for y in 0..height {
        let row = &values[y * width..(y + 1) * width];
        let out = &mut horizontal[y * width..(y + 1) * width];
        running_window(|i| row[i] as u64, out, width, radius);
    }

    // Vertical pass over the row sums, then average
    let mut column_sums = vec![0u64; height];
    for x in 0..width {
        running_window(
            |i| horizontal[i * width + x],
            &mut column_sums,
            height,
            radius,
        );
        for (y, sum) in column_sums.iter().enumerate() {
            values[y * width + x] = ((sum + area / 2) / area) as u32;
        }
    }
}

/// Fill `out[i]` with the sum of `sample(clamp(i + k, 0, len - 1))` for
/// `k` in `-radius..=radius`.
fn running_window(sample: impl Fn(usize) -> u64, out: &mut [u64], len: usize, radius: usize) {
    let last = len - 1;
    let clamp = |i: isize| -> usize { i.clamp(0, last as isize) as usize };
    let r = radius as isize;

    let mut sum: u64 = (-r..=r).map(|k| sample(clamp(k))).sum();
    out[0] = sum;

    for i in 1..len {
        let leaving = clamp(i as isize - r - 1);
        let entering = clamp(i as isize + r);
        sum = sum - sample(leaving) + sample(entering);
        out[i] = sum;
    }
}
