/// `step_interp(y0, y1, k, n)` is the point `k` steps of `n` along the straight line from `y0` to `y1`
///
/// # Arguments:
///
/// * `y0`, `y1` - The two endpoints of the line
///
/// * `step` - How many steps along the line to go, in `[0, num_steps]`
///
/// * `num_steps` - The number of steps the whole line is divided into, must be non-zero
///
/// The endpoints are returned exactly, intermediate points are weighted as `((n - k) * y0 + k * y1) / n`
pub fn step_interp(y0: f32, y1: f32, step: u32, num_steps: u32) -> f32 {
    if step == 0 {
        y0
    } else if num_steps <= step {
        y1
    } else {
        ((num_steps - step) as f32 * y0 + step as f32 * y1) / num_steps as f32
    }
}

/// `is_almost(v1, v2, e)` is true iff `v1` is within `e` of `v2`
#[cfg(test)]
pub fn is_almost(v1: f32, v2: f32, eps: f32) -> bool {
    fabs(v1 - v2) <= eps
}

/// `fabs(v)` is the absolute value of `v`
#[cfg(test)]
pub fn fabs(v: f32) -> f32 {
    if v < 0.0 {
        -v
    } else {
        v
    }
}
