//! Minimal vector helpers over `[f32; 3]`

/// World-space position or direction
pub type Vec3 = [f32; 3];

/// Component-wise `a - b`
#[inline]
pub fn sub(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

/// Component-wise `a + b`
#[inline]
pub fn add(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

/// Scale a vector
#[inline]
pub fn scale(v: Vec3, s: f32) -> Vec3 {
    [v[0] * s, v[1] * s, v[2] * s]
}

/// Dot product
#[inline]
pub fn dot(a: Vec3, b: Vec3) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// Vector length
#[inline]
pub fn length(v: Vec3) -> f32 {
    dot(v, v).sqrt()
}

/// Distance between two points
#[inline]
pub fn distance(a: Vec3, b: Vec3) -> f32 {
    length(sub(a, b))
}

/// Unit vector in the direction of `v`, or `None` for a zero vector
pub fn normalize(v: Vec3) -> Option<Vec3> {
    let len = length(v);
    if len <= f32::EPSILON {
        None
    } else {
        Some(scale(v, 1.0 / len))
    }
}

/// Move `from` toward `to` by at most `max_step`
pub fn move_towards(from: Vec3, to: Vec3, max_step: f32) -> Vec3 {
    let delta = sub(to, from);
    let len = length(delta);
    if len <= max_step || len <= f32::EPSILON {
        to
    } else {
        add(from, scale(delta, max_step / len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        assert!((distance([3.0, 4.0, 0.0], [0.0, 0.0, 0.0]) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_zero() {
        assert!(normalize([0.0, 0.0, 0.0]).is_none());
        let n = normalize([0.0, 2.0, 0.0]).unwrap();
        assert!((n[1] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_move_towards() {
        let p = move_towards([0.0, 0.0, 0.0], [10.0, 0.0, 0.0], 2.0);
        assert!((p[0] - 2.0).abs() < 1e-6);

        let p = move_towards([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], 2.0);
        assert_eq!(p, [1.0, 0.0, 0.0]);
    }
}
