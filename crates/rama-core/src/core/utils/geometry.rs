use nalgebra::Point3;

/// Computes the torsion angle, in degrees, defined by four points.
///
/// The angle is measured about the `b -> c` axis between the half-planes
/// `(a, b, c)` and `(b, c, d)` using the crystallographic sign convention, and
/// falls in the range (-180, 180]. Degenerate input (for example a repeated
/// point) collapses to `atan2(0, 0)`, which is `0.0`.
///
/// # Arguments
///
/// * `a` - The first point.
/// * `b` - The second point, start of the rotation axis.
/// * `c` - The third point, end of the rotation axis.
/// * `d` - The fourth point.
pub fn dihedral(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>, d: &Point3<f64>) -> f64 {
    let b1 = b - a;
    let b2 = c - b;
    let b3 = d - c;

    let e = b1 * b2.norm();
    let f = b2.cross(&b3);
    let g = b1.cross(&b2);

    let y = e.dot(&f);
    let x = g.dot(&f);

    y.atan2(x).to_degrees()
}

/// Rounds `value` to `decimals` places, resolving exact ties to the even neighbour.
///
/// Ties are judged on the scaled product: `54.455 * 100.0` is exactly `5445.5`,
/// so `54.455` rounds to `54.46` even though the stored literal sits just below
/// the decimal midpoint.
pub fn round_to_decimals(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round_ties_even() / scale
}
