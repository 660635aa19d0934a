use num::complex::Complex64;

/// Roots of a3*x^3 + a2*x^2 + a1*x + a0 with complex coefficients, via
/// Cardano's formula. Closed form, so no eigensolver or LAPACK involvement
/// for something this small. `a3` must be nonzero.
pub fn solve_cubic(a3: Complex64, a2: Complex64, a1: Complex64, a0: Complex64) -> [Complex64; 3] {
    // Normalize and depress: x = t - b/3 turns the cubic into t^3 + p*t + q
    let b: Complex64 = a2 / a3;
    let c: Complex64 = a1 / a3;
    let d: Complex64 = a0 / a3;

    let p: Complex64 = c - b * b / 3.0;
    let q: Complex64 = 2.0 * b * b * b / 27.0 - b * c / 3.0 + d;

    let discriminant_sqrt: Complex64 = (q * q / 4.0 + p * p * p / 27.0).sqrt();
    let mut u: Complex64 = (-q / 2.0 + discriminant_sqrt).cbrt();
    if u.norm() < 1e-300 {
        // degenerate branch, switch sign of the square root
        u = (-q / 2.0 - discriminant_sqrt).cbrt();
    }

    let offset: Complex64 = b / 3.0;
    if u.norm() < 1e-300 {
        // p == q == 0: triple root
        let root: Complex64 = -offset;
        return [root, root, root];
    }

    let omega: Complex64 = Complex64::new(-0.5, 0.5 * 3.0_f64.sqrt()); // primitive cube root of unity
    let mut roots: [Complex64; 3] = [Complex64::new(0.0, 0.0); 3];
    let mut u_k: Complex64 = u;
    for k in 0..3 {
        roots[k] = u_k - p / (3.0 * u_k) - offset;
        u_k = u_k * omega;
    }

    return roots;
}
