// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Gauss-Legendre Quadrature
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Gauss-Legendre nodes and weights on the reference interval [-1, 1].

use std::f64::consts::PI;

/// Newton stopping tolerance on a Legendre root.
const ROOT_TOL: f64 = 1e-15;

/// Newton iteration cap per root.
const MAX_NEWTON_ITER: usize = 100;

/// Legendre polynomial P_n(x) and its derivative.
fn legendre_with_derivative(n: usize, x: f64) -> (f64, f64) {
    let mut p1 = 1.0;
    let mut p2 = 0.0;
    for j in 1..=n {
        let p3 = p2;
        p2 = p1;
        let jf = j as f64;
        p1 = ((2.0 * jf - 1.0) * x * p2 - (jf - 1.0) * p3) / jf;
    }
    let dp = n as f64 * (x * p1 - p2) / (x * x - 1.0);
    (p1, dp)
}

/// `n`-point Gauss-Legendre rule: `(nodes, weights)` with nodes ascending.
///
/// Exact for polynomials up to degree `2n - 1`. Weights sum to 2.
pub fn gauss_legendre(n: usize) -> (Vec<f64>, Vec<f64>) {
    let mut nodes = vec![0.0; n];
    let mut weights = vec![0.0; n];
    let nf = n as f64;

    for i in 0..n.div_ceil(2) {
        // Initial guess: Tricomi approximation of the i-th root
        let mut z = (PI * (i as f64 + 0.75) / (nf + 0.5)).cos();
        let mut dp = 1.0;
        for _ in 0..MAX_NEWTON_ITER {
            let (p, d) = legendre_with_derivative(n, z);
            dp = d;
            let z_old = z;
            z = z_old - p / d;
            if (z - z_old).abs() < ROOT_TOL {
                let (_, d) = legendre_with_derivative(n, z);
                dp = d;
                break;
            }
        }
        let w = 2.0 / ((1.0 - z * z) * dp * dp);
        nodes[i] = -z;
        nodes[n - 1 - i] = z;
        weights[i] = w;
        weights[n - 1 - i] = w;
    }

    (nodes, weights)
}
