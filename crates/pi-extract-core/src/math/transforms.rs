//! Two-port parameter transformations
//!
//! Conversions between S, Z and Y parameters. Every function maps each
//! frequency slice independently; a singular slice yields NaN entries
//! instead of an error so that the output stays index-aligned with the
//! input.
//!
//! # Panics
//! All functions expect `[nfreq, 2, 2]` data and a `z0` of length 2.
//! [`Network::new`](crate::network::Network::new) enforces both.

use ndarray::{Array1, Array2, Array3};
use num_complex::Complex64;

use crate::constants::NEAR_ZERO;
use crate::math::matrix_ops::{
    invert_2x2, inv_sqrt_z0_matrix, map_per_freq, sqrt_z0_matrix, undefined_matrix, z0_diag_matrix,
};

fn check_dims(p: &Array3<Complex64>, z0: Option<&Array1<Complex64>>) {
    assert_eq!(&p.shape()[1..], &[2, 2], "expected two-port data [nfreq, 2, 2]");
    if let Some(z0) = z0 {
        assert_eq!(z0.len(), 2, "z0 length must match number of ports");
    }
}

/// Convert S-parameters to Z-parameters
///
/// Formula: Z = F * (I + S) * inv(I - S) * F, where F = diag(sqrt(z0)).
/// For a uniform real z0 this is z0 * (I + S) * inv(I - S).
pub fn s2z(s: &Array3<Complex64>, z0: &Array1<Complex64>) -> Array3<Complex64> {
    s2z_with_tol(s, z0, NEAR_ZERO)
}

/// [`s2z`] with an explicit singularity tolerance on det(I - S)
pub fn s2z_with_tol(s: &Array3<Complex64>, z0: &Array1<Complex64>, tol: f64) -> Array3<Complex64> {
    check_dims(s, Some(z0));
    let identity = Array2::<Complex64>::eye(2);
    let f_mat = sqrt_z0_matrix(z0);

    map_per_freq(s, |s_f| {
        let i_minus_s = &identity - &s_f;
        match invert_2x2(&i_minus_s.view(), tol) {
            Some(inv_i_minus_s) => {
                let term = (&identity + &s_f).dot(&inv_i_minus_s);
                f_mat.dot(&term).dot(&f_mat)
            }
            None => undefined_matrix(2),
        }
    })
}

/// Convert Z-parameters to S-parameters
///
/// Formula: S = inv(F) * (Z - Z0) * inv(Z + Z0) * F
pub fn z2s(z: &Array3<Complex64>, z0: &Array1<Complex64>) -> Array3<Complex64> {
    check_dims(z, Some(z0));
    let f_mat = sqrt_z0_matrix(z0);
    let inv_f_mat = inv_sqrt_z0_matrix(z0);
    let z0_diag = z0_diag_matrix(z0);

    map_per_freq(z, |z_f| {
        let z_plus_z0 = &z_f + &z0_diag;
        match invert_2x2(&z_plus_z0.view(), NEAR_ZERO) {
            Some(inv_term) => {
                let term = (&z_f - &z0_diag).dot(&inv_term);
                inv_f_mat.dot(&term).dot(&f_mat)
            }
            None => undefined_matrix(2),
        }
    })
}

/// Convert Z-parameters to Y-parameters (Y = inv(Z))
pub fn z2y(z: &Array3<Complex64>) -> Array3<Complex64> {
    z2y_with_tol(z, NEAR_ZERO)
}

/// [`z2y`] with an explicit singularity tolerance on det(Z)
pub fn z2y_with_tol(z: &Array3<Complex64>, tol: f64) -> Array3<Complex64> {
    check_dims(z, None);
    map_per_freq(z, |z_f| {
        invert_2x2(&z_f, tol).unwrap_or_else(|| undefined_matrix(2))
    })
}

/// Convert Y-parameters to Z-parameters (Z = inv(Y))
pub fn y2z(y: &Array3<Complex64>) -> Array3<Complex64> {
    z2y(y)
}

/// Convert S-parameters to Y-parameters
///
/// Computed as the inverse of [`s2z`], so Y * Z = I holds wherever both exist.
pub fn s2y(s: &Array3<Complex64>, z0: &Array1<Complex64>) -> Array3<Complex64> {
    z2y(&s2z(s, z0))
}

/// Convert Y-parameters to S-parameters
///
/// S = (I - Y') * inv(I + Y'), where Y' = F * Y * F is the normalized admittance.
pub fn y2s(y: &Array3<Complex64>, z0: &Array1<Complex64>) -> Array3<Complex64> {
    check_dims(y, Some(z0));
    let identity = Array2::<Complex64>::eye(2);
    let f_mat = sqrt_z0_matrix(z0);

    map_per_freq(y, |y_f| {
        let y_prime = f_mat.dot(&y_f).dot(&f_mat);
        let i_plus_y = &identity + &y_prime;
        match invert_2x2(&i_plus_y.view(), NEAR_ZERO) {
            Some(inv_term) => (&identity - &y_prime).dot(&inv_term),
            None => undefined_matrix(2),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn z0_50() -> Array1<Complex64> {
        Array1::from_elem(2, Complex64::new(50.0, 0.0))
    }

    fn sample_s() -> Array3<Complex64> {
        let mut s = Array3::<Complex64>::zeros((1, 2, 2));
        s[[0, 0, 0]] = Complex64::new(0.3, 0.1);
        s[[0, 0, 1]] = Complex64::new(0.5, -0.2);
        s[[0, 1, 0]] = Complex64::new(0.5, -0.2);
        s[[0, 1, 1]] = Complex64::new(-0.1, 0.25);
        s
    }

    #[test]
    fn test_s2z_z2s_roundtrip() {
        let s = sample_s();
        let z = s2z(&s, &z0_50());
        let s_back = z2s(&z, &z0_50());

        for (a, b) in s.iter().zip(s_back.iter()) {
            assert_relative_eq!(a.re, b.re, epsilon = 1e-10);
            assert_relative_eq!(a.im, b.im, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_s2y_y2s_roundtrip() {
        let s = sample_s();
        let y = s2y(&s, &z0_50());
        let s_back = y2s(&y, &z0_50());

        for (a, b) in s.iter().zip(s_back.iter()) {
            assert_relative_eq!(a.re, b.re, epsilon = 1e-10);
            assert_relative_eq!(a.im, b.im, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_matched_two_port() {
        // S = 0 on both ports: Z = diag(z0)
        let s = Array3::<Complex64>::zeros((1, 2, 2));
        let z = s2z(&s, &z0_50());

        assert_relative_eq!(z[[0, 0, 0]].re, 50.0, epsilon = 1e-10);
        assert_relative_eq!(z[[0, 1, 1]].re, 50.0, epsilon = 1e-10);
        assert!(z[[0, 0, 1]].norm() < 1e-10);
    }

    #[test]
    fn test_y_times_z_is_identity() {
        let s = sample_s();
        let z = s2z(&s, &z0_50());
        let y = z2y(&z);

        let z_f: ndarray::ArrayView2<Complex64> = z.slice(ndarray::s![0, .., ..]);
        let y_f: ndarray::ArrayView2<Complex64> = y.slice(ndarray::s![0, .., ..]);
        let prod = y_f.dot(&z_f);

        assert!((prod[[0, 0]] - Complex64::new(1.0, 0.0)).norm() < 1e-12);
        assert!((prod[[1, 1]] - Complex64::new(1.0, 0.0)).norm() < 1e-12);
        assert!(prod[[0, 1]].norm() < 1e-12);
        assert!(prod[[1, 0]].norm() < 1e-12);
    }

    #[test]
    fn test_ideal_thru_has_no_impedance_matrix() {
        // I - S is singular for an ideal thru
        let mut s = Array3::<Complex64>::zeros((2, 2, 2));
        s[[0, 0, 1]] = Complex64::new(1.0, 0.0);
        s[[0, 1, 0]] = Complex64::new(1.0, 0.0);
        s[[1, 0, 0]] = Complex64::new(0.2, 0.0);
        s[[1, 1, 1]] = Complex64::new(0.2, 0.0);

        let z = s2z(&s, &z0_50());
        assert!(z.slice(ndarray::s![0, .., ..]).iter().all(|c| c.re.is_nan()));
        // Neighbouring sample is unaffected
        assert!(z.slice(ndarray::s![1, .., ..]).iter().all(|c| c.is_finite()));
    }

    #[test]
    fn test_short_has_no_admittance_matrix() {
        // S = -I gives Z = 0, which has no inverse
        let mut s = Array3::<Complex64>::zeros((1, 2, 2));
        s[[0, 0, 0]] = Complex64::new(-1.0, 0.0);
        s[[0, 1, 1]] = Complex64::new(-1.0, 0.0);

        let y = s2y(&s, &z0_50());
        assert!(y.iter().all(|c| c.is_nan()));
    }

    #[test]
    fn test_y2z_inverts_z2y() {
        let z = s2z(&sample_s(), &z0_50());
        let z_back = y2z(&z2y(&z));
        for (a, b) in z.iter().zip(z_back.iter()) {
            assert!((a - b).norm() < 1e-9 * a.norm().max(1.0));
        }
    }
}
