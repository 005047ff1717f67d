//! Matrix operation helpers
//!
//! Utilities shared by the per-frequency parameter transforms.

use ndarray::{Array1, Array2, Array3, ArrayView2};
use num_complex::Complex64;

/// Sentinel for a quantity that could not be computed at a sample.
pub const UNDEFINED: Complex64 = Complex64::new(f64::NAN, f64::NAN);

/// Create a diagonal matrix from a slice of values
#[inline]
pub fn diag_matrix(values: &[Complex64]) -> Array2<Complex64> {
    let n = values.len();
    let mut m = Array2::<Complex64>::zeros((n, n));
    for (i, &v) in values.iter().enumerate() {
        m[[i, i]] = v;
    }
    m
}

/// Create a diagonal matrix with sqrt of reference impedances
#[inline]
pub fn sqrt_z0_matrix(z0: &Array1<Complex64>) -> Array2<Complex64> {
    let sqrt_vals: Vec<Complex64> = z0.iter().map(|z| z.sqrt()).collect();
    diag_matrix(&sqrt_vals)
}

/// Create a diagonal matrix with inverse sqrt of reference impedances
#[inline]
pub fn inv_sqrt_z0_matrix(z0: &Array1<Complex64>) -> Array2<Complex64> {
    let inv_sqrt_vals: Vec<Complex64> = z0.iter().map(|z| z.sqrt().inv()).collect();
    diag_matrix(&inv_sqrt_vals)
}

/// Create a diagonal matrix from reference impedances
#[inline]
pub fn z0_diag_matrix(z0: &Array1<Complex64>) -> Array2<Complex64> {
    diag_matrix(&z0.to_vec())
}

/// Square matrix filled with [`UNDEFINED`]
#[inline]
pub fn undefined_matrix(n: usize) -> Array2<Complex64> {
    Array2::from_elem((n, n), UNDEFINED)
}

/// Invert a 2x2 complex matrix
///
/// Returns None if the matrix is not 2x2 or its determinant magnitude is
/// below `tol`. A NaN determinant is not caught here; it propagates into
/// the result.
#[inline]
pub fn invert_2x2(m: &ArrayView2<Complex64>, tol: f64) -> Option<Array2<Complex64>> {
    if m.shape() != [2, 2] {
        return None;
    }

    let a = m[[0, 0]];
    let b = m[[0, 1]];
    let c = m[[1, 0]];
    let d = m[[1, 1]];
    let det = a * d - b * c;

    if det.norm() < tol {
        return None;
    }

    let inv_det = det.inv();
    let mut result = Array2::<Complex64>::zeros((2, 2));
    result[[0, 0]] = d * inv_det;
    result[[0, 1]] = -b * inv_det;
    result[[1, 0]] = -c * inv_det;
    result[[1, 1]] = a * inv_det;
    Some(result)
}

/// Apply `op` to every frequency slice: `result[f] = op(a[f])`
///
/// `op` must return a matrix of the same shape as its input.
pub fn map_per_freq<F>(a: &Array3<Complex64>, op: F) -> Array3<Complex64>
where
    F: Fn(ArrayView2<Complex64>) -> Array2<Complex64>,
{
    let mut result = Array3::<Complex64>::zeros(a.raw_dim());
    for (src, mut dst) in a.outer_iter().zip(result.outer_iter_mut()) {
        dst.assign(&op(src));
    }
    result
}

/// True when every entry of the slice is finite
#[inline]
pub fn all_finite(m: &ArrayView2<Complex64>) -> bool {
    m.iter().all(|c| c.is_finite())
}
