//! Property tests for S/Z/Y conversions

use ndarray::{Array1, Array2, Array3};
use num_complex::Complex64;
use pi_extract_core::math::transforms::{s2y, s2z, y2s, z2y};
use proptest::prelude::*;

fn entry() -> impl Strategy<Value = Complex64> {
    (0.0..0.95f64, -180.0..180.0f64)
        .prop_map(|(mag, deg)| Complex64::from_polar(mag, deg.to_radians()))
}

fn two_port() -> impl Strategy<Value = Array3<Complex64>> {
    prop::collection::vec(entry(), 4)
        .prop_map(|v| Array3::from_shape_vec((1, 2, 2), v).unwrap())
}

fn det(m: &Array3<Complex64>, sign: f64) -> Complex64 {
    let a = 1.0 + sign * m[[0, 0, 0]];
    let d = 1.0 + sign * m[[0, 1, 1]];
    a * d - m[[0, 0, 1]] * m[[0, 1, 0]]
}

fn z0() -> Array1<Complex64> {
    Array1::from_elem(2, Complex64::new(50.0, 0.0))
}

proptest! {
    #[test]
    fn round_trip_s_z_y_s(s in two_port()) {
        prop_assume!(det(&s, -1.0).norm() > 0.1);
        prop_assume!(det(&s, 1.0).norm() > 0.1);

        let back = y2s(&z2y(&s2z(&s, &z0())), &z0());
        for (orig, got) in s.iter().zip(back.iter()) {
            prop_assert!((got - orig).norm() <= 1e-9 * (1.0 + orig.norm()),
                "S mismatch: {} vs {}", orig, got);
        }
    }

    #[test]
    fn admittance_inverts_impedance(s in two_port()) {
        prop_assume!(det(&s, -1.0).norm() > 0.1);
        prop_assume!(det(&s, 1.0).norm() > 0.1);

        let z = s2z(&s, &z0());
        let y = s2y(&s, &z0());
        let z_f = z.index_axis(ndarray::Axis(0), 0);
        let y_f = y.index_axis(ndarray::Axis(0), 0);
        let product = y_f.dot(&z_f);
        let identity = Array2::<Complex64>::eye(2);
        for (got, want) in product.iter().zip(identity.iter()) {
            prop_assert!((got - want).norm() <= 1e-9, "Y*Z = {}", product);
        }
    }
}
