/// Asserts that evaluating a polynomial at a given `x` matches the expected `y` value
/// within floating-point epsilon tolerance, or an explicit `tol = ...`.
///
/// Useful for spot-checking specific predictions of the model.
///
/// # Arguments
///
/// * `$function` - The polynomial under test (must implement `AsRef<Polynomial<...>>`, as fits do).
/// * `$x` - The input `x` value where the polynomial is evaluated.
/// * `$expected` - The expected result of the polynomial evaluation.
/// * `tol` - *(optional)* Absolute tolerance. Defaults to machine epsilon.
///
/// # Panics
///
/// Panics if the evaluated value differs from the expected value by more than the tolerance.
///
/// # Example
/// ```
/// use polyreg::{function, assert_y};
///
/// function!(test(x) = 8.0 + 7.0 x^1 + 6.0 x^2);
///
/// // 8 + 7*2 + 6*4 = 8 + 14 + 24 = 46
/// assert_y!(test, 2.0, 46.0);
/// assert_y!(test, 0.1, 8.76, tol = 1e-12);
/// ```
#[macro_export]
macro_rules! assert_y {
    ($function:expr, $x:expr, $expected:expr, tol = $tol:expr) => {{
        let function = &$function;
        let function: &$crate::Polynomial<_> = function.as_ref();
        let (x, expected) = ($x, $expected);

        $crate::assert_close!(function.y(x), expected, tol = $tol, "y({}) != {}", x, expected);
    }};

    ($function:expr, $x:expr, $expected:expr) => {{
        let function = &$function;
        let function: &$crate::Polynomial<_> = function.as_ref();
        let (x, expected) = ($x, $expected);

        $crate::assert_close!(function.y(x), expected, "y({}) != {}", x, expected);
    }};
}

/// Asserts that two floating-point values are approximately equal.
///
/// This is useful for comparing computed values where exact equality is not expected due to rounding errors.
/// - Uses the machine epsilon for the floating-point type as the tolerance, unless `tol = ...` is given.
/// - `assert_eq!` equivalent for floats.
///
/// # Parameters
/// - `$a`: First value.
/// - `$b`: Second value.
/// - `tol`: *(optional)* Absolute tolerance.
/// - `$msg`: *(optional)* Custom failure message, with `format!` arguments.
///
/// # Panics
/// Panics if the absolute difference `|a - b|` exceeds the tolerance.
///
/// # Examples
/// ```
/// # use polyreg::assert_close;
/// assert_close!(1.0 + 1e-16, 1.0, "Nearly equal");
/// assert_close!(0.1 + 0.2, 0.3, tol = 1e-12);
/// ```
#[macro_export]
macro_rules! assert_close {
    ($a:expr, $b:expr, tol = $tol:expr $(, $msg:literal $(, $args:expr)*)?) => { #[allow(clippy::float_cmp)] {
        #[allow(unused_mut, unused_assignments)] let mut msg = "Values not close".to_string();
        $( msg = format!($msg $(, $args)*); )?

        let (a, b, tol) = ($a, $b, $tol);
        assert!(
            a == b || $crate::value::Value::abs(a - b) <= tol,
            "{msg}: {a} != {b} (tolerance {tol:e})"
        );
    }};

    ($a:expr, $b:expr $(, $msg:literal $(, $args:expr)*)?) => {{
        fn epsilon<T: $crate::value::Value>(_: T) -> T {
            T::epsilon()
        }

        let a = $a;
        $crate::assert_close!(a, $b, tol = epsilon(a) $(, $msg $(, $args)*)?);
    }};
}

/// Asserts that two sequences of floating-point values are approximately equal element-wise.
///
/// - Uses the machine epsilon for the floating-point type as the tolerance, unless `tol = ...` is given.
/// - Element-wise [`crate::assert_close`].
///
/// # Parameters
/// - `$src`: Source values (anything with `len()` and `iter()`).
/// - `$dst`: Expected values (same length as `$src`).
/// - `tol`: *(optional)* Absolute tolerance.
///
/// # Panics
/// - If the lengths differ.
/// - If any pair of elements differ by more than the tolerance.
///
/// # Examples
/// ```
/// # use polyreg::assert_all_close;
/// let a = vec![1.0, 2.0, 3.0];
/// let b = vec![1.0 + 1e-16, 2.0, 3.0];
///
/// assert_all_close!(a, b);
/// assert_all_close!(a, [1.001, 2.0, 2.999], tol = 1e-2);
/// ```
#[macro_export]
macro_rules! assert_all_close {
    ($src:expr, $dst:expr, tol = $tol:expr) => {{
        let (src, dst, tol) = (&$src, &$dst, $tol);
        assert_eq!(src.len(), dst.len(), "{} elements - length mismatch", src.len());

        for (i, (s, d)) in src.iter().zip(dst.iter()).enumerate() {
            $crate::assert_close!(*s, *d, tol = tol, "src[{}]", i);
        }
    }};

    ($src:expr, $dst:expr) => {{
        let (src, dst) = (&$src, &$dst);
        assert_eq!(src.len(), dst.len(), "{} elements - length mismatch", src.len());

        for (i, (s, d)) in src.iter().zip(dst.iter()).enumerate() {
            $crate::assert_close!(*s, *d, "src[{}]", i);
        }
    }};
}

#[cfg(test)]
mod tests {
    use crate::{function, LeastSquaresFit};

    #[test]
    fn test_assert_y_macro() {
        // 1 + 2*2 + 3*4 = 1 + 4 + 12 = 17
        function!(poly(x) = 1.0 + 2.0 x^1 + 3.0 x^2);
        assert_y!(poly, 2.0, 17.0);

        let fit = LeastSquaresFit::new(poly.solve_range(0.0..=4.0, 1.0), 2).unwrap();
        assert_y!(fit, 2.0, 17.0, tol = 1e-9);
    }

    #[test]
    fn test_assert_close_macro() {
        assert_close!(1.0 + 1e-16, 1.0, "Values should be close");
        assert_close!(1.0, 1.05, tol = 0.1);
    }

    #[test]
    #[should_panic(expected = "Values not close")]
    fn test_assert_close_fails() {
        assert_close!(1.0, 1.1);
    }

    #[test]
    fn test_assert_all_close_macro() {
        let a = [1.0, 2.0, 3.0];
        let b = [1.0 + 1e-16, 2.0, 3.0];
        assert_all_close!(a, b);
        assert_all_close!(a, vec![1.01, 1.99, 3.0], tol = 0.02);
    }

    #[test]
    #[should_panic(expected = "length mismatch")]
    fn test_assert_all_close_length() {
        assert_all_close!([1.0, 2.0], [1.0]);
    }
}
