/// Checks that a numerical value is in the provided interval `[a,b]` and returns
/// an [`Error::OutOfInterval`](crate::error::Error::OutOfInterval) from the enclosing
/// function if not
///
/// ### Example
/// ```ignore
/// let alpha = 2.0;
/// ensure_interval!(alpha, 0.0, 1.0);
/// ```
/// This returns early with "invalid value for \`alpha\`: 2 is outside the interval \[0, 1\]".
#[macro_export]
macro_rules! ensure_interval {
    ($var:expr, $a:expr, $b:expr) => {
        if !($var >= $a && $var <= $b) {
            return Err($crate::error::Error::OutOfInterval {
                name: stringify!($var),
                value: $var,
                min: $a,
                max: $b,
            });
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::error::{Error, Result};

    fn check(alpha: f32) -> Result<f32> {
        ensure_interval!(alpha, 0.0, 1.0);
        Ok(alpha)
    }

    #[test]
    fn ensure_interval_functional() {
        assert_eq!(check(0.0), Ok(0.0), "lower bound is inclusive");
        assert_eq!(check(1.0), Ok(1.0), "upper bound is inclusive");
        assert_eq!(
            check(1.5),
            Err(Error::OutOfInterval {
                name: "alpha",
                value: 1.5,
                min: 0.0,
                max: 1.0
            }),
            "value above the interval is rejected"
        );
        assert!(check(f32::NAN).is_err(), "NaN is rejected");
    }
}
