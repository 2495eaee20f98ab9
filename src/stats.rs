use anyhow::{Result, bail};

/// Numeric element of a sequence.
///
/// Implemented for every primitive integer and floating-point type.
pub trait Numeric: Copy {
    fn to_f64(self) -> f64;
}

macro_rules! impl_numeric {
    ($($ty:ty),*) => {
        $(
            impl Numeric for $ty {
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_numeric!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64
);

/// Compute the arithmetic mean of a sequence.
///
/// # Errors
/// Returns an error if the sequence is empty.
pub fn mean<T: Numeric>(vals: &[T]) -> Result<f64> {
    if vals.is_empty() {
        bail!("cannot compute the mean of an empty sequence");
    }
    let sum: f64 = vals.iter().map(|&val| val.to_f64()).sum();
    Ok(sum / vals.len() as f64)
}
