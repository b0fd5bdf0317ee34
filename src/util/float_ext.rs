pub trait FloatExt: Sized {
    /// `self == other`
    fn eq(self, other: Self) -> bool;

    /// `self != other`
    fn not_eq(self, other: Self) -> bool;

    /// Linear interpolation from `start` to `end` by `amount`.
    fn lerp(start: Self, end: Self, amount: Self) -> Self;
}

macro_rules! impl_float_ext {
    ( $ty:ty ) => {
        impl FloatExt for $ty {
            fn eq(self, other: Self) -> bool {
                (self - other).abs() < <$ty>::EPSILON
            }

            fn not_eq(self, other: Self) -> bool {
                (self - other).abs() >= <$ty>::EPSILON
            }

            fn lerp(start: Self, end: Self, amount: Self) -> Self {
                start + (end - start) * amount
            }
        }
    };
}

impl_float_ext!(f32);
impl_float_ext!(f64);
