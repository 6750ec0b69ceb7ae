use core::ops::{Add, AddAssign, Sub, SubAssign};

pub trait IUsizeAlias: Copy + Clone + PartialEq + PartialOrd + Eq + Ord {
    fn as_usize(&self) -> usize;

    fn from_usize(value: usize) -> Self;
}

pub trait IArithOps:
    IUsizeAlias
    + Add<usize>
    + Add<Self>
    + Sub<usize>
    + Sub<Self>
    + AddAssign<usize>
    + AddAssign<Self>
    + SubAssign<usize>
    + SubAssign<Self>
{
}

#[macro_export]
macro_rules! impl_arith_with_usize {
    ($type:ty) => {
        impl core::ops::Add<usize> for $type {
            type Output = Self;
            fn add(self, rhs: usize) -> Self::Output {
                abstractions::IUsizeAlias::from_usize(
                    abstractions::IUsizeAlias::as_usize(&self) + rhs,
                )
            }
        }

        impl core::ops::Sub<usize> for $type {
            type Output = Self;
            fn sub(self, rhs: usize) -> Self::Output {
                abstractions::IUsizeAlias::from_usize(
                    abstractions::IUsizeAlias::as_usize(&self) - rhs,
                )
            }
        }

        impl core::ops::AddAssign<usize> for $type {
            fn add_assign(&mut self, rhs: usize) {
                *self = abstractions::IUsizeAlias::from_usize(
                    abstractions::IUsizeAlias::as_usize(self) + rhs,
                );
            }
        }

        impl core::ops::SubAssign<usize> for $type {
            fn sub_assign(&mut self, rhs: usize) {
                *self = abstractions::IUsizeAlias::from_usize(
                    abstractions::IUsizeAlias::as_usize(self) - rhs,
                );
            }
        }
    };
}

#[macro_export]
macro_rules! impl_arith_with_self {
    ($type:ty) => {
        impl core::ops::Add<Self> for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                abstractions::IUsizeAlias::from_usize(
                    abstractions::IUsizeAlias::as_usize(&self)
                        + abstractions::IUsizeAlias::as_usize(&rhs),
                )
            }
        }

        impl core::ops::Sub<Self> for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                abstractions::IUsizeAlias::from_usize(
                    abstractions::IUsizeAlias::as_usize(&self)
                        - abstractions::IUsizeAlias::as_usize(&rhs),
                )
            }
        }

        impl core::ops::AddAssign<Self> for $type {
            fn add_assign(&mut self, rhs: Self) {
                *self = abstractions::IUsizeAlias::from_usize(
                    abstractions::IUsizeAlias::as_usize(self)
                        + abstractions::IUsizeAlias::as_usize(&rhs),
                );
            }
        }

        impl core::ops::SubAssign<Self> for $type {
            fn sub_assign(&mut self, rhs: Self) {
                *self = abstractions::IUsizeAlias::from_usize(
                    abstractions::IUsizeAlias::as_usize(self)
                        - abstractions::IUsizeAlias::as_usize(&rhs),
                );
            }
        }
    };
}

#[macro_export]
macro_rules! impl_arith_ops {
    ($type:ty) => {
        impl abstractions::IArithOps for $type {}

        abstractions::impl_arith_with_usize!($type);
        abstractions::impl_arith_with_self!($type);
    };
}

#[macro_export]
macro_rules! impl_usize_display {
    ($type:ty) => {
        impl core::fmt::Display for $type {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(
                    f,
                    "{}({:#x})",
                    stringify!($type),
                    abstractions::IUsizeAlias::as_usize(self)
                )
            }
        }
    };
}
