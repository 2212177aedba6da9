// =============================================================================
// Recursive accumulator macro
// =============================================================================
//
// Generates every tuple arity from a flat list of elements. Each element is
// listed once; the macro expands all prefix arities (1-element, 2-element,
// ..., N-element tuples).

use crate::{Arg, IntoArg};

/// Recursive accumulator for type+index callbacks.
macro_rules! seq_tuples {
    (@acc $callback:ident [$($aT:ident),*] [$($ai:tt),*]) => {};
    (@acc $callback:ident [$($aT:ident),*] [$($ai:tt),*] ($T:ident, $i:tt) $($rest:tt)*) => {
        $callback!($($aT,)* $T; $($ai,)* $i);
        seq_tuples!(@acc $callback [$($aT,)* $T] [$($ai,)* $i] $($rest)*);
    };
    ($callback:ident; $($pairs:tt)+) => {
        seq_tuples!(@acc $callback [] [] $($pairs)+);
    };
}

/// Conversion of an argument bundle into the ordered argument list of one
/// template.
///
/// Implemented for `()`, tuples of up to 16 [`IntoArg`] values, `Vec<Arg>`
/// and `[Arg; N]`.
pub trait IntoArgs {
    fn into_args(self) -> Vec<Arg>;
}

impl IntoArgs for () {
    #[inline]
    fn into_args(self) -> Vec<Arg> {
        Vec::new()
    }
}

impl IntoArgs for Vec<Arg> {
    #[inline]
    fn into_args(self) -> Vec<Arg> {
        self
    }
}

impl<const N: usize> IntoArgs for [Arg; N] {
    #[inline]
    fn into_args(self) -> Vec<Arg> {
        self.into()
    }
}

/// Callback: implements `IntoArgs` for a tuple of the given arity.
macro_rules! impl_into_args_tuple {
    ($($T:ident),+; $($idx:tt),+) => {
        impl<$($T: IntoArg),+> IntoArgs for ($($T,)+) {
            #[inline]
            fn into_args(self) -> Vec<Arg> {
                vec![$(self.$idx.into_arg(),)+]
            }
        }
    };
}

seq_tuples!(impl_into_args_tuple;
    (T0, 0) (T1, 1) (T2, 2) (T3, 3) (T4, 4) (T5, 5) (T6, 6) (T7, 7)
    (T8, 8) (T9, 9) (T10, 10) (T11, 11) (T12, 12) (T13, 13) (T14, 14) (T15, 15)
);
