//! Runtime type switch from `dyn Any` to a bindable value.

use std::any::Any;

use crate::value::{FlagValue, for_each_scalar};

/// Type test and downcast for one supported type.
#[derive(Clone, Copy)]
pub(crate) struct Caster {
    pub(crate) matches: fn(&dyn Any) -> bool,
    pub(crate) cast: fn(&mut dyn Any) -> Option<&mut dyn FlagValue>,
}

fn matches_type<T: Any>(value: &dyn Any) -> bool {
    value.is::<T>()
}

fn cast_type<T: FlagValue + Any>(value: &mut dyn Any) -> Option<&mut dyn FlagValue> {
    value.downcast_mut::<T>().map(|typed| typed as &mut dyn FlagValue)
}

fn caster<T: FlagValue + Any>() -> Caster {
    Caster {
        matches: matches_type::<T>,
        cast: cast_type::<T>,
    }
}

/// Casters for every scalar, its sequence form and its optional form.
pub(crate) fn casters() -> Vec<Caster> {
    let mut table = Vec::new();
    macro_rules! push_casters {
        ($($ty:ty),* $(,)?) => {
            $(
                table.push(caster::<$ty>());
                table.push(caster::<Vec<$ty>>());
                table.push(caster::<Option<$ty>>());
            )*
        };
    }
    for_each_scalar!(push_casters);
    table
}

/// Find the caster able to bind `value`.
pub(crate) fn find(value: &dyn Any) -> Option<Caster> {
    casters().into_iter().find(|entry| (entry.matches)(value))
}
