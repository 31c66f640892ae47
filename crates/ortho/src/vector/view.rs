//! Named-field views of small vectors (`v.x`, `v.y`, ...).
//!
//! [`Quat`][crate::Quat] reuses the 4-element view for its `x`, `y`, `z` and `w` fields.

use std::ops::{Deref, DerefMut};

use crate::Vector;

macro_rules! field_view {
    ($( $(#[$attr:meta])* $name:ident<$n:literal> { $($field:ident),+ } )+) => {$(
        $(#[$attr])*
        #[repr(C)]
        pub struct $name<T> {
            $( pub $field: T, )+
            _priv: (), // prevent external construction
        }

        // Safety: `Vector<T, N>` is `repr(transparent)` over `[T; N]`, which has the same layout
        // as a `repr(C)` struct of `N` fields of type `T` followed by a ZST.
        impl<T> Deref for Vector<T, $n> {
            type Target = $name<T>;

            #[inline]
            fn deref(&self) -> &$name<T> {
                unsafe { &*(self as *const Self).cast::<$name<T>>() }
            }
        }

        impl<T> DerefMut for Vector<T, $n> {
            #[inline]
            fn deref_mut(&mut self) -> &mut $name<T> {
                unsafe { &mut *(self as *mut Self).cast::<$name<T>>() }
            }
        }
    )+};
}

field_view! {
    /// Fields of a [`Vec2`][crate::Vec2].
    XY<2> { x, y }
    /// Fields of a [`Vec3`][crate::Vec3].
    XYZ<3> { x, y, z }
    /// Fields of a [`Vec4`][crate::Vec4] or [`Quat`][crate::Quat].
    XYZW<4> { x, y, z, w }
}

#[cfg(test)]
mod tests {
    use crate::{vec2, vec4, Vec3f};

    #[test]
    fn fields_alias_elements() {
        let mut v = vec4(1, 2, 3, 4);
        v.z += 10;
        assert_eq!(v, [1, 2, 13, 4]);
        assert_eq!((v.x, v.w), (1, 4));

        let mut u = Vec3f::ZERO;
        u.y = 0.5;
        assert_eq!(u[1], 0.5);

        assert_eq!(vec2(7u8, 9).y, 9);
    }
}
