//! Value payload types
//!
//! These are the only aggregates marshalled across the bridge. They are plain
//! `#[repr(C)]` tuples of `f32` in fixed field order (x, y[, z[, w]]) and are
//! copied verbatim in both directions: nothing in the bridge clamps,
//! normalizes or reorders components.

use std::ops::{Add, Mul, Neg, Sub};

/// Two-component float vector
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

/// Three-component float vector
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Four-component float vector
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

/// RGBA colour, same layout as [`Vector4`]
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Implements constructors, array conversions, bit access and the
/// component-wise operators shared by every vector payload.
macro_rules! vector_payload {
    ($name:ident, $n:literal, $($field:ident),+) => {
        impl $name {
            /// All components zero
            pub const ZERO: Self = Self { $($field: 0.0),+ };

            /// All components one
            pub const ONE: Self = Self { $($field: 1.0),+ };

            #[inline]
            pub const fn new($($field: f32),+) -> Self {
                Self { $($field),+ }
            }

            /// Create a vector with every component set to `value`
            #[inline]
            pub const fn splat(value: f32) -> Self {
                Self { $($field: value),+ }
            }

            /// Components as an array in field order
            #[inline]
            pub const fn to_array(self) -> [f32; $n] {
                [$(self.$field),+]
            }

            /// Raw IEEE-754 bit patterns in field order
            ///
            /// Useful for bit-identical comparisons, where `PartialEq`
            /// would treat `0.0 == -0.0` and `NaN != NaN`.
            #[inline]
            pub fn to_bits(self) -> [u32; $n] {
                [$(self.$field.to_bits()),+]
            }
        }

        impl From<[f32; $n]> for $name {
            fn from(value: [f32; $n]) -> Self {
                let [$($field),+] = value;
                Self { $($field),+ }
            }
        }

        impl From<$name> for [f32; $n] {
            fn from(value: $name) -> Self {
                value.to_array()
            }
        }

        impl Add for $name {
            type Output = Self;

            fn add(self, rhs: Self) -> Self {
                Self { $($field: self.$field + rhs.$field),+ }
            }
        }

        impl Sub for $name {
            type Output = Self;

            fn sub(self, rhs: Self) -> Self {
                Self { $($field: self.$field - rhs.$field),+ }
            }
        }

        impl Mul<f32> for $name {
            type Output = Self;

            fn mul(self, rhs: f32) -> Self {
                Self { $($field: self.$field * rhs),+ }
            }
        }

        impl Neg for $name {
            type Output = Self;

            fn neg(self) -> Self {
                Self { $($field: -self.$field),+ }
            }
        }
    };
}

vector_payload!(Vector2, 2, x, y);
vector_payload!(Vector3, 3, x, y, z);
vector_payload!(Vector4, 4, x, y, z, w);

impl Vector3 {
    /// Component-wise product
    #[inline]
    pub fn scale_by(self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y, self.z * other.z)
    }

    /// Drop the z component
    #[inline]
    pub const fn xy(self) -> Vector2 {
        Vector2::new(self.x, self.y)
    }
}

impl Vector2 {
    /// Extend with a z component
    #[inline]
    pub const fn extend(self, z: f32) -> Vector3 {
        Vector3::new(self.x, self.y, z)
    }
}

impl Color {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque colour from RGB
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    #[inline]
    pub fn to_bits(self) -> [u32; 4] {
        [
            self.r.to_bits(),
            self.g.to_bits(),
            self.b.to_bits(),
            self.a.to_bits(),
        ]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<Vector4> for Color {
    fn from(v: Vector4) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }
}

impl From<Color> for Vector4 {
    fn from(c: Color) -> Self {
        Vector4::new(c.r, c.g, c.b, c.a)
    }
}

impl From<[f32; 4]> for Color {
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}
