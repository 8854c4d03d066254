use half::f16;
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display};

/// Element types the operator advertises in its type attribute.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementType {
    Half,
    Float,
    Double,
    Int32,
    Int64,
    Complex64,
    Complex128,
}

impl ElementType {
    pub const ALL: [ElementType; 7] = [
        ElementType::Half,
        ElementType::Float,
        ElementType::Double,
        ElementType::Int32,
        ElementType::Int64,
        ElementType::Complex64,
        ElementType::Complex128,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ElementType::Half => "half",
            ElementType::Float => "float",
            ElementType::Double => "double",
            ElementType::Int32 => "int32",
            ElementType::Int64 => "int64",
            ElementType::Complex64 => "complex64",
            ElementType::Complex128 => "complex128",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name.trim())
    }

    pub fn is_complex(self) -> bool {
        matches!(self, ElementType::Complex64 | ElementType::Complex128)
    }
}

impl Display for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A scalar the distance kernel can widen to `f64` without loss and narrow
/// back at the boundary.
pub trait Element: Copy + Default + Debug + Send + Sync + 'static {
    const TYPE: ElementType;

    fn to_f64(self) -> f64;
    fn from_f64(x: f64) -> Self;
}

impl Element for f16 {
    const TYPE: ElementType = ElementType::Half;

    #[inline(always)]
    fn to_f64(self) -> f64 {
        f16::to_f64(self)
    }
    #[inline(always)]
    fn from_f64(x: f64) -> Self {
        f16::from_f64(x)
    }
}

macro_rules! impl_element_float {
    ($t:ty, $e:expr) => {
        impl Element for $t {
            const TYPE: ElementType = $e;

            #[inline(always)]
            fn to_f64(self) -> f64 {
                ToPrimitive::to_f64(&self).unwrap_or(f64::NAN)
            }
            #[inline(always)]
            fn from_f64(x: f64) -> Self {
                x as $t
            }
        }
    };
}

impl_element_float!(f32, ElementType::Float);
impl_element_float!(f64, ElementType::Double);

/// Distances are rounded to nearest and saturate at `i32::MAX`.
impl Element for i32 {
    const TYPE: ElementType = ElementType::Int32;

    #[inline(always)]
    fn to_f64(self) -> f64 {
        f64::from(self)
    }
    #[inline(always)]
    fn from_f64(x: f64) -> Self {
        x.round().to_i32().unwrap_or(if x.is_sign_negative() {
            i32::MIN
        } else {
            i32::MAX
        })
    }
}

#[test]
fn element_type_names() {
    for t in ElementType::ALL {
        assert_eq!(ElementType::from_name(t.name()), Some(t));
    }
    assert_eq!(ElementType::from_name("bfloat16"), None);
    assert!(ElementType::Complex64.is_complex());
    assert!(!ElementType::Int64.is_complex());
}

#[test]
fn element_conversions() {
    assert_eq!(<f16 as Element>::to_f64(f16::from_f32(1.5)), 1.5);
    assert_eq!(<f16 as Element>::from_f64(5.0), f16::from_f32(5.0));
    assert_eq!(<f32 as Element>::from_f64(0.25), 0.25f32);
    assert_eq!(<i32 as Element>::to_f64(-7), -7.0);
    assert_eq!(<i32 as Element>::from_f64(2.5), 3);
    assert_eq!(<i32 as Element>::from_f64(1.4142), 1);
    assert_eq!(<i32 as Element>::from_f64(1e12), i32::MAX);
}
