//! `Describe` implementations for std and ecosystem types

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

use super::{PrimitiveKind, TypeDescriptor};

/// Types that can produce their own [`TypeDescriptor`]
///
/// Derive it with `#[derive(Describe)]` for structs and enums; the library
/// provides implementations for scalars, temporal and identifier types, smart
/// pointers, collections, and maps.
pub trait Describe {
    /// Build the descriptor of `Self`
    fn describe() -> TypeDescriptor;
}

macro_rules! describe_primitive {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Describe for $ty {
                fn describe() -> TypeDescriptor {
                    TypeDescriptor::primitive(PrimitiveKind::$kind)
                }
            }
        )*
    };
}

describe_primitive! {
    String => String,
    str => String,
    &'static str => String,
    char => Char,
    bool => Boolean,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    i128 => Int128,
    isize => Int64,
    u8 => UInt8,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
    u128 => UInt128,
    usize => UInt64,
    f32 => Float32,
    f64 => Float64,
    std::time::Duration => Duration,
    std::time::SystemTime => DateTime,
    std::path::PathBuf => String,
    std::net::IpAddr => String,
    chrono::NaiveDate => Date,
    chrono::NaiveTime => Time,
    chrono::NaiveDateTime => DateTime,
    chrono::TimeDelta => Duration,
    uuid::Uuid => Uuid,
}

impl<Tz: chrono::TimeZone> Describe for chrono::DateTime<Tz> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::primitive(PrimitiveKind::DateTime)
    }
}

impl Describe for serde_json::Value {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::opaque()
    }
}

impl<T: Describe> Describe for Option<T> {
    fn describe() -> TypeDescriptor {
        T::describe().nullable()
    }
}

macro_rules! describe_transparent {
    ($($wrapper:ident),* $(,)?) => {
        $(
            impl<T: Describe + ?Sized> Describe for $wrapper<T> {
                fn describe() -> TypeDescriptor {
                    T::describe()
                }
            }
        )*
    };
}

describe_transparent!(Box, Rc, Arc);

macro_rules! describe_collection {
    ($($collection:ident),* $(,)?) => {
        $(
            impl<T: Describe> Describe for $collection<T> {
                fn describe() -> TypeDescriptor {
                    TypeDescriptor::collection(T::describe())
                }
            }
        )*
    };
}

describe_collection!(Vec, VecDeque, BTreeSet);

impl<T: Describe, S> Describe for HashSet<T, S> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::collection(T::describe())
    }
}

impl<T: Describe> Describe for [T] {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::collection(T::describe())
    }
}

impl<T: Describe, const N: usize> Describe for [T; N] {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::collection(T::describe())
    }
}

impl<K, V: Describe, S> Describe for HashMap<K, V, S> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::map(V::describe())
    }
}

impl<K, V: Describe> Describe for BTreeMap<K, V> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::map(V::describe())
    }
}

impl<K, V: Describe> Describe for indexmap::IndexMap<K, V> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::map(V::describe())
    }
}
