#![allow(clippy::len_without_is_empty)]
#![allow(clippy::needless_range_loop)]

pub mod error;
pub mod matrix;
pub mod options;
pub mod scalar;
pub mod shape;
