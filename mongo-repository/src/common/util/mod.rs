mod object_utils;

pub use object_utils::*;
