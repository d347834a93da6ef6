pub mod batch;
pub mod decode;
pub mod distance;
pub mod encode;
pub mod neighbors;
pub mod precision;
