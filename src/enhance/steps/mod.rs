//! Individual enhancement passes

pub mod border;
pub mod color;
pub mod resample;
pub mod sharpen;
