//! License key wire format.

pub mod key;
