//! Unit conversion constants.
//!
//! Word documents measure page geometry in twips and drawings in EMUs; the
//! renderer normalizes both through [`Length`](crate::common::Length).

pub const EMUS_PER_INCH: i64 = 914_400;
pub const EMUS_PER_CM: i64 = 360_000;
pub const EMUS_PER_PT: i64 = 12_700;
pub const EMUS_PER_TWIP: i64 = 635;
