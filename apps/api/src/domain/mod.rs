// Domain layer module exports
// Pure, synchronous rules; no I/O lives here

pub mod category;
pub mod facility;
pub mod fee;
pub mod group;
pub mod input;
pub mod repositories;
