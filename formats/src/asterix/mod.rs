//! ASTERIX surveillance data decoding (spec §2-§9): envelope framing, the FSPEC-driven record
//! walker, per-category item handlers, and the sinks that consume decoded objects.
//!
//! `adsb`/`cat129`/`cat21` below are the pre-existing CAT21/drone-telemetry helpers this crate
//! carried before this module grew a full decoder; several other modules in this crate
//! (`opensky`, `asd`, `safesky`, ...) still depend on `Cat21`/`Cat129`/`Adsb21`, so they stay
//! re-exported here pending the final trim once every caller has moved onto
//! [`categories::decode_block`].

mod adsb;
mod cat129;
mod cat21;

pub use adsb::*;
pub use cat129::*;
pub use cat21::*;

pub mod bits;
pub mod blocks;
pub mod categories;
pub mod config;
pub mod envelope;
pub mod error;
pub mod item;
pub mod model;
pub mod sink;
pub mod state;
pub mod time;
pub mod walker;

pub use blocks::{split_blocks, Block};
pub use categories::decode_block;
pub use config::{DecoderConfig, ReferenceVersion, TimeWindow};
pub use envelope::{open_reader, EnvelopeFormat, Frame, FrameReader};
pub use error::{DecodeError, DecodeOutcome, DecodeResult};
pub use model::SurveillanceObject;
pub use sink::{DebugSink, JsonlSink, Sink};
pub use state::DecoderState;

/// Default SAC: France
pub const DEF_SAC: usize = 8;
/// Default SIC
pub const DEF_SIC: usize = 200;

/// For privacy reasons, we truncate the drone ID value to something not unique
///
#[cfg(feature = "privacy")]
pub fn get_drone_id(id: &str) -> String {
    id[2..10].to_owned()
}

#[cfg(not(feature = "privacy"))]
pub fn get_drone_id(id: &str) -> String {
    id.to_owned()
}
