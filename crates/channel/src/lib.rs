//! linksim channel - randomness sources and channel impairments
//!
//! Every random draw in the simulator goes through an explicit, seedable
//! generator passed in by the caller; nothing here touches a global RNG.

pub mod noise;
pub mod source;
pub mod error;

pub use error::{ChannelError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        noise::{add_awgn, transmit_through_channel, Channel, ChannelModel},
        source::{generate_bits, seeded_rng, SimRng},
        error::{ChannelError, Result},
    };
}
