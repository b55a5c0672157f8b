//! PSA AEE2010 CAN protocol: identifiers, checksums and message builders.
//!
//! This crate is I/O-free. It knows which signals each message carries and
//! what values this adapter writes into them, but leaves bit packing to a
//! [`SignalCodec`](opencar_can_common::SignalCodec) implementation.
//!
//! - [`ids`]: bus indices, addresses, message and signal names
//! - [`checksum`]: the 4-bit nibble-sum checksum and its init-value table
//! - [`status`]: EPS status values, both driven and observed
//! - [`uds`]: diagnostic session payloads for the radar ECU
//! - [`messages`]: value sets for every message this adapter transmits
//! - [`packer`]: two-pass encode that fills a checksum field

#![deny(static_mut_refs)]

pub mod checksum;
pub mod ids;
pub mod messages;
pub mod packer;
pub mod status;
pub mod uds;

pub use checksum::{ChecksumTable, DEFAULT_CHECKSUM_INIT, checksum, mask_checksum_nibble};
pub use ids::{addresses, bus, messages as message_names, signals};
pub use messages::{
    LaneKeepAssistCommand, PowertrainRequest, SteerSetpoint, cancel_acc_echo, dat_artiv_v2_4f6,
    dyn_mdd_etat_2f6, dyn1_mdd_etat_2b6, lane_keep_assist, resume_acc_echo, supv_artiv_796,
};
pub use packer::pack_with_checksum;
pub use status::{EpsLkaState, EpsStatus};
pub use uds::{PROGRAMMING_SESSION_REQUEST, TESTER_PRESENT_REQUEST};
