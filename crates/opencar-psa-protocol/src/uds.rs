//! UDS payloads sent to the radar ECU.
//!
//! Single-frame ISO-TP: byte 0 is the payload length, the rest is zero
//! padding.

/// UDS service: diagnostic session control.
pub const SID_DIAGNOSTIC_SESSION_CONTROL: u8 = 0x10;
/// UDS service: tester present.
pub const SID_TESTER_PRESENT: u8 = 0x3E;
/// Diagnostic session type: programming.
pub const SESSION_PROGRAMMING: u8 = 0x02;
/// Suppress-positive-response bit.
pub const SUPPRESS_POSITIVE_RESPONSE: u8 = 0x80;

/// Enter the programming session. The radar stops transmitting while in it.
pub const PROGRAMMING_SESSION_REQUEST: [u8; 8] = [
    0x02,
    SID_DIAGNOSTIC_SESSION_CONTROL,
    SESSION_PROGRAMMING,
    SUPPRESS_POSITIVE_RESPONSE,
    0x00,
    0x00,
    0x00,
    0x00,
];

/// Keep the diagnostic session alive, no response requested.
pub const TESTER_PRESENT_REQUEST: [u8; 8] = [
    0x02,
    SID_TESTER_PRESENT,
    SUPPRESS_POSITIVE_RESPONSE,
    0x00,
    0x00,
    0x00,
    0x00,
    0x00,
];
