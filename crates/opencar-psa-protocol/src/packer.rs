//! Two-pass encode that fills a checksum field.

use opencar_can_common::{CodecResult, EncodedMessage, SignalCodec, SignalValues};
use tracing::trace;

use crate::checksum::{ChecksumTable, checksum, mask_checksum_nibble};

/// Encode `values` as `message` with `checksum_signal` filled in.
///
/// The message is packed once with the checksum blank. The nibbles of the
/// target field and of every other checksum field the table lists for the
/// address are masked, the checksum is computed over the result using the
/// address's init value, and the message is packed again with it.
///
/// # Errors
///
/// Returns any error raised by the codec.
pub fn pack_with_checksum<C>(
    codec: &C,
    message: &str,
    mut values: SignalValues,
    checksum_signal: &str,
    table: &ChecksumTable,
) -> CodecResult<EncodedMessage>
where
    C: SignalCodec + ?Sized,
{
    values.insert(checksum_signal.to_string(), 0.0);
    let blank = codec.encode(message, &values)?;
    let mut payload = blank.payload;
    mask_checksum_nibble(&mut payload, codec.signal_start_bit(message, checksum_signal)?);
    for field in table.masked_fields(blank.address, checksum_signal) {
        mask_checksum_nibble(&mut payload, codec.signal_start_bit(message, field)?);
    }
    let nibble = checksum(&payload, table.init_for(blank.address));
    trace!(message, nibble, "computed frame checksum");

    values.insert(checksum_signal.to_string(), f64::from(nibble));
    codec.encode(message, &values)
}
