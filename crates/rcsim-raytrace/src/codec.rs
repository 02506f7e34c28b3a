//! Raw byte buffers to and from record slices.

use bytemuck::Pod;
use thiserror::Error;

/// Errors reading record buffers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// Buffer length is not a whole number of records.
    #[error("buffer of {len} bytes is not a multiple of the {record_size}-byte record size")]
    Misaligned {
        /// Buffer length in bytes.
        len: usize,
        /// Size of one record in bytes.
        record_size: usize,
    },
}

/// Decode a packed buffer of `T` records.
///
/// `bytes` need not be aligned; each record is copied out.
pub fn decode_records<T: Pod>(bytes: &[u8]) -> Result<Vec<T>, RecordError> {
    let record_size = std::mem::size_of::<T>();
    if record_size == 0 || bytes.len() % record_size != 0 {
        return Err(RecordError::Misaligned {
            len: bytes.len(),
            record_size,
        });
    }
    Ok(bytes
        .chunks_exact(record_size)
        .map(bytemuck::pod_read_unaligned)
        .collect())
}

/// Pack records into their raw byte layout.
pub fn encode_records<T: Pod>(records: &[T]) -> Vec<u8> {
    bytemuck::cast_slice(records).to_vec()
}
