//! Length-prefixed binary records for persisting observations.
//!
//! Each record is a little-endian `u32` byte count followed by a bincode
//! payload (serde, standard config).

use bincode::config;
use serde::{Serialize, de::DeserializeOwned};
use std::io::{Read, Write};

use crate::{encoder::Observation, errors::SerializationError};

/// Maximum allowed record size (1MB).
pub const MAX_RECORD_SIZE: usize = 1024 * 1024;

pub type Result<T> = std::result::Result<T, SerializationError>;

pub fn read_prefixed<T: DeserializeOwned, R: Read>(reader: &mut R) -> Result<T> {
    let mut len_bytes = [0; 4];
    reader.read_exact(&mut len_bytes)?;
    let len = u32::from_le_bytes(len_bytes) as usize;

    // Refuse before allocating.
    if len > MAX_RECORD_SIZE {
        return Err(SerializationError::RecordTooLarge {
            actual: len,
            max: MAX_RECORD_SIZE,
        });
    }

    let mut buf = vec![0; len];
    reader.read_exact(&mut buf)?;
    let (value, _) = bincode::serde::decode_from_slice(&buf, config::standard())?;
    Ok(value)
}

pub fn write_prefixed<T: Serialize, W: Write>(writer: &mut W, value: &T) -> Result<()> {
    let serialized = bincode::serde::encode_to_vec(value, config::standard())?;
    if serialized.len() > MAX_RECORD_SIZE {
        return Err(SerializationError::RecordTooLarge {
            actual: serialized.len(),
            max: MAX_RECORD_SIZE,
        });
    }

    // Size and payload go out in one write so a reader never sees a bare prefix.
    let size = serialized.len() as u32;
    let mut buf = Vec::from(size.to_le_bytes());
    buf.extend(serialized);
    writer.write_all(&buf)?;
    Ok(())
}

/// Read one observation record and check it against the encoder's length.
pub fn read_observation<R: Read>(reader: &mut R, expected_len: usize) -> Result<Observation> {
    let obs: Observation = read_prefixed(reader)?;
    if obs.len() != expected_len {
        return Err(SerializationError::LengthMismatch {
            expected: expected_len,
            actual: obs.len(),
        });
    }
    Ok(obs)
}
