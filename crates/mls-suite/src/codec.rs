//! Length-prefixed byte vectors for the TLS presentation language.
//!
//! Structures in this crate encode their variable-length fields as
//! `opaque field<0..2^(8*N)-1>`: a big-endian length of `N` bytes followed by
//! the bytes themselves. These helpers implement that for `N` in {1, 2, 4} on
//! top of `tls_codec`'s integer codecs.

use std::io::{Read, Write};

use tls_codec::{Deserialize, Error, Serialize};

/// Width of the length prefix of an opaque vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthPrefix {
    /// `opaque<V>` with a one-byte length
    U8,
    /// `opaque<V>` with a two-byte length
    U16,
    /// `opaque<V>` with a four-byte length
    U32,
}

impl LengthPrefix {
    /// Number of bytes the prefix occupies on the wire.
    pub const fn width(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16 => 2,
            Self::U32 => 4,
        }
    }

    /// Largest payload this prefix can describe.
    pub const fn max_len(self) -> usize {
        match self {
            Self::U8 => u8::MAX as usize,
            Self::U16 => u16::MAX as usize,
            Self::U32 => u32::MAX as usize,
        }
    }

    /// Encoded size of `len` payload bytes behind this prefix.
    pub const fn encoded_len(self, len: usize) -> usize {
        self.width() + len
    }
}

/// Write `data` as an opaque vector.
pub fn write_opaque<W: Write>(
    prefix: LengthPrefix,
    data: &[u8],
    writer: &mut W,
) -> Result<usize, Error> {
    if data.len() > prefix.max_len() {
        return Err(Error::InvalidVectorLength);
    }

    let written = match prefix {
        LengthPrefix::U8 => (data.len() as u8).tls_serialize(writer)?,
        LengthPrefix::U16 => (data.len() as u16).tls_serialize(writer)?,
        LengthPrefix::U32 => (data.len() as u32).tls_serialize(writer)?,
    };

    writer.write_all(data).map_err(|e| Error::EncodingError(e.to_string()))?;

    Ok(written + data.len())
}

/// Read an opaque vector.
pub fn read_opaque<R: Read>(prefix: LengthPrefix, reader: &mut R) -> Result<Vec<u8>, Error> {
    let len = match prefix {
        LengthPrefix::U8 => usize::from(u8::tls_deserialize(reader)?),
        LengthPrefix::U16 => usize::from(u16::tls_deserialize(reader)?),
        LengthPrefix::U32 => u32::tls_deserialize(reader)? as usize,
    };

    // Grow with the input rather than trusting the declared length up front.
    let mut data = Vec::new();
    Read::take(&mut *reader, len as u64)
        .read_to_end(&mut data)
        .map_err(|e| Error::DecodingError(e.to_string()))?;
    if data.len() != len {
        return Err(Error::EndOfStream);
    }

    Ok(data)
}

/// Encode `data` as an opaque vector into a fresh buffer.
pub fn opaque_bytes(prefix: LengthPrefix, data: &[u8]) -> Result<Vec<u8>, Error> {
    let mut out = Vec::with_capacity(prefix.encoded_len(data.len()));
    write_opaque(prefix, data, &mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn u16_prefix_layout() {
        let encoded = opaque_bytes(LengthPrefix::U16, b"abc").unwrap();
        assert_eq!(encoded, vec![0x00, 0x03, b'a', b'b', b'c']);
    }

    #[test]
    fn u32_prefix_layout() {
        let encoded = opaque_bytes(LengthPrefix::U32, &[0xFF]).unwrap();
        assert_eq!(encoded, vec![0x00, 0x00, 0x00, 0x01, 0xFF]);
    }

    #[test]
    fn u8_prefix_rejects_long_vector() {
        let data = vec![0u8; 256];
        let result = opaque_bytes(LengthPrefix::U8, &data);
        assert!(matches!(result, Err(Error::InvalidVectorLength)));
    }

    #[test]
    fn empty_vector_is_only_prefix() {
        let encoded = opaque_bytes(LengthPrefix::U16, &[]).unwrap();
        assert_eq!(encoded, vec![0x00, 0x00]);
    }

    #[test]
    fn read_stops_after_declared_length() {
        let wire = [0x00, 0x02, 0xAA, 0xBB, 0xCC];
        let mut reader = wire.as_slice();

        let data = read_opaque(LengthPrefix::U16, &mut reader).unwrap();

        assert_eq!(data, vec![0xAA, 0xBB]);
        assert_eq!(reader, &[0xCC]);
    }

    #[test]
    fn truncated_payload_is_end_of_stream() {
        let wire = [0x00, 0x05, 0x01, 0x02];
        let result = read_opaque(LengthPrefix::U16, &mut wire.as_slice());
        assert!(matches!(result, Err(Error::EndOfStream)));
    }

    #[test]
    fn truncated_prefix_fails() {
        let wire = [0x00, 0x00, 0x01];
        let result = read_opaque(LengthPrefix::U32, &mut wire.as_slice());
        assert!(result.is_err());
    }

    #[test]
    fn reported_size_matches_written_bytes() {
        let mut out = Vec::new();
        let written = write_opaque(LengthPrefix::U32, &[1, 2, 3], &mut out).unwrap();
        assert_eq!(written, out.len());
        assert_eq!(written, LengthPrefix::U32.encoded_len(3));
    }
}
