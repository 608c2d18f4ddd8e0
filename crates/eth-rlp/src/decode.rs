use crate::config::RlpConfig;
use crate::encode::{LIST_OFFSET, SHORT_PAYLOAD_MAX, STRING_OFFSET};
use crate::error::RlpError;
use crate::item::RlpItem;

/// Bounds-checked cursor over an input buffer.
#[derive(Debug, Clone)]
pub struct RlpReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> RlpReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn read_u8(&mut self) -> Result<u8, RlpError> {
        let bytes = self.read_n_bytes(1)?;
        Ok(bytes[0])
    }

    /// Consumes exactly `n` bytes.
    pub fn read_n_bytes(&mut self, n: usize) -> Result<&'a [u8], RlpError> {
        if n > self.remaining() {
            return Err(RlpError::TruncatedInput {
                needed: n,
                remaining: self.remaining(),
            });
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }
}

/// A decoded item prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub list: bool,
    pub payload_length: usize,
    /// Set for a single byte below 0x80, which is its own payload.
    pub single_byte: Option<u8>,
}

impl Header {
    /// Reads one prefix from `reader`, leaving the cursor at the payload.
    ///
    /// With `strict` set, encodings a canonical encoder would never emit are
    /// rejected.
    pub fn decode(reader: &mut RlpReader<'_>, strict: bool) -> Result<Self, RlpError> {
        let prefix = reader.read_u8()?;

        let header = match prefix {
            0x00..=0x7f => Header {
                list: false,
                payload_length: 1,
                single_byte: Some(prefix),
            },
            0x80..=0xb7 => Header {
                list: false,
                payload_length: usize::from(prefix - STRING_OFFSET),
                single_byte: None,
            },
            0xb8..=0xbf => Header {
                list: false,
                payload_length: read_long_length(reader, prefix - 0xb7, strict)?,
                single_byte: None,
            },
            0xc0..=0xf7 => Header {
                list: true,
                payload_length: usize::from(prefix - LIST_OFFSET),
                single_byte: None,
            },
            0xf8..=0xff => Header {
                list: true,
                payload_length: read_long_length(reader, prefix - 0xf7, strict)?,
                single_byte: None,
            },
        };

        if header.payload_length > reader.remaining() && header.single_byte.is_none() {
            return Err(RlpError::TruncatedInput {
                needed: header.payload_length,
                remaining: reader.remaining(),
            });
        }

        Ok(header)
    }
}

/// Reads the big-endian length that follows a long-form prefix.
fn read_long_length(
    reader: &mut RlpReader<'_>,
    len_of_len: u8,
    strict: bool,
) -> Result<usize, RlpError> {
    let len_bytes = reader.read_n_bytes(usize::from(len_of_len))?;

    if strict && len_bytes[0] == 0 {
        log::debug!("rejecting RLP length with leading zero byte");
        return Err(RlpError::NonCanonical("length has a leading zero byte".into()));
    }

    let significant = match len_bytes.iter().position(|&b| b != 0) {
        Some(start) => &len_bytes[start..],
        None => &[][..],
    };
    if significant.len() > std::mem::size_of::<usize>() {
        return Err(RlpError::LengthOverflow);
    }
    let length = significant
        .iter()
        .fold(0usize, |acc, &b| (acc << 8) | usize::from(b));

    if strict && length <= SHORT_PAYLOAD_MAX {
        log::debug!("rejecting RLP long form for {length}-byte payload");
        return Err(RlpError::NonCanonical(format!(
            "long form used for {length}-byte payload"
        )));
    }

    Ok(length)
}

/// Configurable RLP decoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct RlpDecoder {
    config: RlpConfig,
}

impl RlpDecoder {
    pub fn new(config: RlpConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RlpConfig {
        &self.config
    }

    /// Decodes consecutive items until `data` is exhausted.
    pub fn decode(&self, data: &[u8]) -> Result<Vec<RlpItem>, RlpError> {
        self.decode_sequence(data, 0)
    }

    /// Decodes exactly one item and rejects trailing bytes.
    pub fn decode_exact(&self, data: &[u8]) -> Result<RlpItem, RlpError> {
        let mut reader = RlpReader::new(data);
        let item = self.decode_item(&mut reader, 0)?;
        if !reader.is_empty() {
            return Err(RlpError::TrailingData(reader.remaining()));
        }
        Ok(item)
    }

    fn decode_sequence(&self, data: &[u8], depth: usize) -> Result<Vec<RlpItem>, RlpError> {
        let mut reader = RlpReader::new(data);
        let mut items = Vec::new();
        while !reader.is_empty() {
            items.push(self.decode_item(&mut reader, depth)?);
        }
        Ok(items)
    }

    fn decode_item(&self, reader: &mut RlpReader<'_>, depth: usize) -> Result<RlpItem, RlpError> {
        let header = Header::decode(reader, self.config.strict)?;

        if let Some(byte) = header.single_byte {
            return Ok(RlpItem::Bytes(vec![byte]));
        }

        let payload = reader.read_n_bytes(header.payload_length)?;

        if header.list {
            if depth >= self.config.max_depth {
                return Err(RlpError::DepthExceeded(self.config.max_depth));
            }
            return self
                .decode_sequence(payload, depth + 1)
                .map(RlpItem::List);
        }

        if self.config.strict && payload.len() == 1 && payload[0] < STRING_OFFSET {
            log::debug!("rejecting RLP single byte {:#04x} with string prefix", payload[0]);
            return Err(RlpError::NonCanonical(format!(
                "single byte {:#04x} must not carry a prefix",
                payload[0]
            )));
        }

        Ok(RlpItem::Bytes(payload.to_vec()))
    }
}

/// Decodes consecutive items with the default (canonical-only) settings.
pub fn decode(data: &[u8]) -> Result<Vec<RlpItem>, RlpError> {
    RlpDecoder::default().decode(data)
}

/// Decodes exactly one item with the default (canonical-only) settings.
pub fn decode_exact(data: &[u8]) -> Result<RlpItem, RlpError> {
    RlpDecoder::default().decode_exact(data)
}
