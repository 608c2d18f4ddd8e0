use crate::item::RlpItem;

/// Prefix offset for byte strings.
pub(crate) const STRING_OFFSET: u8 = 0x80;

/// Prefix offset for lists.
pub(crate) const LIST_OFFSET: u8 = 0xc0;

/// Longest payload that still uses the single-byte short form.
pub(crate) const SHORT_PAYLOAD_MAX: usize = 55;

/// Encodes a single item (which may be a list) into canonical RLP.
pub fn encode(item: &RlpItem) -> Vec<u8> {
    let mut out = Vec::with_capacity(item.encoded_len());
    item.encode_into(&mut out);
    out
}

/// Encodes `items` as one top-level list.
///
/// An empty slice encodes as `0xc0`.
pub fn encode_list(items: &[RlpItem]) -> Vec<u8> {
    let payload_len = list_payload_len(items);
    let mut out = Vec::with_capacity(header_len(payload_len) + payload_len);
    write_header(&mut out, LIST_OFFSET, payload_len);
    for item in items {
        item.encode_into(&mut out);
    }
    out
}

impl RlpItem {
    /// Number of bytes [`encode`] produces for this item.
    pub fn encoded_len(&self) -> usize {
        match self {
            RlpItem::Bytes(bytes) if is_single_byte(bytes) => 1,
            RlpItem::Bytes(bytes) => header_len(bytes.len()) + bytes.len(),
            RlpItem::List(items) => {
                let payload_len = list_payload_len(items);
                header_len(payload_len) + payload_len
            }
        }
    }

    /// Appends the canonical encoding of this item to `out`.
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        match self {
            RlpItem::Bytes(bytes) if is_single_byte(bytes) => out.push(bytes[0]),
            RlpItem::Bytes(bytes) => {
                write_header(out, STRING_OFFSET, bytes.len());
                out.extend_from_slice(bytes);
            }
            RlpItem::List(items) => {
                write_header(out, LIST_OFFSET, list_payload_len(items));
                for item in items {
                    item.encode_into(out);
                }
            }
        }
    }
}

fn list_payload_len(items: &[RlpItem]) -> usize {
    items.iter().map(RlpItem::encoded_len).sum()
}

/// A lone byte below 0x80 is its own encoding.
fn is_single_byte(bytes: &[u8]) -> bool {
    bytes.len() == 1 && bytes[0] < STRING_OFFSET
}

fn header_len(payload_len: usize) -> usize {
    if payload_len <= SHORT_PAYLOAD_MAX {
        1
    } else {
        1 + length_bytes(payload_len).len()
    }
}

/// Writes a short (`offset + len`) or long (`offset + 55 + len_of_len, len`)
/// header.
fn write_header(out: &mut Vec<u8>, offset: u8, payload_len: usize) {
    if payload_len <= SHORT_PAYLOAD_MAX {
        out.push(offset + payload_len as u8);
    } else {
        let len_bytes = length_bytes(payload_len);
        out.push(offset + SHORT_PAYLOAD_MAX as u8 + len_bytes.len() as u8);
        out.extend_from_slice(len_bytes.as_slice());
    }
}

/// Minimal big-endian representation of a length.
struct LengthBytes {
    buf: [u8; 8],
    start: usize,
}

impl LengthBytes {
    fn as_slice(&self) -> &[u8] {
        &self.buf[self.start..]
    }

    fn len(&self) -> usize {
        self.buf.len() - self.start
    }
}

fn length_bytes(len: usize) -> LengthBytes {
    let buf = (len as u64).to_be_bytes();
    let start = buf.iter().position(|&b| b != 0).unwrap_or(buf.len());
    LengthBytes { buf, start }
}
