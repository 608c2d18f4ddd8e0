use crate::permutation::keccak_f1600;

/// Sponge rate in bytes (1088 bits). Capacity is the remaining 512 bits.
pub const RATE: usize = 136;

/// Digest length in bytes.
pub const OUTPUT_LEN: usize = 32;

/// Lanes absorbed per block.
const RATE_LANES: usize = RATE / 8;

/// Keccak-256 of the empty string.
pub const KECCAK_EMPTY: [u8; OUTPUT_LEN] = [
    0xc5, 0xd2, 0x46, 0x01, 0x86, 0xf7, 0x23, 0x3c, 0x92, 0x7e, 0x7d, 0xb2, 0xdc, 0xc7, 0x03, 0xc0,
    0xe5, 0x00, 0xb6, 0x53, 0xca, 0x82, 0x27, 0x3b, 0x7b, 0xfa, 0xd8, 0x04, 0x5d, 0x85, 0xa4, 0x70,
];

/// Incremental Keccak-256 hasher.
///
/// Input may be fed in any number of [`update`](Self::update) calls; the
/// digest only depends on the concatenated bytes.
#[derive(Clone)]
pub struct Keccak256 {
    state: [u64; 25],
    buffer: [u8; RATE],
    buffered: usize,
}

impl Default for Keccak256 {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Keccak256 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Keccak256")
            .field("buffered", &self.buffered)
            .finish_non_exhaustive()
    }
}

impl Keccak256 {
    /// Creates a hasher with an all-zero sponge state.
    pub fn new() -> Self {
        Self {
            state: [0u64; 25],
            buffer: [0u8; RATE],
            buffered: 0,
        }
    }

    /// Absorbs `data` into the sponge.
    pub fn update(&mut self, data: impl AsRef<[u8]>) {
        let mut input = data.as_ref();

        // Top up a partially filled block first.
        if self.buffered > 0 {
            let take = input.len().min(RATE - self.buffered);
            self.buffer[self.buffered..self.buffered + take].copy_from_slice(&input[..take]);
            self.buffered += take;
            input = &input[take..];

            if self.buffered < RATE {
                return;
            }
            let block = self.buffer;
            self.absorb_block(&block);
            self.buffered = 0;
        }

        let mut blocks = input.chunks_exact(RATE);
        for chunk in &mut blocks {
            let mut block = [0u8; RATE];
            block.copy_from_slice(chunk);
            self.absorb_block(&block);
        }

        let rest = blocks.remainder();
        self.buffer[..rest.len()].copy_from_slice(rest);
        self.buffered = rest.len();
    }

    /// Pads the final block, runs the last permutation and squeezes the digest.
    pub fn finalize(mut self) -> [u8; OUTPUT_LEN] {
        let mut block = [0u8; RATE];
        block[..self.buffered].copy_from_slice(&self.buffer[..self.buffered]);

        // Keccak pad10*1: domain byte 0x01, then the final bit in the last byte.
        block[self.buffered] ^= 0x01;
        block[RATE - 1] |= 0x80;
        self.absorb_block(&block);

        let mut digest = [0u8; OUTPUT_LEN];
        for (lane, out) in self.state.iter().zip(digest.chunks_exact_mut(8)) {
            out.copy_from_slice(&lane.to_le_bytes());
        }
        digest
    }

    fn absorb_block(&mut self, block: &[u8; RATE]) {
        for (lane, word) in self.state[..RATE_LANES]
            .iter_mut()
            .zip(block.chunks_exact(8))
        {
            let mut bytes = [0u8; 8];
            bytes.copy_from_slice(word);
            *lane ^= u64::from_le_bytes(bytes);
        }
        keccak_f1600(&mut self.state);
    }
}

/// Returns the 32-byte Keccak-256 digest of `message`.
pub fn keccak256(message: impl AsRef<[u8]>) -> [u8; OUTPUT_LEN] {
    let mut hasher = Keccak256::new();
    hasher.update(message);
    hasher.finalize()
}

/// Returns the Keccak-256 digest of `message` as 64 lowercase hex characters
/// (no `0x` prefix).
pub fn keccak256_hex(message: impl AsRef<[u8]>) -> String {
    hex::encode(keccak256(message))
}
