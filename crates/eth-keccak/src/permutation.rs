/// Number of rounds in Keccak-f[1600].
pub const ROUNDS: usize = 24;

/// Iota round constants.
const ROUND_CONSTANTS: [u64; ROUNDS] = [
    0x0000_0000_0000_0001,
    0x0000_0000_0000_8082,
    0x8000_0000_0000_808a,
    0x8000_0000_8000_8000,
    0x0000_0000_0000_808b,
    0x0000_0000_8000_0001,
    0x8000_0000_8000_8081,
    0x8000_0000_0000_8009,
    0x0000_0000_0000_008a,
    0x0000_0000_0000_0088,
    0x0000_0000_8000_8009,
    0x0000_0000_8000_000a,
    0x0000_0000_8000_808b,
    0x8000_0000_0000_008b,
    0x8000_0000_0000_8089,
    0x8000_0000_0000_8003,
    0x8000_0000_0000_8002,
    0x8000_0000_0000_0080,
    0x0000_0000_0000_800a,
    0x8000_0000_8000_000a,
    0x8000_0000_8000_8081,
    0x8000_0000_0000_8080,
    0x0000_0000_8000_0001,
    0x8000_0000_8000_8008,
];

/// Rho rotation offsets, indexed by lane position `x + 5 * y`.
const ROTATION_OFFSETS: [u32; 25] = [
    0, 1, 62, 28, 27, // y = 0
    36, 44, 6, 55, 20, // y = 1
    3, 10, 43, 25, 39, // y = 2
    41, 45, 15, 21, 8, // y = 3
    18, 2, 61, 56, 14, // y = 4
];

/// Applies the 24-round Keccak-f[1600] permutation in place.
///
/// Lane `(x, y)` of the 5x5 state lives at index `x + 5 * y`.
pub fn keccak_f1600(state: &mut [u64; 25]) {
    for round_constant in ROUND_CONSTANTS {
        // Theta
        let mut columns = [0u64; 5];
        for x in 0..5 {
            columns[x] = state[x] ^ state[x + 5] ^ state[x + 10] ^ state[x + 15] ^ state[x + 20];
        }
        for x in 0..5 {
            let correction = columns[(x + 4) % 5] ^ columns[(x + 1) % 5].rotate_left(1);
            for y in 0..5 {
                state[x + 5 * y] ^= correction;
            }
        }

        // Rho and pi: B[y, 2x + 3y] = rotl(A[x, y], r[x, y])
        let mut moved = [0u64; 25];
        for x in 0..5 {
            for y in 0..5 {
                let from = x + 5 * y;
                let to = y + 5 * ((2 * x + 3 * y) % 5);
                moved[to] = state[from].rotate_left(ROTATION_OFFSETS[from]);
            }
        }

        // Chi
        for y in 0..5 {
            let row = 5 * y;
            for x in 0..5 {
                state[row + x] =
                    moved[row + x] ^ (!moved[row + (x + 1) % 5] & moved[row + (x + 2) % 5]);
            }
        }

        // Iota
        state[0] ^= round_constant;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permutation_of_zero_state_matches_reference() {
        // First lanes of Keccak-f[1600] applied to the all-zero state, from the
        // Keccak team's intermediate values.
        let mut state = [0u64; 25];
        keccak_f1600(&mut state);

        assert_eq!(state[0], 0xf125_8f79_40e1_dde7);
        assert_eq!(state[1], 0x84d5_ccf9_33c0_478a);
    }

    #[test]
    fn permutation_is_deterministic() {
        let mut a = [0x0123_4567_89ab_cdefu64; 25];
        let mut b = a;
        keccak_f1600(&mut a);
        keccak_f1600(&mut b);
        assert_eq!(a, b);
    }

    #[test]
    fn permutation_changes_every_lane() {
        let mut state = [0u64; 25];
        state[0] = 1;
        keccak_f1600(&mut state);
        assert!(state.iter().all(|&lane| lane != 0));
    }

    #[test]
    fn pi_moves_lanes_to_distinct_positions() {
        // Pi must move every position to a distinct destination.
        let mut seen = [false; 25];
        for x in 0..5 {
            for y in 0..5 {
                let to = y + 5 * ((2 * x + 3 * y) % 5);
                assert!(!seen[to], "pi maps two lanes to {to}");
                seen[to] = true;
            }
        }
        assert_eq!(ROTATION_OFFSETS[0], 0);
    }
}
