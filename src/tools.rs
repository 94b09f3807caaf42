//! Some helper functions

/// Reflected binary Gray code over a number of bits.
///
/// Two consecutive codes differ by a single bit, which gives the ordering of the rows and columns
/// of Karnaugh maps.
///
/// ```
/// # use lokit::tools::gray_code;
/// assert_eq!(gray_code(1), vec![0, 1]);
/// assert_eq!(gray_code(2), vec![0b00, 0b01, 0b11, 0b10]);
/// ```
pub fn gray_code(bits: usize) -> Vec<usize> {
    (0..1usize << bits).map(|i| i ^ (i >> 1)).collect()
}

/// Write the lowest bits of a value, most significant first
///
/// ```
/// # use lokit::tools::bit_label;
/// assert_eq!(bit_label(0b011, 3), "011");
/// assert_eq!(bit_label(2, 0), "");
/// ```
pub fn bit_label(value: usize, bits: usize) -> String {
    (0..bits)
        .rev()
        .map(|b| match (value >> b) & 1 {
            0 => '0',
            _ => '1',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::tools::*;

    #[test]
    fn test_gray_code() {
        for bits in 0..6 {
            let codes = gray_code(bits);
            assert_eq!(codes.len(), 1 << bits);

            // all codes are distinct and neighbours differ by a single bit
            let mut sorted = codes.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), codes.len());
            for w in codes.windows(2) {
                assert_eq!((w[0] ^ w[1]).count_ones(), 1);
            }
        }
        assert_eq!(gray_code(0), vec![0]);
    }
}
