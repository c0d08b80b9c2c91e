//! Exact factorials for the Poisson pmf.

pub trait Factorial {
    fn get(&self, n: u8) -> u128;
}

/// Largest `n` for which `n!` fits in a `u128`. The longest totals line needs `14!`.
pub const MAX_N: u8 = 34;

/// Factorials of `0..=MAX_N`, tabulated once on construction.
#[derive(Debug, Clone)]
pub struct Lookup {
    table: [u128; MAX_N as usize + 1],
}
impl Factorial for Lookup {
    /// Panics if `n` exceeds [`MAX_N`].
    #[inline]
    fn get(&self, n: u8) -> u128 {
        self.table[n as usize]
    }
}

impl Default for Lookup {
    fn default() -> Self {
        let mut table = [1u128; MAX_N as usize + 1];
        for n in 2..table.len() {
            table[n] = n as u128 * table[n - 1];
        }
        Self { table }
    }
}
