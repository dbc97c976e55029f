//! Randomness seam for IV generation.

use rand::RngCore;

/// A source of uniformly distributed bytes.
///
/// Consumed for IV generation: CBC needs unpredictable IVs, OCB needs
/// unique ones. The trait does not police the quality of implementations;
/// callers choose the source. Filling may block, e.g. when the operating
/// system gathers entropy.
pub trait RandomSource {
    /// Fills `out` with uniform bytes.
    fn fill(&mut self, out: &mut [u8]);
}

/// Every `rand` RNG is usable directly, `OsRng` included.
impl<R: RngCore> RandomSource for R {
    fn fill(&mut self, out: &mut [u8]) {
        self.fill_bytes(out);
    }
}
