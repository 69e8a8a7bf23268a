//! The indexing engine: two deliberately different normalizations.
//!
//! - [`ratio`] indexes *level* series (AUM, sales, prices, net worth) by
//!   simple ratio to a base value: `100 * v[i] / v[base]`. Invalid points
//!   stay present in the output as nulls (or zeros, by policy).
//! - [`compound`] indexes *return* series by geometric compounding:
//!   `level_t = level_(t-1) * (1 + r_t / 100)`. Invalid points are omitted
//!   from the output entirely and leave the running level untouched.
//!
//! The gap semantics differ on purpose and must stay different: a level
//! observation is meaningful on its own, so a bad one becomes a visible gap;
//! a return observation only exists relative to its neighbor, so a bad one
//! simply contributes nothing to the accumulation.

pub mod compound;
pub mod ratio;

pub use compound::{build_total_return_index, rebase};
pub use ratio::index_levels;
