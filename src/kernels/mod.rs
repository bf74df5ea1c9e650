//! Pure, synchronous, CPU-bound transform kernels. Nothing in this module
//! touches the filesystem; all blocking I/O happens at component boundaries.

pub mod deflate;
pub mod delta;
