//! 3D Hilbert curve codec for tile addresses.
//!
//! - [`morton`]: bit interleaving of `(x, y, f)` into `u128` Morton codes
//! - [`curve`]: the Morton <-> Hilbert state machine
//! - [`tilehash`]: the `H`-prefixed string form
//!
//! Neighbouring Hilbert distances are always face-adjacent voxels, which
//! the plain tilehash does not guarantee.

pub mod curve;
pub mod morton;
pub mod tilehash;

pub use curve::{decode_3d, encode_3d};
pub use tilehash::{decode, encode, index, tile_at};
