pub mod sparse_hash;
pub mod torus;

pub use sparse_hash::SparseHashGrid;
pub use torus::Torus;
