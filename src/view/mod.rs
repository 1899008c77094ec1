pub mod index;
pub mod rounds;

pub use index::*;
pub use rounds::*;
