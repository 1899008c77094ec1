pub mod attributes;
pub mod clock;
pub mod round;
pub mod utils;

pub use attributes::*;
pub use clock::*;
pub use round::*;
pub use utils::*;
