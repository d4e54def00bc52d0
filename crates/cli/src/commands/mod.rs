pub mod baseline;
pub mod compare;
pub mod inspect;
pub mod util;
pub mod validate;

pub use baseline::*;
pub use compare::*;
pub use inspect::*;
pub use util::*;
pub use validate::*;
