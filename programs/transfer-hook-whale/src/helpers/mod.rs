pub mod hook;
pub mod policy;

pub use hook::*;
pub use policy::*;
