mod catalog;
mod clock;
mod navigation;
mod record;

pub use catalog::*;
pub use clock::*;
pub use navigation::*;
pub use record::*;
