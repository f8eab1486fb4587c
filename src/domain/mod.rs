mod swap;
pub use swap::*;

mod translate;
pub use translate::*;
