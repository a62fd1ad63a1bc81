mod template;

pub use template::{LoadError, SaveError, Template};
