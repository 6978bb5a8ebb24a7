// Root confinement for every client supplied path

pub mod resolver;

pub use resolver::{ResolvedPath, VirtualRoot};
