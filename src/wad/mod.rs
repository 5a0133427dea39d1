mod read;
mod repr;
mod writer;

pub use read::directory;
pub use repr::{Entry, EntryConfig, Head, MAGIC};
pub use writer::{Mode, WadWriter};

#[cfg(test)]
mod repr_test;
