pub mod seqio;

pub use seqio::{BoundaryMode, InputMode, ReadOptions, Record, WriteOptions};
