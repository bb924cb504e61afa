//! Remote side of an invocation: where the job lives and how files get there.

pub mod hdfs;
pub mod namespace;
pub mod upload;

#[cfg(test)]
pub mod testing;

pub use hdfs::{HadoopCli, RemoteFs};
pub use namespace::Namespace;
pub use upload::{reset_working_dir, upload_dir};
