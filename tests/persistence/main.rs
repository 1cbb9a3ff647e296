//! Durable-tier integration tests over the file system.

mod support;
