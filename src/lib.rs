//! A lightweight in-memory hierarchical virtual file system for Rust.
//! Models POSIX-like path semantics entirely in process memory, with no
//! backing storage device. Ideal for testing, sandboxed tooling, and
//! embedding a namespace into an application.
//!
//! ### Overview
//!
//! `treefs-kit` lets you build, navigate and reshape filesystem-like
//! structures without ever touching the disk. The whole tree lives in an
//! arena owned by [`TreeFS`]; paths (`/`, `.`, `..`, relative, absolute,
//! repeated slashes) resolve the way a shell would resolve them.
//!
//! **Key ideas**:
//! - **Pure in-memory**: no I/O, no persistence; drop the value and the
//!   tree is gone.
//! - **Auto-vivification**: creating `a/b/c` creates every missing
//!   directory on the way.
//! - **Safe reshaping**: recursive move and copy with target
//!   disambiguation, name de-duplication (`x` → `x_1`) and cycle guards.
//! - **Typed errors**: every failure is an [`FsError`] the caller can
//!   match on; the engine itself never prints or logs.
//! - **Testability**: use it in unit tests to simulate a filesystem
//!   without side effects.

mod core;
mod vfs;

pub use crate::core::{FsError, Result};
pub use crate::vfs::{Node, NodeId, NodeKind, TreeFS, split_dir_and_name};
