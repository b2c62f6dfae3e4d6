//! Class-file parsing and a bytecode interpreter core, meant to be embedded by a host that
//! supplies the heap, classloading, and method dispatch around it.
#![deny(unused_must_use)]

#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate log;

pub mod class;
pub mod error;
pub mod interpreter;
pub mod reader;

pub use class::{load, ClassInfo};
pub use error::{ExecError, ParseError};
pub use interpreter::{execute, Context, Frame, Host, Word};
