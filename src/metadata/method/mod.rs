//! Method signatures, method bodies and exception tables.
//!
//! # Key Components
//!
//! - [`MethodDesc`] - Signature of a method (parameters, return type, flags, defaults)
//! - [`MethodBody`] - Body of a method (stack sizing, code, exception handlers, activation traits)
//! - [`ExceptionInfo`] - One try/catch region of a body
//!
//! Signatures and bodies are stored in separate tables. Each body names the signature it
//! implements, and the signature records the body's table position once it is decoded; native
//! and interface methods never get a body.

mod body;
mod exceptions;
mod signature;

pub use body::MethodBody;
pub use exceptions::ExceptionInfo;
pub use signature::{MethodDesc, MethodFlags};
