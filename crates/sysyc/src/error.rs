//! Compiler-wide error type.
//!
//! One variant per fatal condition the front end or back end can hit. All of
//! them are unrecoverable: the compiler does not attempt error recovery, it
//! reports and stops (see the error table in the design notes).

use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias used throughout the library.
pub type Result<T> = std::result::Result<T, CompileError>;

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("redefinition of `{name}` in block {block_id}")]
    Redefinition { name: String, block_id: u32 },

    #[error("use of undefined identifier `{name}`")]
    Undefined { name: String },

    #[error("cannot assign to const `{name}`")]
    AssignToConst { name: String },

    #[error("malformed source at line {line}: {message}")]
    ParseShape { line: usize, message: String },

    #[error("unsupported operator `{op}`")]
    UnsupportedOp { op: String },

    #[error("temporary virtual register pool exhausted (limit {limit})")]
    TempExhausted { limit: usize },

    #[error("division by zero while constant-folding `{lhs} {op} {rhs}`")]
    ConstDivByZero { lhs: i32, op: &'static str, rhs: i32 },

    #[error("malformed IR text at line {line}: {message}")]
    IrParseShape { line: usize, message: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
