//! Adapters turning callback-style functions into functions that return
//! futures. A callback-style function takes a completion callback as its last
//! argument and reports its outcome by invoking it as
//! `callback(error, results...)`.
//!
//! Native Rust functions are adapted with [`adapt`] and [`adapt_with`], while
//! JavaScript functions are adapted with the [`js`] module.

#![warn(missing_docs)]

extern crate self as waitforme;

#[doc(hidden)]
#[cfg(feature = "js")]
pub use js_sys;
#[doc(hidden)]
#[cfg(feature = "js")]
pub use wasm_bindgen;
#[doc(hidden)]
#[cfg(feature = "js")]
pub use wasm_bindgen_futures;
#[doc(hidden)]
#[cfg(feature = "log")]
pub use web_sys;

#[macro_use]
mod macros;

pub mod pending;

pub mod callback;

pub mod adapt;

#[cfg(feature = "js")]
pub mod js;

#[cfg(feature = "log")]
pub use waitforme_macros::console;

pub use adapt::{adapt, adapt_with, Adapted};
pub use callback::{Callback, Results};
pub use pending::{Abandoned, Guarded, Pending, State};
