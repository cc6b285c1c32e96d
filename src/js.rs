//! This module adapts JavaScript callback-style functions, such as the ones of
//! Node's `fs` module, into functions returning futures or JS promises.
//!
//! # Examples
//!
//! ```no_run
//! use js_sys::Function;
//! use wasm_bindgen::JsValue;
//! use waitforme::js;
//!
//! # fn main() {
//! # wasm_bindgen_futures::spawn_local(async {
//! let function = Function::new_with_args(
//!     "n, callback",
//!     "callback(n > 0 ? 'positive' : null, n === 0)",
//! );
//! let check = js::adapt_js(function);
//!
//! let resolved = check.call(&[JsValue::from(0)]).unwrap().await;
//! assert_eq!(resolved, Ok(JsValue::TRUE));
//!
//! let rejected = check.call(&[JsValue::from(2)]).unwrap().await;
//! assert_eq!(rejected, Err(JsValue::from("positive")));
//! # });
//! # }
//! ```

use crate::{
    callback::Callback,
    pending::{shared, Pending},
};
use js_sys::{Array, Function, Promise};
use wasm_bindgen::{closure::Closure, JsValue};
use wasm_bindgen_futures::future_to_promise;

/// Adapts a JS callback-style function, calling it with `this` set to
/// `undefined`.
pub fn adapt_js(function: Function) -> JsAdapted {
    adapt_js_with(function, JsValue::UNDEFINED)
}

/// Adapts a JS callback-style function, calling it with `this` set to the
/// given context, exactly as if it was called as `context.function(...)`.
pub fn adapt_js_with(function: Function, context: JsValue) -> JsAdapted {
    JsAdapted { function, context }
}

/// A JS callback-style function bound to its `this` context.
#[derive(Debug, Clone)]
pub struct JsAdapted {
    function: Function,
    context: JsValue,
}

impl JsAdapted {
    /// The wrapped function.
    pub fn function(&self) -> &Function {
        &self.function
    }

    /// The `this` context the wrapped function is called with.
    pub fn context(&self) -> &JsValue {
        &self.context
    }

    /// Calls the wrapped function with the given arguments, followed by an
    /// injected callback `(error, ...results)`. A truthy `error` rejects the
    /// returned future with `error`. Otherwise, it resolves with the first
    /// result, or `undefined` when there is none, and the remaining results are
    /// dropped.
    ///
    /// If the wrapped function throws while being called, the thrown value is
    /// returned immediately as `Err`, and it is never turned into a rejection.
    pub fn call(
        &self,
        args: &[JsValue],
    ) -> Result<Pending<JsValue, JsValue>, JsValue> {
        let arguments = args.iter().collect::<Array>();
        self.call_array(&arguments)
    }

    /// Same as [`JsAdapted::call`], but takes the arguments as a JS array. The
    /// wrapped function receives a copy of the array extended with the
    /// injected callback, and the given array is left untouched.
    pub fn call_array(
        &self,
        arguments: &Array,
    ) -> Result<Pending<JsValue, JsValue>, JsValue> {
        let (notifier, listener) = shared::channel();
        let callback = Callback::new(notifier);

        let handler = Box::new(move |error: JsValue, result: JsValue| {
            if error.is_truthy() {
                callback.reject(error);
            } else {
                callback.resolve(result);
            }
        });
        let closure =
            Closure::wrap(handler as Box<dyn FnMut(JsValue, JsValue)>)
                .into_js_value();
        let arguments = arguments.concat(&Array::of1(&closure));

        self.function.apply(&self.context, &arguments)?;
        Ok(Pending::new(listener))
    }

    /// Calls the wrapped function like [`JsAdapted::call`], but gives back a
    /// JS promise instead of a future.
    pub fn call_promise(&self, args: &[JsValue]) -> Result<Promise, JsValue> {
        Ok(self.call(args)?.into_promise())
    }
}

impl From<Function> for JsAdapted {
    fn from(function: Function) -> Self {
        adapt_js(function)
    }
}

impl Pending<JsValue, JsValue> {
    /// Converts this future into a JS promise, settled the same way.
    pub fn into_promise(self) -> Promise {
        future_to_promise(self)
    }
}
