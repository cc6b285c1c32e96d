//! This module defines macros.

/// Internal diagnostics, forwarded to the console as debug messages.
#[cfg(all(feature = "log", target_arch = "wasm32"))]
macro_rules! trace {
    ($($arguments:tt)*) => {
        $crate::console_debug!("waitforme:", $($arguments)*)
    };
}

// Without a console to write into, diagnostics are discarded.
#[cfg(not(all(feature = "log", target_arch = "wasm32")))]
macro_rules! trace {
    ($($arguments:tt)*) => {
        ()
    };
}

/// Writes a debug message to the JavaScript console, where adapted
/// invocations report their diagnostics. Syntax:
/// ```ignore
/// console_debug!($($arguments),*)
/// ```
/// Each argument is converted into a `JsValue` using `From`.
///
/// # Examples
///
/// ```no_run
/// use waitforme::console_debug;
/// # fn main() {
/// let pending_calls = 2u32;
/// console_debug!("adapted calls still pending:", pending_calls);
/// # }
/// ```
#[cfg(feature = "log")]
#[macro_export]
macro_rules! console_debug {
    ($($arguments:tt)*) => {
        $crate::console!(debug; $($arguments)*)
    };
}

/// Writes an informational message to the JavaScript console, e.g. the value
/// an adapted invocation settled with. Syntax:
/// ```ignore
/// console_info!($($arguments),*)
/// ```
/// Each argument is converted into a `JsValue` using `From`.
///
/// # Examples
///
/// ```no_run
/// use wasm_bindgen::JsValue;
/// use waitforme::console_info;
/// # fn main() {
/// let settled = JsValue::from("file contents");
/// console_info!("read settled with", settled);
/// # }
/// ```
#[cfg(feature = "log")]
#[macro_export]
macro_rules! console_info {
    ($($arguments:tt)*) => {
        $crate::console!(info; $($arguments)*)
    };
}
