use proc_macro::TokenStream;
use syn::parse_macro_input;

mod console;

/// Forwards values to a method of the JavaScript console. Syntax:
/// `console!(method; $($arguments),*)`, where `method` is one of `log`,
/// `debug`, `info`, `warn` or `error`.
#[proc_macro]
pub fn console(raw_input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(raw_input as console::Input);
    input.expand().into()
}
