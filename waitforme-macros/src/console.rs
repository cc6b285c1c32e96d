use proc_macro2::{Ident, TokenStream};
use quote::quote;
use syn::{
    parse::{Parse, ParseStream},
    token,
    Expr,
};

/// Console methods that accept a variadic array of values.
const METHODS: &[&str] = &["log", "debug", "info", "warn", "error"];

#[derive(Debug, Clone)]
pub struct Input {
    pub method: Ident,
    pub arguments: Vec<Expr>,
}

impl Parse for Input {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let method: Ident = input.parse()?;
        if !METHODS.iter().any(|known| method == known) {
            return Err(syn::Error::new(
                method.span(),
                format!(
                    "unknown console method `{}`, expected one of: {}",
                    method,
                    METHODS.join(", ")
                ),
            ));
        }
        let mut arguments = Vec::new();
        if input.peek(token::Semi) {
            input.parse::<token::Semi>()?;
            arguments.extend(
                input.parse_terminated(Expr::parse, token::Comma)?.into_iter(),
            );
        }
        Ok(Self { method, arguments })
    }
}

impl Input {
    pub fn expand(&self) -> TokenStream {
        let method = &self.method;
        let pushes = self.arguments.iter().map(|argument| {
            quote! {
                arguments.push(
                    &::waitforme::wasm_bindgen::JsValue::from(#argument)
                );
            }
        });
        quote! {
            {
                let arguments = ::waitforme::js_sys::Array::new();
                #(#pushes)*
                ::waitforme::web_sys::console::#method(&arguments);
            }
        }
    }
}
