//! `#[handler]` and `#[listener]`.
//!
//! Both wrap a plain function in a generated unit struct so it can be
//! registered like any other handler or listener. The message parameter is
//! always the last one; an optional context parameter may precede it.

use proc_macro::TokenStream;
use quote::quote;
use syn::{
    FnArg, Ident, ItemFn, LitStr, Token, Type, Visibility,
    parse::{Parse, ParseStream},
    parse_macro_input,
};

/// Which trait the generated struct implements.
#[derive(Clone, Copy)]
pub(crate) enum Kind {
    Handler,
    Listener,
}

impl Kind {
    fn label(self) -> &'static str {
        match self {
            Kind::Handler => "Handler",
            Kind::Listener => "Listener",
        }
    }
}

/// Arguments for the `#[handler]` and `#[listener]` macros.
pub(crate) struct EndpointArgs {
    pub name: Option<String>,
}

impl Parse for EndpointArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut name = None;

        while !input.is_empty() {
            let ident: Ident = input.parse()?;
            input.parse::<Token![=]>()?;

            match ident.to_string().as_str() {
                "name" => {
                    let lit: LitStr = input.parse()?;
                    name = Some(lit.value());
                }
                other => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown attribute: {}", other),
                    ));
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(EndpointArgs { name })
    }
}

/// Implementation shared by `#[handler]` and `#[listener]`.
pub fn endpoint_impl(kind: Kind, attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as EndpointArgs);
    let input = parse_macro_input!(item as ItemFn);

    match expand(kind, args, input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(kind: Kind, args: EndpointArgs, input: ItemFn) -> syn::Result<proc_macro2::TokenStream> {
    let fn_name = &input.sig.ident;
    let fn_vis = &input.vis;
    let label = kind.label();

    if let Some(asyncness) = &input.sig.asyncness {
        return Err(syn::Error::new_spanned(
            asyncness,
            format!("{label} function must not be async: dispatch is synchronous"),
        ));
    }

    let inputs = &input.sig.inputs;
    if inputs.is_empty() || inputs.len() > 2 {
        return Err(syn::Error::new_spanned(
            &input.sig,
            format!("{label} function must take `(message)` or `(ctx, message)`"),
        ));
    }

    let message_type = match inputs.last() {
        Some(FnArg::Typed(pat_type)) => match (&*pat_type.ty, kind) {
            (Type::Reference(r), Kind::Handler) if r.mutability.is_some() => (*r.elem).clone(),
            (Type::Reference(r), Kind::Listener) if r.mutability.is_none() => (*r.elem).clone(),
            (ty, Kind::Handler) => {
                return Err(syn::Error::new_spanned(
                    ty,
                    "Handler message argument must be a mutable reference (&mut Message)",
                ));
            }
            (ty, Kind::Listener) => {
                return Err(syn::Error::new_spanned(
                    ty,
                    "Listener event argument must be a shared reference (&Event)",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                inputs,
                format!("{label} function cannot take `self`"),
            ));
        }
    };

    let struct_name = match args.name {
        Some(ref custom_name) => Ident::new(custom_name, fn_name.span()),
        None => fn_name.clone(),
    };

    let mut inner = input.clone();
    inner.sig.ident = Ident::new("__courier_inner", fn_name.span());
    inner.vis = Visibility::Inherited;

    let call = if inputs.len() == 2 {
        quote! { __courier_inner(__ctx, __message) }
    } else {
        quote! { __courier_inner(__message) }
    };

    let implementation = match kind {
        Kind::Handler => quote! {
            impl ::courier::Handler<#message_type> for #struct_name {
                fn handle(
                    &self,
                    __ctx: &::courier::Context,
                    __message: &mut #message_type,
                ) -> ::core::result::Result<(), ::courier::BoxError> {
                    #inner
                    #call
                }
            }
        },
        Kind::Listener => quote! {
            impl ::courier::Listener<#message_type> for #struct_name {
                fn on_event(
                    &self,
                    __ctx: &::courier::Context,
                    __message: &#message_type,
                ) -> ::core::result::Result<(), ::courier::BoxError> {
                    #inner
                    #call
                }
            }
        },
    };

    Ok(quote! {
        #[allow(non_camel_case_types)]
        #[derive(Clone, Copy, Debug, Default)]
        #[doc = concat!("Auto-generated ", #label, " from `", stringify!(#fn_name), "`")]
        #fn_vis struct #struct_name;

        #implementation
    })
}
