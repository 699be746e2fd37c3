//! Procedural macros for Courier.
//!
//! - `#[derive(Message)]` - Implements `courier::Message`
//! - `#[handler]` - Turns a function into a `courier::Handler`
//! - `#[listener]` - Turns a function into a `courier::Listener`

use proc_macro::TokenStream;

mod endpoint;
mod message;

/// Derive macro for implementing the `Message` trait.
///
/// ```rust,ignore
/// #[derive(Default, courier::Message)]
/// struct GetUser {
///     id: u64,
///     name: Option<String>,
/// }
/// ```
#[proc_macro_derive(Message)]
pub fn derive_message(input: TokenStream) -> TokenStream {
    message::derive_message_impl(input)
}

/// Turns a function into a unit struct implementing `Handler<M>`.
///
/// The function takes either `(message: &mut M)` or
/// `(ctx: &Context, message: &mut M)` and returns `Result<(), BoxError>`.
///
/// ```rust,ignore
/// #[courier::handler]
/// fn get_user(query: &mut GetUser) -> Result<(), BoxError> {
///     query.name = Some("admin".into());
///     Ok(())
/// }
///
/// bus.register_handler(get_user);
/// ```
///
/// Use `#[handler(name = "GetUserHandler")]` to name the generated struct.
#[proc_macro_attribute]
pub fn handler(attr: TokenStream, item: TokenStream) -> TokenStream {
    endpoint::endpoint_impl(endpoint::Kind::Handler, attr, item)
}

/// Turns a function into a unit struct implementing `Listener<E>`.
///
/// The function takes either `(event: &E)` or `(ctx: &Context, event: &E)`
/// and returns `Result<(), BoxError>`.
#[proc_macro_attribute]
pub fn listener(attr: TokenStream, item: TokenStream) -> TokenStream {
    endpoint::endpoint_impl(endpoint::Kind::Listener, attr, item)
}
