//! Declarative macros for ergonomic effect construction
//!
//! These macros reduce boilerplate when creating `Effect` variants, in
//! particular for async loaders and one-shot UI notifications.

/// Create an `Effect::Future` from an async block
///
/// # Example
///
/// ```rust,ignore
/// use checklist_core::async_effect;
///
/// async_effect! {
///     let items = provider.fetch_items().await.ok()?;
///     Some(AgreementAction::ItemsLoaded { items })
/// }
/// ```
#[macro_export]
macro_rules! async_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(
            ::std::boxed::Box::pin(async move { $($body)* })
        )
    };
}

/// Create an `Effect::Future` that publishes a one-shot notification
///
/// The emitter is cloned into the effect, so the reducer only needs a
/// reference to it. The effect never feeds an action back.
///
/// # Example
///
/// ```rust,ignore
/// use checklist_core::emit;
///
/// emit! {
///     emitter: env.effects,
///     value: AgreementEffect::ShowToast { message }
/// }
/// ```
#[macro_export]
macro_rules! emit {
    (
        emitter: $emitter:expr,
        value: $value:expr
    ) => {{
        let emitter = ::std::clone::Clone::clone(&$emitter);
        let value = $value;
        $crate::effect::Effect::Future(::std::boxed::Box::pin(async move {
            emitter.emit(value);
            ::std::option::Option::None
        }))
    }};
}
