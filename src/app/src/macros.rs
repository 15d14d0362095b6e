/// Macro for model field updates with automatic rendering.
/// Supports both single and multiple field updates.
///
/// # Examples
///
/// Single field update:
/// ```ignore
/// update_field!(model.error_message, None)
/// ```
///
/// Multiple field updates:
/// ```ignore
/// update_field!(
///     model.is_connected, false;
///     model.error_message, Some(message)
/// )
/// ```
#[macro_export]
macro_rules! update_field {
    // Multiple field updates (must come first to match the pattern)
    ($($model_field:expr, $value:expr);+ $(;)?) => {{
        let mut changed = false;
        $(
            let value = $value;
            if $model_field != value {
                $model_field = value;
                changed = true;
            }
        )+
        if changed {
            crux_core::render::render()
        } else {
            crux_core::Command::done()
        }
    }};

    // Single field update
    ($model_field:expr, $value:expr) => {{
        update_field!($model_field, $value;)
    }};
}

/// Macro for handlers that need a loaded configuration snapshot.
///
/// Binds the store mutably and runs the body; before the first snapshot
/// arrived the operator gets a validation error instead.
///
/// ```ignore
/// with_store!(model, |store| {
///     store.working_mut().sys_name = name;
///     crux_core::render::render()
/// })
/// ```
#[macro_export]
macro_rules! with_store {
    ($model:expr, |$store:ident| $body:block) => {
        match $model.store.as_mut() {
            Some($store) => $body,
            None => $model.fail($crate::error::ChannelError::not_loaded()),
        }
    };
}
