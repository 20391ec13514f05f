/// Conditional logging module for development builds
///
/// The `log!` macro provides informational console logging that is compiled out
/// in production (release) builds by default. Errors and warnings go through
/// `leptos::logging::error!` and `leptos::logging::warn!` directly.
///
/// Logging is enabled when either:
/// - Building in debug mode (`cfg(debug_assertions)`)
/// - The `console_logging` feature is explicitly enabled
///
/// # Examples
///
/// ```rust
/// use train_graph::log;
///
/// let count = 3;
/// log!("Loaded {} trains", count);
/// ```
#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        #[cfg(any(debug_assertions, feature = "console_logging"))]
        {
            leptos::logging::log!($($arg)*);
        }
    };
}

pub use log;
