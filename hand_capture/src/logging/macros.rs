//! Logging macros
//!
//! Context values accept anything implementing `Display`:
//!
//! ```ignore
//! log_warning!(codes::warnings::INCOMPLETE_FRAME, "Frame is missing joints",
//!     at = CellLocation::row(index),
//!     "joints" => parsed
//! );
//! ```

#[macro_export]
macro_rules! log_error {
    ($code:expr, $message:expr) => {
        $crate::logging::dispatch($crate::logging::LogEvent::error($code, $message))
    };

    ($code:expr, $message:expr, at = $location:expr) => {
        $crate::logging::dispatch(
            $crate::logging::LogEvent::error($code, $message).with_location($location),
        )
    };

    ($code:expr, $message:expr, at = $location:expr, $($key:expr => $value:expr),+ $(,)?) => {{
        let mut event = $crate::logging::LogEvent::error($code, $message).with_location($location);
        $(event = event.with_context($key, &format!("{}", $value));)+
        $crate::logging::dispatch(event)
    }};

    ($code:expr, $message:expr, $($key:expr => $value:expr),+ $(,)?) => {{
        let mut event = $crate::logging::LogEvent::error($code, $message);
        $(event = event.with_context($key, &format!("{}", $value));)+
        $crate::logging::dispatch(event)
    }};
}

#[macro_export]
macro_rules! log_warning {
    ($code:expr, $message:expr) => {
        $crate::logging::dispatch($crate::logging::LogEvent::warning_with_code($code, $message))
    };

    ($code:expr, $message:expr, at = $location:expr) => {
        $crate::logging::dispatch(
            $crate::logging::LogEvent::warning_with_code($code, $message)
                .with_location($location),
        )
    };

    ($code:expr, $message:expr, at = $location:expr, $($key:expr => $value:expr),+ $(,)?) => {{
        let mut event = $crate::logging::LogEvent::warning_with_code($code, $message)
            .with_location($location);
        $(event = event.with_context($key, &format!("{}", $value));)+
        $crate::logging::dispatch(event)
    }};

    ($code:expr, $message:expr, $($key:expr => $value:expr),+ $(,)?) => {{
        let mut event = $crate::logging::LogEvent::warning_with_code($code, $message);
        $(event = event.with_context($key, &format!("{}", $value));)+
        $crate::logging::dispatch(event)
    }};
}

#[macro_export]
macro_rules! log_success {
    ($code:expr, $message:expr) => {
        $crate::logging::dispatch($crate::logging::LogEvent::success($code, $message))
    };

    ($code:expr, $message:expr, $($key:expr => $value:expr),+ $(,)?) => {{
        let mut event = $crate::logging::LogEvent::success($code, $message);
        $(event = event.with_context($key, &format!("{}", $value));)+
        $crate::logging::dispatch(event)
    }};
}

#[macro_export]
macro_rules! log_info {
    ($message:expr) => {
        $crate::logging::dispatch($crate::logging::LogEvent::info($message))
    };

    ($message:expr, $($key:expr => $value:expr),+ $(,)?) => {{
        let mut event = $crate::logging::LogEvent::info($message);
        $(event = event.with_context($key, &format!("{}", $value));)+
        $crate::logging::dispatch(event)
    }};
}

/// Skips building the event entirely unless debug output is enabled
#[macro_export]
macro_rules! log_debug {
    ($message:expr) => {
        if $crate::logging::debug_enabled() {
            $crate::logging::dispatch($crate::logging::LogEvent::debug($message))
        }
    };

    ($message:expr, $($key:expr => $value:expr),+ $(,)?) => {
        if $crate::logging::debug_enabled() {
            let mut event = $crate::logging::LogEvent::debug($message);
            $(event = event.with_context($key, &format!("{}", $value));)+
            $crate::logging::dispatch(event)
        }
    };
}
