//! Optional structured logging.
//!
//! With the `tracing` feature the macro forwards to `tracing::trace!` and
//! accepts its field syntax; without it every call compiles to nothing.

#[cfg(feature = "tracing")]
macro_rules! trace {
    ($($arg:tt)*) => {
        ::tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace {
    ($($arg:tt)*) => {};
}
