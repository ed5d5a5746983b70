//! Error plumbing shared by every detour crate.
//!
//! Error kinds are plain `thiserror` enums; the [`err_impl!`](crate::err_impl) macro additionally
//! generates one snake_case constructor per variant which wraps the kind in an [`anyhow::Error`].
//! Callers propagate with `?` and recover the kind with `downcast_ref`.

pub use anyhow::{
    anyhow,
    bail,
    ensure,
    Error as AnyError,
};
pub use paste::paste;
pub use thiserror::Error;

/// Result alias for operations that produce nothing on success.
pub type EmptyResult = anyhow::Result<()>;

/// Declare an error enum together with `anyhow`-returning constructors for each variant.
///
/// ```ignore
/// err_impl! {FooError,
///     #[error("bad thing: {0}")]
///     BadThing(String),
/// }
///
/// let err: anyhow::Error = FooError::bad_thing("oops");
/// ```
#[macro_export]
macro_rules! err_impl {
    (@hidden $errtype:ident, $item:ident, String) => {
        $crate::errors::paste! {
            pub fn [<$item:snake>](in_: &str) -> $crate::errors::AnyError {
                $crate::errors::anyhow!{$errtype::$item(in_.into())}
            }
        }
    };

    (@hidden $errtype:ident, $item:ident, $dtype:ty) => {
        $crate::errors::paste! {
            pub fn [<$item:snake>](in_: $dtype) -> $crate::errors::AnyError {
                $crate::errors::anyhow!{$errtype::$item(in_)}
            }
        }
    };

    ($errtype:ident,
        $(#[$errinfo:meta] $item:ident($dtype:tt),)+
    ) => {
        #[allow(missing_docs)]
        #[derive(Debug, $crate::errors::Error)]
        pub enum $errtype {
            $(#[$errinfo] $item($dtype)),+
        }

        #[allow(missing_docs)]
        impl $errtype {
            $($crate::err_impl! {@hidden $errtype, $item, $dtype})+
        }
    };
}
