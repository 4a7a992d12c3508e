//! Helper macro for declaring port error enums.
//!
//! Each variant becomes a `thiserror` variant with the given display
//! message, plus a snake_case constructor. Constructor parameters for fields
//! accept `impl Into<T>`, so string fields take `&str` directly.

macro_rules! define_port_error {
    (@ctor $name:ident $variant:ident) => {
        ::paste::paste! {
            #[doc = concat!("Build [`", stringify!($name), "::", stringify!($variant), "`].")]
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $name:ident $variant:ident { $($field:ident : $ty:ty),+ }) => {
        ::paste::paste! {
            #[doc = concat!("Build [`", stringify!($name), "::", stringify!($variant), "`].")]
            pub fn [<$variant:snake>]($($field: impl Into<$ty>),+) -> Self {
                Self::$variant { $($field: $field.into()),+ }
            }
        }
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),+ $(,)? } )? => $message:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),+ } )?,
            )+
        }

        impl $name {
            $(
                define_port_error!(@ctor $name $variant $( { $($field : $ty),+ } )?);
            )+
        }
    };
}

pub(crate) use define_port_error;
