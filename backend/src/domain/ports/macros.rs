//! Helper macro generating driven-port error enums.
//!
//! Each variant gets a snake_case constructor whose fields accept anything
//! convertible into the declared type, so adapters can write
//! `ItemRepositoryError::query(err.to_string())` or `::query("msg")`.

macro_rules! define_port_error {
    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                Self::$variant { $($field: $field.into()),* }
            }
        }
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),* $(,)? } => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $($field : $ty),* },
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant { $($field : $ty),* });
            )*
        }
    };
}

pub(crate) use define_port_error;
