//! Helper macro for declaring port error enums.
//!
//! Each variant gets a `thiserror` message and a snake_case constructor whose
//! parameters accept anything convertible into the field type.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };
    (@ctor $variant:ident { $($field:ident : $ty:ty),+ }) => {
        ::paste::paste! {
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
                $variant:ident $( { $($field:ident : $ty:ty),+ $(,)? } )? => $message:literal
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field: $ty),+ } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),+ } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum SamplePortError {
            Gone => "gone",
            Named { name: String } => "named: {name}",
            Counted { name: String, count: u32 } => "{name} x{count}",
        }
    }

    #[test]
    fn unit_constructor_builds_variant() {
        assert_eq!(SamplePortError::gone(), SamplePortError::Gone);
        assert_eq!(SamplePortError::gone().to_string(), "gone");
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        assert_eq!(SamplePortError::named("x").to_string(), "named: x");
    }

    #[test]
    fn constructors_support_mixed_fields() {
        assert_eq!(SamplePortError::counted("y", 3_u32).to_string(), "y x3");
    }
}
