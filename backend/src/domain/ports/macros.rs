//! Macro for declaring port error enums.
//!
//! Each variant gets a `thiserror` message and a snake-case constructor whose
//! parameters accept anything convertible into the field type, so adapters can
//! write `PetRepositoryError::query(err.to_string())` or pass a `&str`.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum SamplePortError {
            Offline => "offline",
            Rejected { reason: String } => "rejected: {reason}",
            Throttled { retry_after_secs: u64 } => "retry in {retry_after_secs}s",
            Conflict { key: String, attempts: u32 } => "conflict on {key} after {attempts}",
        }
    }

    #[test]
    fn unit_variant_constructor() {
        assert_eq!(SamplePortError::offline(), SamplePortError::Offline);
    }

    #[test]
    fn string_fields_accept_str() {
        assert_eq!(SamplePortError::rejected("nope").to_string(), "rejected: nope");
    }

    #[test]
    fn numeric_fields_keep_their_type() {
        assert_eq!(
            SamplePortError::throttled(5_u64).to_string(),
            "retry in 5s"
        );
    }

    #[test]
    fn mixed_fields_follow_declaration_order() {
        assert_eq!(
            SamplePortError::conflict("pet", 3_u32).to_string(),
            "conflict on pet after 3"
        );
    }
}
