//! Generates the error enums raised across driven ports.
//!
//! Each variant gets a snake_case constructor whose parameters accept
//! anything convertible into the field type, so adapters can write
//! `UserPersistenceError::query(err.to_string())`.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),* $(,)? } => $message:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $($field: $ty),* },
            )+
        }

        impl $name {
            $(
                ::paste::paste! {
                    #[doc = concat!("Build a `", stringify!($variant), "` failure.")]
                    pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                        Self::$variant { $($field: $field.into()),* }
                    }
                }
            )+
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum StoreError {
            Unreachable { host: String } => "store {host} unreachable",
            Rejected { code: u16, reason: String } => "rejected ({code}): {reason}",
        }
    }

    #[test]
    fn constructors_convert_into_field_types() {
        assert_eq!(
            StoreError::unreachable("db:27017").to_string(),
            "store db:27017 unreachable"
        );
        assert_eq!(
            StoreError::rejected(11000_u16, "duplicate key").to_string(),
            "rejected (11000): duplicate key"
        );
    }
}
