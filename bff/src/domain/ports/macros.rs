//! `define_port_error!`: declare a port failure enum in one place.
//!
//! Every variant is struct-like, displays its message through `thiserror`,
//! and gets a snake_case constructor taking `impl Into<_>` per field, so
//! adapters write `UpstreamError::unreachable(err.to_string())`.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),* $(,)? } => $message:literal
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $($field: $ty),* },
            )*
        }

        ::paste::paste! {
            impl $name {
                $(
                    #[doc = concat!("Build [`", stringify!($name), "::", stringify!($variant), "`].")]
                    #[must_use]
                    pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                        Self::$variant { $($field: $field.into()),* }
                    }
                )*
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    define_port_error! {
        pub enum GatewaySampleError {
            Closed { reason: String } => "closed: {reason}",
            Answered { status: u16, body: Value } => "answered {status}",
            TimedOutAfter { millis: u64 } => "timed out after {millis} ms",
        }
    }

    #[test]
    fn constructors_convert_borrowed_text() {
        assert_eq!(
            GatewaySampleError::closed("peer reset"),
            GatewaySampleError::Closed {
                reason: "peer reset".to_owned()
            }
        );
    }

    #[test]
    fn multi_word_variants_become_snake_case() {
        let err = GatewaySampleError::timed_out_after(250_u64);
        assert_eq!(err.to_string(), "timed out after 250 ms");
    }

    #[test]
    fn json_fields_are_carried_untouched() {
        let err = GatewaySampleError::answered(418_u16, json!({"error": "teapot"}));
        assert_eq!(err.to_string(), "answered 418");
        assert!(matches!(
            err,
            GatewaySampleError::Answered { body, .. } if body["error"] == "teapot"
        ));
    }
}
