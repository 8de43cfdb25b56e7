//! Macros for reducing boilerplate when exposing structs as records

/// Implement [`Record`](crate::core::record::Record) for a struct
///
/// Each listed field is converted through `FieldValue::from`, so its type
/// must be one of the supported scalar types (`String`, integers, `f64`,
/// `bool`, `DateTime<Utc>`, `serde_json::Value`) or an `Option` of one.
///
/// # Example
///
/// ```rust,ignore
/// use tabula::prelude::*;
///
/// #[derive(Clone)]
/// struct Ticket {
///     id: i64,
///     subject: String,
///     priority: String,
///     created_at: DateTime<Utc>,
///     assignee: Option<String>,
/// }
///
/// impl_record!(Ticket, [id, subject, priority, created_at, assignee]);
/// ```
#[macro_export]
macro_rules! impl_record {
    ($type:ty, [$($field:ident),* $(,)?]) => {
        impl $crate::core::record::Record for $type {
            fn field_value(&self, field: &str) -> Option<$crate::core::field::FieldValue> {
                match field {
                    $(
                        stringify!($field) => Some($crate::core::field::FieldValue::from(
                            ::std::clone::Clone::clone(&self.$field),
                        )),
                    )*
                    _ => None,
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::field::FieldValue;
    use crate::core::record::Record;

    struct Feedback {
        id: i64,
        rating: f64,
        comment: Option<String>,
    }

    impl_record!(Feedback, [id, rating, comment]);

    #[test]
    fn test_impl_record_fields() {
        let feedback = Feedback {
            id: 3,
            rating: 4.5,
            comment: None,
        };
        assert_eq!(feedback.field_value("id"), Some(FieldValue::Integer(3)));
        assert_eq!(feedback.field_value("rating"), Some(FieldValue::Float(4.5)));
        assert_eq!(feedback.field_value("comment"), Some(FieldValue::Null));
        assert_eq!(feedback.field_value("author"), None);
    }
}
