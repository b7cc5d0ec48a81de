//! Convenience macros

/// Build a [`Fields`](crate::Fields) map from `key => value` pairs.
///
/// Values go through `serde_json::json!`, so numbers and booleans keep
/// their native types in structured output:
///
/// ```
/// use scribe_logger::fields;
///
/// let fields = fields! {
///     "user_id" => 12345,
///     "ip" => "192.168.1.1",
///     "retried" => true,
/// };
/// assert_eq!(fields["user_id"], 12345);
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        $crate::Fields::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut fields = $crate::Fields::new();
        $(
            fields.insert(($key).into(), $crate::__private::json!($value));
        )+
        fields
    }};
}
