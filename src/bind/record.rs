/// Implement [`Record`](crate::bind::Record), [`FromJson`](crate::bind::FromJson)
/// and [`ToJson`](crate::ser::ToJson) for a struct from its field list.
///
/// Listed fields are bound by name and serialized in the order given, which
/// should be declaration order. Every listed field type must implement both
/// `FromJson` and `ToJson`. Keys match field names exactly, so a JSON key
/// that is not snake case needs a field spelled the same way.
///
/// By default the struct is constructed with `Default::default()`. A
/// constructor returning `Result<Self, BindError>` can be supplied instead
/// with `construct = path`.
///
/// ```
/// use jsonbind::error::BindError;
/// use jsonbind::{from_str, json_record, serialize};
///
/// #[derive(Default)]
/// struct Tag {
///     name: String,
///     weight: f64,
/// }
///
/// json_record!(Tag { name, weight });
///
/// #[derive(Debug)]
/// struct Locked {
///     id: i64,
/// }
///
/// fn refuse() -> Result<Locked, BindError> {
///     Err(BindError::Construction {
///         type_name: "Locked",
///         reason: "no public constructor".into(),
///     })
/// }
///
/// json_record!(Locked { id } construct = refuse);
///
/// let tag: Tag = from_str(r#"{"name":"x","weight":2}"#).unwrap();
/// assert_eq!(serialize(&tag).unwrap(), r#"{"name":"x","weight":2.0}"#);
/// assert_eq!(from_str::<Locked>("{}").unwrap_err().name(), "Construction");
/// ```
#[macro_export]
macro_rules! json_record {
    (@impl $ty:ident { $($field:ident),* } construct = $construct:expr) => {
        impl $crate::bind::Record for $ty {
            fn construct() -> ::std::result::Result<Self, $crate::error::BindError> {
                $construct
            }

            fn field_names() -> &'static [&'static str] {
                &[$(stringify!($field)),*]
            }

            #[allow(unused_variables)]
            fn assign(
                &mut self,
                name: &str,
                value: &$crate::json::JsonValue,
            ) -> ::std::result::Result<(), $crate::error::BindError> {
                match name {
                    $(stringify!($field) => {
                        self.$field = $crate::bind::FromJson::from_json(value)?;
                    })*
                    _ => {}
                }
                ::std::result::Result::Ok(())
            }
        }

        impl $crate::bind::FromJson for $ty {
            fn from_json(
                value: &$crate::json::JsonValue,
            ) -> ::std::result::Result<Self, $crate::error::BindError> {
                $crate::bind::bind_record::<Self>(value)
            }
        }

        impl $crate::ser::ToJson for $ty {
            fn to_json(
                &self,
                encoder: &mut $crate::ser::Encoder,
            ) -> ::std::result::Result<(), $crate::error::SerializeError> {
                encoder.write_record(&[$((
                    stringify!($field),
                    &self.$field as &dyn $crate::ser::ToJson,
                )),*])
            }
        }
    };
    ($ty:ident { $($field:ident),* $(,)? }) => {
        $crate::json_record!(@impl $ty { $($field),* } construct =
            ::std::result::Result::Ok(<$ty as ::std::default::Default>::default()));
    };
    ($ty:ident { $($field:ident),* $(,)? } construct = $construct:path) => {
        $crate::json_record!(@impl $ty { $($field),* } construct = $construct());
    };
}
