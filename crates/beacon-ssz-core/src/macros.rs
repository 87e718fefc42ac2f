//! Macro for declaring protocol records.

/// Generates a record struct together with its [`SszType`] impl, serde
/// impls that use the textual form, and a `Display` impl that renders the
/// YAML flow line.
///
/// The shape tree is built once per record type and shared by every call.
/// `Display` omits the newline that terminates
/// [`to_yaml_string`](crate::SszType::to_yaml_string) output. Deserializing
/// through serde accepts bare unsigned numbers for integer fields, so YAML
/// fixtures read with `serde_yaml` work directly.
///
/// Each field names its type and the label used in error messages:
///
/// ```
/// use beacon_ssz_core::{ssz_container, Root, SszType};
///
/// ssz_container! {
///     #[derive(Debug, Clone, PartialEq, Eq, Default)]
///     pub struct Checkpoint {
///         pub epoch: u64 => "epoch",
///         pub root: Root => "root",
///     }
/// }
///
/// let checkpoint = Checkpoint { epoch: 3, root: Root::ZERO };
/// assert_eq!(checkpoint.to_ssz_bytes().unwrap().len(), 40);
/// ```
///
/// [`SszType`]: crate::SszType
#[macro_export]
macro_rules! ssz_container {
    {
        $( #[ $sattr:meta ] )*
        $v:vis struct $name:ident {
            $(
                $( #[ $fattr:meta ] )*
                $fv:vis $fname:ident : $fty:ty => $label:literal
            ),* $(,)?
        }
    } => {
        $( #[ $sattr ] )*
        $v struct $name {
            $(
                $( #[ $fattr ] )*
                $fv $fname : $fty,
            )*
        }

        impl $crate::SszType for $name {
            fn shape() -> $crate::schema::Shape {
                $crate::schema::Shape::Container($crate::schema::ContainerShape::new(
                    stringify!($name),
                    vec![$(
                        $crate::schema::Field::new(
                            stringify!($fname),
                            $label,
                            <$fty as $crate::SszType>::schema().into_owned(),
                        ),
                    )*],
                ))
            }

            fn schema() -> ::std::borrow::Cow<'static, $crate::schema::Shape> {
                static SHAPE: ::std::sync::OnceLock<$crate::schema::Shape> =
                    ::std::sync::OnceLock::new();
                ::std::borrow::Cow::Borrowed(SHAPE.get_or_init(<Self as $crate::SszType>::shape))
            }

            fn to_value(&self) -> $crate::Value {
                $crate::Value::Container(vec![$(
                    <$fty as $crate::SszType>::to_value(&self.$fname),
                )*])
            }

            fn from_value(
                value: $crate::Value,
            ) -> ::std::result::Result<Self, $crate::error::ShapeMismatch> {
                const NAMES: &[&str] = &[$(stringify!($fname)),*];
                let mut fields = value.into_container(NAMES.len())?.into_iter();
                Ok(Self {
                    $(
                        $fname: <$fty as $crate::SszType>::from_value(
                            $crate::macros::next_field(&mut fields, stringify!($fname))?,
                        )?,
                    )*
                })
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                match $crate::SszType::to_yaml_string(self) {
                    Ok(yaml) => f.write_str(yaml.trim_end()),
                    Err(e) => write!(f, "ERR: {e}"),
                }
            }
        }

        impl $crate::macros::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: $crate::macros::serde::Serializer,
            {
                use $crate::macros::serde::ser::Error as _;
                let tree = $crate::text::to_text_tree(
                    &$crate::SszType::to_value(self),
                    &<Self as $crate::SszType>::schema(),
                )
                .map_err(S::Error::custom)?;
                $crate::macros::serde::Serialize::serialize(&tree, serializer)
            }
        }

        impl<'de> $crate::macros::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: $crate::macros::serde::Deserializer<'de>,
            {
                use $crate::macros::serde::de::Error as _;
                let tree: $crate::macros::serde_json::Value =
                    $crate::macros::serde::Deserialize::deserialize(deserializer)?;
                let value =
                    $crate::text::from_text_value(&tree, &<Self as $crate::SszType>::schema())
                        .map_err(D::Error::custom)?;
                <Self as $crate::SszType>::from_value(value).map_err(D::Error::custom)
            }
        }
    };
}

#[doc(hidden)]
pub use serde;
#[doc(hidden)]
pub use serde_json;

#[doc(hidden)]
pub fn next_field(
    fields: &mut impl Iterator<Item = crate::Value>,
    name: &'static str,
) -> Result<crate::Value, crate::error::ShapeMismatch> {
    fields.next().ok_or_else(|| crate::error::ShapeMismatch {
        expected: format!("field {name}"),
        found: "end of container",
    })
}
