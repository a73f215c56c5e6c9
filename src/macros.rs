//! Declarative helpers shared by the schema modules.

/// Implement `serde::Deserialize` by parsing into a `serde_json::Value` and
/// running [`Validate`](crate::validation::Validate) over it.
///
/// Plain `serde_json::from_str::<T>` then enforces the same constraints as
/// `T::parse_raw`.
macro_rules! deserialize_via_validate {
    ($($ty:ty),+ $(,)?) => {$(
        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let value = <serde_json::Value as serde::Deserialize>::deserialize(deserializer)?;
                <Self as $crate::validation::Validate>::from_value(&value)
                    .map_err(<D::Error as serde::de::Error>::custom)
            }
        }
    )+};
}

/// Define a closed set of string literals.
///
/// Generates the enum, `as_str`/`from_literal`, `Display`, `Serialize`,
/// `Validate`, `MapKey` and `Deserialize`.
macro_rules! literal_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $lit:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// The wire literal.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $lit),+
                }
            }

            /// Look up a wire literal.
            pub fn from_literal(literal: &str) -> Option<Self> {
                match literal {
                    $($lit => Some(Self::$variant),)+
                    _ => None,
                }
            }

            fn reject(literal: &str, v: &mut $crate::validation::Validator) {
                let expected = [$($lit),+].join("|");
                v.report(
                    $crate::error::ErrorKind::Pattern,
                    format!("`{literal}` is not one of {expected}"),
                );
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl $crate::validation::Validate for $name {
            fn validate(
                value: &serde_json::Value,
                v: &mut $crate::validation::Validator,
            ) -> Option<Self> {
                let literal = <String as $crate::validation::Validate>::validate(value, v)?;
                let parsed = Self::from_literal(&literal);
                if parsed.is_none() {
                    Self::reject(&literal, v);
                }
                parsed
            }
        }

        impl $crate::validation::MapKey for $name {
            fn parse_key(key: &str, v: &mut $crate::validation::Validator) -> Option<Self> {
                let parsed = Self::from_literal(key);
                if parsed.is_none() {
                    Self::reject(key, v);
                }
                parsed
            }
        }

        deserialize_via_validate!($name);
    };
}

/// Define a sum of header-identified documents, resolved through the global
/// registry.
///
/// Each variant type must be registered. The header is checked against the
/// members before the body is validated, so a document of another family is
/// reported as an unsupported variant rather than by its own field errors.
macro_rules! document_union {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $family:literal {
            $( $(#[$vmeta:meta])* $variant:ident($ty:ty) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant($ty) ),+
        }

        impl $name {
            /// Header of the wrapped document.
            pub fn schema_header(&self) -> &$crate::header::SchemaHeader {
                match self {
                    $(Self::$variant(inner) => $crate::registry::SchemaDocument::schema_header(inner)),+
                }
            }

            /// Check whether `header` names one of the member documents.
            pub fn accepts(header: &$crate::header::SchemaHeader) -> bool {
                $(*header == <$ty as $crate::registry::SchemaDocument>::header())||+
            }

            fn reject(
                header: &$crate::header::SchemaHeader,
                v: &mut $crate::validation::Validator,
            ) {
                v.at_key($crate::header::SchemaHeader::FIELD, |v| {
                    v.report(
                        $crate::error::ErrorKind::UnsupportedVariant,
                        format!("`{header}` is not a {} document", $family),
                    )
                });
            }
        }

        $(
            impl From<$ty> for $name {
                fn from(inner: $ty) -> Self {
                    Self::$variant(inner)
                }
            }
        )+

        impl TryFrom<$crate::registry::Document> for $name {
            type Error = $crate::registry::Document;

            fn try_from(doc: $crate::registry::Document) -> Result<Self, Self::Error> {
                match doc {
                    $($crate::registry::Document::$variant(inner) => Ok(Self::$variant(inner)),)+
                    other => Err(other),
                }
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                match self {
                    $(Self::$variant(inner) => serde::Serialize::serialize(inner, serializer)),+
                }
            }
        }

        impl $crate::validation::Validate for $name {
            fn validate(
                value: &serde_json::Value,
                v: &mut $crate::validation::Validator,
            ) -> Option<Self> {
                let fields = $crate::validation::Fields::of(value, v)?;
                let header = fields
                    .field::<$crate::header::SchemaHeader>(v, $crate::header::SchemaHeader::FIELD)?;
                if !Self::accepts(&header) {
                    Self::reject(&header, v);
                    return None;
                }
                let doc = $crate::registry::global().parse_nested(value, v)?;
                match Self::try_from(doc) {
                    Ok(parsed) => Some(parsed),
                    Err(other) => {
                        Self::reject(other.schema_header(), v);
                        None
                    }
                }
            }
        }

        deserialize_via_validate!($name);
    };
}

/// Implement [`SchemaDocument`](crate::registry::SchemaDocument) and
/// `Deserialize` for a struct holding its header in `braket_schema_header`.
macro_rules! schema_document {
    ($ty:ty, $name:literal, $version:literal) => {
        impl $crate::registry::SchemaDocument for $ty {
            const NAME: &'static str = $name;
            const VERSION: &'static str = $version;

            fn schema_header(&self) -> &$crate::header::SchemaHeader {
                &self.braket_schema_header
            }
        }

        deserialize_via_validate!($ty);
    };
}
