//! Macros for defining kind enums.

/// Macro for defining a closed kind enum exchanged as a
/// `SCREAMING_SNAKE_CASE` string.
///
/// Besides the enum itself, an `ALL` constant listing every variant in
/// declaration order and a `label()` method returning a human-readable label
/// are generated.
///
/// # Example
///
/// ```rust
/// # use common::define_kind;
///
/// define_kind! {
///     #[doc = "Shape kind."]
///     enum Kind {
///         #[doc = "A cube"]
///         Cube = "Cubo",
///
///         #[doc = "A sphere"]
///         Sphere = "Esfera",
///     }
/// }
///
/// assert_eq!(Kind::ALL, &[Kind::Cube, Kind::Sphere]);
/// assert_eq!(Kind::Sphere.to_string(), "SPHERE");
/// assert_eq!(Kind::Sphere.label(), "Esfera");
/// ```
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_kind {
    (
        #[doc = $doc:literal]
        enum $name:ident {
            $(
                #[doc = $variant_doc:literal]
                $variant:ident = $label:literal
            ),* $(,)?
        }
    ) => {
        #[derive(
            Clone,
            Copy,
            Debug,
            $crate::private::strum::Display,
            $crate::private::strum::EnumString,
            Eq,
            Hash,
            Ord,
            PartialEq,
            PartialOrd,
            $crate::private::serde::Deserialize,
            $crate::private::serde::Serialize,
        )]
        #[serde(
            crate = "common::private::serde",
            rename_all = "SCREAMING_SNAKE_CASE",
        )]
        #[doc = $doc]
        #[strum(
            serialize_all = "SCREAMING_SNAKE_CASE",
            ascii_case_insensitive,
        )]
        pub enum $name {
            $(
                 #[doc = $variant_doc]
                 $variant,
            )*
        }

        impl $name {
            /// All the variants, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];

            /// Returns a human-readable label of this variant.
            #[must_use]
            pub const fn label(self) -> &'static str {
                match self {
                    $(
                        Self::$variant => $label,
                    )*
                }
            }
        }
    };
}
