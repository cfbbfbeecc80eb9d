//! Macros for ergonomic identifier domains.

/// Generate a closed identifier enum and its `StateId` implementation.
///
/// The null sentinel is declared explicitly with `null:` and always becomes
/// the first variant. `VARIANTS` lists every real identifier in declaration
/// order, sentinel excluded.
///
/// # Example
///
/// ```
/// use brainstem::core::StateId;
/// use brainstem::state_id;
///
/// state_id! {
///     pub enum Guard {
///         null: None,
///         Idle,
///         Patrol,
///         Chase,
///     }
/// }
///
/// assert!(Guard::None.is_null());
/// assert_eq!(Guard::Chase.name(), "Chase");
/// assert_eq!(Guard::VARIANTS, &[Guard::Idle, Guard::Patrol, Guard::Chase]);
/// ```
#[macro_export]
macro_rules! state_id {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            null: $null:ident,
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Debug,
            serde::Serialize,
            serde::Deserialize
        )]
        $vis enum $name {
            $null,
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            #[allow(dead_code)]
            $vis const VARIANTS: &'static [$name] = &[$($name::$variant),*];
        }

        impl $crate::core::StateId for $name {
            const NULL: Self = $name::$null;

            fn name(&self) -> &'static str {
                match self {
                    Self::$null => stringify!($null),
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}
