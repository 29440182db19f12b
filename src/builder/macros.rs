//! Macros for declaring machine state enums.

/// Declare a stateless enum and implement [`State`](crate::core::State) for it.
///
/// Variants listed under `final:` report `is_final() == true`; variants
/// listed under `transient:` report `is_transient() == true`.
///
/// # Example
///
/// ```
/// use vendstate::state_enum;
/// use vendstate::core::State;
///
/// state_enum! {
///     pub enum HopperState {
///         Idle,
///         Paying,
///         Jammed,
///     }
///     final: [Jammed]
///     transient: [Paying]
/// }
///
/// assert_eq!(HopperState::Paying.name(), "Paying");
/// assert!(HopperState::Jammed.is_final());
/// assert!(HopperState::Paying.is_transient());
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }

        $(final: [$($final:ident),* $(,)?])?
        $(transient: [$($transient:ident),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            Debug,
            serde::Serialize,
            serde::Deserialize,
        )]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            #[allow(unreachable_patterns)]
            fn is_final(&self) -> bool {
                match self {
                    $($(Self::$final => true,)*)?
                    _ => false,
                }
            }

            #[allow(unreachable_patterns)]
            fn is_transient(&self) -> bool {
                match self {
                    $($(Self::$transient => true,)*)?
                    _ => false,
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::core::State::name(self))
            }
        }
    };
}
