//! Macros for declaring state and event kind enums.

/// Generate a state-kind enum and its `StateKind` implementation.
///
/// The generated `all()` list is exhaustive by construction, which is what
/// lets the verifier prove every kind has a registered node.
///
/// # Example
///
/// ```
/// use stratum::core::StateKind;
/// use stratum::state_kind;
///
/// state_kind! {
///     pub enum WorkflowState {
///         Draft,
///         InProgress,
///         Closed,
///     }
/// }
///
/// assert_eq!(WorkflowState::all().len(), 3);
/// assert_eq!(WorkflowState::Draft.name(), "Draft");
/// ```
#[macro_export]
macro_rules! state_kind {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize,
        )]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),+
        }

        impl $crate::core::StateKind for $name {
            fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),+
                }
            }

            fn all() -> &'static [Self] {
                &[$(Self::$variant),+]
            }
        }
    };
}

/// Generate an event-kind enum and its `EventKind` implementation.
///
/// The first variant becomes the default kind, i.e. the kind the untyped
/// `TransitionEvent::default()` carries.
///
/// # Example
///
/// ```
/// use stratum::core::EventKind;
/// use stratum::event_kind;
///
/// event_kind! {
///     pub enum WorkflowEvent {
///         Touch,
///         Submit,
///         Finish,
///     }
/// }
///
/// assert_eq!(WorkflowEvent::default(), WorkflowEvent::Touch);
/// assert_eq!(WorkflowEvent::Finish.name(), "Finish");
/// ```
#[macro_export]
macro_rules! event_kind {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(#[$first_meta:meta])*
            $first:ident
            $(,
                $(#[$variant_meta:meta])*
                $variant:ident
            )* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize,
        )]
        $vis enum $name {
            $(#[$first_meta])*
            $first
            $(,
                $(#[$variant_meta])*
                $variant
            )*
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$first
            }
        }

        impl $crate::core::EventKind for $name {
            fn name(&self) -> &str {
                match self {
                    Self::$first => stringify!($first),
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{EventKind, StateKind};

    state_kind! {
        enum TestState {
            Initial,
            Processing,
            Complete,
        }
    }

    event_kind! {
        enum TestEvent {
            Tick,
            Submit,
        }
    }

    #[test]
    fn state_kind_macro_generates_names_and_all() {
        assert_eq!(TestState::Initial.name(), "Initial");
        assert_eq!(
            TestState::all(),
            &[
                TestState::Initial,
                TestState::Processing,
                TestState::Complete
            ]
        );
    }

    #[test]
    fn event_kind_macro_defaults_to_first_variant() {
        assert_eq!(TestEvent::default(), TestEvent::Tick);
        assert_eq!(TestEvent::Submit.name(), "Submit");
    }

    #[test]
    fn macros_support_visibility() {
        state_kind! {
            pub enum PublicState {
                A,
                B,
            }
        }

        event_kind! {
            pub enum PublicEvent {
                Go,
            }
        }

        assert_eq!(PublicState::all().len(), 2);
        assert_eq!(PublicEvent::default(), PublicEvent::Go);
    }

    #[test]
    fn kinds_serialize_correctly() {
        let json = serde_json::to_string(&TestState::Processing).unwrap();
        let back: TestState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TestState::Processing);
    }
}
