//! JSON circuit description (`braket.ir.jaqcd`).
//!
//! A [`Program`] is a list of gate and noise [`Instruction`]s plus optional
//! [`ResultType`] requests. Both families are closed enums discriminated by
//! their `type` member and parsed through a [`DispatchTable`].
//!
//! [`DispatchTable`]: crate::dispatch::DispatchTable

/// Member name of a field: its identifier unless renamed.
macro_rules! wire {
    ($field:ident) => {
        stringify!($field)
    };
    ($field:ident as $wire:literal) => {
        $wire
    };
}

/// Define a closed family of structs discriminated by `type`.
///
/// Generates each struct with its `TYPE` literal, `Validate`, `Operand` and
/// `Deserialize`, then the family enum, its conversion impls and its static
/// dispatch table.
macro_rules! tagged_family {
    (
        $(#[$family_meta:meta])*
        pub enum $family:ident : $label:literal in $table:ident {
            $(
                $(#[$meta:meta])*
                $name:ident = $lit:literal {
                    $( $(#[$fmeta:meta])* $field:ident $(as $wire:literal)? : $ty:ty ),* $(,)?
                }
            ),+ $(,)?
        }
    ) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, PartialEq, Serialize)]
            pub struct $name {
                $(
                    $(#[$fmeta])*
                    $(#[serde(rename = $wire)])?
                    pub $field: $ty,
                )*
            }

            impl $name {
                /// Discriminator literal.
                pub const TYPE: &'static str = $lit;
            }

            impl Validate for $name {
                fn validate(value: &Value, v: &mut Validator) -> Option<Self> {
                    let fields = Fields::of(value, v)?;
                    let tagged = fields.literal(v, "type", Self::TYPE);
                    $( let $field = fields.field::<$ty>(v, wire!($field $(as $wire)?)); )*
                    if !tagged {
                        return None;
                    }
                    Some(Self { $( $field: $field?, )* })
                }
            }

            impl Operand for $name {
                fn qubits(&self, _out: &mut Vec<u64>) {
                    $( self.$field.qubits(_out); )*
                }
            }

            impl From<$name> for $family {
                fn from(inner: $name) -> Self {
                    Self::$name(inner)
                }
            }

            deserialize_via_validate!($name);
        )+

        $(#[$family_meta])*
        #[derive(Debug, Clone, PartialEq, Serialize)]
        #[serde(tag = "type")]
        pub enum $family {
            $(
                #[serde(rename = $lit)]
                $name($name),
            )+
        }

        impl $family {
            /// Discriminator literal of this variant.
            pub fn type_name(&self) -> &'static str {
                match self {
                    $(Self::$name(_) => $lit,)+
                }
            }

            /// Qubit indices this variant refers to, in field order.
            pub fn qubits(&self) -> Vec<u64> {
                let mut out = Vec::new();
                match self {
                    $(Self::$name(inner) => inner.qubits(&mut out),)+
                }
                out
            }

            /// The dispatch table for this family.
            pub fn table() -> &'static DispatchTable<Self> {
                &$table
            }
        }

        static $table: LazyLock<DispatchTable<$family>> = LazyLock::new(|| {
            DispatchTable::new(
                "type",
                $label,
                &[$( ($lit, |value: &Value, v: &mut Validator| {
                    $name::validate(value, v).map($family::$name)
                }), )+],
            )
        });

        impl Validate for $family {
            fn validate(value: &Value, v: &mut Validator) -> Option<Self> {
                $table.parse(value, v)
            }
        }

        deserialize_via_validate!($family);
    };
}

pub mod instructions;
pub mod program;
pub mod results;
pub mod shared;

pub use instructions::Instruction;
pub use program::Program;
pub use results::ResultType;
pub use shared::{Observable, ObservableFactor, PauliObservable};
