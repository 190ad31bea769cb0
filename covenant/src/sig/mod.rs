//! Function signature snapshots
//!
//! The checker never queries the host environment: everything it needs about
//! the target function arrives up front as plain read-only facts. Hosts
//! build these from their own type model; the CLI deserializes them from a
//! JSON manifest.

use serde::{Deserialize, Serialize};

/// Declared-type facts for one parameter or return position
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeInfo {
    /// Presentable type name, used in diagnostics
    pub display: String,
    /// Value types cannot hold a null reference
    #[serde(default)]
    pub value_type: bool,
    /// Primitive or boxed boolean
    #[serde(default)]
    pub boolean: bool,
    /// Produces no value (return position only)
    #[serde(default)]
    pub void: bool,
}

impl TypeInfo {
    /// A reference type that can hold null
    pub fn reference(display: impl Into<String>) -> Self {
        Self {
            display: display.into(),
            value_type: false,
            boolean: false,
            void: false,
        }
    }

    /// A value type that can never hold null
    pub fn value(display: impl Into<String>) -> Self {
        Self {
            display: display.into(),
            value_type: true,
            boolean: false,
            void: false,
        }
    }

    /// The primitive boolean type
    pub fn boolean_primitive() -> Self {
        Self {
            display: "boolean".into(),
            value_type: true,
            boolean: true,
            void: false,
        }
    }

    /// A nullable boxed boolean
    pub fn boxed_boolean() -> Self {
        Self {
            display: "Boolean".into(),
            value_type: false,
            boolean: true,
            void: false,
        }
    }

    /// No return value
    pub fn void() -> Self {
        Self {
            display: "void".into(),
            value_type: true,
            boolean: false,
            void: true,
        }
    }
}

/// Effective nullability fact for one parameter, supplied by the host's
/// nullability model (declared annotations or inference)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Nullability {
    #[default]
    NotConstrained,
    NotNullDeclared,
    NotNullInferred,
}

/// One parameter of the target function
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeInfo,
    #[serde(default)]
    pub nullability: Nullability,
}

/// Read-only snapshot of the target function
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionSig {
    pub name: String,
    #[serde(default)]
    pub params: Vec<Param>,
    #[serde(rename = "return")]
    pub return_type: TypeInfo,
    /// The function can signal failure (exception or designated sentinel)
    #[serde(default)]
    pub can_fail: bool,
    /// Instance function with a receiver
    #[serde(default)]
    pub has_receiver: bool,
    /// The return type is assignable from the receiver type
    #[serde(default)]
    pub receiver_assignable: bool,
}

/// Raw annotation payload attached to one function
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContractAnnotation {
    /// The contract DSL string
    #[serde(default)]
    pub contract: Option<String>,
    /// Free-form mutation attribute; its own DSL is validated elsewhere
    #[serde(default)]
    pub mutates: Option<String>,
    /// The function is declared side-effect free
    #[serde(default)]
    pub pure: bool,
}

/// One entry of a check manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub function: FunctionSig,
    #[serde(default)]
    pub annotation: ContractAnnotation,
}
