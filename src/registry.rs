//! Header registry.
//!
//! Maps every `(name, version)` pair to the one Rust type that owns it. The
//! process-wide registry is built once, on first use, from explicit
//! `register` calls in each schema module and is read-only afterwards:
//!
//! ```text
//!   global() ──first call──→ ir::register ─┐
//!                             device_schema::register ─┼─→ SchemaRegistry (frozen)
//!                             task_result::register ──┘
//! ```
//!
//! Lookups are a single hash probe and need no locking.

use std::any::TypeId;
use std::sync::LazyLock;

use rustc_hash::FxHashMap;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::device_schema::{
    AnnealingParadigmProperties, DeviceServiceProperties, DwaveDeviceCapabilities,
    DwaveDeviceParameters, DwaveProviderLevelParameters, DwaveProviderProperties,
    GateModelParameters, GateModelQpuParadigmProperties, GateModelSimulatorDeviceCapabilities,
    GateModelSimulatorParadigmProperties, GenericDeviceCapabilities, IonqDeviceCapabilities,
    IonqDeviceParameters, IonqProviderProperties, RigettiDeviceCapabilities,
    RigettiDeviceParadigmProperties, RigettiDeviceParameters, SimulatorDeviceParameters,
};
use crate::error::{ErrorKind, SchemaError, SchemaResult};
use crate::header::SchemaHeader;
use crate::ir::annealing::Problem;
use crate::ir::jaqcd::Program;
use crate::task_result::{AnnealingTaskResult, DwaveMetadata, GateModelTaskResult, TaskMetadata};
use crate::validation::{Fields, Validate, Validator};

/// A document type identified by a schema header.
pub trait SchemaDocument:
    Validate + Serialize + Into<Document> + TryFrom<Document, Error = Document> + 'static
{
    /// Dotted schema name.
    const NAME: &'static str;
    /// Integer version string.
    const VERSION: &'static str;

    /// The header every instance of this type carries.
    fn header() -> SchemaHeader {
        SchemaHeader::canonical(Self::NAME, Self::VERSION)
    }

    /// Header of this instance.
    fn schema_header(&self) -> &SchemaHeader;
}

macro_rules! documents {
    ($( $(#[$meta:meta])* $variant:ident($ty:ty) ),+ $(,)?) => {
        /// Any registered document.
        #[derive(Debug, Clone, PartialEq)]
        #[non_exhaustive]
        pub enum Document {
            $( $(#[$meta])* $variant($ty) ),+
        }

        impl Document {
            /// Header of the wrapped document.
            pub fn schema_header(&self) -> &SchemaHeader {
                match self {
                    $(Self::$variant(inner) => inner.schema_header()),+
                }
            }
        }

        $(
            impl From<$ty> for Document {
                fn from(inner: $ty) -> Self {
                    Self::$variant(inner)
                }
            }

            impl TryFrom<Document> for $ty {
                type Error = Document;

                fn try_from(doc: Document) -> Result<Self, Document> {
                    match doc {
                        Document::$variant(inner) => Ok(inner),
                        other => Err(other),
                    }
                }
            }
        )+

        impl Serialize for Document {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                match self {
                    $(Self::$variant(inner) => inner.serialize(serializer)),+
                }
            }
        }
    };
}

documents! {
    // ── IR ──
    Program(Program),
    Problem(Problem),
    // ── Device schema ──
    DeviceServiceProperties(DeviceServiceProperties),
    DeviceCapabilities(GenericDeviceCapabilities),
    IonqDeviceCapabilities(IonqDeviceCapabilities),
    RigettiDeviceCapabilities(RigettiDeviceCapabilities),
    GateModelSimulatorDeviceCapabilities(GateModelSimulatorDeviceCapabilities),
    DwaveDeviceCapabilities(DwaveDeviceCapabilities),
    GateModelQpuParadigmProperties(GateModelQpuParadigmProperties),
    RigettiDeviceParadigmProperties(RigettiDeviceParadigmProperties),
    GateModelSimulatorParadigmProperties(GateModelSimulatorParadigmProperties),
    AnnealingParadigmProperties(AnnealingParadigmProperties),
    GateModelParameters(GateModelParameters),
    IonqDeviceParameters(IonqDeviceParameters),
    RigettiDeviceParameters(RigettiDeviceParameters),
    SimulatorDeviceParameters(SimulatorDeviceParameters),
    DwaveDeviceParameters(DwaveDeviceParameters),
    DwaveProviderLevelParameters(DwaveProviderLevelParameters),
    IonqProviderProperties(IonqProviderProperties),
    DwaveProviderProperties(DwaveProviderProperties),
    // ── Task results ──
    TaskMetadata(TaskMetadata),
    DwaveMetadata(DwaveMetadata),
    GateModelTaskResult(GateModelTaskResult),
    AnnealingTaskResult(AnnealingTaskResult),
}

impl Document {
    /// Convert into the concrete type `T`, returning `self` on mismatch.
    pub fn downcast<T: SchemaDocument>(self) -> Result<T, Document> {
        T::try_from(self)
    }
}

type DocumentParser = fn(&Value, &mut Validator) -> Option<Document>;

fn parse_into<T: SchemaDocument>(value: &Value, v: &mut Validator) -> Option<Document> {
    T::validate(value, v).map(Into::into)
}

/// One registered schema type.
#[derive(Debug, Clone)]
pub struct SchemaEntry {
    header: SchemaHeader,
    type_id: TypeId,
    type_name: &'static str,
    parse: DocumentParser,
}

impl SchemaEntry {
    /// Registered header.
    pub fn header(&self) -> &SchemaHeader {
        &self.header
    }

    /// Rust type name of the registered type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Check whether `T` is the registered type.
    pub fn is<T: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Validate `value` as the registered type.
    pub fn parse(&self, value: &Value, v: &mut Validator) -> Option<Document> {
        (self.parse)(value, v)
    }
}

/// Registry of schema types keyed by header.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    entries: FxHashMap<SchemaHeader, SchemaEntry>,
}

impl SchemaRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in schema type.
    pub fn with_builtin() -> SchemaResult<Self> {
        let mut registry = Self::new();
        crate::ir::register(&mut registry)?;
        crate::device_schema::register(&mut registry)?;
        crate::task_result::register(&mut registry)?;
        debug!("Schema registry built with {} schemas", registry.len());
        Ok(registry)
    }

    /// Register `T` under its header.
    ///
    /// Registering the same type twice is a no-op. Registering a different
    /// type under a taken header fails with [`SchemaError::DuplicateSchema`].
    pub fn register<T: SchemaDocument>(&mut self) -> SchemaResult<()> {
        let header = T::header();
        let type_name = std::any::type_name::<T>();
        if let Some(existing) = self.entries.get(&header) {
            if existing.is::<T>() {
                return Ok(());
            }
            return Err(SchemaError::DuplicateSchema {
                name: header.name().to_string(),
                version: header.version().to_string(),
                existing: existing.type_name,
                attempted: type_name,
            });
        }
        debug!("Registering schema: {} -> {}", header, type_name);
        self.entries.insert(
            header.clone(),
            SchemaEntry {
                header,
                type_id: TypeId::of::<T>(),
                type_name,
                parse: parse_into::<T>,
            },
        );
        Ok(())
    }

    /// Look up the entry registered for `header`.
    pub fn resolve(&self, header: &SchemaHeader) -> SchemaResult<&SchemaEntry> {
        self.entries
            .get(header)
            .ok_or_else(|| SchemaError::UnknownSchema {
                name: header.name().to_string(),
                version: header.version().to_string(),
            })
    }

    /// Check whether `header` is registered.
    pub fn contains(&self, header: &SchemaHeader) -> bool {
        self.entries.contains_key(header)
    }

    /// Number of registered schemas.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the registered entries, in no particular order.
    pub fn entries(&self) -> impl Iterator<Item = &SchemaEntry> {
        self.entries.values()
    }

    /// Validate a document whose type is named by its own header.
    ///
    /// The header is required. An unregistered header fails with
    /// [`SchemaError::UnknownSchema`] before any field is validated.
    pub fn parse(&self, value: &Value) -> SchemaResult<Document> {
        let mut v = Validator::new();
        let header = Fields::of(value, &mut v)
            .and_then(|fields| fields.field::<SchemaHeader>(&mut v, SchemaHeader::FIELD));
        let header = v.finish(header)?;
        let entry = self.resolve(&header)?;

        let mut v = Validator::new();
        let doc = entry.parse(value, &mut v);
        match v.finish(doc) {
            Ok(doc) => Ok(doc),
            Err(errors) => {
                debug!("Rejected {} document with {} violation(s)", header, errors.len());
                Err(errors.into())
            }
        }
    }

    /// Parse and validate raw JSON text, dispatching on its header.
    pub fn parse_raw(&self, json: &str) -> SchemaResult<Document> {
        let value: Value = serde_json::from_str(json)?;
        self.parse(&value)
    }

    /// Dispatch a sub-document on its header, reporting into `v`.
    ///
    /// An unregistered header is an unsupported variant at the header path.
    pub(crate) fn parse_nested(&self, value: &Value, v: &mut Validator) -> Option<Document> {
        let fields = Fields::of(value, v)?;
        let header = fields.field::<SchemaHeader>(v, SchemaHeader::FIELD)?;
        match self.entries.get(&header) {
            Some(entry) => entry.parse(value, v),
            None => {
                v.at_key(SchemaHeader::FIELD, |v| {
                    v.report(
                        ErrorKind::UnsupportedVariant,
                        format!("unknown schema `{header}`"),
                    )
                });
                None
            }
        }
    }
}

static GLOBAL: LazyLock<SchemaRegistry> = LazyLock::new(|| {
    SchemaRegistry::with_builtin()
        .unwrap_or_else(|e| panic!("schema registry initialization failed: {e}"))
});

/// The process-wide registry of built-in schemas.
pub fn global() -> &'static SchemaRegistry {
    &GLOBAL
}

/// Parse raw JSON text into whichever registered document its header names.
pub fn parse_raw_schema(json: &str) -> SchemaResult<Document> {
    global().parse_raw(json)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize)]
    struct Impostor {
        #[serde(rename = "braketSchemaHeader")]
        header: SchemaHeader,
    }

    impl Validate for Impostor {
        fn validate(_value: &Value, _v: &mut Validator) -> Option<Self> {
            Some(Self {
                header: Self::header(),
            })
        }
    }

    impl From<Impostor> for Document {
        fn from(_: Impostor) -> Self {
            Document::Program(Program::default())
        }
    }

    impl TryFrom<Document> for Impostor {
        type Error = Document;

        fn try_from(doc: Document) -> Result<Self, Document> {
            Err(doc)
        }
    }

    impl SchemaDocument for Impostor {
        const NAME: &'static str = "braket.ir.jaqcd.program";
        const VERSION: &'static str = "1";

        fn schema_header(&self) -> &SchemaHeader {
            &self.header
        }
    }

    #[test]
    fn test_register_and_resolve() {
        let mut registry = SchemaRegistry::new();
        registry.register::<Program>().unwrap();
        let entry = registry.resolve(&Program::header()).unwrap();
        assert!(entry.is::<Program>());
        assert!(!entry.is::<Problem>());
        assert_eq!(entry.header().name(), "braket.ir.jaqcd.program");
    }

    #[test]
    fn test_register_same_type_twice_is_noop() {
        let mut registry = SchemaRegistry::new();
        registry.register::<Problem>().unwrap();
        registry.register::<Problem>().unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_register_duplicate_header_fails() {
        let mut registry = SchemaRegistry::new();
        registry.register::<Program>().unwrap();
        let err = registry.register::<Impostor>().unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateSchema { .. }));
        assert!(registry.resolve(&Program::header()).unwrap().is::<Program>());
    }

    #[test]
    fn test_resolve_unknown() {
        let registry = SchemaRegistry::new();
        let header = SchemaHeader::new("braket.ir.jaqcd.program", "99").unwrap();
        let err = registry.resolve(&header).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::UnknownSchema { ref name, ref version }
                if name == "braket.ir.jaqcd.program" && version == "99"
        ));
    }

    #[test]
    fn test_global_registry_holds_every_document() {
        let registry = global();
        assert_eq!(registry.len(), 24);
        for entry in registry.entries() {
            assert!(registry.contains(entry.header()));
        }
    }

    #[test]
    fn test_parse_requires_header() {
        let err = global().parse(&json!({"instructions": []})).unwrap_err();
        assert!(matches!(err, SchemaError::Validation(_)));
        assert_eq!(err.violations()[0].path, "braketSchemaHeader");
        assert_eq!(err.violations()[0].kind, ErrorKind::Missing);
    }

    #[test]
    fn test_parse_dispatches_on_header() {
        let doc = parse_raw_schema(
            r#"{"braketSchemaHeader": {"name": "braket.ir.jaqcd.program", "version": "1"},
                "instructions": [{"type": "h", "target": 0}]}"#,
        )
        .unwrap();
        assert_eq!(doc.schema_header(), &Program::header());
        let program = doc.downcast::<Program>().unwrap();
        assert_eq!(program.instructions.len(), 1);
    }

    #[test]
    fn test_parse_unknown_header() {
        let err = parse_raw_schema(
            r#"{"braketSchemaHeader": {"name": "braket.ir.jaqcd.program", "version": "2"}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, SchemaError::UnknownSchema { .. }));
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(matches!(parse_raw_schema("{"), Err(SchemaError::Json(_))));
    }
}
