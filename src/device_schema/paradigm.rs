//! Paradigm properties: qubit counts, native gates and connectivity.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use super::simulator::GateModelSimulatorParadigmProperties;
use crate::header::SchemaHeader;
use crate::registry::SchemaDocument;
use crate::validation::{Fields, NonNegativeInt, Validate, Validator};

/// Qubit connectivity of a device.
///
/// Edges are treated as bidirectional: `"1": ["2"]` lets qubits 1 and 2
/// interact in either direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceConnectivity {
    /// Every qubit pair can interact.
    pub fully_connected: bool,
    /// Adjacency lists keyed by qubit id.
    pub connectivity_graph: BTreeMap<String, Vec<String>>,
}

impl DeviceConnectivity {
    /// Check if two qubits are connected.
    pub fn is_connected(&self, q1: u64, q2: u64) -> bool {
        if self.fully_connected {
            return q1 != q2;
        }
        let (a, b) = (q1.to_string(), q2.to_string());
        let listed = |from: &str, to: &str| {
            self.connectivity_graph
                .get(from)
                .is_some_and(|targets| targets.iter().any(|t| t == to))
        };
        listed(&a, &b) || listed(&b, &a)
    }

    /// Number of distinct edges in the graph, ignoring direction.
    pub fn edge_count(&self) -> usize {
        let mut edges: Vec<(&str, &str)> = self
            .connectivity_graph
            .iter()
            .flat_map(|(from, targets)| {
                targets.iter().map(move |to| {
                    if from.as_str() <= to.as_str() {
                        (from.as_str(), to.as_str())
                    } else {
                        (to.as_str(), from.as_str())
                    }
                })
            })
            .collect();
        edges.sort_unstable();
        edges.dedup();
        edges.len()
    }
}

impl Validate for DeviceConnectivity {
    fn validate(value: &Value, v: &mut Validator) -> Option<Self> {
        let fields = Fields::of(value, v)?;
        let fully_connected = fields.field(v, "fullyConnected");
        let connectivity_graph = fields.field(v, "connectivityGraph");
        Some(Self {
            fully_connected: fully_connected?,
            connectivity_graph: connectivity_graph?,
        })
    }
}

deserialize_via_validate!(DeviceConnectivity);

/// Define a gate-model QPU paradigm document.
macro_rules! qpu_paradigm {
    ($(#[$meta:meta])* $name:ident, $schema:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Serialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $name {
            braket_schema_header: SchemaHeader,
            /// Number of physical qubits.
            pub qubit_count: NonNegativeInt,
            /// Gates the hardware executes natively.
            pub native_gate_set: Vec<String>,
            pub connectivity: DeviceConnectivity,
        }

        impl $name {
            /// Check if a gate is native, ignoring case.
            pub fn supports_gate(&self, gate: &str) -> bool {
                self.native_gate_set.iter().any(|g| g.eq_ignore_ascii_case(gate))
            }
        }

        impl Validate for $name {
            fn validate(value: &Value, v: &mut Validator) -> Option<Self> {
                let fields = Fields::of(value, v)?;
                let header = fields.header(v, &Self::header());
                let qubit_count = fields.field(v, "qubitCount");
                let native_gate_set = fields.field(v, "nativeGateSet");
                let connectivity = fields.field(v, "connectivity");
                Some(Self {
                    braket_schema_header: header?,
                    qubit_count: qubit_count?,
                    native_gate_set: native_gate_set?,
                    connectivity: connectivity?,
                })
            }
        }

        schema_document!($name, $schema, "1");
    };
}

qpu_paradigm!(
    /// Paradigm properties of a gate-model QPU.
    GateModelQpuParadigmProperties,
    "braket.device_schema.gate_model_qpu_paradigm_properties"
);

qpu_paradigm!(
    /// Paradigm properties of a Rigetti QPU.
    RigettiDeviceParadigmProperties,
    "braket.device_schema.rigetti_device_paradigm_properties"
);

/// Paradigm properties of a quantum annealer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnealingParadigmProperties {
    braket_schema_header: SchemaHeader,
    /// Number of qubits on the annealer.
    pub qubit_count: NonNegativeInt,
}

impl Validate for AnnealingParadigmProperties {
    fn validate(value: &Value, v: &mut Validator) -> Option<Self> {
        let fields = Fields::of(value, v)?;
        let header = fields.header(v, &Self::header());
        let qubit_count = fields.field(v, "qubitCount");
        Some(Self {
            braket_schema_header: header?,
            qubit_count: qubit_count?,
        })
    }
}

schema_document!(
    AnnealingParadigmProperties,
    "braket.device_schema.annealing_paradigm_properties",
    "1"
);

document_union! {
    /// Any registered paradigm document, selected by its header.
    pub enum ParadigmProperties: "paradigm" {
        GateModelQpuParadigmProperties(GateModelQpuParadigmProperties),
        RigettiDeviceParadigmProperties(RigettiDeviceParadigmProperties),
        GateModelSimulatorParadigmProperties(GateModelSimulatorParadigmProperties),
        AnnealingParadigmProperties(AnnealingParadigmProperties),
    }
}

impl ParadigmProperties {
    /// Qubit count declared by the paradigm.
    pub fn qubit_count(&self) -> u64 {
        match self {
            Self::GateModelQpuParadigmProperties(p) => p.qubit_count.get(),
            Self::RigettiDeviceParadigmProperties(p) => p.qubit_count.get(),
            Self::GateModelSimulatorParadigmProperties(p) => p.qubit_count.get(),
            Self::AnnealingParadigmProperties(p) => p.qubit_count.get(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::ErrorKind;

    fn qpu() -> Value {
        json!({
            "braketSchemaHeader": {
                "name": "braket.device_schema.gate_model_qpu_paradigm_properties",
                "version": "1"
            },
            "qubitCount": 11,
            "nativeGateSet": ["ccnot", "CY"],
            "connectivity": {"fullyConnected": false, "connectivityGraph": {"1": ["2", "3"], "2": ["1"]}}
        })
    }

    #[test]
    fn test_connectivity() {
        let paradigm = GateModelQpuParadigmProperties::from_value(&qpu()).unwrap();
        let graph = &paradigm.connectivity;
        assert!(graph.is_connected(1, 2));
        assert!(graph.is_connected(3, 1));
        assert!(!graph.is_connected(2, 3));
        assert_eq!(graph.edge_count(), 2);
        assert!(paradigm.supports_gate("cy"));
        assert!(!paradigm.supports_gate("h"));
    }

    #[test]
    fn test_fully_connected() {
        let graph = DeviceConnectivity {
            fully_connected: true,
            connectivity_graph: BTreeMap::new(),
        };
        assert!(graph.is_connected(0, 31));
        assert!(!graph.is_connected(4, 4));
    }

    #[test]
    fn test_paradigm_union_dispatches_on_header() {
        let paradigm = ParadigmProperties::from_value(&qpu()).unwrap();
        assert!(matches!(paradigm, ParadigmProperties::GateModelQpuParadigmProperties(_)));
        assert_eq!(paradigm.qubit_count(), 11);

        let annealing = json!({
            "braketSchemaHeader": {
                "name": "braket.device_schema.annealing_paradigm_properties",
                "version": "1"
            },
            "qubitCount": 2048
        });
        let paradigm = ParadigmProperties::from_value(&annealing).unwrap();
        assert_eq!(paradigm.qubit_count(), 2048);
    }

    #[test]
    fn test_paradigm_union_rejects_other_families() {
        let params = json!({
            "braketSchemaHeader": {"name": "braket.device_schema.gate_model_parameters", "version": "1"},
            "qubitCount": 2
        });
        let errors = ParadigmProperties::from_value(&params).unwrap_err();
        assert!(errors.contains("braketSchemaHeader", ErrorKind::UnsupportedVariant));

        let unknown = json!({
            "braketSchemaHeader": {"name": "braket.device_schema.device_paradigm_properties", "version": "1"}
        });
        let errors = ParadigmProperties::from_value(&unknown).unwrap_err();
        assert!(errors.contains("braketSchemaHeader", ErrorKind::UnsupportedVariant));

        let errors = ParadigmProperties::from_value(&json!({"qubitCount": 2})).unwrap_err();
        assert!(errors.contains("braketSchemaHeader", ErrorKind::Missing));
    }

    #[test]
    fn test_paradigm_union_checks_header_before_body() {
        let program = json!({
            "braketSchemaHeader": {"name": "braket.ir.jaqcd.program", "version": "1"}
        });
        assert!(!ParadigmProperties::accepts(&SchemaHeader::of(&program).unwrap()));
        let errors = ParadigmProperties::from_value(&program).unwrap_err();
        assert!(errors.contains("braketSchemaHeader", ErrorKind::UnsupportedVariant));
        assert!(!errors.contains("instructions", ErrorKind::Missing));
        assert_eq!(errors.len(), 1);
        assert!(errors.as_slice()[0].message.contains("braket.ir.jaqcd.program"));
    }

    #[test]
    fn test_rigetti_header_mismatch() {
        let errors = RigettiDeviceParadigmProperties::from_value(&qpu()).unwrap_err();
        assert!(errors.contains("braketSchemaHeader", ErrorKind::HeaderMismatch));
    }
}
