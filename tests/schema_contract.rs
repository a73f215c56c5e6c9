//! End-to-end checks over complete documents.

use braket_schemas::device_schema::{
    DeviceActionType, DwaveDeviceCapabilities, GateModelSimulatorDeviceCapabilities,
    IonqDeviceCapabilities, ProviderProperties, RigettiDeviceCapabilities,
};
use braket_schemas::ir::annealing::Problem;
use braket_schemas::ir::jaqcd::{Instruction, Observable, Program, ResultType};
use braket_schemas::task_result::{ActionPayload, AdditionalMetadata, GateModelTaskResult};
use braket_schemas::{
    Document, ErrorKind, SchemaDocument, SchemaError, SchemaHeader, Validate, global,
    parse_raw_schema,
};
use serde_json::{Value, json};

fn ionq() -> Value {
    json!({
        "braketSchemaHeader": {
            "name": "braket.device_schema.ionq.ionq_device_capabilities",
            "version": "1"
        },
        "service": {
            "executionWindows": [
                {"executionDay": "Everyday", "windowStartHour": "11:00:00", "windowEndHour": "12:00:00"}
            ],
            "shotsRange": [1, 10]
        },
        "action": {
            "braket.ir.jaqcd.program": {
                "actionType": "braket.ir.jaqcd.program",
                "version": ["1"],
                "supportedOperations": ["x", "y", "h", "cnot"],
                "supportedResultTypes": [
                    {"name": "resultType1", "observables": ["observable1"], "minShots": 0, "maxShots": 4}
                ]
            }
        },
        "paradigm": {
            "braketSchemaHeader": {
                "name": "braket.device_schema.gate_model_qpu_paradigm_properties",
                "version": "1"
            },
            "qubitCount": 11,
            "nativeGateSet": ["ccnot", "cy"],
            "connectivity": {"fullyConnected": false, "connectivityGraph": {"1": ["2", "3"]}}
        },
        "deviceParameters": {
            "braketSchemaHeader": {
                "name": "braket.device_schema.ionq.ionq_device_parameters",
                "version": "1"
            },
            "paradigmParameters": {
                "braketSchemaHeader": {
                    "name": "braket.device_schema.gate_model_parameters",
                    "version": "1"
                },
                "qubitCount": 11
            }
        },
        "provider": {
            "braketSchemaHeader": {
                "name": "braket.device_schema.ionq.ionq_provider_properties",
                "version": "1"
            },
            "target": "qpu",
            "fidelity": {"1q": {"mean": 0.99717}, "2q": {"mean": 0.9696}, "spam": {"mean": 0.9961}},
            "timing": {"t1": 10000000000.0, "t2": 500000, "1q": 1.1e-05, "2q": 0.00021, "readout": 0.000175, "reset": 3.5e-05}
        }
    })
}

fn violations(err: &SchemaError) -> Vec<(String, ErrorKind)> {
    err.violations()
        .iter()
        .map(|e| (e.path.clone(), e.kind))
        .collect()
}

#[test]
fn test_registry_resolves_every_entry_to_its_type() {
    let registry = global();
    for entry in registry.entries() {
        let resolved = registry.resolve(entry.header()).unwrap();
        assert_eq!(resolved.type_name(), entry.type_name());
    }
    let program = registry.resolve(&Program::header()).unwrap();
    assert!(program.is::<Program>());
    assert!(!program.is::<Problem>());
    assert!(
        registry
            .resolve(&IonqDeviceCapabilities::header())
            .unwrap()
            .is::<IonqDeviceCapabilities>()
    );

    let unknown = SchemaHeader::new("braket.ir.jaqcd.program", "2").unwrap();
    match registry.resolve(&unknown) {
        Err(SchemaError::UnknownSchema { name, version }) => {
            assert_eq!(name, "braket.ir.jaqcd.program");
            assert_eq!(version, "2");
        }
        other => panic!("expected UnknownSchema, got {other:?}"),
    }
}

#[test]
fn test_ionq_capabilities_complete_document() {
    let caps = IonqDeviceCapabilities::from_value(&ionq()).unwrap();
    assert_eq!(
        caps.schema_header().name(),
        "braket.device_schema.ionq.ionq_device_capabilities"
    );
    let action = caps.action_properties(DeviceActionType::Jaqcd).unwrap();
    assert!(action.supports_operation("CNOT"));
    assert!(caps.paradigm.supports_gate("cy"));
    assert_eq!(caps.device_parameters.paradigm_parameters.qubit_count.get(), 11);
    let Some(ProviderProperties::IonqProviderProperties(provider)) = &caps.provider else {
        panic!("expected an IonQ provider block");
    };
    assert_eq!(provider.mean_fidelity("1q"), Some(0.99717));

    let doc = parse_raw_schema(&ionq().to_string()).unwrap();
    assert!(matches!(doc, Document::IonqDeviceCapabilities(_)));
}

#[test]
fn test_ionq_capabilities_missing_sub_documents() {
    for key in ["paradigm", "action", "service", "deviceParameters"] {
        let mut doc = ionq();
        doc.as_object_mut().unwrap().remove(key);
        let err = IonqDeviceCapabilities::parse_raw(&doc.to_string()).unwrap_err();
        assert!(
            violations(&err).contains(&(key.to_string(), ErrorKind::Missing)),
            "{key}: {err}"
        );
    }
}

#[test]
fn test_ionq_capabilities_reject_simulator_document() {
    let err = GateModelSimulatorDeviceCapabilities::parse_raw(&ionq().to_string()).unwrap_err();
    let expected = ("braketSchemaHeader".to_string(), ErrorKind::HeaderMismatch);
    assert!(violations(&err).contains(&expected));
}

fn action_entry(action_type: &str) -> Value {
    json!({action_type: {"actionType": action_type, "version": ["1"]}})
}

#[test]
fn test_families_restrict_action_types() {
    let annealing = "braket.ir.annealing.problem";
    let jaqcd = "braket.ir.jaqcd.program";

    let mut doc = ionq();
    doc["action"] = action_entry(annealing);
    let err = IonqDeviceCapabilities::parse_raw(&doc.to_string()).unwrap_err();
    let path = format!("action.\"{annealing}\"");
    assert!(violations(&err).contains(&(path, ErrorKind::UnsupportedVariant)), "{err}");

    let rigetti = json!({
        "braketSchemaHeader": {
            "name": "braket.device_schema.rigetti_device_capabilities",
            "version": "1"
        },
        "action": action_entry(annealing)
    });
    let err = RigettiDeviceCapabilities::parse_raw(&rigetti.to_string()).unwrap_err();
    let path = format!("action.\"{annealing}\"");
    assert!(violations(&err).contains(&(path, ErrorKind::UnsupportedVariant)), "{err}");

    let dwave = json!({
        "braketSchemaHeader": {
            "name": "braket.device_schema.dwave.dwave_device_capabilities",
            "version": "1"
        },
        "action": action_entry(jaqcd)
    });
    let err = DwaveDeviceCapabilities::parse_raw(&dwave.to_string()).unwrap_err();
    let path = format!("action.\"{jaqcd}\"");
    assert!(violations(&err).contains(&(path, ErrorKind::UnsupportedVariant)), "{err}");
}

#[test]
fn test_constraint_boundaries() {
    assert!(Instruction::from_value(&json!({"type": "x", "target": 0})).is_ok());
    let errors = Instruction::from_value(&json!({"type": "x", "target": -1})).unwrap_err();
    assert!(errors.contains("target", ErrorKind::Constraint));

    for p in [0.0, 1.0] {
        let value = json!({"type": "bit_flip", "target": 0, "probability": p});
        assert!(Instruction::from_value(&value).is_ok(), "{p}");
    }
    let value = json!({"type": "bit_flip", "target": 0, "probability": 1.0000001});
    let errors = Instruction::from_value(&value).unwrap_err();
    assert!(errors.contains("probability", ErrorKind::Constraint));
}

#[test]
fn test_double_target() {
    assert!(Instruction::from_value(&json!({"type": "swap", "targets": [0, 1]})).is_ok());
    for targets in [json!([1]), json!([]), json!([1, 2, 3])] {
        let errors =
            Instruction::from_value(&json!({"type": "swap", "targets": targets})).unwrap_err();
        assert!(errors.contains("targets", ErrorKind::Constraint), "{targets}");
    }
    let errors =
        Instruction::from_value(&json!({"type": "swap", "targets": [-1, -2]})).unwrap_err();
    assert!(errors.contains("targets[0]", ErrorKind::Constraint));
    assert!(errors.contains("targets[1]", ErrorKind::Constraint));
}

fn identity(n: usize) -> Value {
    let rows: Vec<Value> = (0..n)
        .map(|i| {
            Value::Array(
                (0..n)
                    .map(|j| if i == j { json!([1.0, 0.0]) } else { json!([0.0, 0.0]) })
                    .collect(),
            )
        })
        .collect();
    Value::Array(rows)
}

#[test]
fn test_kraus_matrix_list_limits() {
    let kraus = |count: usize, dim: usize| {
        json!({"type": "kraus", "targets": [0, 1], "matrices": vec![identity(dim); count]})
    };
    assert!(Instruction::from_value(&kraus(16, 4)).is_ok());
    assert!(Instruction::from_value(&kraus(1, 2)).is_ok());

    let errors = Instruction::from_value(&kraus(17, 4)).unwrap_err();
    assert!(errors.contains("matrices", ErrorKind::Constraint));

    let errors = Instruction::from_value(&kraus(1, 5)).unwrap_err();
    assert!(errors.contains("matrices[0]", ErrorKind::Constraint));
    assert!(errors.contains("matrices[0][0]", ErrorKind::Constraint));
}

#[test]
fn test_instruction_dispatch_is_keyed() {
    let table = Instruction::table();
    assert!(table.contains("rx"));
    assert!(table.contains("unitary"));
    assert_eq!(table.key(), "type");

    let errors = Instruction::from_value(&json!({"type": "foo", "target": 0})).unwrap_err();
    let error = errors.iter().next().unwrap();
    assert_eq!(error.kind, ErrorKind::UnsupportedVariant);
    assert!(error.message.contains("`foo`"), "{}", error.message);

    let errors = Instruction::from_value(&json!({"type": "rx", "target": 0})).unwrap_err();
    assert!(errors.contains("angle", ErrorKind::Missing));
    assert_eq!(errors.len(), 1);
}

#[test]
fn test_additional_metadata_action() {
    let value = json!({
        "action": {
            "braketSchemaHeader": {"name": "braket.ir.jaqcd.program", "version": "1"},
            "instructions": [{"type": "h", "target": 0}]
        }
    });
    let metadata = AdditionalMetadata::from_value(&value).unwrap();
    let text = serde_json::to_string(&metadata).unwrap();
    let back: AdditionalMetadata = serde_json::from_str(&text).unwrap();
    assert_eq!(back, metadata);
    let ActionPayload::Program(program) = &back.action else {
        panic!("expected a program");
    };
    assert_eq!(program.instructions.len(), 1);
    assert_eq!(program.instructions[0].type_name(), "h");
    assert_eq!(program.instructions[0].qubits(), vec![0]);

    for action in [json!({"instructions": [{"type": "h"}]}), json!({"type": "QUBO"}), json!(3)] {
        assert!(AdditionalMetadata::from_value(&json!({"action": action})).is_err());
    }
}

#[test]
fn test_observables() {
    assert!(Observable::from_value(&json!(["x"])).is_ok());
    let errors = Observable::from_value(&json!(["q"])).unwrap_err();
    assert!(errors.contains("[0]", ErrorKind::Pattern));

    let hermitian = json!([[[[1.0, 0.0], [0.0, 0.0]], [[0.0, 0.0], [1.0, 0.0]]]]);
    assert!(Observable::from_value(&hermitian).is_ok());

    let result = json!({"type": "expectation", "observable": ["z", "x"], "targets": [0, 1]});
    assert_eq!(ResultType::from_value(&result).unwrap().qubits(), vec![0, 1]);
}

#[test]
fn test_round_trip_through_registry() {
    let documents = [
        ionq(),
        json!({
            "braketSchemaHeader": {"name": "braket.ir.jaqcd.program", "version": "1"},
            "instructions": [
                {"type": "h", "target": 0},
                {"type": "cnot", "control": 0, "target": 1},
                {"type": "pauli_channel", "target": 1, "probX": 0.1, "probY": 0.2, "probZ": 0.3},
                {"type": "unitary", "targets": [0], "matrix": [[[0.0, 0.0], [1.0, 0.0]], [[1.0, 0.0], [0.0, 0.0]]]}
            ],
            "results": [{"type": "statevector"}, {"type": "probability"}],
            "basis_rotation_instructions": [{"type": "h", "target": 1}]
        }),
        json!({
            "braketSchemaHeader": {"name": "braket.task_result.gate_model_task_result", "version": "1"},
            "measurements": [[0, 1], [1, 1]],
            "measuredQubits": [0, 1],
            "taskMetadata": {
                "braketSchemaHeader": {"name": "braket.task_result.task_metadata", "version": "1"},
                "id": "task",
                "shots": 2,
                "deviceId": "device"
            },
            "additionalMetadata": {"action": {"instructions": [{"type": "x", "target": 0}]}}
        }),
    ];
    for value in documents {
        let doc = global().parse(&value).unwrap();
        let text = serde_json::to_string(&doc).unwrap();
        let again = parse_raw_schema(&text).unwrap();
        assert_eq!(again, doc);
    }
}

#[test]
fn test_plain_serde_runs_validation() {
    let err = serde_json::from_value::<GateModelTaskResult>(json!({"measurements": [[2]]}))
        .unwrap_err();
    assert!(err.to_string().contains("measurements[0][0]"), "{err}");
}
