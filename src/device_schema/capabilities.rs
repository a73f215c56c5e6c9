//! Device capabilities documents.
//!
//! Every capabilities document has the same four required sub-documents plus
//! an optional provider block:
//!
//! ```text
//!   DeviceCapabilities<F>
//!     ├── service            DeviceServiceProperties
//!     ├── action             { DeviceActionType → F::Action }
//!     ├── paradigm           F::Paradigm
//!     ├── deviceParameters   F::Parameters
//!     └── provider?          ProviderProperties (accepted by F)
//! ```
//!
//! The family `F` fixes the header and the sub-document types. The generic
//! family accepts any registered paradigm and parameter document; provider
//! families pin their own.

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::marker::PhantomData;

use serde::Serialize;
use serde_json::Value;

use super::action::{ActionEntry, ActionProperties, DeviceActionType};
use super::dwave::DwaveProviderProperties;
use super::ionq::IonqProviderProperties;
use super::paradigm::ParadigmProperties;
use super::parameters::DeviceParameters;
use super::service::DeviceServiceProperties;
use crate::error::ErrorKind;
use crate::header::SchemaHeader;
use crate::registry::{Document, SchemaDocument};
use crate::validation::{Fields, Validate, Validator};

/// A kind of capabilities document.
pub trait DeviceFamily: Debug + Clone + PartialEq + Send + Sync + 'static {
    /// Schema name of the capabilities document.
    const NAME: &'static str;
    /// Schema version of the capabilities document.
    const VERSION: &'static str = "1";
    /// Action types a device of this family may offer.
    const ACTION_TYPES: &'static [DeviceActionType] = DeviceActionType::ALL;

    /// Value type of the `action` map.
    type Action: Validate + ActionEntry + Serialize + Clone + Debug + PartialEq + Send + Sync;
    /// Type of `paradigm`.
    type Paradigm: Validate + Serialize + Clone + Debug + PartialEq + Send + Sync;
    /// Type of `deviceParameters`.
    type Parameters: Validate + Serialize + Clone + Debug + PartialEq + Send + Sync;

    /// Check whether this family accepts the given provider block.
    fn accepts_provider(provider: &ProviderProperties) -> bool;
}

document_union! {
    /// Vendor-specific device properties, selected by header.
    pub enum ProviderProperties: "provider" {
        IonqProviderProperties(IonqProviderProperties),
        DwaveProviderProperties(DwaveProviderProperties),
    }
}

/// Capabilities of a device of family `F`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", bound(serialize = ""))]
pub struct DeviceCapabilities<F: DeviceFamily = GenericDevice> {
    braket_schema_header: SchemaHeader,
    /// Availability and shot limits.
    pub service: DeviceServiceProperties,
    /// Supported program formats.
    pub action: BTreeMap<DeviceActionType, F::Action>,
    /// Execution model of the device.
    pub paradigm: F::Paradigm,
    /// Parameters a task may set.
    pub device_parameters: F::Parameters,
    /// Vendor-specific properties.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<ProviderProperties>,
    #[serde(skip)]
    _family: PhantomData<F>,
}

impl<F: DeviceFamily> DeviceCapabilities<F> {
    /// The header every document of this family carries.
    pub fn family_header() -> SchemaHeader {
        SchemaHeader::canonical(F::NAME, F::VERSION)
    }

    /// Properties for `action_type`, if the device supports it.
    pub fn action_properties(&self, action_type: DeviceActionType) -> Option<&F::Action> {
        self.action.get(&action_type)
    }

    /// Check whether the device runs programs of `action_type`.
    pub fn supports_action(&self, action_type: DeviceActionType) -> bool {
        self.action.contains_key(&action_type)
    }
}

/// Report every `action` key naming a type outside `allowed`.
fn check_action_support(
    action: Option<&Value>,
    allowed: &[DeviceActionType],
    v: &mut Validator,
) -> bool {
    let Some(Value::Object(entries)) = action else {
        return true;
    };
    let mut supported = true;
    for key in entries.keys() {
        let Some(action_type) = DeviceActionType::from_literal(key) else {
            continue;
        };
        if !allowed.contains(&action_type) {
            supported = false;
            v.at_key("action", |v| {
                v.at_key(key, |v| {
                    v.report(
                        ErrorKind::UnsupportedVariant,
                        format!("action `{action_type}` is not offered by this device family"),
                    )
                })
            });
        }
    }
    supported
}

/// Report every action entry whose `actionType` differs from its key.
fn check_action_keys<A: ActionEntry>(
    action: BTreeMap<DeviceActionType, A>,
    v: &mut Validator,
) -> Option<BTreeMap<DeviceActionType, A>> {
    let mut consistent = true;
    for (key, entry) in &action {
        let found = entry.action_type();
        if found != *key {
            consistent = false;
            v.at_key("action", |v| {
                v.at_key(key.as_str(), |v| {
                    v.at_key("actionType", |v| {
                        v.report(
                            ErrorKind::Inconsistent,
                            format!("entry for `{key}` declares actionType `{found}`"),
                        )
                    })
                })
            });
        }
    }
    consistent.then_some(action)
}

impl<F: DeviceFamily> Validate for DeviceCapabilities<F> {
    fn validate(value: &Value, v: &mut Validator) -> Option<Self> {
        let fields = Fields::of(value, v)?;
        let header = fields.header(v, &Self::family_header());
        let service = fields.field(v, "service");
        let supported = check_action_support(fields.get("action"), F::ACTION_TYPES, v);
        let action = fields
            .field::<BTreeMap<DeviceActionType, F::Action>>(v, "action")
            .and_then(|action| check_action_keys(action, v))
            .filter(|_| supported);
        let paradigm = fields.field(v, "paradigm");
        let device_parameters = fields.field(v, "deviceParameters");
        let provider = fields
            .field::<Option<ProviderProperties>>(v, "provider")
            .and_then(|provider| match provider {
                Some(block) if !F::accepts_provider(&block) => {
                    let found = block.schema_header().clone();
                    v.at_key("provider", |v| {
                        v.at_key(SchemaHeader::FIELD, |v| {
                            v.report(
                                ErrorKind::UnsupportedVariant,
                                format!("`{found}` is not a provider block for {}", F::NAME),
                            )
                        })
                    });
                    None
                }
                other => Some(other),
            });
        Some(Self {
            braket_schema_header: header?,
            service: service?,
            action: action?,
            paradigm: paradigm?,
            device_parameters: device_parameters?,
            provider: provider?,
            _family: PhantomData,
        })
    }
}

impl<F: DeviceFamily> SchemaDocument for DeviceCapabilities<F>
where
    Self: Into<Document> + TryFrom<Document, Error = Document>,
{
    const NAME: &'static str = F::NAME;
    const VERSION: &'static str = F::VERSION;

    fn schema_header(&self) -> &SchemaHeader {
        &self.braket_schema_header
    }
}

impl<'de, F: DeviceFamily> serde::Deserialize<'de> for DeviceCapabilities<F> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = <Value as serde::Deserialize>::deserialize(deserializer)?;
        Self::from_value(&value).map_err(serde::de::Error::custom)
    }
}

/// The base family: any action, paradigm, parameters and provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenericDevice;

impl DeviceFamily for GenericDevice {
    const NAME: &'static str = "braket.device_schema.device_capabilities";

    type Action = ActionProperties;
    type Paradigm = ParadigmProperties;
    type Parameters = DeviceParameters;

    fn accepts_provider(_provider: &ProviderProperties) -> bool {
        true
    }
}

/// Capabilities document of the base family.
pub type GenericDeviceCapabilities = DeviceCapabilities<GenericDevice>;
