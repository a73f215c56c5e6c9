//! Service properties common to every device.

use chrono::{NaiveTime, Weekday};
use serde::Serialize;
use serde_json::Value;

use crate::error::ErrorKind;
use crate::header::SchemaHeader;
use crate::registry::SchemaDocument;
use crate::validation::{BoundedVec, Fields, NonNegativeInt, Validate, Validator};

literal_enum! {
    /// Days on which an execution window applies.
    pub enum ExecutionDay {
        Everyday = "Everyday",
        Weekdays = "Weekdays",
        Weekend = "Weekend",
        Monday = "Monday",
        Tuesday = "Tuesday",
        Wednesday = "Wednesday",
        Thursday = "Thursday",
        Friday = "Friday",
        Saturday = "Saturday",
        Sunday = "Sunday",
    }
}

impl ExecutionDay {
    /// Check whether `day` falls under this window day.
    pub fn covers(self, day: Weekday) -> bool {
        let weekend = matches!(day, Weekday::Sat | Weekday::Sun);
        match self {
            Self::Everyday => true,
            Self::Weekdays => !weekend,
            Self::Weekend => weekend,
            Self::Monday => day == Weekday::Mon,
            Self::Tuesday => day == Weekday::Tue,
            Self::Wednesday => day == Weekday::Wed,
            Self::Thursday => day == Weekday::Thu,
            Self::Friday => day == Weekday::Fri,
            Self::Saturday => day == Weekday::Sat,
            Self::Sunday => day == Weekday::Sun,
        }
    }
}

/// A recurring interval during which the device accepts tasks.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceExecutionWindow {
    /// Which days the window applies to.
    pub execution_day: ExecutionDay,
    /// Start of the window.
    pub window_start_hour: NaiveTime,
    /// End of the window.
    pub window_end_hour: NaiveTime,
}

impl DeviceExecutionWindow {
    /// Check whether `day` at `time` falls inside this window.
    ///
    /// A window whose end precedes its start wraps past midnight.
    pub fn contains(&self, day: Weekday, time: NaiveTime) -> bool {
        if !self.execution_day.covers(day) {
            return false;
        }
        if self.window_start_hour <= self.window_end_hour {
            self.window_start_hour <= time && time <= self.window_end_hour
        } else {
            time >= self.window_start_hour || time <= self.window_end_hour
        }
    }
}

impl Validate for DeviceExecutionWindow {
    fn validate(value: &Value, v: &mut Validator) -> Option<Self> {
        let fields = Fields::of(value, v)?;
        let execution_day = fields.field(v, "executionDay");
        let window_start_hour = fields.field(v, "windowStartHour");
        let window_end_hour = fields.field(v, "windowEndHour");
        Some(Self {
            execution_day: execution_day?,
            window_start_hour: window_start_hour?,
            window_end_hour: window_end_hour?,
        })
    }
}

/// Inclusive `[min, max]` number of shots per task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShotsRange(NonNegativeInt, NonNegativeInt);

impl ShotsRange {
    /// Create a range, rejecting `min > max`.
    pub fn new(min: u64, max: u64) -> Option<Self> {
        (min <= max).then(|| Self(min.into(), max.into()))
    }

    /// Smallest accepted shot count.
    pub fn min(self) -> u64 {
        self.0.get()
    }

    /// Largest accepted shot count.
    pub fn max(self) -> u64 {
        self.1.get()
    }

    /// Check whether `shots` lies in the range.
    pub fn contains(self, shots: u64) -> bool {
        (self.min()..=self.max()).contains(&shots)
    }
}

impl Validate for ShotsRange {
    fn validate(value: &Value, v: &mut Validator) -> Option<Self> {
        let pair = BoundedVec::<NonNegativeInt, 2, 2>::validate(value, v)?;
        let (min, max) = (pair[0], pair[1]);
        if min > max {
            v.report(
                ErrorKind::Inconsistent,
                format!("minimum {min} exceeds maximum {max}"),
            );
            return None;
        }
        Some(Self(min, max))
    }
}

/// Price of running on a device.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceCost {
    /// Price in US dollars per `unit`.
    pub price: f64,
    /// Billing unit, e.g. `minute` or `task`.
    pub unit: String,
}

impl Validate for DeviceCost {
    fn validate(value: &Value, v: &mut Validator) -> Option<Self> {
        let fields = Fields::of(value, v)?;
        let price = fields.field(v, "price");
        let unit = fields.field(v, "unit");
        Some(Self {
            price: price?,
            unit: unit?,
        })
    }
}

/// Human-facing device metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDocumentation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_documentation_url: Option<String>,
}

impl Validate for DeviceDocumentation {
    fn validate(value: &Value, v: &mut Validator) -> Option<Self> {
        let fields = Fields::of(value, v)?;
        let image_url = fields.field(v, "imageUrl");
        let summary = fields.field(v, "summary");
        let external_documentation_url = fields.field(v, "externalDocumentationUrl");
        Some(Self {
            image_url: image_url?,
            summary: summary?,
            external_documentation_url: external_documentation_url?,
        })
    }
}

/// Availability, shot limits and pricing of a device.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceServiceProperties {
    braket_schema_header: SchemaHeader,
    /// When the device accepts tasks.
    pub execution_windows: Vec<DeviceExecutionWindow>,
    /// Accepted shot counts.
    pub shots_range: ShotsRange,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_cost: Option<DeviceCost>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_documentation: Option<DeviceDocumentation>,
    /// Region or site hosting the device.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_location: Option<String>,
}

impl DeviceServiceProperties {
    /// Check whether a task with `shots` shots is within the device limits.
    pub fn accepts_shots(&self, shots: u64) -> bool {
        self.shots_range.contains(shots)
    }

    /// Check whether any execution window is open on `day` at `time`.
    pub fn is_available(&self, day: Weekday, time: NaiveTime) -> bool {
        self.execution_windows.iter().any(|w| w.contains(day, time))
    }
}

impl Validate for DeviceServiceProperties {
    fn validate(value: &Value, v: &mut Validator) -> Option<Self> {
        let fields = Fields::of(value, v)?;
        let header = fields.header(v, &Self::header());
        let execution_windows = fields.field(v, "executionWindows");
        let shots_range = fields.field(v, "shotsRange");
        let device_cost = fields.field(v, "deviceCost");
        let device_documentation = fields.field(v, "deviceDocumentation");
        let device_location = fields.field(v, "deviceLocation");
        Some(Self {
            braket_schema_header: header?,
            execution_windows: execution_windows?,
            shots_range: shots_range?,
            device_cost: device_cost?,
            device_documentation: device_documentation?,
            device_location: device_location?,
        })
    }
}

schema_document!(DeviceServiceProperties, "braket.device_schema.device_service_properties", "1");
