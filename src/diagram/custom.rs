//! Registered `custom` diagram types and their typed payloads.
//!
//! Each registered type owns one payload struct; decoding rejects unknown
//! fields and then applies the few cross-field rules serde cannot express.
//! Adding a type means adding a `CustomDiagramType` variant, a payload and a
//! `CustomData` case; the exhaustive matches below flag every spot to touch.

use crate::diagram::DiagramError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum CustomDiagramType {
    Array,
    LinkedList,
    MemoryLayout,
    AlgorithmSteps,
}

impl CustomDiagramType {
    pub const ALL: [CustomDiagramType; 4] = [
        CustomDiagramType::Array,
        CustomDiagramType::LinkedList,
        CustomDiagramType::MemoryLayout,
        CustomDiagramType::AlgorithmSteps,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CustomDiagramType::Array => "array",
            CustomDiagramType::LinkedList => "linked-list",
            CustomDiagramType::MemoryLayout => "memory-layout",
            CustomDiagramType::AlgorithmSteps => "algorithm-steps",
        }
    }

    /// Look up a registered type by its authored `type` string.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.as_str() == value)
    }

    /// Decode `data` into the payload registered for this type.
    pub fn decode(self, data: &Value) -> Result<CustomData, DiagramError> {
        match self {
            CustomDiagramType::Array => {
                let payload: ArrayData = decode_payload(self, data)?;
                if payload.values.is_empty() {
                    return Err(self.mismatch("values must not be empty"));
                }
                if let Some(index) = payload
                    .highlight
                    .iter()
                    .find(|index| **index >= payload.values.len())
                {
                    return Err(self.mismatch(format!(
                        "highlight index {index} is outside {} values",
                        payload.values.len()
                    )));
                }
                Ok(CustomData::Array(payload))
            }
            CustomDiagramType::LinkedList => {
                let payload: LinkedListData = decode_payload(self, data)?;
                if payload.nodes.is_empty() {
                    return Err(self.mismatch("nodes must not be empty"));
                }
                Ok(CustomData::LinkedList(payload))
            }
            CustomDiagramType::MemoryLayout => {
                let payload: MemoryLayoutData = decode_payload(self, data)?;
                if payload.regions.is_empty() {
                    return Err(self.mismatch("regions must not be empty"));
                }
                Ok(CustomData::MemoryLayout(payload))
            }
            CustomDiagramType::AlgorithmSteps => {
                let payload: AlgorithmStepsData = decode_payload(self, data)?;
                if payload.steps.is_empty() {
                    return Err(self.mismatch("steps must not be empty"));
                }
                Ok(CustomData::AlgorithmSteps(payload))
            }
        }
    }

    fn mismatch(self, detail: impl Into<String>) -> DiagramError {
        DiagramError::ShapeMismatch {
            diagram_type: self,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for CustomDiagramType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn decode_payload<T: DeserializeOwned>(
    diagram_type: CustomDiagramType,
    data: &Value,
) -> Result<T, DiagramError> {
    T::deserialize(data).map_err(|err| diagram_type.mismatch(err.to_string()))
}

/// Typed data of a resolved custom diagram, one case per registered type.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "kebab-case")]
pub enum CustomData {
    Array(ArrayData),
    LinkedList(LinkedListData),
    MemoryLayout(MemoryLayoutData),
    AlgorithmSteps(AlgorithmStepsData),
}

impl CustomData {
    pub fn diagram_type(&self) -> CustomDiagramType {
        match self {
            CustomData::Array(_) => CustomDiagramType::Array,
            CustomData::LinkedList(_) => CustomDiagramType::LinkedList,
            CustomData::MemoryLayout(_) => CustomDiagramType::MemoryLayout,
            CustomData::AlgorithmSteps(_) => CustomDiagramType::AlgorithmSteps,
        }
    }
}

/// A cell value: text, number or boolean.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArrayData {
    pub values: Vec<Scalar>,
    /// Zero-based indices into `values`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub highlight: Vec<usize>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinkedListData {
    pub nodes: Vec<Scalar>,
    #[serde(default)]
    pub circular: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MemoryLayoutData {
    pub regions: Vec<MemoryRegion>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MemoryRegion {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<RegionKind>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionKind {
    Stack,
    Heap,
    Static,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AlgorithmStepsData {
    pub steps: Vec<AlgorithmStep>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AlgorithmStep {
    pub description: String,
    /// Free-form snapshot handed through to the renderer untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<Value>,
}
