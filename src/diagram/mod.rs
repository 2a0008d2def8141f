//! Diagram variant dispatch.
//!
//! Authored sections may carry a diagram in one of two forms: opaque
//! `mermaid` markup, or a `custom` diagram whose `type` selects a registered
//! payload shape. `resolve_diagram` turns either form into a
//! renderer-neutral `RenderDescriptor`, refusing unregistered types and
//! malformed payloads instead of drawing a placeholder.

pub mod custom;

pub use custom::{
    AlgorithmStep, AlgorithmStepsData, ArrayData, CustomData, CustomDiagramType, LinkedListData,
    MemoryLayoutData, MemoryRegion, RegionKind, Scalar,
};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// A diagram as authored, discriminated by `kind`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Diagram {
    Mermaid {
        code: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
    },
    Custom {
        #[serde(rename = "type")]
        diagram_type: String,
        #[serde(default)]
        data: Value,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
    },
}

/// What the UI needs to draw a diagram, with no grammar or schema left to check.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "renderer", rename_all = "lowercase")]
pub enum RenderDescriptor {
    /// Mermaid source handed verbatim to the external renderer.
    Mermaid {
        source: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
    },
    Custom {
        diagram: CustomData,
        #[serde(skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
    },
}

impl RenderDescriptor {
    pub fn caption(&self) -> Option<&str> {
        match self {
            RenderDescriptor::Mermaid { caption, .. } | RenderDescriptor::Custom { caption, .. } => {
                caption.as_deref()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DiagramError {
    #[error("custom diagram type '{0}' is not registered")]
    UnregisteredType(String),
    #[error("custom diagram '{diagram_type}' data does not match its registered shape: {detail}")]
    ShapeMismatch {
        diagram_type: CustomDiagramType,
        detail: String,
    },
}

/// Resolve an authored diagram into its render descriptor.
pub fn resolve_diagram(diagram: &Diagram) -> Result<RenderDescriptor, DiagramError> {
    match diagram {
        Diagram::Mermaid { code, caption } => Ok(RenderDescriptor::Mermaid {
            source: code.clone(),
            caption: caption.clone(),
        }),
        Diagram::Custom {
            diagram_type,
            data,
            caption,
        } => {
            let registered = CustomDiagramType::parse(diagram_type)
                .ok_or_else(|| DiagramError::UnregisteredType(diagram_type.clone()))?;
            Ok(RenderDescriptor::Custom {
                diagram: registered.decode(data)?,
                caption: caption.clone(),
            })
        }
    }
}
