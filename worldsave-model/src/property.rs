use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Property names eligible for persistence.
///
/// Anything else in an entity's property bag is runtime state and is never
/// written to a snapshot. [`IntrinsicProperty::Parent`] is special: it is read
/// from the entity's ownership reference, not from the property bag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IntrinsicProperty {
    Name,
    Type,
    Translation,
    Rotation,
    Scale,
    Layers,
    Parent,
    BehaviorModules,
    Multiuser,
    Color,
    Width,
    Height,
    Depth,
    CornerRadius,
    TextScale,
    ReadOnly,
}

impl IntrinsicProperty {
    /// Every intrinsic property, in the order records are filled.
    pub const ALL: [IntrinsicProperty; 16] = [
        IntrinsicProperty::Name,
        IntrinsicProperty::Type,
        IntrinsicProperty::Translation,
        IntrinsicProperty::Rotation,
        IntrinsicProperty::Scale,
        IntrinsicProperty::Layers,
        IntrinsicProperty::Parent,
        IntrinsicProperty::BehaviorModules,
        IntrinsicProperty::Multiuser,
        IntrinsicProperty::Color,
        IntrinsicProperty::Width,
        IntrinsicProperty::Height,
        IntrinsicProperty::Depth,
        IntrinsicProperty::CornerRadius,
        IntrinsicProperty::TextScale,
        IntrinsicProperty::ReadOnly,
    ];

    /// Key used in the property bag and in exported record data.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            IntrinsicProperty::Name => "name",
            IntrinsicProperty::Type => "type",
            IntrinsicProperty::Translation => "translation",
            IntrinsicProperty::Rotation => "rotation",
            IntrinsicProperty::Scale => "scale",
            IntrinsicProperty::Layers => "layers",
            IntrinsicProperty::Parent => "parent",
            IntrinsicProperty::BehaviorModules => "behaviorModules",
            IntrinsicProperty::Multiuser => "multiuser",
            IntrinsicProperty::Color => "color",
            IntrinsicProperty::Width => "width",
            IntrinsicProperty::Height => "height",
            IntrinsicProperty::Depth => "depth",
            IntrinsicProperty::CornerRadius => "cornerRadius",
            IntrinsicProperty::TextScale => "textScale",
            IntrinsicProperty::ReadOnly => "readOnly",
        }
    }
}

impl fmt::Display for IntrinsicProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A name that is not an [`IntrinsicProperty`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("not an intrinsic property: {0:?}")]
pub struct UnknownProperty(pub String);

impl FromStr for IntrinsicProperty {
    type Err = UnknownProperty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IntrinsicProperty::ALL
            .into_iter()
            .find(|prop| prop.as_str() == s)
            .ok_or_else(|| UnknownProperty(s.to_string()))
    }
}
