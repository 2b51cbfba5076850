//! Quantities of Newton's second law and the resolver that maps a quantity
//! name to its canonical unit and to the rearrangement of F = m·a that
//! computes it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::knowledge::KnowledgeSource;

/// Returned by [`unit_for`] when no unit symbol can be resolved.
pub const UNKNOWN_UNIT: &str = "unknown";

/// One of the three quantities related by F = m·a.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuantityKind {
    Mass,
    Acceleration,
    Force,
}

impl QuantityKind {
    /// All kinds in slot order (mass, acceleration, force).
    pub const ALL: [QuantityKind; 3] = [Self::Mass, Self::Acceleration, Self::Force];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mass => "mass",
            Self::Acceleration => "acceleration",
            Self::Force => "force",
        }
    }

    /// Human phrase naming the two inputs needed to compute this quantity.
    pub fn required_inputs(self) -> &'static str {
        match self {
            Self::Mass => "Force and acceleration",
            Self::Acceleration => "Force and mass",
            Self::Force => "Mass and acceleration",
        }
    }
}

impl fmt::Display for QuantityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a name that is not one of the three quantities.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown quantity: \"{0}\"")]
pub struct UnknownQuantity(pub String);

impl FromStr for QuantityKind {
    type Err = UnknownQuantity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mass" => Ok(Self::Mass),
            "acceleration" => Ok(Self::Acceleration),
            "force" => Ok(Self::Force),
            _ => Err(UnknownQuantity(s.to_string())),
        }
    }
}

/// The algebraic rearrangement of F = m·a used to find the unknown.
///
/// All three are views of the same law; which one applies depends only on
/// the name of the unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Formula {
    ForceFromMassAcceleration,
    AccelerationFromForceMass,
    MassFromForceAcceleration,
}

impl Formula {
    /// The quantity this rearrangement solves for.
    pub fn target(self) -> QuantityKind {
        match self {
            Self::ForceFromMassAcceleration => QuantityKind::Force,
            Self::AccelerationFromForceMass => QuantityKind::Acceleration,
            Self::MassFromForceAcceleration => QuantityKind::Mass,
        }
    }

    pub fn notation(self) -> &'static str {
        match self {
            Self::ForceFromMassAcceleration => "F=m·a",
            Self::AccelerationFromForceMass => "a=F/m",
            Self::MassFromForceAcceleration => "m=F/a",
        }
    }
}

impl From<QuantityKind> for Formula {
    fn from(kind: QuantityKind) -> Self {
        match kind {
            QuantityKind::Force => Self::ForceFromMassAcceleration,
            QuantityKind::Acceleration => Self::AccelerationFromForceMass,
            QuantityKind::Mass => Self::MassFromForceAcceleration,
        }
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.notation())
    }
}

/// Select the rearrangement for a target name. `None` means the target is
/// not a quantity of this law.
pub fn formula_for(target: &str) -> Option<Formula> {
    target.parse::<QuantityKind>().ok().map(Formula::from)
}

/// Canonical unit symbol for a quantity name, looked up in the knowledge
/// base. Yields [`UNKNOWN_UNIT`] for unrecognized names, a missing knowledge
/// base, or a knowledge base without an entry for the kind.
pub fn unit_for(kb: Option<&dyn KnowledgeSource>, kind: &str) -> String {
    let Ok(kind) = kind.parse::<QuantityKind>() else {
        return UNKNOWN_UNIT.to_string();
    };
    kb.and_then(|kb| kb.unit_symbol(kind))
        .map(str::to_string)
        .unwrap_or_else(|| UNKNOWN_UNIT.to_string())
}

/// A named numeric value with its canonical unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantitySlot {
    pub kind: QuantityKind,
    pub value: Option<f64>,
    pub unit: String,
}

impl QuantitySlot {
    pub fn new(kind: QuantityKind, unit: impl Into<String>) -> Self {
        Self {
            kind,
            value: None,
            unit: unit.into(),
        }
    }

    pub fn with_value(mut self, value: Option<f64>) -> Self {
        self.value = value;
        self
    }
}

/// The three slots of one problem, always in mass/acceleration/force order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantities {
    pub mass: QuantitySlot,
    pub acceleration: QuantitySlot,
    pub force: QuantitySlot,
}

impl Quantities {
    pub fn get(&self, kind: QuantityKind) -> &QuantitySlot {
        match kind {
            QuantityKind::Mass => &self.mass,
            QuantityKind::Acceleration => &self.acceleration,
            QuantityKind::Force => &self.force,
        }
    }

    pub fn value(&self, kind: QuantityKind) -> Option<f64> {
        self.get(kind).value
    }

    /// Copy of these slots with `kind` set to `value`.
    pub fn with_value(&self, kind: QuantityKind, value: f64) -> Self {
        let mut next = self.clone();
        let slot = match kind {
            QuantityKind::Mass => &mut next.mass,
            QuantityKind::Acceleration => &mut next.acceleration,
            QuantityKind::Force => &mut next.force,
        };
        slot.value = Some(value);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::KnowledgeBase;

    #[test]
    fn formula_depends_only_on_target_name() {
        assert_eq!(
            formula_for("force"),
            Some(Formula::ForceFromMassAcceleration)
        );
        assert_eq!(
            formula_for("acceleration"),
            Some(Formula::AccelerationFromForceMass)
        );
        assert_eq!(formula_for("mass"), Some(Formula::MassFromForceAcceleration));
        assert_eq!(formula_for("energy"), None);
        assert_eq!(formula_for(""), None);
    }

    #[test]
    fn formula_notation() {
        assert_eq!(Formula::ForceFromMassAcceleration.to_string(), "F=m·a");
        assert_eq!(Formula::AccelerationFromForceMass.to_string(), "a=F/m");
        assert_eq!(Formula::MassFromForceAcceleration.to_string(), "m=F/a");
        for kind in QuantityKind::ALL {
            assert_eq!(Formula::from(kind).target(), kind);
        }
    }

    #[test]
    fn kind_parsing_is_case_insensitive() {
        assert_eq!("Force".parse::<QuantityKind>().unwrap(), QuantityKind::Force);
        assert_eq!(" MASS ".parse::<QuantityKind>().unwrap(), QuantityKind::Mass);
        assert!("velocity".parse::<QuantityKind>().is_err());
    }

    #[test]
    fn unknown_quantity_error_names_input() {
        let err = "velocity".parse::<QuantityKind>().unwrap_err();
        assert_eq!(err, UnknownQuantity("velocity".into()));
        assert_eq!(err.to_string(), "unknown quantity: \"velocity\"");

        let boxed: Box<dyn std::error::Error> = Box::new(err);
        assert!(boxed.source().is_none());
    }

    #[test]
    fn unit_for_uses_knowledge_base() {
        let kb = KnowledgeBase::bundled().unwrap();
        assert_eq!(unit_for(Some(&kb), "mass"), "kg");
        assert_eq!(unit_for(Some(&kb), "force"), "N");
        assert_eq!(unit_for(Some(&kb), "acceleration"), "m/s²");
        assert_eq!(unit_for(Some(&kb), "energy"), UNKNOWN_UNIT);
    }

    #[test]
    fn unit_for_without_knowledge_base_is_unknown() {
        assert_eq!(unit_for(None, "mass"), UNKNOWN_UNIT);
    }

    #[test]
    fn with_value_leaves_original_untouched() {
        let slots = Quantities {
            mass: QuantitySlot::new(QuantityKind::Mass, "kg").with_value(Some(4.0)),
            acceleration: QuantitySlot::new(QuantityKind::Acceleration, "m/s²")
                .with_value(Some(3.0)),
            force: QuantitySlot::new(QuantityKind::Force, "N"),
        };
        let filled = slots.with_value(QuantityKind::Force, 12.0);
        assert_eq!(slots.value(QuantityKind::Force), None);
        assert_eq!(filled.value(QuantityKind::Force), Some(12.0));
        assert_eq!(filled.value(QuantityKind::Mass), Some(4.0));
        assert_eq!(filled.value(QuantityKind::Acceleration), Some(3.0));
    }
}
