//! TOML configuration of the washing machine controller.
//!
//! Every field has a default, so an empty file describes the standard
//! controller:
//!
//! ```toml
//! and_op = "min"
//! or_op = "max"
//! weights = [10, 40, 60, 100]
//!
//! [dirt]
//! universe = { min = 0.0, max = 2.5 }
//! almost_clean = { shape = "left_trapezoid", a = 0.25, b = 1.0 }
//! dirty = { shape = "right_trapezoid", a = 0.5, b = 1.0 }
//!
//! [fabric]
//! universe = { min = 1.0, max = 11.0 }
//! very_delicate = { shape = "left_trapezoid", a = 2.0, b = 4.0 }
//! delicate = { shape = "trapezoid", a = 3.0, b = 4.0, c = 6.0, d = 7.0 }
//! not_delicate = { shape = "right_trapezoid", a = 6.0, b = 7.0 }
//! ```

use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::membership::MembershipShape;
use crate::ops::{AndOp, OrOp};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WasherConfig {
    pub and_op: AndOp,
    pub or_op: OrOp,
    /// Output level of rules 1 through 4
    pub weights: [u32; 4],
    pub dirt: DirtConfig,
    pub fabric: FabricConfig,
}

impl Default for WasherConfig {
    fn default() -> Self {
        Self {
            and_op: AndOp::Min,
            or_op: OrOp::Max,
            weights: [10, 40, 60, 100],
            dirt: DirtConfig::default(),
            fabric: FabricConfig::default(),
        }
    }
}

impl WasherConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_owned(),
            source,
        })?;
        let config = text.parse()?;

        tracing::debug!(path = %path.display(), "loaded washer config");

        Ok(config)
    }
}

impl std::str::FromStr for WasherConfig {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}

/// Closed interval a crisp input is expected to fall in
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Universe {
    pub min: f64,
    pub max: f64,
}

impl Universe {
    pub fn range(&self) -> RangeInclusive<f64> {
        self.min..=self.max
    }
}

/// Dirt amount, in tablespoons
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DirtConfig {
    pub universe: Universe,
    pub almost_clean: MembershipShape,
    pub dirty: MembershipShape,
}

impl Default for DirtConfig {
    fn default() -> Self {
        Self {
            universe: Universe { min: 0., max: 2.5 },
            almost_clean: MembershipShape::LeftTrapezoid { a: 0.25, b: 1. },
            dirty: MembershipShape::RightTrapezoid { a: 0.5, b: 1. },
        }
    }
}

/// Fabric weight
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FabricConfig {
    pub universe: Universe,
    pub very_delicate: MembershipShape,
    pub delicate: MembershipShape,
    pub not_delicate: MembershipShape,
}

impl Default for FabricConfig {
    fn default() -> Self {
        Self {
            universe: Universe { min: 1., max: 11. },
            very_delicate: MembershipShape::LeftTrapezoid { a: 2., b: 4. },
            delicate: MembershipShape::Trapezoid {
                a: 3.,
                b: 4.,
                c: 6.,
                d: 7.,
            },
            not_delicate: MembershipShape::RightTrapezoid { a: 6., b: 7. },
        }
    }
}

#[test]
fn test_empty_config_is_default() {
    assert_eq!("".parse::<WasherConfig>().unwrap(), WasherConfig::default());
}

#[test]
fn test_demo_config_is_default() {
    let config: WasherConfig = include_str!("../demos/washer.toml").parse().unwrap();

    assert_eq!(config, WasherConfig::default());
}

#[test]
fn test_partial_config() {
    let config: WasherConfig = r#"
        and_op = "prod"
        weights = [0, 30, 70, 90]

        [fabric]
        not_delicate = { shape = "right_trapezoid", a = 5.5, b = 8.0 }
    "#
    .parse()
    .unwrap();

    assert_eq!(config.and_op, AndOp::Prod);
    assert_eq!(config.or_op, OrOp::Max);
    assert_eq!(config.weights, [0, 30, 70, 90]);
    assert_eq!(
        config.fabric.not_delicate,
        MembershipShape::RightTrapezoid { a: 5.5, b: 8. }
    );
    assert_eq!(config.fabric.delicate, FabricConfig::default().delicate);
    assert_eq!(config.dirt, DirtConfig::default());
}

#[test]
fn test_bad_config() {
    assert!(matches!("weights = [1, 2]".parse::<WasherConfig>(), Err(Error::Config(_))));
    assert!(matches!("rules = 4".parse::<WasherConfig>(), Err(Error::Config(_))));
    assert!(matches!(
        "[dirt]\ndirty = { shape = \"bell\", a = 1.0 }".parse::<WasherConfig>(),
        Err(Error::Config(_))
    ));
    assert!(matches!(
        WasherConfig::load("/nonexistent/washer.toml"),
        Err(Error::Io { .. })
    ));
}
