// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Scenario files: level geometry, body settings, and scripted input.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{bail, Context, Result};
use ledge_body::BodyConfig;
use ledge_geom::{ConvexPolygon, LayerMask, ObjectId, StaticScene, Vec2};
use serde::{Deserialize, Serialize};

/// One static shape of the level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeSpec {
    /// Axis-aligned box.
    Box {
        /// Object identity reported in contacts.
        id: ObjectId,
        /// Lower-left corner.
        min: Vec2,
        /// Upper-right corner.
        max: Vec2,
        /// Layer index (`0..32`).
        #[serde(default)]
        layer: u32,
    },
    /// Convex polygon, either winding.
    Polygon {
        /// Object identity reported in contacts.
        id: ObjectId,
        /// Vertices.
        points: Vec<Vec2>,
        /// Layer index (`0..32`).
        #[serde(default)]
        layer: u32,
    },
}

impl ShapeSpec {
    /// Object identity of the shape.
    pub fn id(&self) -> ObjectId {
        match self {
            Self::Box { id, .. } | Self::Polygon { id, .. } => *id,
        }
    }
}

/// A complete, self-contained run description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Free-form label used in logs.
    #[serde(default)]
    pub name: String,
    /// Body settings; missing fields take their defaults.
    #[serde(default)]
    pub config: BodyConfig,
    /// Initial body centre.
    pub start: Vec2,
    /// Initial velocity.
    #[serde(default)]
    pub velocity: Vec2,
    /// Level geometry.
    pub shapes: Vec<ShapeSpec>,
    /// Shapes that get a platform handler (their callbacks are counted and hashed).
    #[serde(default)]
    pub platforms: Vec<ObjectId>,
    /// Number of ticks to simulate.
    pub ticks: u32,
    /// Horizontal velocity forced at the start of every tick, if any.
    #[serde(default)]
    pub drive: Option<f32>,
    /// Ticks at which a grounded body jumps.
    #[serde(default)]
    pub jump_ticks: Vec<u32>,
    /// Upward velocity of a jump.
    #[serde(default = "default_jump_speed")]
    pub jump_speed: f32,
}

fn default_jump_speed() -> f32 {
    0.3
}

impl Scenario {
    /// Reads a scenario from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let f = File::open(path)
            .with_context(|| format!("failed to open scenario {}", path.display()))?;
        let scenario: Self = serde_json::from_reader(BufReader::new(f))
            .with_context(|| format!("failed to parse scenario {}", path.display()))?;
        scenario.check()?;
        Ok(scenario)
    }

    /// Rejects scenarios that cannot be run as written.
    pub fn check(&self) -> Result<()> {
        self.config.validate().context("invalid body config")?;
        let mut seen = BTreeSet::new();
        for shape in &self.shapes {
            if !seen.insert(shape.id()) {
                bail!("duplicate shape id {}", shape.id());
            }
        }
        for id in &self.platforms {
            if !seen.contains(id) {
                bail!("platform {id} has no shape");
            }
        }
        if !self.start.is_finite() || !self.velocity.is_finite() {
            bail!("start position and velocity must be finite");
        }
        Ok(())
    }

    /// Builds the static level.
    pub fn build_scene(&self) -> Result<StaticScene> {
        let mut scene = StaticScene::new();
        for shape in &self.shapes {
            match shape {
                ShapeSpec::Box { id, min, max, layer } => scene
                    .insert_box(*id, *min, *max, LayerMask::from_layer(*layer))
                    .with_context(|| format!("bad box {id}"))?,
                ShapeSpec::Polygon { id, points, layer } => {
                    let polygon = ConvexPolygon::new(points.clone())
                        .with_context(|| format!("bad polygon {id}"))?;
                    scene.insert(*id, polygon, LayerMask::from_layer(*layer));
                }
            }
        }
        Ok(scene)
    }
}
