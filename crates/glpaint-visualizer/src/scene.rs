//! Scene registry
//!
//! Items are created from an [`ItemSpec`] and addressed by opaque
//! [`ItemId`] handles. Labels stay unique: creating an item under a label
//! that is already taken returns the existing item's id.

use glpaint_core::{ColoredVertex, Point3, Result, Rgba, SceneError};
use glpaint_settings::RenderConfig;
use regex::Regex;
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

use crate::arc::ArcFractionizer;
use crate::gcode::PathCommand;
use crate::items::{
    ArcItem, ArcParams, CircleItem, CoordSystemItem, Drawable, GcodePath, HeightMap,
    OrthoLineGrid, Primitive, StarItem, Transform,
};
use crate::path::{Bounds, ReplayStart};

/// Handle of an item in a [`Scene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(Uuid);

impl ItemId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Item({})", &self.0.to_string()[..8])
    }
}

/// Where a toolpath's commands come from
#[derive(Debug, Clone)]
pub enum GcodeSource {
    Text(String),
    Commands(Vec<PathCommand>),
}

/// Everything needed to build one item
#[derive(Debug, Clone)]
pub enum ItemSpec {
    Star {
        color: Rgba,
    },
    CoordSystem,
    OrthoLineGrid {
        lower_left: [f64; 2],
        upper_right: [f64; 2],
        unit: f64,
        color: Rgba,
    },
    Arc {
        params: ArcParams,
        filled: bool,
    },
    Circle {
        radius: f64,
        use_triangles: bool,
        filled: bool,
        color: Rgba,
    },
    HeightMap {
        nodes_x: usize,
        nodes_y: usize,
        vertices: Vec<ColoredVertex>,
        filled: bool,
    },
    GcodePath {
        source: GcodeSource,
        start: ReplayStart,
    },
}

/// A built item
#[derive(Debug)]
pub enum Item {
    Star(StarItem),
    CoordSystem(CoordSystemItem),
    OrthoLineGrid(OrthoLineGrid),
    Arc(ArcItem),
    Circle(CircleItem),
    HeightMap(HeightMap),
    GcodePath(GcodePath),
}

impl Item {
    pub fn as_drawable(&self) -> &dyn Drawable {
        match self {
            Item::Star(item) => item,
            Item::CoordSystem(item) => item,
            Item::OrthoLineGrid(item) => item,
            Item::Arc(item) => item,
            Item::Circle(item) => item,
            Item::HeightMap(item) => item,
            Item::GcodePath(item) => item,
        }
    }

    /// Short kind name for logs and summaries
    pub fn kind(&self) -> &'static str {
        match self {
            Item::Star(_) => "star",
            Item::CoordSystem(_) => "coord_system",
            Item::OrthoLineGrid(_) => "ortho_line_grid",
            Item::Arc(_) => "arc",
            Item::Circle(_) => "circle",
            Item::HeightMap(_) => "height_map",
            Item::GcodePath(_) => "gcode_path",
        }
    }
}

impl Drawable for Item {
    fn primitive(&self) -> Primitive {
        self.as_drawable().primitive()
    }

    fn vertices(&self) -> &[ColoredVertex] {
        self.as_drawable().vertices()
    }

    fn indices(&self) -> Option<&[u32]> {
        self.as_drawable().indices()
    }

    fn uniforms(&self) -> Vec<(&'static str, f32)> {
        self.as_drawable().uniforms()
    }
}

/// Registry entry
#[derive(Debug)]
pub struct SceneItem {
    pub label: String,
    pub item: Item,
    pub transform: Transform,
    /// Line width in pixels
    pub line_width: f32,
    /// Fill triangles instead of drawing their outlines
    pub filled: bool,
}

/// Items of one scene, in creation order
#[derive(Debug, Default)]
pub struct Scene {
    config: RenderConfig,
    items: HashMap<ItemId, SceneItem>,
    order: Vec<ItemId>,
}

impl Scene {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Build and register an item.
    ///
    /// Returns the existing id, without building anything, when `label` is
    /// already registered.
    pub fn create(&mut self, label: impl Into<String>, spec: ItemSpec) -> Result<ItemId> {
        let label = label.into();
        if let Some(id) = self.find_by_label(&label) {
            debug!("Item '{}' already exists as {}", label, id);
            return Ok(id);
        }

        let fractionizer = ArcFractionizer::from(self.config.arc);
        let mut transform = Transform::default();
        let mut filled = false;

        let item = match spec {
            ItemSpec::Star { color } => Item::Star(StarItem::new(color)),
            ItemSpec::CoordSystem => {
                transform.scale = 10.0;
                Item::CoordSystem(CoordSystemItem::new())
            }
            ItemSpec::OrthoLineGrid {
                lower_left,
                upper_right,
                unit,
                color,
            } => {
                // lines are built from the local origin
                transform.origin = Point3::new(lower_left[0], lower_left[1], 0.0).as_vec3();
                Item::OrthoLineGrid(OrthoLineGrid::new(
                    label.as_str(),
                    lower_left,
                    upper_right,
                    unit,
                    color,
                )?)
            }
            ItemSpec::Arc {
                params,
                filled: fill,
            } => {
                filled = fill;
                Item::Arc(ArcItem::new(label.as_str(), &params, &fractionizer)?)
            }
            ItemSpec::Circle {
                radius,
                use_triangles,
                filled: fill,
                color,
            } => {
                filled = fill;
                Item::Circle(CircleItem::new(
                    label.as_str(),
                    radius,
                    use_triangles,
                    color,
                    &fractionizer,
                )?)
            }
            ItemSpec::HeightMap {
                nodes_x,
                nodes_y,
                vertices,
                filled: fill,
            } => {
                filled = fill;
                Item::HeightMap(HeightMap::new(&label, nodes_x, nodes_y, vertices)?)
            }
            ItemSpec::GcodePath { source, start } => Item::GcodePath(match source {
                GcodeSource::Text(program) => {
                    GcodePath::from_gcode(label.as_str(), &program, &start, &self.config)?
                }
                GcodeSource::Commands(commands) => {
                    GcodePath::new(label.as_str(), &commands, &start, &self.config)?
                }
            }),
        };

        let id = ItemId::new();
        debug!(
            "Created {} '{}' as {} with {} vertices",
            item.kind(),
            label,
            id,
            item.vertex_count()
        );
        self.items.insert(
            id,
            SceneItem {
                label,
                item,
                transform,
                line_width: 1.0,
                filled,
            },
        );
        self.order.push(id);
        Ok(id)
    }

    pub fn get(&self, id: ItemId) -> Option<&SceneItem> {
        self.items.get(&id)
    }

    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut SceneItem> {
        self.items.get_mut(&id)
    }

    pub fn find_by_label(&self, label: &str) -> Option<ItemId> {
        self.order
            .iter()
            .copied()
            .find(|id| self.items.get(id).is_some_and(|entry| entry.label == label))
    }

    pub fn remove(&mut self, id: ItemId) -> Option<SceneItem> {
        let entry = self.items.remove(&id)?;
        self.order.retain(|other| *other != id);
        debug!("Removed item '{}'", entry.label);
        Some(entry)
    }

    /// Remove every item whose label matches `pattern` at its start.
    ///
    /// Returns the removed labels.
    pub fn remove_matching(&mut self, pattern: &str) -> Result<Vec<String>> {
        let anchored = format!("^(?:{})", pattern);
        let regex = Regex::new(&anchored).map_err(|e| SceneError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;

        let doomed: Vec<ItemId> = self
            .iter()
            .filter(|(_, entry)| regex.is_match(&entry.label))
            .map(|(id, _)| id)
            .collect();

        Ok(doomed
            .into_iter()
            .filter_map(|id| self.remove(id))
            .map(|entry| entry.label)
            .collect())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in creation order
    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &SceneItem)> + '_ {
        self.order
            .iter()
            .filter_map(|id| self.items.get(id).map(|entry| (*id, entry)))
    }

    /// Machine-space bounds of all toolpaths
    pub fn toolpath_bounds(&self) -> Bounds {
        let mut bounds = Bounds::new();
        for (_, entry) in self.iter() {
            if let Item::GcodePath(path) = &entry.item {
                bounds.merge(path.bounds());
            }
        }
        bounds
    }

    /// Star marker at `origin`, a common shorthand
    pub fn add_marker(
        &mut self,
        label: impl Into<String>,
        origin: Point3,
        color: Rgba,
    ) -> Result<ItemId> {
        let id = self.create(label, ItemSpec::Star { color })?;
        if let Some(entry) = self.get_mut(id) {
            entry.transform.origin = origin.as_vec3();
        }
        Ok(id)
    }
}
