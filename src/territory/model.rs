use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::geo::{Coordinate, Path, Ring};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MarkerId(pub u32);

/// Two-state status of a marker (a city block that has or hasn't been worked)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MarkerStatus {
    #[default]
    NotWorked,
    Worked,
}

impl MarkerStatus {
    pub fn toggled(self) -> Self {
        match self {
            MarkerStatus::NotWorked => MarkerStatus::Worked,
            MarkerStatus::Worked => MarkerStatus::NotWorked,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub id: MarkerId,
    pub label: String,
    pub status: MarkerStatus,
    pub position: Coordinate,
}

/// The editable geometry of a group; this is what history snapshots capture
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GroupGeometry {
    pub rings: Vec<Ring>,
    pub paths: Vec<Path>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    /// Display color as "#RRGGBB"
    pub color: String,
    #[serde(default)]
    pub geometry: GroupGeometry,
    #[serde(default)]
    pub markers: Vec<Marker>,
}

impl Group {
    pub fn new(id: GroupId, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            color: color.into(),
            geometry: GroupGeometry::default(),
            markers: Vec::new(),
        }
    }

    pub fn marker(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.iter().find(|m| m.id == id)
    }

    pub fn marker_mut(&mut self, id: MarkerId) -> Option<&mut Marker> {
        self.markers.iter_mut().find(|m| m.id == id)
    }

    /// Add a marker with the next free id and a numeric label.
    ///
    /// Returns `None` once the id space is exhausted.
    pub fn add_marker(&mut self, position: Coordinate) -> Option<MarkerId> {
        let next = next_id(self.markers.iter().map(|m| m.id.0))?;
        let id = MarkerId(next);
        self.markers.push(Marker {
            id,
            label: next.to_string(),
            status: MarkerStatus::default(),
            position,
        });
        Some(id)
    }

    pub fn remove_marker(&mut self, id: MarkerId) -> bool {
        let before = self.markers.len();
        self.markers.retain(|m| m.id != id);
        self.markers.len() != before
    }
}

/// All groups plus the one currently selected for editing
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct TerritoryData {
    pub groups: Vec<Group>,
    pub selected: Option<GroupId>,
}

impl Default for TerritoryData {
    fn default() -> Self {
        Self {
            groups: vec![Group::new(GroupId(1), "Group 1", "#1E88E5")],
            selected: Some(GroupId(1)),
        }
    }
}

impl TerritoryData {
    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn group_mut(&mut self, id: GroupId) -> Option<&mut Group> {
        self.groups.iter_mut().find(|g| g.id == id)
    }

    pub fn selected_group(&self) -> Option<&Group> {
        self.selected.and_then(|id| self.group(id))
    }

    pub fn select(&mut self, id: GroupId) -> bool {
        if self.group(id).is_some() {
            self.selected = Some(id);
            true
        } else {
            false
        }
    }

    pub fn add_group(&mut self, name: impl Into<String>, color: impl Into<String>) -> Option<GroupId> {
        let id = GroupId(next_id(self.groups.iter().map(|g| g.id.0))?);
        self.groups.push(Group::new(id, name, color));
        Some(id)
    }
}

/// One past the highest id in use, starting at 1
fn next_id(ids: impl Iterator<Item = u32>) -> Option<u32> {
    match ids.max() {
        Some(max) => max.checked_add(1),
        None => Some(1),
    }
}

/// Scratch paths not owned by any group (snapshot drawing sessions)
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct ExtraAnnotations {
    pub paths: Vec<Path>,
}

/// Which editing target receives strokes and eraser edits
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EditTarget {
    #[default]
    Group,
    Extra,
}

impl EditTarget {
    pub fn display_name(&self) -> &'static str {
        match self {
            EditTarget::Group => "Group",
            EditTarget::Extra => "Extra",
        }
    }
}

/// Parse a "#RRGGBB" group color, falling back to grey
pub fn group_color(hex: &str) -> Color {
    Srgba::hex(hex)
        .map(Color::from)
        .unwrap_or(Color::srgb(0.5, 0.5, 0.5))
}
