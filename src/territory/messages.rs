//! Message types handed to the persistence collaborator.
//!
//! The editor never stores geometry itself; every committed change is
//! published as a [`TerritoryUpdate`] and whoever owns durable storage reads them.

use bevy::prelude::*;

use crate::geo::{Path, Ring};

use super::model::{ExtraAnnotations, GroupId, Marker, TerritoryData};

#[derive(Message, Debug, Clone, PartialEq)]
pub enum TerritoryUpdate {
    Geometry {
        group_id: GroupId,
        rings: Vec<Ring>,
        paths: Vec<Path>,
    },
    Markers {
        group_id: GroupId,
        markers: Vec<Marker>,
    },
    ExtraPaths {
        paths: Vec<Path>,
    },
}

impl TerritoryUpdate {
    pub fn geometry_of(territory: &TerritoryData, group_id: GroupId) -> Option<Self> {
        territory.group(group_id).map(|group| TerritoryUpdate::Geometry {
            group_id,
            rings: group.geometry.rings.clone(),
            paths: group.geometry.paths.clone(),
        })
    }

    pub fn markers_of(territory: &TerritoryData, group_id: GroupId) -> Option<Self> {
        territory.group(group_id).map(|group| TerritoryUpdate::Markers {
            group_id,
            markers: group.markers.clone(),
        })
    }

    pub fn extra_of(extra: &ExtraAnnotations) -> Self {
        TerritoryUpdate::ExtraPaths {
            paths: extra.paths.clone(),
        }
    }
}

/// Log every update that reaches the persistence boundary
pub fn log_territory_updates(mut updates: MessageReader<TerritoryUpdate>) {
    for update in updates.read() {
        match update {
            TerritoryUpdate::Geometry {
                group_id,
                rings,
                paths,
            } => info!(
                "Group {:?} geometry committed: {} rings, {} paths",
                group_id,
                rings.len(),
                paths.len()
            ),
            TerritoryUpdate::Markers { group_id, markers } => {
                info!("Group {:?} markers committed: {}", group_id, markers.len())
            }
            TerritoryUpdate::ExtraPaths { paths } => {
                info!("Extra annotations committed: {} paths", paths.len())
            }
        }
    }
}
