mod messages;
mod model;

pub use messages::TerritoryUpdate;
pub use model::{
    group_color, EditTarget, ExtraAnnotations, Group, GroupGeometry, GroupId, Marker, MarkerId,
    MarkerStatus, TerritoryData,
};

use bevy::prelude::*;

pub struct TerritoryPlugin;

impl Plugin for TerritoryPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TerritoryData>()
            .init_resource::<ExtraAnnotations>()
            .init_resource::<EditTarget>()
            .add_message::<TerritoryUpdate>()
            .add_systems(
                Update,
                messages::log_territory_updates.run_if(on_message::<TerritoryUpdate>),
            );
    }
}
