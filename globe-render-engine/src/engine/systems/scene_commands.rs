use bevy::prelude::*;

use crate::engine::core::app_state::{SceneCommand, SceneToggles};
use crate::engine::scene::grid::GlobeGrid;

/// Fold scene commands into the toggles and keep the grid visibility in step.
pub fn apply_scene_commands(
    mut events: EventReader<SceneCommand>,
    mut toggles: ResMut<SceneToggles>,
    mut grids: Query<&mut Visibility, With<GlobeGrid>>,
) {
    let mut changed = false;
    for command in events.read() {
        toggles.apply(*command);
        info!("Scene command applied: {:?}", command);
        changed = true;
    }
    if !changed {
        return;
    }

    let visibility = if toggles.grid_visible {
        Visibility::Visible
    } else {
        Visibility::Hidden
    };
    for mut grid_visibility in &mut grids {
        *grid_visibility = visibility;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    #[test]
    fn hiding_the_grid_updates_its_visibility() {
        let mut world = World::new();
        world.init_resource::<Events<SceneCommand>>();
        world.insert_resource(SceneToggles::default());
        let grid = world.spawn((GlobeGrid, Visibility::Visible)).id();

        world.send_event(SceneCommand::SetGridVisible(false));
        world.send_event(SceneCommand::SetOrbitPaused(true));
        world.run_system_once(apply_scene_commands).unwrap();

        let toggles = world.resource::<SceneToggles>();
        assert!(!toggles.grid_visible);
        assert!(toggles.orbit_paused);
        assert_eq!(world.get::<Visibility>(grid), Some(&Visibility::Hidden));
    }

    #[test]
    fn no_commands_leaves_grid_alone() {
        let mut world = World::new();
        world.init_resource::<Events<SceneCommand>>();
        world.insert_resource(SceneToggles {
            grid_visible: false,
            orbit_paused: false,
        });
        let grid = world.spawn((GlobeGrid, Visibility::Visible)).id();

        world.run_system_once(apply_scene_commands).unwrap();

        assert_eq!(world.get::<Visibility>(grid), Some(&Visibility::Visible));
    }
}
