//! World setup systems for camera, road, player and HUD

use bevy::prelude::*;
use bevy::window::WindowResized;

use super::components::{HudText, LaneMarker, PlayerSprite, SimWorldResource};

const ROAD_COLOR: Color = Color::srgb(0.2, 0.2, 0.22);
const LANE_MARKER_COLOR: Color = Color::srgb(0.85, 0.85, 0.85);
const LANE_MARKER_WIDTH: f32 = 4.0;

/// System to setup the camera, road and player sprite
pub fn setup_world(mut commands: Commands, sim_world: Res<SimWorldResource>) {
    commands.spawn(Camera2d);
    spawn_lane_markers(&mut commands, &sim_world);

    let player = &sim_world.world.player;
    commands.spawn((
        PlayerSprite,
        Sprite::from_color(Color::srgb(0.9, 0.15, 0.15), Vec2::new(player.width, player.height)),
        Transform::from_translation(sim_world.to_screen(&player.position, 3.0)),
    ));
}

/// Road surface plus one stripe between each pair of lanes
fn spawn_lane_markers(commands: &mut Commands, sim_world: &SimWorldResource) {
    let config = &sim_world.world.config;

    commands.spawn((
        LaneMarker,
        Sprite::from_color(ROAD_COLOR, Vec2::new(config.screen_width(), config.screen_height())),
        Transform::from_xyz(0.0, 0.0, -1.0),
    ));

    for lane in 1..config.lane_count() {
        let x = lane as f32 * config.lane_width() - config.screen_width() / 2.0;
        commands.spawn((
            LaneMarker,
            Sprite::from_color(
                LANE_MARKER_COLOR,
                Vec2::new(LANE_MARKER_WIDTH, config.screen_height()),
            ),
            Transform::from_xyz(x, 0.0, -0.5),
        ));
    }
}

/// System to setup the HUD in the top-left corner
pub fn setup_hud(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Auto,
                height: Val::Auto,
                position_type: PositionType::Absolute,
                top: Val::Px(10.0),
                left: Val::Px(10.0),
                padding: UiRect::all(Val::Px(10.0)),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(5.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Score: 0"),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 0.9, 0.2)),
                HudText::Score,
            ));
            parent.spawn((
                Text::new("Energy: 0"),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.9, 0.9)),
                HudText::Effects,
            ));
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 1.0, 0.5)),
                HudText::Status,
            ));
        });
}

/// System to push window size changes into the simulation and redraw the lanes
pub fn handle_window_resize(
    mut commands: Commands,
    mut resize_events: MessageReader<WindowResized>,
    mut sim_world: ResMut<SimWorldResource>,
    marker_query: Query<Entity, With<LaneMarker>>,
) {
    let Some(resized) = resize_events.read().last() else {
        return;
    };
    let (width, height) = (resized.width, resized.height);
    if let Err(err) = sim_world.world.on_resize(width, height) {
        warn!("{:#}", err);
        return;
    }
    sim_world.config = sim_world.world.config.clone();

    for entity in marker_query.iter() {
        commands.entity(entity).despawn();
    }
    spawn_lane_markers(&mut commands, &sim_world);
}
