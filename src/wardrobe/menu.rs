//! Static menu and catalog preview layout

use glam::{Quat, Vec3};

use crate::catalog::Catalog;
use crate::config::MenuSettings;
use crate::host::{
    ActorId, ActorSpec, Color3, HostResult, SceneHost, TextAnchor, TextSpec, Transform,
};

pub const LABEL_COLOR: Color3 = Color3::new(218.0 / 255.0, 221.0 / 255.0, 2.0 / 255.0);
pub const HEADER_HEIGHT: f32 = 0.3;
pub const LABEL_HEIGHT: f32 = 0.15;

const HEADER_POSITION: Vec3 = Vec3::new(1.0, 1.5, 0.0);
const CONTROL_X: f32 = 1.5;
const LABEL_X: f32 = 2.0;
const CONTROL_ROW: f32 = 0.7;
const CONTROL_HOLDER_SCALE: f32 = 0.7;

/// What a click on a registered button does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonAction {
    Remove,
    ScaleUp,
    ScaleDown,
    Wear(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuActors {
    pub root: ActorId,
    pub header: ActorId,
    pub buttons: Vec<(ActorId, ButtonAction)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreviewActor {
    pub wearable_id: String,
    pub holder: ActorId,
    pub model: ActorId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreviewActors {
    pub root: ActorId,
    pub previews: Vec<PreviewActor>,
}

fn label(
    parent: ActorId,
    position: Vec3,
    contents: &str,
    anchor: TextAnchor,
    height: f32,
) -> ActorSpec {
    ActorSpec::text(TextSpec {
        contents: contents.to_string(),
        anchor,
        color: LABEL_COLOR,
        height,
    })
    .with_parent(parent)
    .with_transform(Transform::at(position))
}

fn control_label(parent: ActorId, y: f32, contents: &str) -> ActorSpec {
    label(
        parent,
        Vec3::new(LABEL_X, y, 0.0),
        contents,
        TextAnchor::MiddleLeft,
        LABEL_HEIGHT,
    )
}

/// Create the header, the remove control and the two scale controls.
///
/// Button behavior is enabled on every control; registering the returned
/// actions is up to the caller.
pub fn render_menu(
    host: &mut dyn SceneHost,
    settings: &MenuSettings,
    header: &str,
) -> HostResult<MenuActors> {
    let root = host.create_actor(ActorSpec::empty())?;

    let header = host.create_actor(label(
        root,
        HEADER_POSITION,
        header,
        TextAnchor::TopLeft,
        HEADER_HEIGHT,
    ))?;

    // Remove
    let remove = host.create_actor(
        ActorSpec::library(&settings.remove_artifact)
            .with_parent(root)
            .with_transform(Transform::at(Vec3::new(CONTROL_X, 0.0, 0.0))),
    )?;
    host.set_button_behavior(remove)?;
    host.create_actor(control_label(root, 0.0, "Remove"))?;

    // Scale up
    let up_holder = host.create_actor(
        ActorSpec::empty().with_parent(root).with_transform(
            Transform::at(Vec3::new(CONTROL_X, CONTROL_ROW, 0.0))
                .with_scale(Vec3::splat(CONTROL_HOLDER_SCALE)),
        ),
    )?;
    let up = host.create_actor(
        ActorSpec::library(&settings.scale_up_artifact).with_parent(up_holder),
    )?;
    host.set_button_behavior(up)?;
    host.create_actor(control_label(root, CONTROL_ROW, "Scale Up"))?;

    // Scale down, the same arrow artifact turned a quarter
    let down_holder = host.create_actor(
        ActorSpec::empty().with_parent(root).with_transform(
            Transform::at(Vec3::new(CONTROL_X, -CONTROL_ROW, 0.0))
                .with_scale(Vec3::splat(CONTROL_HOLDER_SCALE))
                .with_rotation(Quat::from_rotation_z(90f32.to_radians())),
        ),
    )?;
    let down = host.create_actor(
        ActorSpec::library(&settings.scale_down_artifact).with_parent(down_holder),
    )?;
    host.set_button_behavior(down)?;
    host.create_actor(control_label(root, -CONTROL_ROW, "Scale Down"))?;

    Ok(MenuActors {
        root,
        header,
        buttons: vec![
            (remove, ButtonAction::Remove),
            (up, ButtonAction::ScaleUp),
            (down, ButtonAction::ScaleDown),
        ],
    })
}

/// Lay out one clickable preview per catalog entry, in catalog order,
/// stepping along -x by each entry's margin.
pub fn render_previews(
    host: &mut dyn SceneHost,
    catalog: &Catalog,
    default_margin: f32,
) -> HostResult<PreviewActors> {
    let root = host.create_actor(ActorSpec::empty())?;
    let mut previews = Vec::with_capacity(catalog.len());
    let mut x = 0.0;

    for (id, descriptor) in catalog.iter() {
        let holder = host.create_actor(
            ActorSpec::empty()
                .with_parent(root)
                .with_transform(descriptor.menu_transform(x)),
        )?;
        let model = host.create_actor(
            ActorSpec::library(&descriptor.resource_id).with_parent(holder),
        )?;
        host.set_button_behavior(model)?;

        previews.push(PreviewActor {
            wearable_id: id.to_string(),
            holder,
            model,
        });

        x -= descriptor.preview_margin.unwrap_or(default_margin);
    }

    Ok(PreviewActors { root, previews })
}
