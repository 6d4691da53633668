use bevy::prelude::*;
use bevy::window::{CursorIcon, PrimaryWindow, SystemCursorIcon};
use bevy_egui::EguiContexts;

use super::eraser::EraseSession;
use super::freehand::FreehandCapture;
use super::markers::MarkerDrag;
use super::polygon::VertexDraft;

/// Editing mode. Exactly one is current, so gestures of different modes never overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorTool {
    /// Pan the map, drag or tap markers
    #[default]
    Navigate,
    Freehand,
    Eraser,
    Polygon,
    Line,
    Marker,
}

impl EditorTool {
    pub fn display_name(&self) -> &'static str {
        match self {
            EditorTool::Navigate => "Navigate (N)",
            EditorTool::Freehand => "Freehand (F)",
            EditorTool::Eraser => "Eraser (E)",
            EditorTool::Polygon => "Polygon (G)",
            EditorTool::Line => "Line (L)",
            EditorTool::Marker => "Marker (M)",
        }
    }

    pub fn shortcut(&self) -> KeyCode {
        match self {
            EditorTool::Navigate => KeyCode::KeyN,
            EditorTool::Freehand => KeyCode::KeyF,
            EditorTool::Eraser => KeyCode::KeyE,
            EditorTool::Polygon => KeyCode::KeyG,
            EditorTool::Line => KeyCode::KeyL,
            EditorTool::Marker => KeyCode::KeyM,
        }
    }

    pub fn cursor_icon(&self) -> CursorIcon {
        match self {
            EditorTool::Navigate => CursorIcon::System(SystemCursorIcon::Grab),
            EditorTool::Freehand => CursorIcon::System(SystemCursorIcon::Crosshair),
            EditorTool::Eraser => CursorIcon::System(SystemCursorIcon::Cell),
            EditorTool::Polygon => CursorIcon::System(SystemCursorIcon::Crosshair),
            EditorTool::Line => CursorIcon::System(SystemCursorIcon::Crosshair),
            EditorTool::Marker => CursorIcon::System(SystemCursorIcon::Pointer),
        }
    }

    pub fn all() -> &'static [EditorTool] {
        &[
            EditorTool::Navigate,
            EditorTool::Freehand,
            EditorTool::Eraser,
            EditorTool::Polygon,
            EditorTool::Line,
            EditorTool::Marker,
        ]
    }

    /// Tool whose shortcut was just pressed, if any
    pub fn from_keyboard(keyboard: &ButtonInput<KeyCode>) -> Option<EditorTool> {
        // Ctrl combinations belong to other shortcuts
        if keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight) {
            return None;
        }
        Self::all()
            .iter()
            .copied()
            .find(|tool| keyboard.just_pressed(tool.shortcut()))
    }
}

#[derive(Resource, Default)]
pub struct CurrentTool {
    pub tool: EditorTool,
}

pub fn handle_tool_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut current_tool: ResMut<CurrentTool>,
    mut contexts: EguiContexts,
) {
    // Don't change tools if typing in a text field
    if let Ok(ctx) = contexts.ctx_mut()
        && ctx.wants_keyboard_input()
    {
        return;
    }

    if let Some(tool) = EditorTool::from_keyboard(&keyboard)
        && tool != current_tool.tool
    {
        current_tool.tool = tool;
    }
}

/// Drop whatever the previous tool had in progress when the tool changes
pub fn abandon_previous_tool_state(
    current_tool: Res<CurrentTool>,
    mut previous: Local<EditorTool>,
    mut erase: ResMut<EraseSession>,
    mut capture: ResMut<FreehandCapture>,
    mut draft: ResMut<VertexDraft>,
    mut marker_drag: ResMut<MarkerDrag>,
) {
    if *previous == current_tool.tool {
        return;
    }

    match *previous {
        EditorTool::Navigate => marker_drag.cancel(),
        EditorTool::Freehand => capture.abandon(),
        EditorTool::Eraser => erase.abandon(),
        EditorTool::Polygon | EditorTool::Line => draft.cancel(),
        EditorTool::Marker => {}
    }
    debug!("Tool changed: {:?} -> {:?}", *previous, current_tool.tool);
    *previous = current_tool.tool;
}

pub fn update_cursor_icon(
    current_tool: Res<CurrentTool>,
    mut window_query: Query<(Entity, &Window), With<PrimaryWindow>>,
    mut commands: Commands,
    mut contexts: EguiContexts,
) {
    let Ok((entity, _window)) = window_query.single_mut() else {
        return;
    };

    // Use default cursor over UI, tool cursor in editor space
    if let Ok(ctx) = contexts.ctx_mut()
        && ctx.is_pointer_over_area()
    {
        commands
            .entity(entity)
            .insert(CursorIcon::System(SystemCursorIcon::Default));
        return;
    }

    commands.entity(entity).insert(current_tool.tool.cursor_icon());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_contain_shortcuts() {
        // Each display name should contain its keyboard shortcut in parentheses
        for tool in EditorTool::all() {
            let name = tool.display_name();
            let key = format!("{:?}", tool.shortcut());
            let letter = key.trim_start_matches("Key");
            assert!(name.ends_with(&format!("({})", letter)), "{} vs {}", name, key);
        }
    }

    #[test]
    fn test_all_returns_all_tools() {
        let all = EditorTool::all();
        assert_eq!(all.len(), 6);
        assert_eq!(all[0], EditorTool::default());
    }

    #[test]
    fn test_shortcuts_are_unique() {
        let all = EditorTool::all();
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a.shortcut(), b.shortcut());
            }
        }
    }

    #[test]
    fn test_keyboard_selects_tool() {
        let mut keyboard = ButtonInput::<KeyCode>::default();
        keyboard.press(KeyCode::KeyE);
        assert_eq!(EditorTool::from_keyboard(&keyboard), Some(EditorTool::Eraser));

        let mut keyboard = ButtonInput::<KeyCode>::default();
        keyboard.press(KeyCode::ControlLeft);
        keyboard.press(KeyCode::KeyL);
        assert_eq!(EditorTool::from_keyboard(&keyboard), None);
    }
}
