//=========================================================================
// Button
//=========================================================================
//
// A filled rounded panel with a centered label and a capture zone that
// reports a `GameEvent` when tapped.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::event::GameEvent;
use crate::core::scene::{Color, Node, NodeId, Point, Rect, RenderSurface, SceneId, TextStyle};

//=== Constants ===========================================================

const CORNER_RADIUS: f32 = 10.0;
const LABEL_SIZE: f32 = 20.0;

//=== Button ==============================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    label: String,
    width: f32,
    height: f32,
    color: Color,
    action: GameEvent,
}

/// Ids of a placed button's visual group and capture zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedButton {
    pub visual: NodeId,
    pub capture: NodeId,
}

impl Button {
    pub fn new(
        label: impl Into<String>,
        width: f32,
        height: f32,
        color: Color,
        action: GameEvent,
    ) -> Self {
        Self {
            label: label.into(),
            width,
            height,
            color,
            action,
        }
    }

    /// Visual node, with children relative to the button's top-left corner.
    pub fn node(&self, position: Point) -> Node {
        Node::Group {
            position,
            children: vec![
                Node::Panel {
                    rect: Rect::new(0.0, 0.0, self.width, self.height),
                    color: self.color,
                    corner_radius: CORNER_RADIUS,
                },
                Node::Text {
                    content: self.label.clone(),
                    position: Point::new(self.width / 2.0, self.height / 2.0 - LABEL_SIZE / 2.0),
                    style: TextStyle::new(LABEL_SIZE).centered(),
                },
            ],
        }
    }

    /// Adds the button to `scene` with its top-left corner at `position`.
    pub fn place<R: RenderSurface>(
        &self,
        surface: &mut R,
        scene: SceneId,
        position: Point,
    ) -> PlacedButton {
        let visual = surface.add_child(scene, self.node(position));
        let capture = surface.register_hit_area(
            scene,
            Rect::new(position.x, position.y, self.width, self.height),
            self.action,
        );
        PlacedButton { visual, capture }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::Stage;

    fn retry() -> Button {
        Button::new("Retry", 120.0, 60.0, Color(0xF09199), GameEvent::Retry)
    }

    #[test]
    fn node_groups_panel_and_centered_label() {
        match retry().node(Point::new(40.0, 500.0)) {
            Node::Group { position, children } => {
                assert_eq!(position, Point::new(40.0, 500.0));
                assert_eq!(children.len(), 2);
                assert!(matches!(
                    children[0],
                    Node::Panel { color: Color(0xF09199), .. }
                ));
                match &children[1] {
                    Node::Text { content, style, .. } => {
                        assert_eq!(content, "Retry");
                        assert_eq!(style.anchor_x, 0.5, "Label should be centered");
                    }
                    other => panic!("Expected label, got {:?}", other),
                }
            }
            other => panic!("Expected group, got {:?}", other),
        }
    }

    #[test]
    fn placed_button_reports_its_action() {
        let mut stage = Stage::new(400.0, 600.0);
        let scene = stage.create_container();
        stage.attach(scene);

        retry().place(&mut stage, scene, Point::new(40.0, 500.0));

        assert_eq!(stage.hit_test(Point::new(100.0, 530.0)), Some(GameEvent::Retry));
        assert_eq!(stage.hit_test(Point::new(160.0, 530.0)), None, "Right edge is exclusive");
    }
}
