//=========================================================================
// Display Model
//=========================================================================
//
// Retained display tree and the rendering-surface contract the scene
// manager and game drive.
//
// Architecture:
//   Stage (root surface)
//     ├─ containers: HashMap<SceneId, Container>
//     │     ├─ nodes:     Vec<(NodeId, Node)>   sprites, text, rings...
//     │     └─ hit_areas: Vec<HitArea>          pointer capture zones
//     └─ attached: Vec<SceneId>                 draw / hit-test order
//
// The core never draws. A renderer (or a test) walks the attached
// containers in order and paints their nodes.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use crate::core::assets::AssetId;
use crate::core::game::GameEvent;

//=== Geometry ============================================================

/// A position in stage coordinates (logical pixels, top-left origin).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns this point shifted by `(dx, dy)`.
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Axis-aligned rectangle. Containment is half-open: `[x, x+w) × [y, y+h)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Square of side `side` centered on `center`.
    pub fn centered_square(center: Point, side: f32) -> Self {
        Self::new(center.x - side / 2.0, center.y - side / 2.0, side, side)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.x + self.width && p.y >= self.y && p.y < self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Packed `0xRRGGBB` color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    pub const WHITE: Self = Self(0xFFFFFF);
}

//=== Identifiers =========================================================

/// Identity of a container created on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SceneId(u64);

/// Identity of a child element (node or hit area) inside a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

//=== Nodes ===============================================================

/// Text appearance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub color: Color,
    /// Horizontal anchor: 0.0 = left edge at `position.x`, 0.5 = centered.
    pub anchor_x: f32,
}

impl TextStyle {
    pub const fn new(size: f32) -> Self {
        Self { size, color: Color::WHITE, anchor_x: 0.0 }
    }

    pub const fn centered(mut self) -> Self {
        self.anchor_x = 0.5;
        self
    }
}

/// A visual element attached to a container.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A preloaded image drawn with its top-left corner at `position`.
    Sprite { asset: AssetId, position: Point },

    /// A line (or lines) of text.
    Text { content: String, position: Point, style: TextStyle },

    /// An unfilled circle outline.
    Ring { center: Point, radius: f32, line_width: f32, color: Color },

    /// A filled rectangle with corner radius.
    Panel { rect: Rect, color: Color, corner_radius: f32 },

    /// Children positioned relative to `position`.
    Group { position: Point, children: Vec<Node> },
}

/// An invisible pointer capture zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitArea {
    pub id: NodeId,
    pub rect: Rect,
    pub target: GameEvent,
}

//=== RenderSurface =======================================================

/// Capabilities the core needs from the display backend.
///
/// Hit-testing belongs to the surface: it owns the capture zones and
/// resolves a stage point to the event registered for the zone under it.
pub trait RenderSurface: Send {
    /// Creates an empty, detached container.
    fn create_container(&mut self) -> SceneId;

    /// Attaches a container to the root surface.
    fn attach(&mut self, scene: SceneId);

    /// Detaches a container and disposes of it together with its children.
    fn detach(&mut self, scene: SceneId);

    /// Adds a visual child to a container.
    fn add_child(&mut self, scene: SceneId, node: Node) -> NodeId;

    /// Replaces the content of a text node.
    fn set_text(&mut self, node: NodeId, content: &str);

    /// Registers a rectangular capture zone that reports `target` when tapped.
    fn register_hit_area(&mut self, scene: SceneId, rect: Rect, target: GameEvent) -> NodeId;

    /// Top-most capture zone under `point`, searching attached containers
    /// and their zones from last added to first.
    fn hit_test(&self, point: Point) -> Option<GameEvent>;

    /// Containers currently attached, in attach order.
    fn attached(&self) -> Vec<SceneId>;

    /// Logical size of the root surface as `(width, height)`.
    fn size(&self) -> (f32, f32);
}

//=== Stage ===============================================================

#[derive(Debug, Default)]
struct Container {
    nodes: Vec<(NodeId, Node)>,
    hit_areas: Vec<HitArea>,
}

/// In-memory root surface holding the retained display tree.
#[derive(Debug)]
pub struct Stage {
    width: f32,
    height: f32,
    next_id: u64,
    containers: HashMap<SceneId, Container>,
    attached: Vec<SceneId>,
}

impl Stage {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            next_id: 0,
            containers: HashMap::new(),
            attached: Vec::new(),
        }
    }

    //--- Inspection -------------------------------------------------------

    /// Visual children of a container, in insertion order.
    pub fn nodes(&self, scene: SceneId) -> impl Iterator<Item = &Node> + '_ {
        self.containers
            .get(&scene)
            .into_iter()
            .flat_map(|c| c.nodes.iter().map(|(_, node)| node))
    }

    /// Capture zones of a container, in registration order.
    pub fn hit_areas(&self, scene: SceneId) -> &[HitArea] {
        self.containers
            .get(&scene)
            .map(|c| c.hit_areas.as_slice())
            .unwrap_or(&[])
    }

    /// Looks up a node in any live container.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.containers
            .values()
            .flat_map(|c| c.nodes.iter())
            .find(|(node_id, _)| *node_id == id)
            .map(|(_, node)| node)
    }

    /// Content of a text node, if `id` names one.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.node(id) {
            Some(Node::Text { content, .. }) => Some(content.as_str()),
            _ => None,
        }
    }

    /// Number of live containers, attached or not.
    pub fn container_count(&self) -> usize {
        self.containers.len()
    }

    //--- Internal Helpers -------------------------------------------------

    fn allocate(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn container_mut(&mut self, scene: SceneId) -> Option<&mut Container> {
        let container = self.containers.get_mut(&scene);
        if container.is_none() {
            warn!(target: "scene", "Container {:?} does not exist", scene);
        }
        container
    }
}

impl RenderSurface for Stage {
    fn create_container(&mut self) -> SceneId {
        let id = SceneId(self.allocate());
        self.containers.insert(id, Container::default());
        id
    }

    fn attach(&mut self, scene: SceneId) {
        if !self.containers.contains_key(&scene) {
            warn!(target: "scene", "Attempted to attach unknown container {:?}", scene);
            return;
        }
        if self.attached.contains(&scene) {
            warn!(target: "scene", "Container {:?} is already attached", scene);
            return;
        }
        debug!(target: "scene", "Attaching container {:?}", scene);
        self.attached.push(scene);
    }

    fn detach(&mut self, scene: SceneId) {
        self.attached.retain(|&id| id != scene);
        if let Some(container) = self.containers.remove(&scene) {
            debug!(
                target: "scene",
                "Disposed container {:?} ({} nodes, {} hit areas)",
                scene,
                container.nodes.len(),
                container.hit_areas.len()
            );
        }
    }

    fn add_child(&mut self, scene: SceneId, node: Node) -> NodeId {
        let id = NodeId(self.allocate());
        if let Some(container) = self.container_mut(scene) {
            container.nodes.push((id, node));
        }
        id
    }

    fn set_text(&mut self, node: NodeId, content: &str) {
        let slot = self
            .containers
            .values_mut()
            .flat_map(|c| c.nodes.iter_mut())
            .find(|(id, _)| *id == node);

        match slot {
            Some((_, Node::Text { content: current, .. })) => {
                if current.as_str() != content {
                    current.clear();
                    current.push_str(content);
                }
            }
            Some(_) => warn!(target: "scene", "Node {:?} is not a text node", node),
            None => warn!(target: "scene", "Text node {:?} does not exist", node),
        }
    }

    fn register_hit_area(&mut self, scene: SceneId, rect: Rect, target: GameEvent) -> NodeId {
        let id = NodeId(self.allocate());
        if let Some(container) = self.container_mut(scene) {
            container.hit_areas.push(HitArea { id, rect, target });
        }
        id
    }

    fn hit_test(&self, point: Point) -> Option<GameEvent> {
        self.attached
            .iter()
            .rev()
            .filter_map(|scene| self.containers.get(scene))
            .flat_map(|c| c.hit_areas.iter().rev())
            .find(|area| area.rect.contains(point))
            .map(|area| area.target)
    }

    fn attached(&self) -> Vec<SceneId> {
        self.attached.clone()
    }

    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::game::RegionId;

    fn text(content: &str) -> Node {
        Node::Text {
            content: content.to_string(),
            position: Point::new(0.0, 0.0),
            style: TextStyle::new(20.0),
        }
    }

    #[test]
    fn stage_reports_its_size() {
        assert_eq!(Stage::new(400.0, 600.0).size(), (400.0, 600.0));
    }

    //--- Geometry ---------------------------------------------------------

    #[test]
    fn centered_square_is_centered() {
        let rect = Rect::centered_square(Point::new(104.0, 394.0), 30.0);
        assert_eq!(rect, Rect::new(89.0, 379.0, 30.0, 30.0));
        assert_eq!(rect.center(), Point::new(104.0, 394.0));
    }

    #[test]
    fn rect_containment_is_half_open() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(Point::new(0.0, 0.0)));
        assert!(rect.contains(Point::new(9.99, 9.99)));
        assert!(!rect.contains(Point::new(10.0, 5.0)), "Right edge is exclusive");
        assert!(!rect.contains(Point::new(5.0, 10.0)), "Bottom edge is exclusive");
        assert!(!rect.contains(Point::new(-0.1, 5.0)));
    }

    //--- Containers -------------------------------------------------------

    #[test]
    fn created_container_is_detached_until_attached() {
        let mut stage = Stage::new(400.0, 600.0);
        let scene = stage.create_container();

        assert!(stage.attached().is_empty());
        stage.attach(scene);
        assert_eq!(stage.attached(), vec![scene]);
    }

    #[test]
    fn attaching_twice_is_ignored() {
        let mut stage = Stage::new(400.0, 600.0);
        let scene = stage.create_container();
        stage.attach(scene);
        stage.attach(scene);
        assert_eq!(stage.attached().len(), 1);
    }

    #[test]
    fn detach_disposes_children_and_hit_areas() {
        let mut stage = Stage::new(400.0, 600.0);
        let scene = stage.create_container();
        stage.attach(scene);
        let label = stage.add_child(scene, text("hello"));
        stage.register_hit_area(scene, Rect::new(0.0, 0.0, 10.0, 10.0), GameEvent::Retry);

        stage.detach(scene);

        assert!(stage.attached().is_empty());
        assert_eq!(stage.container_count(), 0);
        assert!(stage.node(label).is_none(), "Children are disposed with the container");
        assert!(stage.hit_test(Point::new(5.0, 5.0)).is_none());
    }

    #[test]
    fn detach_unknown_container_is_noop() {
        let mut stage = Stage::new(400.0, 600.0);
        let scene = stage.create_container();
        stage.detach(scene);
        stage.detach(scene);
        assert_eq!(stage.container_count(), 0);
    }

    //--- Text -------------------------------------------------------------

    #[test]
    fn set_text_replaces_content() {
        let mut stage = Stage::new(400.0, 600.0);
        let scene = stage.create_container();
        let label = stage.add_child(scene, text("Timer: 0.00"));

        stage.set_text(label, "Timer: 2.00");
        assert_eq!(stage.text(label), Some("Timer: 2.00"));
    }

    #[test]
    fn set_text_on_non_text_node_is_ignored() {
        let mut stage = Stage::new(400.0, 600.0);
        let scene = stage.create_container();
        let ring = stage.add_child(
            scene,
            Node::Ring {
                center: Point::new(0.0, 0.0),
                radius: 20.0,
                line_width: 5.0,
                color: Color(0xEC6D71),
            },
        );

        stage.set_text(ring, "nope");
        assert!(matches!(stage.node(ring), Some(Node::Ring { .. })));
        assert_eq!(stage.text(ring), None);
    }

    //--- Hit Testing ------------------------------------------------------

    #[test]
    fn hit_test_resolves_zone_under_point() {
        let mut stage = Stage::new(400.0, 600.0);
        let scene = stage.create_container();
        stage.attach(scene);
        stage.register_hit_area(
            scene,
            Rect::centered_square(Point::new(104.0, 394.0), 30.0),
            GameEvent::RegionTapped(RegionId(0)),
        );

        assert_eq!(
            stage.hit_test(Point::new(110.0, 400.0)),
            Some(GameEvent::RegionTapped(RegionId(0)))
        );
        assert_eq!(stage.hit_test(Point::new(200.0, 200.0)), None);
    }

    #[test]
    fn hit_test_prefers_latest_zone() {
        let mut stage = Stage::new(400.0, 600.0);
        let scene = stage.create_container();
        stage.attach(scene);
        let rect = Rect::new(0.0, 0.0, 50.0, 50.0);
        stage.register_hit_area(scene, rect, GameEvent::Retry);
        stage.register_hit_area(scene, rect, GameEvent::Share);

        assert_eq!(stage.hit_test(Point::new(1.0, 1.0)), Some(GameEvent::Share));
    }

    #[test]
    fn hit_test_ignores_detached_containers() {
        let mut stage = Stage::new(400.0, 600.0);
        let scene = stage.create_container();
        stage.register_hit_area(scene, Rect::new(0.0, 0.0, 50.0, 50.0), GameEvent::Retry);

        assert_eq!(stage.hit_test(Point::new(1.0, 1.0)), None, "Not attached yet");
    }
}
