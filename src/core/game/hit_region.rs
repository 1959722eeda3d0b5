//=========================================================================
// Hit Regions
//=========================================================================
//
// The fixed set of tappable differences for one gameplay scene.
//
// Each region owns its status and, once found, the id of its marker
// ring, so there is no parallel "marker list" to keep in sync.
//
//   Unfound ──tap──> Found (marker created, never reverts)
//   Found   ──tap──> Found (ignored)
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info};

//=== Internal Dependencies ===============================================

use super::event::{GameEvent, RegionId};
use crate::core::scene::{Color, Node, NodeId, Point, Rect, RenderSurface, SceneId};

//=== Marker Style ========================================================

/// Appearance of the ring drawn over a found difference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    pub radius: f32,
    pub line_width: f32,
    pub color: Color,
}

impl MarkerStyle {
    pub fn with_radius(radius: f32) -> Self {
        Self {
            radius,
            line_width: 5.0,
            color: Color(0xEC6D71),
        }
    }

    /// Ring center for a region centered at `center`. The ring sits half a
    /// radius above the region; purely cosmetic, hit-testing is unaffected.
    pub fn ring_center(&self, center: Point) -> Point {
        center.offset(0.0, -self.radius / 2.0)
    }
}

//=== HitRegion ===========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionStatus {
    Unfound,
    Found,
}

/// One difference to find.
#[derive(Debug, Clone)]
pub struct HitRegion {
    id: RegionId,
    center: Point,
    capture: Rect,
    status: RegionStatus,
    marker: Option<NodeId>,
}

impl HitRegion {
    fn new(id: RegionId, center: Point, side: f32) -> Self {
        Self {
            id,
            center,
            capture: Rect::centered_square(center, side),
            status: RegionStatus::Unfound,
            marker: None,
        }
    }

    pub fn id(&self) -> RegionId {
        self.id
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn capture(&self) -> Rect {
        self.capture
    }

    pub fn status(&self) -> RegionStatus {
        self.status
    }

    pub fn is_found(&self) -> bool {
        self.status == RegionStatus::Found
    }

    /// The found marker, present only once the region is found.
    pub fn marker(&self) -> Option<NodeId> {
        self.marker
    }
}

//=== TapOutcome ==========================================================

/// What a tap did to the region set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// The region flipped to found and its marker was attached.
    Found,
    /// The region was already found; nothing changed.
    AlreadyFound,
    /// No region has this id.
    Unknown,
}

//=== HitRegionSet ========================================================

/// All regions of the current level, indexed by [`RegionId`].
#[derive(Debug, Clone)]
pub struct HitRegionSet {
    regions: Vec<HitRegion>,
    marker: MarkerStyle,
}

impl HitRegionSet {
    /// Builds one unfound region per center, in order.
    pub fn new(centers: &[Point], side: f32, marker: MarkerStyle) -> Self {
        let regions = centers
            .iter()
            .enumerate()
            .map(|(i, &center)| HitRegion::new(RegionId(i), center, side))
            .collect();

        Self { regions, marker }
    }

    /// Registers an invisible capture zone for every region on `scene`.
    pub fn register<R: RenderSurface>(&self, surface: &mut R, scene: SceneId) {
        for region in &self.regions {
            surface.register_hit_area(scene, region.capture, GameEvent::RegionTapped(region.id));
        }
        debug!(target: "game", "Registered {} capture zone(s)", self.regions.len());
    }

    /// Handles a tap on `id`.
    ///
    /// Only an unfound region reacts: its status flips to found before this
    /// returns, so a second tap on the same region (even within the same
    /// frame) lands on `AlreadyFound`.
    pub fn on_tap<R: RenderSurface>(
        &mut self,
        id: RegionId,
        surface: &mut R,
        scene: SceneId,
    ) -> TapOutcome {
        let style = self.marker;
        let Some(region) = self.regions.get_mut(id.0) else {
            debug!(target: "game", "Tap on unknown region {:?}", id);
            return TapOutcome::Unknown;
        };

        if region.is_found() {
            debug!(target: "game", "Region {:?} already found, ignoring tap", id);
            return TapOutcome::AlreadyFound;
        }

        let ring = surface.add_child(
            scene,
            Node::Ring {
                center: style.ring_center(region.center),
                radius: style.radius,
                line_width: style.line_width,
                color: style.color,
            },
        );
        region.marker = Some(ring);
        region.status = RegionStatus::Found;

        info!(target: "game", "Found difference {:?} at ({}, {})", id, region.center.x, region.center.y);
        TapOutcome::Found
    }

    //--- Queries ----------------------------------------------------------

    pub fn get(&self, id: RegionId) -> Option<&HitRegion> {
        self.regions.get(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HitRegion> {
        self.regions.iter()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn found_count(&self) -> usize {
        self.regions.iter().filter(|r| r.is_found()).count()
    }

    pub fn all_found(&self) -> bool {
        self.regions.iter().all(HitRegion::is_found)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::Stage;

    fn centers() -> Vec<Point> {
        vec![
            Point::new(104.0, 394.0),
            Point::new(110.0, 425.0),
            Point::new(270.0, 405.0),
        ]
    }

    fn setup() -> (HitRegionSet, Stage, SceneId) {
        let mut stage = Stage::new(400.0, 600.0);
        let scene = stage.create_container();
        stage.attach(scene);
        let set = HitRegionSet::new(&centers(), 30.0, MarkerStyle::with_radius(20.0));
        set.register(&mut stage, scene);
        (set, stage, scene)
    }

    fn ring_count(stage: &Stage, scene: SceneId) -> usize {
        stage.nodes(scene).filter(|n| matches!(n, Node::Ring { .. })).count()
    }

    #[test]
    fn regions_start_unfound_in_definition_order() {
        let (set, _, _) = setup();
        assert_eq!(set.len(), 3);
        assert_eq!(set.found_count(), 0);
        for (i, region) in set.iter().enumerate() {
            assert_eq!(region.id(), RegionId(i));
            assert_eq!(region.status(), RegionStatus::Unfound);
            assert!(region.marker().is_none(), "Markers are created lazily");
        }
    }

    #[test]
    fn capture_zone_is_square_around_center() {
        let (set, stage, scene) = setup();
        let region = set.get(RegionId(0)).unwrap();
        assert_eq!(region.capture(), Rect::new(89.0, 379.0, 30.0, 30.0));
        assert_eq!(stage.hit_areas(scene).len(), 3);
        assert_eq!(
            stage.hit_test(Point::new(104.0, 394.0)),
            Some(GameEvent::RegionTapped(RegionId(0)))
        );
    }

    #[test]
    fn first_tap_finds_and_draws_marker() {
        let (mut set, mut stage, scene) = setup();

        assert_eq!(set.on_tap(RegionId(1), &mut stage, scene), TapOutcome::Found);

        let region = set.get(RegionId(1)).unwrap();
        assert!(region.is_found());
        let marker = region.marker().expect("marker should exist once found");
        match stage.node(marker) {
            Some(Node::Ring { center, radius, .. }) => {
                assert_eq!(*center, Point::new(110.0, 415.0), "Ring sits radius/2 above");
                assert_eq!(*radius, 20.0);
            }
            other => panic!("Expected ring marker, got {:?}", other),
        }
    }

    #[test]
    fn second_tap_is_ignored() {
        let (mut set, mut stage, scene) = setup();
        set.on_tap(RegionId(2), &mut stage, scene);

        assert_eq!(set.on_tap(RegionId(2), &mut stage, scene), TapOutcome::AlreadyFound);
        assert_eq!(ring_count(&stage, scene), 1, "No duplicate marker");
        assert_eq!(set.found_count(), 1);
    }

    #[test]
    fn unknown_region_is_ignored() {
        let (mut set, mut stage, scene) = setup();
        assert_eq!(set.on_tap(RegionId(9), &mut stage, scene), TapOutcome::Unknown);
        assert_eq!(ring_count(&stage, scene), 0);
    }

    #[test]
    fn all_found_after_each_region_tapped() {
        let (mut set, mut stage, scene) = setup();
        for i in 0..3 {
            assert!(!set.all_found());
            set.on_tap(RegionId(i), &mut stage, scene);
        }
        assert!(set.all_found());
        assert_eq!(set.found_count(), 3);
    }
}
