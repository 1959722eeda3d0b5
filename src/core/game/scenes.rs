//=========================================================================
// Scene Content
//=========================================================================
//
// Builders for the two screens. They only add nodes to a scene that the
// scene manager has already attached; lifecycle stays with the manager.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::button::Button;
use super::event::GameEvent;
use super::hit_region::HitRegionSet;
use super::session::Session;
use super::timer::format_elapsed;
use crate::config::GameConfig;
use crate::core::assets::AssetId;
use crate::core::scene::{Color, Node, NodeId, Point, RenderSurface, SceneId, TextStyle};

//=== Layout ==============================================================

const HUD_TEXT: TextStyle = TextStyle::new(20.0);
const RESULT_TEXT: TextStyle = TextStyle::new(28.0).centered();

const SCORE_POS: Point = Point::new(3.0, 3.0);
const TIMER_POS: Point = Point::new(150.0, 3.0);
const CAPTION_POS: Point = Point::new(50.0, 40.0);
const INSTRUCTION_POS: Point = Point::new(15.0, 290.0);
const RESULT_Y: f32 = 100.0;

const BUTTON_WIDTH: f32 = 120.0;
const BUTTON_HEIGHT: f32 = 60.0;
const RETRY_POS: Point = Point::new(40.0, 500.0);
const SHARE_POS: Point = Point::new(240.0, 500.0);

//=== Text ================================================================

pub fn score_text(session: &Session) -> String {
    format!("Found: {}", session.score_label())
}

pub fn timer_text(session: &Session) -> String {
    format!("Timer: {}", session.elapsed_label())
}

pub fn result_text(elapsed_secs: f64) -> String {
    format!(
        "You found all the differences\nin {} seconds!",
        format_elapsed(elapsed_secs)
    )
}

pub fn share_text(elapsed_secs: f64) -> String {
    format!("{} seconds to spot all the differences!", format_elapsed(elapsed_secs))
}

//=== Gameplay ============================================================

/// Text nodes the gameplay tick rewrites every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    pub score: NodeId,
    pub timer: NodeId,
}

/// Fills a fresh gameplay scene: both illustrations, capture zones, HUD
/// and instructions.
pub fn build_gameplay<R: RenderSurface>(
    surface: &mut R,
    scene: SceneId,
    config: &GameConfig,
    regions: &HitRegionSet,
    session: &Session,
) -> Hud {
    let [sx, sy] = config.level.sample_image_pos;
    let [px, py] = config.level.puzzle_image_pos;

    surface.add_child(
        scene,
        Node::Sprite {
            asset: AssetId::SampleImage,
            position: Point::new(sx, sy),
        },
    );
    surface.add_child(
        scene,
        Node::Sprite {
            asset: AssetId::PuzzleImage,
            position: Point::new(px, py),
        },
    );

    regions.register(surface, scene);

    let score = surface.add_child(scene, text(score_text(session), SCORE_POS, HUD_TEXT));
    let timer = surface.add_child(scene, text(timer_text(session), TIMER_POS, HUD_TEXT));
    surface.add_child(scene, text("Sample".into(), CAPTION_POS, HUD_TEXT));
    surface.add_child(
        scene,
        text(
            "Tap the differences in the lower picture!".into(),
            INSTRUCTION_POS,
            HUD_TEXT,
        ),
    );

    Hud { score, timer }
}

//=== Results =============================================================

/// Fills a fresh results scene: final time, retry and share buttons. The
/// message is centered on the surface.
pub fn build_results<R: RenderSurface>(surface: &mut R, scene: SceneId, elapsed_secs: f64) {
    let center_x = surface.size().0 / 2.0;
    surface.add_child(
        scene,
        text(result_text(elapsed_secs), Point::new(center_x, RESULT_Y), RESULT_TEXT),
    );

    Button::new("Retry", BUTTON_WIDTH, BUTTON_HEIGHT, Color(0xF09199), GameEvent::Retry)
        .place(surface, scene, RETRY_POS);
    Button::new("Share", BUTTON_WIDTH, BUTTON_HEIGHT, Color(0x82CDDD), GameEvent::Share)
        .place(surface, scene, SHARE_POS);
}

fn text(content: String, position: Point, style: TextStyle) -> Node {
    Node::Text {
        content,
        position,
        style,
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
