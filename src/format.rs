//! Markup strings for the DOM renderer.
//!
//! Everything here maps core state to class names, inline styles and text.
//! Nothing touches the DOM, so host-side tests include this file directly.

use crate::constants::*;
use birthday_core::{
    AnimationStage, ElementId, ElementKind, VisualElement, BUBBLE_GLOWS, BUBBLE_QUOTES,
    CONFETTI_COLORS, PARTICLE_COLORS,
};

/// A decorative DOM node to create: class list, inline style, text.
#[derive(Clone, Debug, PartialEq)]
pub struct Piece {
    pub class: String,
    pub style: String,
    pub text: &'static str,
}

/// "HH:MM", zero padded, 24-hour.
pub fn clock_text(hours: u32, minutes: u32) -> String {
    format!("{:02}:{:02}", hours % 24, minutes % 60)
}

pub fn dom_id(id: ElementId) -> String {
    format!("el-{}", id.0)
}

pub fn layer_id(kind: &ElementKind) -> &'static str {
    match kind {
        ElementKind::Particle { .. } => PARTICLE_LAYER_ID,
        ElementKind::Bubble { .. } => BUBBLE_LAYER_ID,
        ElementKind::ConfettiBurst { .. } => CONFETTI_LAYER_ID,
    }
}

pub fn element_class(kind: &ElementKind) -> String {
    match kind {
        ElementKind::Particle { .. } => "particle".to_string(),
        ElementKind::Bubble { glow, .. } => {
            format!("bubble {}", BUBBLE_GLOWS.get(*glow).copied().unwrap_or(""))
        }
        ElementKind::ConfettiBurst { .. } => "confetti-burst".to_string(),
    }
}

pub fn element_text(kind: &ElementKind) -> &'static str {
    match kind {
        ElementKind::Bubble { quote, .. } => BUBBLE_QUOTES.get(*quote).copied().unwrap_or(""),
        _ => "",
    }
}

pub fn element_style(el: &VisualElement) -> String {
    let left = el.position.x * 100.0;
    let top = el.position.y * 100.0;
    match el.kind {
        ElementKind::Particle { color, glow } => {
            let c = PARTICLE_COLORS.get(color).copied().unwrap_or("white");
            let g = PARTICLE_COLORS.get(glow).copied().unwrap_or("white");
            format!(
                "left:{left:.2}%;top:{top:.2}%;background:{c};box-shadow:0 0 8px {g};\
                 animation-delay:{:.2}s;animation-duration:{:.2}s",
                el.delay_sec, el.duration_sec
            )
        }
        ElementKind::Bubble { .. } => format!(
            "left:{left:.2}%;top:{top:.2}%;animation-delay:{:.2}s;animation-duration:{:.2}s",
            el.delay_sec, el.duration_sec
        ),
        ElementKind::ConfettiBurst { .. } => format!(
            "left:{left:.2}%;top:{top:.2}%;animation-duration:{:.2}s",
            el.duration_sec
        ),
    }
}

/// The pieces inside one confetti burst, fanned out evenly.
pub fn burst_pieces(particles: u32) -> Vec<Piece> {
    let n = particles.max(1) as usize;
    (0..particles as usize)
        .map(|i| {
            let angle = i as f32 * 360.0 / n as f32;
            let distance = 40.0 + (i % 5) as f32 * 18.0;
            let color = CONFETTI_COLORS[i % CONFETTI_COLORS.len()];
            Piece {
                class: "confetti-piece".to_string(),
                style: format!(
                    "background:{color};--angle:{angle:.1}deg;--distance:{distance:.0}px"
                ),
                text: "",
            }
        })
        .collect()
}

/// Overlay content for a cake stage. Idle and vibrating stages are drawn by
/// the cake's own class; only the explosion and its aftermath add pieces.
pub fn stage_pieces(stage: AnimationStage) -> Vec<Piece> {
    match stage {
        AnimationStage::Idle | AnimationStage::Vibrating => Vec::new(),
        AnimationStage::Exploded => {
            let mut pieces = Vec::with_capacity(
                SLICE_PATHS.len() + EXPLOSION_SPARKS + EXPLOSION_CONFETTI,
            );
            for ([x, y, rot], _) in SLICE_PATHS {
                pieces.push(Piece {
                    class: "flying-slice".to_string(),
                    style: format!(
                        "--to-x:{x:.0}px;--to-y:{y:.0}px;--spin:{:.0}deg",
                        rot + 720.0
                    ),
                    text: "🍰",
                });
            }
            pieces.extend(ring(EXPLOSION_SPARKS, "spark", 1.0));
            pieces.extend(ring(EXPLOSION_CONFETTI, "burst-confetti", 1.4));
            pieces
        }
        AnimationStage::Complete => SLICE_PATHS
            .iter()
            .map(|(launch, [fx, fy])| Piece {
                class: "stuck-slice".to_string(),
                style: format!(
                    "left:calc(50% + {fx:.0}px);top:calc(50% + {fy:.0}px);transform:rotate({:.0}deg)",
                    launch[2]
                ),
                text: "🍰",
            })
            .collect(),
    }
}

fn ring(count: usize, class: &str, reach: f32) -> Vec<Piece> {
    (0..count)
        .map(|i| {
            let angle = (i as f32 / count as f32) * std::f32::consts::TAU;
            let x = angle.cos() * BURST_RADIUS_PX * reach;
            let y = angle.sin() * BURST_RADIUS_PX * reach;
            let color = CONFETTI_COLORS[i % CONFETTI_COLORS.len()];
            Piece {
                class: class.to_string(),
                style: format!(
                    "background:{color};--to-x:{x:.0}px;--to-y:{y:.0}px;animation-delay:{:.2}s",
                    (i % 4) as f32 * 0.05
                ),
                text: "",
            }
        })
        .collect()
}

pub fn cake_class(stage: AnimationStage) -> String {
    format!("cake cake--{}", stage.as_str())
}

pub fn music_label(playing: bool) -> &'static str {
    if playing {
        "🔊 Music On"
    } else {
        "🔇 Music Off"
    }
}

pub fn slice_caption(slices: u32) -> String {
    let noun = if slices == 1 { "slice" } else { "slices" };
    format!("Click to slice! ({slices} {noun} cut)")
}

/// Placeholder row for the wish list, present only while it is empty.
pub fn empty_wishes_piece(wish_count: usize) -> Option<Piece> {
    (wish_count == 0).then(|| Piece {
        class: "wish-empty".to_string(),
        style: String::new(),
        text: EMPTY_WISHES_TEXT,
    })
}

pub fn can_submit(text: &str) -> bool {
    !text.trim().is_empty()
}
