//! Rendering boundary
//!
//! Pixels are the host's job. This module turns a [`RenderSnapshot`] into
//! "draw image" and "draw text" calls against whatever [`Renderer`] the host
//! provides.

use crate::assets::{AssetSet, ImageHandle};
use crate::sim::{GROUND_TILE_WIDTH, GROUP_HEIGHT, GameMode, RenderSnapshot};

/// RGBA text colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::from_rgb_u8(0, 0, 0);
    /// Highlight for the group the next answer applies to
    pub const HIGHLIGHT: Color = Color::from_rgb_u8(200, 30, 30);

    pub const fn from_rgb_u8(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// Host drawing surface
pub trait Renderer {
    fn draw_image(&mut self, handle: ImageHandle, x: i32, y: i32);
    fn draw_text(&mut self, text: &str, x: i32, y: i32, color: Color);
}

// HUD layout (640x480 screen)
const HUD_Y: i32 = 20;
const LEVEL_X: i32 = 20;
const HISCORE_X: i32 = 300;
const SCORE_X: i32 = 500;
const BANNER_Y: i32 = 240;
/// Claimed fu is printed this far above a group
const LABEL_GAP: i32 = 8;

/// Draw one frame
pub fn draw(snapshot: &RenderSnapshot<'_>, assets: &AssetSet, renderer: &mut impl Renderer) {
    draw_ground(snapshot, assets, renderer);
    draw_slots(snapshot, renderer);

    renderer.draw_text(&format!("Level: {}", snapshot.level), LEVEL_X, HUD_Y, Color::BLACK);
    renderer.draw_text(
        &format!("Hiscore: {}", snapshot.high_score),
        HISCORE_X,
        HUD_Y,
        Color::BLACK,
    );
    renderer.draw_text(&format!("Score: {}", snapshot.score), SCORE_X, HUD_Y, Color::BLACK);

    let banner = match snapshot.mode {
        GameMode::Title => Some(("PRESS SPACE KEY", 245)),
        GameMode::Paused => Some(("PAUSED", 290)),
        GameMode::GameOver => Some(("GAME OVER", 275)),
        GameMode::Playing => None,
    };
    if let Some((text, x)) = banner {
        renderer.draw_text(text, x, BANNER_Y, Color::BLACK);
    }
}

fn draw_ground(snapshot: &RenderSnapshot<'_>, assets: &AssetSet, renderer: &mut impl Renderer) {
    // One extra sprite covers the gap left while the strip scrolls
    let count = snapshot.screen_width / GROUND_TILE_WIDTH + 2;
    for i in 0..count {
        renderer.draw_image(
            assets.ground,
            snapshot.ground.x + i * GROUND_TILE_WIDTH,
            snapshot.ground.y,
        );
    }
}

fn draw_slots(snapshot: &RenderSnapshot<'_>, renderer: &mut impl Renderer) {
    for (index, slot) in snapshot.slots.iter().enumerate() {
        if !slot.visible {
            continue;
        }
        let pos = slot.position;

        if let Some(marker) = slot.marker {
            renderer.draw_image(marker, pos.x, pos.y + GROUP_HEIGHT - marker.size.y as i32);
            continue;
        }

        let Some(group) = &slot.occupant else {
            continue;
        };
        // Groups stand on the ground line
        let top = pos.y + GROUP_HEIGHT - group.composed_image.size.y as i32;
        for part in &group.composed_image.parts {
            renderer.draw_image(part.handle, pos.x + part.offset.x, top + part.offset.y);
        }

        let color = if snapshot.next_to_judge == Some(index) {
            Color::HIGHLIGHT
        } else {
            Color::BLACK
        };
        renderer.draw_text(
            &format!("{} fu", group.displayed_value),
            pos.x,
            top - LABEL_GAP,
            color,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::ManifestAssets;
    use crate::settings::GameOptions;
    use crate::sim::{RoundState, TickInput, tick};
    use std::sync::Arc;

    #[derive(Default)]
    struct Recorder {
        images: Vec<(ImageHandle, i32, i32)>,
        texts: Vec<(String, Color)>,
    }

    impl Renderer for Recorder {
        fn draw_image(&mut self, handle: ImageHandle, x: i32, y: i32) {
            self.images.push((handle, x, y));
        }

        fn draw_text(&mut self, text: &str, _x: i32, _y: i32, color: Color) {
            self.texts.push((text.to_string(), color));
        }
    }

    fn state() -> RoundState {
        let assets = AssetSet::load(&mut ManifestAssets::builtin()).unwrap();
        let options = GameOptions {
            spawn_interval: 1,
            min_spawn_distance: 0,
            spawn_probability_denominator: 1,
            seed: Some(1),
            ..Default::default()
        };
        RoundState::new(options, Arc::new(assets)).unwrap()
    }

    fn render(state: &RoundState) -> Recorder {
        let mut recorder = Recorder::default();
        draw(&state.snapshot(), &state.assets, &mut recorder);
        recorder
    }

    fn has_text(recorder: &Recorder, text: &str) -> bool {
        recorder.texts.iter().any(|(t, _)| t == text)
    }

    #[test]
    fn test_title_banner_and_hud() {
        let state = state();
        let frame = render(&state);
        assert!(has_text(&frame, "PRESS SPACE KEY"));
        assert!(has_text(&frame, "Hiscore: 0"));
        assert!(has_text(&frame, "Score: 0"));
        // Only ground sprites on the title screen
        assert!(frame.images.iter().all(|(h, _, _)| *h == state.assets.ground));
    }

    #[test]
    fn test_group_then_marker() {
        let mut state = state();
        let accept = TickInput {
            accept: true,
            ..Default::default()
        };
        tick(&mut state, &accept);
        tick(&mut state, &TickInput::default());
        tick(&mut state, &TickInput::default());

        let group = state.track.slots()[0].occupant.clone().unwrap();
        let frame = render(&state);
        let label = format!("{} fu", group.displayed_value);
        assert!(frame.texts.contains(&(label, Color::HIGHLIGHT)));
        for part in &group.composed_image.parts {
            assert!(frame.images.iter().any(|(h, _, _)| *h == part.handle));
        }

        tick(&mut state, &accept);
        let marker = state.track.slots()[0].marker.unwrap();
        let frame = render(&state);
        assert!(frame.images.iter().any(|(h, _, _)| *h == marker));
        assert!(!frame.texts.iter().any(|(t, _)| t.ends_with(" fu")));
    }
}
