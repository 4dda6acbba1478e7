//! Canvas 2D drawing of the session

use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use super::shapes::{fade_alpha, pulse_offset, rotation_radians};
use crate::consts::*;
use crate::sim::{Bomb, Cloud, CountdownFrame, GameState, PowerUp};

const BACKGROUND_SRC: &str = "assets/background.png";
const CLOUD_SRC: &str = "assets/cloud.png";
const BOMB_SRC: &str = "assets/bomb.png";

const POWER_UP_COLOR: &str = "#ff69b4";
const TEXT_COLOR: &str = "#fff";

/// Sprite images
pub struct Assets {
    pub background: HtmlImageElement,
    pub cloud: HtmlImageElement,
    pub bomb: HtmlImageElement,
}

impl Assets {
    /// Start loading all images. The background is returned without a source
    /// so the caller can attach load/error handlers first; call
    /// `start_background` afterwards.
    pub fn new() -> Result<Self, JsValue> {
        let cloud = HtmlImageElement::new()?;
        cloud.set_src(CLOUD_SRC);
        let bomb = HtmlImageElement::new()?;
        bomb.set_src(BOMB_SRC);
        Ok(Self {
            background: HtmlImageElement::new()?,
            cloud,
            bomb,
        })
    }

    pub fn start_background(&self) {
        self.background.set_src(BACKGROUND_SRC);
    }
}

/// True when the image decoded; broken or pending images are skipped
fn ready(img: &HtmlImageElement) -> bool {
    img.complete() && img.natural_width() > 0
}

/// Draws the arena, entities and HUD onto a 2D context
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
    assets: Assets,
}

impl CanvasRenderer {
    pub fn new(ctx: CanvasRenderingContext2d, width: f64, height: f64, assets: Assets) -> Self {
        Self {
            ctx,
            width,
            height,
            assets,
        }
    }

    pub fn assets(&self) -> &Assets {
        &self.assets
    }

    fn draw_background(&self) {
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
        if ready(&self.assets.background) {
            let _ = self
                .ctx
                .draw_image_with_html_image_element_and_dw_and_dh(
                    &self.assets.background,
                    0.0,
                    0.0,
                    self.width,
                    self.height,
                );
        }
    }

    /// Countdown number or "Gooo!" centred on the background
    pub fn draw_countdown(&self, frame: CountdownFrame) {
        self.draw_background();
        let text = match frame {
            CountdownFrame::Number(n) => n.to_string(),
            CountdownFrame::Go => "Gooo!".to_string(),
        };
        let ctx = &self.ctx;
        ctx.save();
        ctx.set_fill_style_str(TEXT_COLOR);
        ctx.set_font("40px Arial");
        ctx.set_text_align("center");
        let _ = ctx.fill_text(&text, self.width / 2.0, self.height / 2.0);
        ctx.restore();
    }

    /// Full gameplay frame
    pub fn render(&self, state: &GameState, now: f64) {
        self.draw_background();
        for cloud in &state.clouds {
            self.draw_cloud(cloud);
        }
        for power_up in &state.power_ups {
            self.draw_power_up(power_up, now);
        }
        for bomb in &state.bombs {
            self.draw_bomb(bomb, now);
        }
        self.draw_hud(state);
    }

    fn draw_cloud(&self, cloud: &Cloud) {
        if !ready(&self.assets.cloud) {
            return;
        }
        let ctx = &self.ctx;
        let center = cloud.center();
        let half = cloud.size as f64 / 2.0;
        ctx.save();
        let _ = ctx.translate(center.x as f64, center.y as f64);
        let _ = ctx.rotate(rotation_radians(cloud.angle));
        let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
            &self.assets.cloud,
            -half,
            -half,
            cloud.size as f64,
            cloud.size as f64,
        );
        ctx.restore();
    }

    fn draw_power_up(&self, power_up: &PowerUp, now: f64) {
        let ctx = &self.ctx;
        let age = power_up.age(now);
        let pulse = pulse_offset(age) as f64;
        let center = power_up.center();
        ctx.save();
        ctx.set_global_alpha(fade_alpha(age, POWER_UP_LIFETIME_MS));
        ctx.set_fill_style_str(POWER_UP_COLOR);
        ctx.begin_path();
        let _ = ctx.arc(
            center.x as f64,
            center.y as f64 + pulse,
            power_up.size as f64 / 2.0,
            0.0,
            std::f64::consts::TAU,
        );
        ctx.fill();
        ctx.set_fill_style_str(TEXT_COLOR);
        ctx.set_font("16px Arial");
        let _ = ctx.fill_text(
            "+\u{2764}\u{fe0f}",
            power_up.pos.x as f64 + 5.0,
            center.y as f64 + 5.0 + pulse,
        );
        ctx.restore();
    }

    fn draw_bomb(&self, bomb: &Bomb, now: f64) {
        if !ready(&self.assets.bomb) {
            return;
        }
        let ctx = &self.ctx;
        let age = bomb.age(now);
        ctx.save();
        ctx.set_global_alpha(fade_alpha(age, BOMB_LIFETIME_MS));
        let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
            &self.assets.bomb,
            bomb.pos.x as f64,
            bomb.pos.y as f64 + pulse_offset(age) as f64,
            bomb.size as f64,
            bomb.size as f64,
        );
        ctx.restore();
    }

    fn draw_hud(&self, state: &GameState) {
        let ctx = &self.ctx;
        ctx.save();
        ctx.set_fill_style_str(TEXT_COLOR);
        ctx.set_font("32px Arial");
        ctx.set_text_align("left");
        ctx.set_text_baseline("top");
        let _ = ctx.fill_text(&format!("Score: {}", state.score), 20.0, 20.0);
        let _ = ctx.fill_text(&format!("Lives: {}", state.lives), 20.0, 60.0);
        ctx.restore();
    }
}
