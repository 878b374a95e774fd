use crate::compile::model::{
    AnimationDirectives, BackgroundStyle, ButtonStyleModel, CardEffectStyle, ElementAnimation,
    Elevation, RenderedCardModel, TextStyle,
};
use xxhash_rust::xxh3::Xxh3;

const XXH3_SEED: u64 = 0x5c1e_7a9d_3f20_b481;

/// Stable fingerprint of a compiled model, used to detect repaints that change nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ModelFingerprint {
    pub(crate) hi: u64,
    pub(crate) lo: u64,
}

impl std::fmt::Display for ModelFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}{:016x}", self.hi, self.lo)
    }
}

/// Fingerprint every field of `model`, content included.
pub fn fingerprint_model(model: &RenderedCardModel) -> ModelFingerprint {
    let mut h = StableHasher::new();
    write_model(&mut h, model);
    h.finish()
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    fn write_bool(&mut self, v: bool) {
        self.write_u8(u8::from(v));
    }

    fn write_u32(&mut self, v: u32) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.write_bytes(&v.to_bits().to_le_bytes());
    }

    // Length-prefixed so adjacent strings cannot alias.
    fn write_str(&mut self, s: &str) {
        self.write_u32(s.len() as u32);
        self.write_bytes(s.as_bytes());
    }

    fn write_opt_str(&mut self, s: Option<&str>) {
        match s {
            None => self.write_u8(0),
            Some(s) => {
                self.write_u8(1);
                self.write_str(s);
            }
        }
    }

    fn finish(self) -> ModelFingerprint {
        let v = self.inner.digest128();
        ModelFingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

fn write_model(h: &mut StableHasher, m: &RenderedCardModel) {
    h.write_f64(m.unit_px);
    write_background(h, &m.background_style);

    for t in [
        &m.text_styles.general,
        &m.text_styles.header,
        &m.text_styles.description,
        &m.text_styles.date_time,
    ] {
        write_text(h, t);
    }
    for b in [
        &m.button_styles.accept,
        &m.button_styles.decline,
        &m.button_styles.calendar,
        &m.button_styles.map,
        &m.button_styles.qr,
    ] {
        write_button(h, b);
    }

    write_card_effect(h, &m.card_effect_style);
    write_animations(h, &m.animation_directives);

    h.write_str(m.header.style.as_str());
    h.write_opt_str(m.header.image.as_deref());
    h.write_opt_str(m.branding.logo.as_deref());
    h.write_opt_str(m.branding.slogan.as_deref());

    let f = &m.features;
    for flag in [
        f.chatbot,
        f.accept_decline,
        f.calendar_button,
        f.map_button,
        f.map_qr_code,
    ] {
        h.write_bool(flag);
    }
    h.write_str(&m.powered_by_color);

    h.write_str(&m.content.title);
    h.write_str(&m.content.description);
    h.write_str(&m.content.date);
    h.write_str(&m.content.location);
}

fn write_background(h: &mut StableHasher, bg: &BackgroundStyle) {
    match bg {
        BackgroundStyle::Solid { color } => {
            h.write_u8(0);
            h.write_str(color);
        }
        BackgroundStyle::Gradient {
            expression,
            angle,
            direction,
        } => {
            h.write_u8(1);
            h.write_str(expression);
            h.write_f64(*angle);
            h.write_opt_str(direction.map(|d| d.as_str()));
        }
        BackgroundStyle::Image {
            reference,
            fit: _,
            position: _,
        } => {
            h.write_u8(2);
            h.write_str(reference);
        }
    }
}

fn write_text(h: &mut StableHasher, t: &TextStyle) {
    h.write_str(&t.family);
    h.write_f64(t.scale);
    h.write_f64(t.font_size_px);
    h.write_str(&t.color);
    h.write_u32(u32::from(t.weight));
    h.write_str(t.alignment.as_str());
}

fn write_button(h: &mut StableHasher, b: &ButtonStyleModel) {
    h.write_str(&b.background);
    h.write_str(&b.color);
    h.write_f64(b.corner_radius);
    h.write_f64(b.corner_radius_px);
    h.write_str(&b.label);
}

fn write_card_effect(h: &mut StableHasher, c: &CardEffectStyle) {
    match &c.elevation {
        Elevation::None => h.write_u8(0),
        Elevation::DropShadow { shadow } => {
            h.write_u8(1);
            h.write_str(shadow);
        }
        Elevation::Gloss { shadow, highlight } => {
            h.write_u8(2);
            h.write_str(shadow);
            h.write_str(highlight);
        }
    }
    h.write_f64(c.corner_radius);
    h.write_f64(c.corner_radius_px);
    match &c.border {
        None => h.write_u8(0),
        Some(b) => {
            h.write_u8(1);
            h.write_f64(b.width_px);
            h.write_str(&b.color);
        }
    }
}

fn write_animations(h: &mut StableHasher, a: &AnimationDirectives) {
    h.write_str(a.entrance.as_str());
    h.write_str(a.stagger.as_str());
    h.write_u32(a.stagger_step_ms);
    for e in [&a.text, &a.buttons, &a.icons] {
        write_element(h, e);
    }
}

fn write_element(h: &mut StableHasher, e: &ElementAnimation) {
    h.write_str(e.kind.as_str());
    h.write_u32(e.delay_ms);
}
