//! Primitive builders: a documented default record plus a typed, partial
//! override merged on top field by field.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    OverrideError, PanelConfig, PlaybackConfig, Position, ProgressConfig, SoundId, TextConfig,
};

/// A partial record whose set fields replace the matching fields of a
/// fully-populated `Target`.
pub trait Overrides: Default + DeserializeOwned {
    type Target;

    /// Keys accepted by [`Overrides::from_value`].
    const FIELDS: &'static [&'static str];

    /// Replace every field of `target` that this override sets.
    fn apply_to(self, target: &mut Self::Target);

    /// Parse an override supplied as JSON, naming the first key outside the
    /// schema. `null` means "no override".
    fn from_value(path: &str, value: Value) -> Result<Self, OverrideError> {
        match &value {
            Value::Null => return Ok(Self::default()),
            Value::Object(map) => {
                if let Some(key) = map.keys().find(|k| !Self::FIELDS.contains(&k.as_str())) {
                    return Err(OverrideError::UnknownKey {
                        path: path.to_string(),
                        key: key.clone(),
                    });
                }
            }
            _ => {
                return Err(OverrideError::NotAnObject {
                    path: path.to_string(),
                })
            }
        }
        serde_json::from_value(value).map_err(|e| OverrideError::InvalidValue {
            path: path.to_string(),
            reason: e.to_string(),
        })
    }
}

macro_rules! merge_fields {
    ($from:ident => $to:ident: $($field:ident),+ $(,)?) => {
        $(
            if let Some(v) = $from.$field {
                $to.$field = v;
            }
        )+
    };
}

macro_rules! setters {
    ($($field:ident: $ty:ty),+ $(,)?) => {
        $(
            pub fn $field(mut self, value: impl Into<$ty>) -> Self {
                self.$field = Some(value.into());
                self
            }
        )+
    };
}

/// Overrides for [`bg_cfg`].
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PanelOverrides {
    pub offset: Option<Position>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub corner_radius: Option<f64>,
    pub border_style: Option<String>,
    pub border_alpha: Option<f64>,
    pub border_width: Option<f64>,
    pub bg_style: Option<String>,
    pub bg_alpha: Option<f64>,
}

impl PanelOverrides {
    setters! {
        offset: Position,
        width: f64,
        height: f64,
        corner_radius: f64,
        border_style: String,
        border_alpha: f64,
        border_width: f64,
        bg_style: String,
        bg_alpha: f64,
    }
}

impl Overrides for PanelOverrides {
    type Target = PanelConfig;

    const FIELDS: &'static [&'static str] = &[
        "offset",
        "width",
        "height",
        "corner_radius",
        "border_style",
        "border_alpha",
        "border_width",
        "bg_style",
        "bg_alpha",
    ];

    fn apply_to(self, target: &mut PanelConfig) {
        let o = self;
        merge_fields!(o => target:
            offset, width, height, corner_radius, border_style,
            border_alpha, border_width, bg_style, bg_alpha);
    }
}

/// Overrides for [`text_cfg`].
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TextOverrides {
    pub offset: Option<Position>,
    pub font: Option<String>,
    pub style: Option<String>,
    pub stroke: Option<bool>,
    pub size: Option<u32>,
    pub center_and_fit: Option<bool>,
    pub alpha: Option<f64>,
    pub is_command: Option<bool>,
    pub filled_style: Option<String>,
}

impl TextOverrides {
    setters! {
        offset: Position,
        font: String,
        style: String,
        stroke: bool,
        size: u32,
        center_and_fit: bool,
        alpha: f64,
        is_command: bool,
        filled_style: String,
    }
}

impl Overrides for TextOverrides {
    type Target = TextConfig;

    const FIELDS: &'static [&'static str] = &[
        "offset",
        "font",
        "style",
        "stroke",
        "size",
        "center_and_fit",
        "alpha",
        "is_command",
        "filled_style",
    ];

    fn apply_to(self, target: &mut TextConfig) {
        let o = self;
        merge_fields!(o => target:
            offset, font, style, stroke, size, center_and_fit, alpha, is_command);
        if o.filled_style.is_some() {
            target.filled_style = o.filled_style;
        }
    }
}

/// Overrides for [`playback_cfg`].
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlaybackOverrides {
    pub play_length: Option<f64>,
    pub random_start: Option<bool>,
}

impl PlaybackOverrides {
    setters! {
        play_length: f64,
        random_start: bool,
    }
}

impl Overrides for PlaybackOverrides {
    type Target = PlaybackConfig;

    const FIELDS: &'static [&'static str] = &["play_length", "random_start"];

    fn apply_to(self, target: &mut PlaybackConfig) {
        let o = self;
        if o.play_length.is_some() {
            target.play_length = o.play_length;
        }
        merge_fields!(o => target: random_start);
    }
}

pub fn pos(x: impl Into<f64>, y: impl Into<f64>) -> Position {
    Position {
        x: x.into(),
        y: y.into(),
    }
}

/// Styled panel at offset `(x, y)`.
///
/// Defaults: corner_radius 30, border_alpha 1, border_width 5, bg_alpha 0.2.
pub fn bg_cfg(
    x: impl Into<f64>,
    y: impl Into<f64>,
    width: impl Into<f64>,
    height: impl Into<f64>,
    border_style: &str,
    bg_style: &str,
    overrides: PanelOverrides,
) -> PanelConfig {
    let mut cfg = PanelConfig {
        offset: pos(x, y),
        width: width.into(),
        height: height.into(),
        corner_radius: 30.0,
        border_style: border_style.to_string(),
        border_alpha: 1.0,
        border_width: 5.0,
        bg_style: bg_style.to_string(),
        bg_alpha: 0.2,
    };
    overrides.apply_to(&mut cfg);
    cfg
}

/// Text at offset `(x, y)` in the given point size.
///
/// Defaults: "comic sans", yellow, no stroke, not fitted, alpha 0.4, static label.
pub fn text_cfg(
    x: impl Into<f64>,
    y: impl Into<f64>,
    size: u32,
    overrides: TextOverrides,
) -> TextConfig {
    let mut cfg = TextConfig {
        offset: pos(x, y),
        font: "comic sans".to_string(),
        style: "yellow".to_string(),
        stroke: false,
        size,
        center_and_fit: false,
        alpha: 0.4,
        is_command: false,
        filled_style: None,
    };
    overrides.apply_to(&mut cfg);
    cfg
}

/// Thin, borderless progress bar.
pub fn progress_cfg(
    x: impl Into<f64>,
    y: impl Into<f64>,
    width: impl Into<f64>,
    height: impl Into<f64>,
) -> ProgressConfig {
    ProgressConfig {
        done_alpha: 1.0,
        done_style: "yellow".to_string(),
        bg: bg_cfg(
            x,
            y,
            width,
            height,
            "black",
            "black",
            PanelOverrides::default()
                .corner_radius(5)
                .border_alpha(0)
                .border_width(0)
                .bg_alpha(0.4),
        ),
    }
}

pub fn playback_cfg(sound: &str, overrides: PlaybackOverrides) -> PlaybackConfig {
    let mut cfg = PlaybackConfig {
        sound: SoundId::new(sound),
        play_length: None,
        random_start: false,
    };
    overrides.apply_to(&mut cfg);
    cfg
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn progress_matches_documented_record() {
        let p = progress_cfg(0, 30, 100, 5);
        assert_eq!(p.done_alpha, 1.0);
        assert_eq!(p.done_style, "yellow");
        assert_eq!(
            p.bg,
            PanelConfig {
                offset: pos(0, 30),
                width: 100.0,
                height: 5.0,
                corner_radius: 5.0,
                border_style: "black".into(),
                border_alpha: 0.0,
                border_width: 0.0,
                bg_style: "black".into(),
                bg_alpha: 0.4,
            }
        );
    }

    #[test]
    fn text_override_touches_only_named_fields() {
        let t = text_cfg(
            0,
            0,
            48,
            TextOverrides::default().center_and_fit(true).is_command(true),
        );
        let base = text_cfg(0, 0, 48, TextOverrides::default());
        assert!(t.center_and_fit);
        assert!(t.is_command);
        assert_eq!(t.font, base.font);
        assert_eq!(t.style, base.style);
        assert_eq!(t.stroke, base.stroke);
        assert_eq!(t.alpha, base.alpha);
        assert_eq!(t.size, 48);
        assert_eq!(t.filled_style, None);
    }

    #[test]
    fn empty_overrides_yield_defaults() {
        let bg = bg_cfg(-50, -300, 1340, 500, "black", "pink", PanelOverrides::default());
        assert_eq!(bg.corner_radius, 30.0);
        assert_eq!(bg.border_alpha, 1.0);
        assert_eq!(bg.border_width, 5.0);
        assert_eq!(bg.bg_alpha, 0.2);
        assert_eq!(bg.border_style, "black");
        assert_eq!(bg.bg_style, "pink");

        let snd = playback_cfg("Coins", PlaybackOverrides::default());
        assert_eq!(snd.sound.as_str(), "Coins");
        assert_eq!(snd.play_length, None);
        assert!(!snd.random_start);
    }

    #[test]
    fn playback_override_sets_random_start() {
        let snd = playback_cfg("Frying", PlaybackOverrides::default().random_start(true));
        assert!(snd.random_start);
        assert_eq!(snd.play_length, None);
    }

    #[test]
    fn out_of_range_values_pass_through() {
        let bg = bg_cfg(0, 0, -10, -20, "black", "white", PanelOverrides::default().bg_alpha(3.0));
        assert_eq!(bg.width, -10.0);
        assert_eq!(bg.bg_alpha, 3.0);
    }

    #[test]
    fn from_value_names_unknown_key() {
        let err = PanelOverrides::from_value("ui.state.bg", json!({"birder_alpha": 0.3}))
            .unwrap_err();
        assert_eq!(
            err,
            OverrideError::UnknownKey {
                path: "ui.state.bg".into(),
                key: "birder_alpha".into(),
            }
        );
    }

    #[test]
    fn from_value_accepts_known_keys() {
        let o = TextOverrides::from_value(
            "ui.money.text",
            json!({"style": "black", "filled_style": "gold", "stroke": true, "alpha": 1}),
        )
        .unwrap();
        let t = text_cfg(40, 40, 128, o);
        assert_eq!(t.style, "black");
        assert_eq!(t.filled_style.as_deref(), Some("gold"));
        assert!(t.stroke);
        assert_eq!(t.alpha, 1.0);
    }

    #[test]
    fn from_value_rejects_wrong_types_and_shapes() {
        let err = PlaybackOverrides::from_value("snd", json!({"random_start": "yes"})).unwrap_err();
        assert!(matches!(err, OverrideError::InvalidValue { .. }));
        let err = PlaybackOverrides::from_value("snd", json!([1, 2])).unwrap_err();
        assert_eq!(err, OverrideError::NotAnObject { path: "snd".into() });
        assert_eq!(
            PlaybackOverrides::from_value("snd", Value::Null).unwrap(),
            PlaybackOverrides::default()
        );
    }

    proptest! {
        #[test]
        fn override_wins_default_kept(alpha in -2.0f64..2.0, width in 0.0f64..5000.0) {
            let bg = bg_cfg(0, 0, width, 10, "black", "white", PanelOverrides::default().border_alpha(alpha));
            prop_assert_eq!(bg.border_alpha, alpha);
            prop_assert_eq!(bg.width, width);
            prop_assert_eq!(bg.border_width, 5.0);
            prop_assert_eq!(bg.bg_alpha, 0.2);
        }

        #[test]
        fn text_size_and_offset_are_verbatim(x in -2000i32..2000, y in -2000i32..2000, size in 1u32..512) {
            let t = text_cfg(x, y, size, TextOverrides::default());
            prop_assert_eq!(t.offset, pos(x, y));
            prop_assert_eq!(t.size, size);
            prop_assert_eq!(t.alpha, 0.4);
        }
    }
}
