use std::{
    fmt,
    path::{Path, PathBuf},
};

use cssclock_proto::config::ClockConfig;

use super::angles::{Degrees, HandAngles};

/// Standard and vendor-prefixed transform properties, all set to the same
/// rotation.
const TRANSFORM_PROPERTIES: [&str; 3] = ["transform", "-moz-transform", "-webkit-transform"];

/// Role of a layer inside the clock face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerRole {
    Background,
    Hours,
    Minutes,
    Seconds,
}

impl LayerRole {
    /// Bottom to top. Later layers paint over earlier ones.
    pub const STACKING_ORDER: [LayerRole; 4] = [
        LayerRole::Background,
        LayerRole::Hours,
        LayerRole::Minutes,
        LayerRole::Seconds,
    ];

    /// Whether the layer is rotated on every tick.
    pub const fn is_moving(self) -> bool {
        !matches!(self, LayerRole::Background)
    }

    const fn index(self) -> usize {
        match self {
            LayerRole::Background => 0,
            LayerRole::Hours => 1,
            LayerRole::Minutes => 2,
            LayerRole::Seconds => 3,
        }
    }

    /// Configured image file name for this role.
    pub fn image_name(self, config: &ClockConfig) -> &str {
        match self {
            LayerRole::Background => &config.background_image,
            LayerRole::Hours => &config.hours_image,
            LayerRole::Minutes => &config.minutes_image,
            LayerRole::Seconds => &config.seconds_image,
        }
    }
}

impl fmt::Display for LayerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LayerRole::Background => "background",
            LayerRole::Hours => "hours",
            LayerRole::Minutes => "minutes",
            LayerRole::Seconds => "seconds",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerSize {
    pub width: u32,
    pub height: u32,
}

impl LayerSize {
    pub const fn new(width: u32, height: Option<u32>) -> Self {
        let height = match height {
            Some(height) => height,
            None => width,
        };
        Self { width, height }
    }

    pub const fn square(edge: u32) -> Self {
        Self::new(edge, None)
    }
}

/// How a node is positioned relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Relative,
    Absolute { top: i32, left: i32 },
}

impl Placement {
    pub const ORIGIN: Self = Placement::Absolute { top: 0, left: 0 };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillAnchor {
    TopLeft,
}

/// Image painted behind a layer's box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackgroundFill {
    pub source: PathBuf,
    pub anchor: FillAnchor,
    pub repeat: bool,
}

impl BackgroundFill {
    pub fn no_repeat(source: PathBuf) -> Self {
        Self {
            source,
            anchor: FillAnchor::TopLeft,
            repeat: false,
        }
    }
}

/// One stacked image of the clock face together with its current rotation.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    role: LayerRole,
    size: LayerSize,
    placement: Placement,
    fill: BackgroundFill,
    rotation: Degrees,
}

impl Layer {
    fn new(role: LayerRole, source: PathBuf, size: LayerSize) -> Self {
        Self {
            role,
            size,
            placement: Placement::ORIGIN,
            fill: BackgroundFill::no_repeat(source),
            rotation: Degrees::ZERO,
        }
    }

    pub fn role(&self) -> LayerRole {
        self.role
    }

    pub fn source(&self) -> &Path {
        &self.fill.source
    }

    pub fn size(&self) -> LayerSize {
        self.size
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn fill(&self) -> &BackgroundFill {
        &self.fill
    }

    pub fn rotation(&self) -> Degrees {
        self.rotation
    }

    /// Style of the layer rendered as CSS declarations.
    ///
    /// The transform is replaced on every call to [`ClockLayers::apply`],
    /// never composed with an earlier one.
    pub fn css(&self) -> String {
        let mut declarations = vec![
            placement_css(self.placement),
            format!("width: {}px", self.size.width),
            format!("height: {}px", self.size.height),
            fill_css(&self.fill),
        ];

        if self.role.is_moving() {
            let rotate = format!("rotate({})", self.rotation);
            for property in TRANSFORM_PROPERTIES {
                declarations.push(format!("{property}: {rotate}"));
            }
        }

        declarations.join("; ")
    }
}

fn placement_css(placement: Placement) -> String {
    match placement {
        Placement::Relative => "position: relative".to_owned(),
        Placement::Absolute { top, left } => {
            format!("position: absolute; top: {top}; left: {left}")
        }
    }
}

fn fill_css(fill: &BackgroundFill) -> String {
    let anchor = match fill.anchor {
        FillAnchor::TopLeft => "top left",
    };
    let repeat = if fill.repeat { "repeat" } else { "no-repeat" };

    format!(
        "background: transparent url({}) {anchor} {repeat}",
        fill.source.display()
    )
}

/// The relatively positioned wrapper holding the four layers.
#[derive(Debug, Clone, PartialEq)]
pub struct ClockLayers {
    placement: Placement,
    layers: [Layer; 4],
}

impl ClockLayers {
    /// Build the four layers from the configuration, in stacking order.
    pub fn assemble(config: &ClockConfig) -> Self {
        let size = LayerSize::square(config.size);
        let layers = LayerRole::STACKING_ORDER
            .map(|role| Layer::new(role, config.resolve_image(role.image_name(config)), size));

        Self {
            placement: Placement::Relative,
            layers,
        }
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn get(&self, role: LayerRole) -> &Layer {
        &self.layers[role.index()]
    }

    /// Layers bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter()
    }

    /// Replace the rotation of every moving layer. The background is never
    /// rotated.
    pub fn apply(&mut self, angles: &HandAngles) {
        self.layers[LayerRole::Hours.index()].rotation = angles.hours;
        self.layers[LayerRole::Minutes.index()].rotation = angles.minutes;
        self.layers[LayerRole::Seconds.index()].rotation = angles.seconds;
    }

    /// Rotations currently applied to the moving layers.
    pub fn angles(&self) -> HandAngles {
        HandAngles {
            hours: self.get(LayerRole::Hours).rotation,
            minutes: self.get(LayerRole::Minutes).rotation,
            seconds: self.get(LayerRole::Seconds).rotation,
        }
    }

    /// Wrapper and layers rendered as nested CSS rules.
    pub fn css(&self) -> String {
        let mut out = format!(".clock {{ {} }}\n", placement_css(self.placement));
        for layer in self.iter() {
            out.push_str(&format!(".clock > .{} {{ {} }}\n", layer.role, layer.css()));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_builds_four_square_layers() {
        let layers = ClockLayers::assemble(&ClockConfig::default());

        assert_eq!(layers.iter().count(), 4);
        for layer in layers.iter() {
            assert_eq!(layer.size(), LayerSize::square(256));
            assert_eq!(layer.placement(), Placement::ORIGIN);
            assert_eq!(layer.fill().anchor, FillAnchor::TopLeft);
            assert!(!layer.fill().repeat);
            assert_eq!(layer.rotation(), Degrees::ZERO);
        }
        assert_eq!(layers.placement(), Placement::Relative);
    }

    #[test]
    fn layers_follow_stacking_order() {
        let layers = ClockLayers::assemble(&ClockConfig::default());
        let roles: Vec<_> = layers.iter().map(Layer::role).collect();

        assert_eq!(roles, LayerRole::STACKING_ORDER.to_vec());
    }

    #[test]
    fn sources_join_image_path_and_file_name() {
        let config = ClockConfig {
            image_path: "skins/night".to_owned(),
            seconds_image: "red.png".to_owned(),
            ..ClockConfig::default()
        };
        let layers = ClockLayers::assemble(&config);

        assert_eq!(
            layers.get(LayerRole::Background).source(),
            Path::new("skins/night/clock-background.png")
        );
        assert_eq!(
            layers.get(LayerRole::Seconds).source(),
            Path::new("skins/night/red.png")
        );
    }

    #[test]
    fn apply_replaces_moving_rotations_only() {
        let mut layers = ClockLayers::assemble(&ClockConfig::default());
        let first = HandAngles {
            hours: Degrees(90.0),
            minutes: Degrees(180.0),
            seconds: Degrees(270.0),
        };
        let second = HandAngles {
            hours: Degrees(6.0),
            minutes: Degrees(12.0),
            seconds: Degrees(18.0),
        };

        layers.apply(&first);
        layers.apply(&second);

        assert_eq!(layers.angles(), second);
        assert_eq!(layers.get(LayerRole::Background).rotation(), Degrees::ZERO);
    }

    #[test]
    fn only_moving_roles_rotate() {
        assert!(!LayerRole::Background.is_moving());
        assert!(LayerRole::Hours.is_moving());
        assert!(LayerRole::Minutes.is_moving());
        assert!(LayerRole::Seconds.is_moving());
    }

    #[test]
    fn layer_size_defaults_height_to_width() {
        assert_eq!(
            LayerSize::new(120, None),
            LayerSize {
                width: 120,
                height: 120
            }
        );
        assert_eq!(LayerSize::new(120, Some(80)).height, 80);
    }

    #[test]
    fn layer_css_mirrors_style_contract() {
        let mut layers = ClockLayers::assemble(&ClockConfig {
            size: 128,
            ..ClockConfig::default()
        });
        layers.apply(&HandAngles {
            hours: Degrees(90.0),
            minutes: Degrees::ZERO,
            seconds: Degrees(180.0),
        });

        assert_eq!(
            layers.get(LayerRole::Hours).css(),
            "position: absolute; top: 0; left: 0; width: 128px; height: 128px; \
             background: transparent url(images/clock-hours.png) top left no-repeat; \
             transform: rotate(90deg); -moz-transform: rotate(90deg); \
             -webkit-transform: rotate(90deg)"
        );
        assert!(!layers.get(LayerRole::Background).css().contains("transform"));
    }

    #[test]
    fn prefixed_transforms_follow_each_apply() {
        let mut layers = ClockLayers::assemble(&ClockConfig::default());
        layers.apply(&HandAngles {
            hours: Degrees::ZERO,
            minutes: Degrees::ZERO,
            seconds: Degrees(42.0),
        });

        let css = layers.get(LayerRole::Seconds).css();

        assert!(css.contains("; transform: rotate(42deg)"));
        assert!(css.contains("-moz-transform: rotate(42deg)"));
        assert!(css.contains("-webkit-transform: rotate(42deg)"));
    }

    #[test]
    fn wrapper_css_lists_layers_bottom_to_top() {
        let layers = ClockLayers::assemble(&ClockConfig::default());
        let css = layers.css();
        let lines: Vec<_> = css.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], ".clock { position: relative }");
        assert!(lines[1].starts_with(".clock > .background {"));
        assert!(lines[2].starts_with(".clock > .hours {"));
        assert!(lines[3].starts_with(".clock > .minutes {"));
        assert!(lines[4].starts_with(".clock > .seconds {"));
    }
}
