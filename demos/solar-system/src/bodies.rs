/// Body registry and visual styles.
///
/// Radii, speeds and sizes are display constants, not astronomy: distances are
/// compressed so Neptune fits the view and placeholder sizes are picked for
/// readability.

use orrery_engine::EntityId;

/// The bodies this orrery knows how to style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyKind {
    Sun,
    Mercury,
    Venus,
    Earth,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
}

impl BodyKind {
    pub const COUNT: usize = 9;

    pub const ALL: [BodyKind; Self::COUNT] = [
        BodyKind::Sun,
        BodyKind::Mercury,
        BodyKind::Venus,
        BodyKind::Earth,
        BodyKind::Mars,
        BodyKind::Jupiter,
        BodyKind::Saturn,
        BodyKind::Uranus,
        BodyKind::Neptune,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BodyKind::Sun => "Sun",
            BodyKind::Mercury => "Mercury",
            BodyKind::Venus => "Venus",
            BodyKind::Earth => "Earth",
            BodyKind::Mars => "Mars",
            BodyKind::Jupiter => "Jupiter",
            BodyKind::Saturn => "Saturn",
            BodyKind::Uranus => "Uranus",
            BodyKind::Neptune => "Neptune",
        }
    }

    /// Case-insensitive lookup.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// How a body's orbit path is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrbitStyle {
    /// Opaque ring, r ± 0.2.
    Plain,
    /// Half-transparent ring, r ± 0.5.
    Highlighted,
    /// Dashed circle.
    Dashed,
}

/// Everything about a body's look that is not part of its orbit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyStyle {
    /// Placeholder sphere color, 0xRRGGBB.
    pub color: u32,
    /// Placeholder sphere radius.
    pub size: f32,
    /// Uniform scale applied to a loaded model.
    pub model_scale: f32,
    /// Speed at 100% on the speed slider.
    pub base_rate: f32,
    /// Skip loading and always use the placeholder sphere.
    pub always_placeholder: bool,
    /// Placeholder glows in its own color.
    pub light_source: bool,
    pub orbit: OrbitStyle,
}

/// Used for any name the style table does not know.
pub const DEFAULT_STYLE: BodyStyle = BodyStyle {
    color: 0xFFFFFF,
    size: 3.0,
    model_scale: 1.0,
    base_rate: 1.0,
    always_placeholder: false,
    light_source: false,
    orbit: OrbitStyle::Plain,
};

const fn planet(color: u32, size: f32, model_scale: f32, base_rate: f32) -> BodyStyle {
    BodyStyle {
        color,
        size,
        model_scale,
        base_rate,
        ..DEFAULT_STYLE
    }
}

/// Indexed by `BodyKind::index`.
const STYLES: [BodyStyle; BodyKind::COUNT] = [
    BodyStyle {
        light_source: true,
        ..planet(0xFDB813, 20.0, 4.0, 0.002)
    },
    BodyStyle {
        always_placeholder: true,
        orbit: OrbitStyle::Highlighted,
        ..planet(0x8C7853, 3.5, 0.1, 4.1)
    },
    planet(0xFFC649, 4.0, 0.1, 1.6),
    planet(0x6B93D6, 3.0, 0.1, 1.0),
    BodyStyle {
        always_placeholder: true,
        ..planet(0xCD5C5C, 4.0, 0.1, 0.8)
    },
    planet(0xDEB887, 3.8, 0.05, 0.4),
    planet(0xF4C542, 3.2, 0.05, 0.3),
    planet(0xB2E2E2, 2.8, 0.05, 0.2),
    planet(0x4169E1, 12.0, 0.6, 0.1),
];

pub fn style_for(kind: BodyKind) -> &'static BodyStyle {
    &STYLES[kind.index()]
}

/// Style for a body name, falling back to [`DEFAULT_STYLE`].
pub fn style_for_name(name: &str) -> &'static BodyStyle {
    BodyKind::from_name(name).map_or(&DEFAULT_STYLE, style_for)
}

/// One registry entry. Immutable for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyDesc {
    pub name: &'static str,
    /// Orbit radius; 0 for the central body.
    pub radius: f32,
    /// Speed before any slider is bound.
    pub speed: f32,
    /// Initial angular offset in degrees.
    pub offset_deg: f32,
    pub path: &'static str,
    pub description: &'static str,
}

impl BodyDesc {
    pub fn offset_radians(&self) -> f32 {
        self.offset_deg.to_radians()
    }

    pub fn is_central(&self) -> bool {
        self.radius <= 0.0
    }

    pub fn style(&self) -> &'static BodyStyle {
        style_for_name(self.name)
    }
}

/// The central body first, then the planets outward.
pub const REGISTRY: [BodyDesc; BodyKind::COUNT] = [
    BodyDesc {
        name: "Sun",
        radius: 0.0,
        speed: 1.0,
        offset_deg: 0.0,
        path: "models/a_sun/model.json",
        description: "The Sun is the star at the center of our solar system.",
    },
    BodyDesc {
        name: "Mercury",
        radius: 65.0,
        speed: 4.1,
        offset_deg: 0.0,
        path: "models/planets/b_mercury/model.json",
        description: "Mercury is the smallest planet and closest to the Sun.",
    },
    BodyDesc {
        name: "Venus",
        radius: 80.0,
        speed: 1.0,
        offset_deg: 45.0,
        path: "models/planets/c_venus/model.json",
        description: "Venus is known for its thick, toxic atmosphere.",
    },
    BodyDesc {
        name: "Earth",
        radius: 110.0,
        speed: 1.0,
        offset_deg: 90.0,
        path: "models/planets/d_earth/model.json",
        description: "Earth is the only planet known to support life.",
    },
    BodyDesc {
        name: "Mars",
        radius: 140.0,
        speed: 0.8,
        offset_deg: 135.0,
        path: "models/planets/e_mars/model.json",
        description: "Mars is called the Red Planet due to its color.",
    },
    BodyDesc {
        name: "Jupiter",
        radius: 200.0,
        speed: 1.0,
        offset_deg: 180.0,
        path: "models/planets/f_jupiter/model.json",
        description: "Jupiter is the largest planet in our solar system.",
    },
    BodyDesc {
        name: "Saturn",
        radius: 230.0,
        speed: 1.0,
        offset_deg: 225.0,
        path: "models/planets/g_saturn/model.json",
        description: "Saturn is famous for its stunning ring system.",
    },
    BodyDesc {
        name: "Uranus",
        radius: 280.0,
        speed: 1.0,
        offset_deg: 270.0,
        path: "models/planets/h_uranus/model.json",
        description: "Uranus has a unique tilt, making it appear to roll.",
    },
    BodyDesc {
        name: "Neptune",
        radius: 330.0,
        speed: 1.0,
        offset_deg: 315.0,
        path: "models/planets/i_neptune/model.json",
        description: "Neptune is known for its deep blue color.",
    },
];

/// A registry entry plus the scene entities composed for it.
#[derive(Debug, Clone)]
pub struct Body {
    pub desc: BodyDesc,
    /// The body's one visual. Assigned once by the composer.
    pub entity: Option<EntityId>,
    pub orbit: Option<EntityId>,
}

impl Body {
    pub fn new(desc: BodyDesc) -> Self {
        Self {
            desc,
            entity: None,
            orbit: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_and_styles_line_up() {
        assert_eq!(REGISTRY.len(), BodyKind::COUNT);
        for (i, desc) in REGISTRY.iter().enumerate() {
            let kind = BodyKind::from_name(desc.name).unwrap();
            assert_eq!(kind.index(), i, "{} out of order", desc.name);
            assert_eq!(BodyKind::ALL[i], kind);
        }
    }

    #[test]
    fn central_body_comes_first() {
        assert!(REGISTRY[0].is_central());
        assert!(REGISTRY[1..].iter().all(|d| !d.is_central()));
    }

    #[test]
    fn names_are_unique_case_insensitively() {
        for (i, a) in REGISTRY.iter().enumerate() {
            for b in &REGISTRY[i + 1..] {
                assert!(!a.name.eq_ignore_ascii_case(b.name));
            }
        }
    }

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(BodyKind::from_name("mars"), Some(BodyKind::Mars));
        assert_eq!(BodyKind::from_name("NEPTUNE"), Some(BodyKind::Neptune));
        assert_eq!(BodyKind::from_name("Pluto"), None);
    }

    #[test]
    fn unknown_names_get_default_style() {
        let style = style_for_name("Pluto");
        assert_eq!(style, &DEFAULT_STYLE);
        assert_eq!(style.size, 3.0);
        assert_eq!(style.color, 0xFFFFFF);
        assert_eq!(style.model_scale, 1.0);
    }

    #[test]
    fn style_flags_are_data_driven() {
        assert!(style_for(BodyKind::Sun).light_source);
        assert!(style_for(BodyKind::Mercury).always_placeholder);
        assert!(style_for(BodyKind::Mars).always_placeholder);
        assert_eq!(style_for(BodyKind::Mercury).orbit, OrbitStyle::Highlighted);
        assert_eq!(style_for(BodyKind::Earth).orbit, OrbitStyle::Plain);
        let glowing = BodyKind::ALL.iter().filter(|k| style_for(**k).light_source).count();
        assert_eq!(glowing, 1);
    }

    #[test]
    fn offsets_convert_to_radians() {
        let earth = &REGISTRY[BodyKind::Earth.index()];
        assert!((earth.offset_radians() - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }
}
