pub const MAX_SCALE_BOOST: f64 = 0.18;
pub const MIN_OPACITY: f64 = 0.3;
pub const HIGHLIGHT_THRESHOLD: f64 = 0.2;

/// Horizontal extent of an element, in client coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Span {
    pub left: f64,
    pub width: f64,
}

impl Span {
    pub fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }

    pub fn center(&self) -> f64 {
        self.left + self.width / 2.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PillFrame {
    pub distance: f64,
    pub normalized: f64,
    pub scale: f64,
    pub opacity: f64,
    pub highlighted: bool,
}

impl PillFrame {
    pub fn treatment(&self) -> &'static PillTreatment {
        if self.highlighted {
            &ACTIVE_TREATMENT
        } else {
            &MUTED_TREATMENT
        }
    }

    pub fn transform(&self) -> String {
        format!("scale({})", self.scale)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct PillTreatment {
    pub background: &'static str,
    pub color: &'static str,
    pub border_color: &'static str,
    pub box_shadow: &'static str,
    pub filter: &'static str,
    pub z_index: &'static str,
}

impl PillTreatment {
    pub fn properties(&self) -> [(&'static str, &'static str); 6] {
        [
            ("background", self.background),
            ("color", self.color),
            ("border-color", self.border_color),
            ("box-shadow", self.box_shadow),
            ("filter", self.filter),
            ("z-index", self.z_index),
        ]
    }
}

pub static ACTIVE_TREATMENT: PillTreatment = PillTreatment {
    background: "rgba(217, 176, 140, 0.12)",
    color: "#F4D4A8",
    border_color: "#F4D4A8",
    box_shadow: "inset 0 0 20px rgba(217, 176, 140, 0.3), 0 0 30px rgba(217, 176, 140, 0.2)",
    filter: "brightness(1.15)",
    z_index: "10",
};

pub static MUTED_TREATMENT: PillTreatment = PillTreatment {
    background: "transparent",
    color: "#B7C9C4",
    border_color: "transparent",
    box_shadow: "none",
    filter: "brightness(1)",
    z_index: "1",
};

/// Index of the pill whose centre is nearest `center_x`; ties keep the
/// earliest pill.
pub fn nearest_pill(center_x: f64, pills: &[Span]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, pill) in pills.iter().enumerate() {
        let dist = (center_x - pill.center()).abs();
        match best {
            Some((_, min)) if dist >= min => {}
            _ => best = Some((idx, dist)),
        }
    }
    best.map(|(idx, _)| idx)
}

/// Scale, opacity and highlight for every pill relative to the wrapper centre.
pub fn layout_pills(wrapper: Span, pills: &[Span]) -> Vec<PillFrame> {
    let center_x = wrapper.center();
    let max_distance = wrapper.width / 2.0;
    let nearest = nearest_pill(center_x, pills);
    pills
        .iter()
        .enumerate()
        .map(|(idx, pill)| {
            let distance = (center_x - pill.center()).abs();
            let normalized = if max_distance > 0.0 {
                (distance / max_distance).min(1.0)
            } else {
                1.0
            };
            let closeness = 1.0 - normalized;
            PillFrame {
                distance,
                normalized,
                scale: 1.0 + MAX_SCALE_BOOST * closeness,
                opacity: MIN_OPACITY + (1.0 - MIN_OPACITY) * closeness,
                highlighted: nearest == Some(idx) && normalized < HIGHLIGHT_THRESHOLD,
            }
        })
        .collect()
}
