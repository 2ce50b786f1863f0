use super::rgba::Rgba8;

/// Which pass of a primitive a draw command belongs to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Pass {
    Fill,
    Stroke,
}

/// Current fill and stroke colors.
///
/// Persists across frames; only explicit fill/stroke calls change it.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DrawState {
    pub fill: Rgba8,
    pub stroke: Rgba8,
}

impl DrawState {
    pub fn set_fill(&mut self, color: impl Into<Rgba8>) {
        self.fill = color.into();
    }

    pub fn set_stroke(&mut self, color: impl Into<Rgba8>) {
        self.stroke = color.into();
    }

    /// Passes a primitive must issue, in drawing order, with their colors.
    ///
    /// Invisible (alpha 0) colors drop their pass; the result may be empty.
    pub fn passes(&self) -> impl Iterator<Item = (Pass, Rgba8)> {
        [(Pass::Fill, self.fill), (Pass::Stroke, self.stroke)]
            .into_iter()
            .filter(|(_, c)| !c.is_invisible())
    }
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            fill: Rgba8::WHITE,
            stroke: Rgba8::BLACK,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passes(state: &DrawState) -> Vec<Pass> {
        state.passes().map(|(p, _)| p).collect()
    }

    #[test]
    fn both_passes_by_default() {
        assert_eq!(passes(&DrawState::default()), vec![Pass::Fill, Pass::Stroke]);
    }

    #[test]
    fn zero_alpha_drops_its_pass() {
        let mut state = DrawState::default();
        state.set_stroke((0, 0, 0, 0));
        assert_eq!(passes(&state), vec![Pass::Fill]);

        state.set_fill(Rgba8::TRANSPARENT);
        assert!(passes(&state).is_empty());

        state.set_stroke(128);
        assert_eq!(passes(&state), vec![Pass::Stroke]);
    }
}
