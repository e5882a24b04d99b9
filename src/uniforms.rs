/// The fixed set of uniforms the effect feeds to the fragment shader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Uniform {
    /// Milliseconds since page load.
    Time,
    /// Canvas width divided by height.
    Ratio,
    /// Milliseconds since the last click. Never written before the first click.
    ClickTime,
    /// Smoothed pointer, normalised and y-flipped.
    Pointer,
    /// Last click position, normalised and y-flipped.
    Click,
    /// 0.0 (opaque) or 1.0 (transparent).
    Transparency,
}

impl Uniform {
    pub const ALL: [Uniform; 6] = [
        Uniform::Time,
        Uniform::Ratio,
        Uniform::ClickTime,
        Uniform::Pointer,
        Uniform::Click,
        Uniform::Transparency,
    ];

    /// Name the shader declares the uniform under.
    pub fn name(self) -> &'static str {
        match self {
            Uniform::Time => "u_time",
            Uniform::Ratio => "u_ratio",
            Uniform::ClickTime => "u_click_time",
            Uniform::Pointer => "u_pointer",
            Uniform::Click => "u_click",
            Uniform::Transparency => "u_transparency",
        }
    }

    /// Number of float components.
    pub fn components(self) -> usize {
        match self {
            Uniform::Pointer | Uniform::Click => 2,
            _ => 1,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Uniform locations resolved once after the program links.
///
/// `L` is the backend's location handle (`WebGlUniformLocation` in the
/// browser). A slot that failed to resolve stays `None`; writes through it are
/// dropped the same way WebGL drops writes to a null location.
#[derive(Debug, Clone)]
pub struct UniformRegistry<L> {
    slots: [Option<L>; 6],
}

impl<L> Default for UniformRegistry<L> {
    fn default() -> Self {
        Self {
            slots: [None, None, None, None, None, None],
        }
    }
}

impl<L> UniformRegistry<L> {
    /// Looks every uniform up by name exactly once.
    ///
    /// Returns the registry together with the uniforms `lookup` could not find.
    pub fn resolve<F>(mut lookup: F) -> (Self, Vec<Uniform>)
    where
        F: FnMut(&str) -> Option<L>,
    {
        let mut registry = Self::default();
        let mut missing = Vec::new();
        for uniform in Uniform::ALL {
            match lookup(uniform.name()) {
                Some(location) => registry.slots[uniform.index()] = Some(location),
                None => missing.push(uniform),
            }
        }
        (registry, missing)
    }

    pub fn get(&self, uniform: Uniform) -> Option<&L> {
        self.slots[uniform.index()].as_ref()
    }

    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }
}
