/// What the viewport shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Ray tracing with diffuse + ambient lighting and shadow rays
    Raytrace,
    /// Ray tracing lit by gathering photons
    #[default]
    PhotonLitRaytrace,
    /// The photons themselves, projected as points
    PhotonScatter3D,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Raytrace, Mode::PhotonLitRaytrace, Mode::PhotonScatter3D];

    /// Mode bound to a number key.
    pub fn from_key(key: char) -> Option<Mode> {
        match key {
            '1' => Some(Mode::Raytrace),
            '2' => Some(Mode::PhotonLitRaytrace),
            '3' => Some(Mode::PhotonScatter3D),
            _ => None,
        }
    }

    /// Mode of the panel button under `x`, given the right edge of each button zone.
    pub fn from_button_x(x: f32, boundaries: &[f32; 3]) -> Option<Mode> {
        Mode::ALL
            .into_iter()
            .zip(boundaries.iter())
            .find(|(_, edge)| x < **edge)
            .map(|(mode, _)| mode)
    }

    /// Visible points are lit from the photon map.
    pub fn lights_with_photons(&self) -> bool {
        matches!(self, Mode::PhotonLitRaytrace)
    }

    pub fn is_scatter_view(&self) -> bool {
        matches!(self, Mode::PhotonScatter3D)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mode::Raytrace => "Ray Tracing",
            Mode::PhotonLitRaytrace => "Photon Mapping",
            Mode::PhotonScatter3D => "Photon Scatter",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDARIES: [f32; 3] = [230.0, 283.0, 513.0];

    #[test]
    fn test_from_key() {
        assert_eq!(Mode::from_key('1'), Some(Mode::Raytrace));
        assert_eq!(Mode::from_key('2'), Some(Mode::PhotonLitRaytrace));
        assert_eq!(Mode::from_key('3'), Some(Mode::PhotonScatter3D));
        assert_eq!(Mode::from_key('0'), None);
    }

    #[test]
    fn test_from_button_x() {
        assert_eq!(Mode::from_button_x(0.0, &BOUNDARIES), Some(Mode::Raytrace));
        assert_eq!(Mode::from_button_x(229.0, &BOUNDARIES), Some(Mode::Raytrace));
        assert_eq!(Mode::from_button_x(230.0, &BOUNDARIES), Some(Mode::PhotonLitRaytrace));
        assert_eq!(Mode::from_button_x(290.0, &BOUNDARIES), Some(Mode::PhotonScatter3D));
        assert_eq!(Mode::from_button_x(513.0, &BOUNDARIES), None);
    }

    #[test]
    fn test_default_is_photon_lit() {
        let mode = Mode::default();
        assert!(mode.lights_with_photons());
        assert!(!mode.is_scatter_view());
    }
}
