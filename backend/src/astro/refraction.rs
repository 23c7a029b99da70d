//! Atmospheric refraction.

/// Surface conditions used to bend altitudes for atmospheric refraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Atmosphere {
    pub temperature_c: f64,
    pub pressure_mbar: f64,
}

impl Default for Atmosphere {
    fn default() -> Self {
        Self {
            temperature_c: 10.0,
            pressure_mbar: 1010.0,
        }
    }
}

impl Atmosphere {
    /// Refraction in degrees to add to a geometric altitude.
    ///
    /// Sæmundsson's formula for true altitudes, scaled for pressure and
    /// temperature. Objects more than a degree below the horizon are left
    /// alone.
    pub fn refraction_deg(&self, true_altitude_deg: f64) -> f64 {
        if true_altitude_deg < -1.0 {
            return 0.0;
        }
        let h = true_altitude_deg.min(90.0);
        let arcmin = 1.02 / (h + 10.3 / (h + 5.11)).to_radians().tan();
        let scale = (self.pressure_mbar / 1010.0) * (283.0 / (273.0 + self.temperature_c));
        (arcmin * scale / 60.0).max(0.0)
    }

    pub fn apparent_altitude(&self, true_altitude_deg: f64) -> f64 {
        (true_altitude_deg + self.refraction_deg(true_altitude_deg)).min(90.0)
    }
}
