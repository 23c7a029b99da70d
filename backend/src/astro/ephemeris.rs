//! siderust-backed implementation of [`EphemerisProvider`].

use std::ops::RangeInclusive;

use siderust::astro::proper_motion::{propagate_space_motion, StarSpaceMotion};
use siderust::bodies::solar_system::{Jupiter, Mars, Mercury, Moon, Saturn, Sun, Venus};
use siderust::coordinates::centers::{Geocentric, Geodetic};
use siderust::coordinates::frames::ECEF;
use siderust::coordinates::transform::{Transform, TransformFrame};
use siderust::coordinates::{cartesian, spherical};
use siderust::event::horizontal::{
    equatorial_to_horizontal, geocentric_j2000_to_apparent_topocentric, star_horizontal,
};
use siderust::qtty::angular_rate::AngularRate;
use siderust::qtty::velocity::Velocity;
use siderust::qtty::{AstronomicalUnit, Degrees, Kilometer, Meters, MilliArcseconds};
use siderust::time::{JulianDate, TimeContext};
use tracing::trace;

use crate::engine::EphemerisProvider;
use crate::error::{SkyMapError, SkyMapResult};
use crate::models::{
    CatalogPosition, CelestialBody, ObservationTime, Observer, SkyPosition, StarCatalogEntry,
    Target,
};

/// Calendar years the ephemeris answers for.
///
/// Outside this window the UTC to TT offset is an extrapolation and the
/// truncated lunar theory drifts by more than a tenth of a degree.
pub const SUPPORTED_YEARS: RangeInclusive<i32> = 1600..=2150;

/// Light travel time for one astronomical unit, days.
const LIGHT_DAYS_PER_AU: f64 = 0.005_775_518_331_436_995;

const LIGHT_TIME_ITERATIONS: usize = 2;

const MAS_PER_DEGREE: f64 = 3_600_000.0;

const J2000_JD: f64 = 2_451_545.0;

const DAYS_PER_JULIAN_YEAR: f64 = 365.25;

type Site = Geodetic<ECEF>;

/// Apparent topocentric positions from siderust.
///
/// Refraction is off unless an [`Atmosphere`](super::Atmosphere) is supplied.
#[derive(Debug, Clone, Default)]
pub struct SiderustEphemeris {
    atmosphere: Option<super::Atmosphere>,
}

impl SiderustEphemeris {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_refraction(atmosphere: super::Atmosphere) -> Self {
        Self {
            atmosphere: Some(atmosphere),
        }
    }

    pub fn atmosphere(&self) -> Option<&super::Atmosphere> {
        self.atmosphere.as_ref()
    }

    fn finish(&self, altitude_deg: f64, azimuth_deg: f64) -> SkyMapResult<SkyPosition> {
        let altitude = match &self.atmosphere {
            Some(atmosphere) => atmosphere.apparent_altitude(altitude_deg),
            None => altitude_deg,
        };
        SkyPosition::new(altitude, azimuth_deg)
    }

    fn star(
        &self,
        star: &StarCatalogEntry,
        site: &Site,
        jd: JulianDate,
    ) -> SkyMapResult<SkyPosition> {
        let (ra, dec) = star_mean_position(&star.position, jd);
        let direction = star_horizontal(ra, dec, site, jd);
        self.finish(direction.alt().value(), direction.az().value())
    }
}

impl EphemerisProvider for SiderustEphemeris {
    fn altaz(
        &self,
        target: Target<'_>,
        observer: &Observer,
        time: &ObservationTime,
    ) -> SkyMapResult<SkyPosition> {
        let jd = julian_date(time)?;
        let site = observer_site(observer);
        let position = match target {
            Target::Body(body) => {
                let (alt, az) = body_horizontal(body, site, jd);
                self.finish(alt, az)
            }
            Target::Star(star) => self.star(star, &site, jd),
        }?;
        trace!(
            target_name = %target.label(),
            alt = position.altitude.value(),
            az = position.azimuth.value(),
            "projected"
        );
        Ok(position)
    }

    fn altaz_stars(
        &self,
        stars: &[&StarCatalogEntry],
        observer: &Observer,
        time: &ObservationTime,
    ) -> Vec<SkyMapResult<SkyPosition>> {
        let jd = match julian_date(time) {
            Ok(jd) => jd,
            Err(e) => {
                return stars
                    .iter()
                    .map(|_| Err(SkyMapError::Ephemeris(e.to_string())))
                    .collect()
            }
        };
        let site = observer_site(observer);
        stars.iter().map(|star| self.star(star, &site, jd)).collect()
    }

    fn supported_years(&self) -> RangeInclusive<i32> {
        SUPPORTED_YEARS
    }

    fn name(&self) -> &'static str {
        "siderust"
    }
}

/// TT Julian Date of a UTC observation instant.
fn julian_date(time: &ObservationTime) -> SkyMapResult<JulianDate> {
    let ctx = TimeContext::new().allow_pre_definition_utc();
    JulianDate::try_from_chrono_with(time.to_datetime(), &ctx)
        .map_err(|e| SkyMapError::Ephemeris(format!("time conversion for {}: {}", time, e)))
}

fn observer_site(observer: &Observer) -> Site {
    Geodetic::<ECEF>::new(
        Degrees::new(observer.longitude.value()),
        Degrees::new(observer.latitude.value()),
        Meters::new(observer.elevation_m),
    )
}

/// Altitude and azimuth in degrees of a solar-system body.
fn body_horizontal(body: CelestialBody, site: Site, jd: JulianDate) -> (f64, f64) {
    match body {
        CelestialBody::Sun => {
            let pos = Sun::get_horizontal::<AstronomicalUnit>(jd, site);
            (pos.alt().value(), pos.az().value())
        }
        CelestialBody::Moon => {
            let pos = Moon::get_horizontal::<Kilometer>(jd, site);
            (pos.alt().value(), pos.az().value())
        }
        CelestialBody::Mercury => planet_horizontal(Mercury::vsop87a, site, jd),
        CelestialBody::Venus => planet_horizontal(Venus::vsop87a, site, jd),
        CelestialBody::Mars => planet_horizontal(Mars::vsop87a, site, jd),
        CelestialBody::Jupiter => planet_horizontal(Jupiter::vsop87a, site, jd),
        CelestialBody::Saturn => planet_horizontal(Saturn::vsop87a, site, jd),
    }
}

type HeliocentricEcliptic = cartesian::position::EclipticMeanJ2000<AstronomicalUnit>;

/// Planet seen from the site, corrected for light time.
///
/// The heliocentric position is evaluated at the retarded instant and then
/// shifted to the geocentre of the observation instant.
fn planet_horizontal(
    heliocentric: fn(JulianDate) -> HeliocentricEcliptic,
    site: Site,
    jd: JulianDate,
) -> (f64, f64) {
    let geocentric = |emitted: JulianDate| {
        let ecliptic: cartesian::position::EclipticMeanJ2000<AstronomicalUnit, Geocentric> =
            heliocentric(emitted).transform(jd);
        let equatorial: cartesian::position::EquatorialMeanJ2000<AstronomicalUnit, Geocentric> =
            ecliptic.to_frame();
        equatorial
    };

    let mut geo = geocentric(jd);
    for _ in 0..LIGHT_TIME_ITERATIONS {
        let (x, y, z) = (geo.x().value(), geo.y().value(), geo.z().value());
        let distance_au = (x * x + y * y + z * z).sqrt();
        geo = geocentric(JulianDate::new(jd.value() - distance_au * LIGHT_DAYS_PER_AU));
    }

    let topocentric = geocentric_j2000_to_apparent_topocentric(&geo, site, jd);
    let pos = equatorial_to_horizontal(&topocentric, site, jd);
    (pos.alt().value(), pos.az().value())
}

/// Mean J2000 right ascension and declination of a star at `jd`.
///
/// Stars with a measured parallax get full space motion; the rest are moved
/// linearly by their proper motion.
fn star_mean_position(position: &CatalogPosition, jd: JulianDate) -> (Degrees, Degrees) {
    let epoch = JulianDate::new(J2000_JD + (position.epoch_year - 2000.0) * DAYS_PER_JULIAN_YEAR);
    let ra = Degrees::new(position.ra.value());
    let dec = Degrees::new(position.dec.value());

    if position.parallax_mas > 0.0 {
        let mean = spherical::position::EquatorialMeanJ2000::<AstronomicalUnit>::new(ra, dec, 1.0);
        let motion = StarSpaceMotion {
            pm_ra_cos_dec: AngularRate::new(position.pm_ra_mas_per_year),
            pm_dec: AngularRate::new(position.pm_dec_mas_per_year),
            parallax: MilliArcseconds::new(position.parallax_mas),
            radial_velocity: Velocity::new(0.0),
        };
        if let Ok(moved) = propagate_space_motion(mean, motion, jd, epoch) {
            return (moved.ra(), moved.dec());
        }
    }

    let years = (jd.value() - epoch.value()) / DAYS_PER_JULIAN_YEAR;
    let dec_deg = position.dec.value() + position.pm_dec_mas_per_year * years / MAS_PER_DEGREE;
    let cos_dec = position.dec.value().to_radians().cos();
    let ra_deg = if cos_dec.abs() > 1e-12 {
        position.ra.value() + position.pm_ra_mas_per_year * years / MAS_PER_DEGREE / cos_dec
    } else {
        position.ra.value()
    };
    (Degrees::new(ra_deg), Degrees::new(dec_deg.clamp(-90.0, 90.0)))
}
